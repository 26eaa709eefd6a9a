use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geoposts::database::{ConnectionRepo, DatabaseError, Result};
use model::{
    connection::{Connection, ConnectionPoint},
    WithId,
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::{
    queries::{connection, convert_error},
    SqlDatabaseAutocommit, SqlDatabaseTransaction,
};

#[derive(Debug, Clone, FromRow)]
pub struct ConnectionRow {
    pub id: i64,
    pub name: Option<String>,
    pub total_length: Option<f64>,
    /// RFC 3339.
    pub created_at: String,
    pub created_by: Option<i64>,
}

impl ConnectionRow {
    pub fn to_model(self, points: Vec<ConnectionPointRow>) -> Result<WithId<Connection>> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(DatabaseError::other)?
            .with_timezone(&Utc);

        Ok(WithId::new(
            Id::new(self.id),
            Connection {
                name: self.name,
                total_length: self.total_length,
                created_at,
                created_by: self.created_by.map(Id::new),
                points: points.into_iter().map(ConnectionPointRow::to_model).collect(),
            },
        ))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ConnectionPointRow {
    pub seq: i64,
    pub post_id: Option<i64>,
    pub lat: f64,
    pub lng: f64,
    pub segment_length: Option<f64>,
}

impl ConnectionPointRow {
    pub fn to_model(self) -> ConnectionPoint {
        ConnectionPoint {
            seq: self.seq,
            post_id: self.post_id.map(Id::new),
            latitude: self.lat,
            longitude: self.lng,
            segment_length: self.segment_length,
        }
    }
}

#[async_trait]
impl ConnectionRepo for SqlDatabaseAutocommit {
    async fn insert_connection(&mut self, element: Connection) -> Result<WithId<Connection>> {
        let mut pool_connection = self.pool.acquire().await.map_err(convert_error)?;
        connection::insert(&mut pool_connection, element).await
    }

    async fn connection(&mut self, id: Id<Connection>) -> Result<WithId<Connection>> {
        let mut pool_connection = self.pool.acquire().await.map_err(convert_error)?;
        connection::get(&mut pool_connection, id).await
    }

    async fn delete_connection(&mut self, id: Id<Connection>) -> Result<()> {
        let mut pool_connection = self.pool.acquire().await.map_err(convert_error)?;
        connection::delete(&mut pool_connection, id).await
    }
}

#[async_trait]
impl ConnectionRepo for SqlDatabaseTransaction {
    async fn insert_connection(&mut self, element: Connection) -> Result<WithId<Connection>> {
        connection::insert(&mut self.tx, element).await
    }

    async fn connection(&mut self, id: Id<Connection>) -> Result<WithId<Connection>> {
        connection::get(&mut self.tx, id).await
    }

    async fn delete_connection(&mut self, id: Id<Connection>) -> Result<()> {
        connection::delete(&mut self.tx, id).await
    }
}
