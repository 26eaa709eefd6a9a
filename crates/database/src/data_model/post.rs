use async_trait::async_trait;
use geoposts::database::{PostRepo, Result};
use model::{post::Post, WithId};
use sqlx::prelude::FromRow;
use utility::{geo::BoundingBox, id::Id};

use crate::{
    queries::{convert_error, post},
    SqlDatabaseAutocommit, SqlDatabaseTransaction,
};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub status: Option<String>,
    pub area: Option<String>,
}

impl DatabaseRow for PostRow {
    type Model = Post;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        Post {
            name: self.name,
            latitude: self.lat,
            longitude: self.lng,
            status: self.status,
            area: self.area,
        }
    }
}

#[async_trait]
impl PostRepo for SqlDatabaseAutocommit {
    async fn post(&mut self, id: Id<Post>) -> Result<WithId<Post>> {
        post::get(&self.pool, id).await
    }

    async fn posts(&mut self) -> Result<Vec<WithId<Post>>> {
        post::get_all(&self.pool).await
    }

    async fn posts_within(&mut self, bounding_box: BoundingBox) -> Result<Vec<WithId<Post>>> {
        post::get_within(&self.pool, bounding_box).await
    }

    async fn first_post(&mut self) -> Result<Option<WithId<Post>>> {
        post::first(&self.pool).await
    }

    async fn count_posts(&mut self) -> Result<u64> {
        post::count(&self.pool).await
    }

    async fn count_posts_within(&mut self, bounding_box: BoundingBox) -> Result<u64> {
        post::count_within(&self.pool, bounding_box).await
    }

    async fn insert_post(&mut self, element: Post) -> Result<WithId<Post>> {
        post::insert(&self.pool, element).await
    }

    async fn put_post(&mut self, element: WithId<Post>) -> Result<WithId<Post>> {
        let mut connection = self.pool.acquire().await.map_err(convert_error)?;
        post::put(&mut connection, self.backend, element).await
    }

    async fn update_post_location(
        &mut self,
        id: Id<Post>,
        latitude: f64,
        longitude: f64,
    ) -> Result<()> {
        post::update_location(&self.pool, id, latitude, longitude).await
    }
}

#[async_trait]
impl PostRepo for SqlDatabaseTransaction {
    async fn post(&mut self, id: Id<Post>) -> Result<WithId<Post>> {
        post::get(&mut *self.tx, id).await
    }

    async fn posts(&mut self) -> Result<Vec<WithId<Post>>> {
        post::get_all(&mut *self.tx).await
    }

    async fn posts_within(&mut self, bounding_box: BoundingBox) -> Result<Vec<WithId<Post>>> {
        post::get_within(&mut *self.tx, bounding_box).await
    }

    async fn first_post(&mut self) -> Result<Option<WithId<Post>>> {
        post::first(&mut *self.tx).await
    }

    async fn count_posts(&mut self) -> Result<u64> {
        post::count(&mut *self.tx).await
    }

    async fn count_posts_within(&mut self, bounding_box: BoundingBox) -> Result<u64> {
        post::count_within(&mut *self.tx, bounding_box).await
    }

    async fn insert_post(&mut self, element: Post) -> Result<WithId<Post>> {
        post::insert(&mut *self.tx, element).await
    }

    async fn put_post(&mut self, element: WithId<Post>) -> Result<WithId<Post>> {
        post::put(&mut self.tx, self.backend, element).await
    }

    async fn update_post_location(
        &mut self,
        id: Id<Post>,
        latitude: f64,
        longitude: f64,
    ) -> Result<()> {
        post::update_location(&mut *self.tx, id, latitude, longitude).await
    }
}
