use async_trait::async_trait;
use geoposts::database::{Result, UserRepo};
use model::{user::User, WithId};
use sqlx::prelude::FromRow;
use utility::id::Id;

use crate::{queries::user, SqlDatabaseAutocommit, SqlDatabaseTransaction};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl DatabaseRow for UserRow {
    type Model = User;

    fn get_id(&self) -> Id<Self::Model> {
        Id::new(self.id)
    }

    fn to_model(self) -> Self::Model {
        User {
            username: self.username,
            password_hash: self.password_hash,
            role: self.role,
        }
    }
}

#[async_trait]
impl UserRepo for SqlDatabaseAutocommit {
    async fn insert_user(&mut self, element: User) -> Result<WithId<User>> {
        user::insert(&self.pool, element).await
    }

    async fn user_by_username<S: Into<String> + Send>(
        &mut self,
        username: S,
    ) -> Result<WithId<User>> {
        user::get_by_username(&self.pool, username).await
    }
}

#[async_trait]
impl UserRepo for SqlDatabaseTransaction {
    async fn insert_user(&mut self, element: User) -> Result<WithId<User>> {
        user::insert(&mut *self.tx, element).await
    }

    async fn user_by_username<S: Into<String> + Send>(
        &mut self,
        username: S,
    ) -> Result<WithId<User>> {
        user::get_by_username(&mut *self.tx, username).await
    }
}
