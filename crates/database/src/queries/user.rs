use geoposts::database::Result;
use model::{user::User, WithId};
use sqlx::{Any, Executor};

use crate::data_model::{user::UserRow, with_id};

use super::convert_error;

pub async fn insert<'c, E>(executor: E, user: User) -> Result<WithId<User>>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_as(
        "
        INSERT INTO \"user\"(username, password_hash, role)
        VALUES ($1, $2, $3)
        RETURNING id, username, password_hash, role;
        ",
    )
    .bind(user.username)
    .bind(user.password_hash)
    .bind(user.role)
    .fetch_one(executor)
    .await
    .map(|row: UserRow| with_id(row))
    .map_err(convert_error)
}

pub async fn get_by_username<'c, E, S>(executor: E, username: S) -> Result<WithId<User>>
where
    E: Executor<'c, Database = Any>,
    S: Into<String> + Send,
{
    sqlx::query_as(
        "
        SELECT id, username, password_hash, role
        FROM \"user\"
        WHERE username = $1;
        ",
    )
    .bind(username.into())
    .fetch_one(executor)
    .await
    .map(|row: UserRow| with_id(row))
    .map_err(convert_error)
}
