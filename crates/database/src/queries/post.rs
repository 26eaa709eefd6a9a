use geoposts::database::Result;
use model::{post::Post, WithId};
use sqlx::{Any, AnyConnection, Executor};
use utility::{geo::BoundingBox, id::Id};

use crate::{
    data_model::{post::PostRow, with_id, with_ids},
    Backend,
};

use super::convert_error;

pub async fn get<'c, E>(executor: E, id: Id<Post>) -> Result<WithId<Post>>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_as(
        "
        SELECT id, name, lat, lng, status, area
        FROM post
        WHERE id = $1;
        ",
    )
    .bind(id.raw())
    .fetch_one(executor)
    .await
    .map(|row: PostRow| with_id(row))
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Post>>>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_as(
        "
        SELECT id, name, lat, lng, status, area
        FROM post
        ORDER BY id;
        ",
    )
    .fetch_all(executor)
    .await
    .map(|rows: Vec<PostRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn get_within<'c, E>(
    executor: E,
    bounding_box: BoundingBox,
) -> Result<Vec<WithId<Post>>>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_as(
        "
        SELECT id, name, lat, lng, status, area
        FROM post
        WHERE lat BETWEEN $1 AND $2
            AND lng BETWEEN $3 AND $4
        ORDER BY id;
        ",
    )
    .bind(bounding_box.min_latitude)
    .bind(bounding_box.max_latitude)
    .bind(bounding_box.min_longitude)
    .bind(bounding_box.max_longitude)
    .fetch_all(executor)
    .await
    .map(|rows: Vec<PostRow>| with_ids(rows))
    .map_err(convert_error)
}

pub async fn first<'c, E>(executor: E) -> Result<Option<WithId<Post>>>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_as(
        "
        SELECT id, name, lat, lng, status, area
        FROM post
        ORDER BY id
        LIMIT 1;
        ",
    )
    .fetch_optional(executor)
    .await
    .map(|row: Option<PostRow>| row.map(with_id))
    .map_err(convert_error)
}

pub async fn count<'c, E>(executor: E) -> Result<u64>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM post;")
        .fetch_one(executor)
        .await
        .map(|count: i64| count as u64)
        .map_err(convert_error)
}

pub async fn count_within<'c, E>(executor: E, bounding_box: BoundingBox) -> Result<u64>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_scalar(
        "
        SELECT COUNT(*)
        FROM post
        WHERE lat BETWEEN $1 AND $2
            AND lng BETWEEN $3 AND $4;
        ",
    )
    .bind(bounding_box.min_latitude)
    .bind(bounding_box.max_latitude)
    .bind(bounding_box.min_longitude)
    .bind(bounding_box.max_longitude)
    .fetch_one(executor)
    .await
    .map(|count: i64| count as u64)
    .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, post: Post) -> Result<WithId<Post>>
where
    E: Executor<'c, Database = Any>,
{
    sqlx::query_as(
        "
        INSERT INTO post(name, lat, lng, status, area)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, lat, lng, status, area;
        ",
    )
    .bind(post.name)
    .bind(post.latitude)
    .bind(post.longitude)
    .bind(post.status)
    .bind(post.area)
    .fetch_one(executor)
    .await
    .map(|row: PostRow| with_id(row))
    .map_err(convert_error)
}

/// Inserts a post with an explicit id. On Postgres the id sequence is moved
/// past it, so later inserts without an id do not collide.
pub async fn put(
    connection: &mut AnyConnection,
    backend: Backend,
    post: WithId<Post>,
) -> Result<WithId<Post>> {
    let row: PostRow = sqlx::query_as(
        "
        INSERT INTO post(id, name, lat, lng, status, area)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, lat, lng, status, area;
        ",
    )
    .bind(post.id.raw())
    .bind(post.content.name)
    .bind(post.content.latitude)
    .bind(post.content.longitude)
    .bind(post.content.status)
    .bind(post.content.area)
    .fetch_one(&mut *connection)
    .await
    .map_err(convert_error)?;

    if backend == Backend::Postgres {
        sqlx::query(
            "
            SELECT setval(
                pg_get_serial_sequence('post', 'id'),
                (SELECT MAX(id) FROM post)
            );
            ",
        )
        .execute(&mut *connection)
        .await
        .map_err(convert_error)?;
    }

    Ok(with_id(row))
}

pub async fn update_location<'c, E>(
    executor: E,
    id: Id<Post>,
    latitude: f64,
    longitude: f64,
) -> Result<()>
where
    E: Executor<'c, Database = Any>,
{
    let result = sqlx::query(
        "
        UPDATE post
        SET lat = $1,
            lng = $2
        WHERE id = $3;
        ",
    )
    .bind(latitude)
    .bind(longitude)
    .bind(id.raw())
    .execute(executor)
    .await
    .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(geoposts::database::DatabaseError::NotFound);
    }
    Ok(())
}
