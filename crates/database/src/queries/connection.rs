use chrono::SecondsFormat;
use geoposts::database::{DatabaseError, Result};
use model::{connection::Connection, WithId};
use sqlx::AnyConnection;
use utility::id::{Id, IdWrapper};

use crate::data_model::connection::{ConnectionPointRow, ConnectionRow};

use super::convert_error;

pub async fn insert(
    connection: &mut AnyConnection,
    element: Connection,
) -> Result<WithId<Connection>> {
    let id: i64 = sqlx::query_scalar(
        "
        INSERT INTO connection(name, total_length, created_at, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING id;
        ",
    )
    .bind(element.name.clone())
    .bind(element.total_length)
    .bind(element.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
    .bind(element.created_by.as_ref().raw())
    .fetch_one(&mut *connection)
    .await
    .map_err(convert_error)?;

    for point in element.points.iter() {
        sqlx::query(
            "
            INSERT INTO connection_point(
                connection_id,
                seq,
                post_id,
                lat,
                lng,
                segment_length
            )
            VALUES ($1, $2, $3, $4, $5, $6);
            ",
        )
        .bind(id)
        .bind(point.seq)
        .bind(point.post_id.as_ref().raw())
        .bind(point.latitude)
        .bind(point.longitude)
        .bind(point.segment_length)
        .execute(&mut *connection)
        .await
        .map_err(convert_error)?;
    }

    Ok(WithId::new(Id::new(id), element))
}

pub async fn get(
    connection: &mut AnyConnection,
    id: Id<Connection>,
) -> Result<WithId<Connection>> {
    let row: ConnectionRow = sqlx::query_as(
        "
        SELECT id, name, total_length, created_at, created_by
        FROM connection
        WHERE id = $1;
        ",
    )
    .bind(id.raw())
    .fetch_one(&mut *connection)
    .await
    .map_err(convert_error)?;

    let points: Vec<ConnectionPointRow> = sqlx::query_as(
        "
        SELECT seq, post_id, lat, lng, segment_length
        FROM connection_point
        WHERE connection_id = $1
        ORDER BY seq;
        ",
    )
    .bind(id.raw())
    .fetch_all(&mut *connection)
    .await
    .map_err(convert_error)?;

    row.to_model(points)
}

/// Points are deleted explicitly, cascading deletes may be disabled.
pub async fn delete(connection: &mut AnyConnection, id: Id<Connection>) -> Result<()> {
    sqlx::query("DELETE FROM connection_point WHERE connection_id = $1;")
        .bind(id.raw())
        .execute(&mut *connection)
        .await
        .map_err(convert_error)?;

    let result = sqlx::query("DELETE FROM connection WHERE id = $1;")
        .bind(id.raw())
        .execute(&mut *connection)
        .await
        .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}
