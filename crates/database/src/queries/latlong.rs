use std::{error::Error, fmt};

use geoposts::{
    columns::ColumnMapping,
    database::{DatabaseError, Result},
};
use model::latlong::RawCoordinates;
use sqlx::{Any, Executor};

use crate::{data_model::latlong::LatLongRow, Backend};

use super::{convert_error, quote_identifier};

pub const TABLE: &str = "latlongdata";

#[derive(Debug)]
pub struct TableMissing;

impl fmt::Display for TableMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table {} does not exist", TABLE)
    }
}

impl Error for TableMissing {}

/// Column names in table order. A table without columns does not exist.
pub async fn columns<'c, E>(executor: E, backend: Backend) -> Result<Vec<String>>
where
    E: Executor<'c, Database = Any>,
{
    let query = match backend {
        Backend::Postgres => {
            "
            SELECT CAST(column_name AS TEXT)
            FROM information_schema.columns
            WHERE table_name = 'latlongdata'
                AND table_schema = current_schema()
            ORDER BY ordinal_position;
            "
        }
        Backend::Sqlite => {
            "
            SELECT name
            FROM pragma_table_info('latlongdata')
            ORDER BY cid;
            "
        }
    };

    let columns: Vec<String> = sqlx::query_scalar(query)
        .fetch_all(executor)
        .await
        .map_err(convert_error)?;

    if columns.is_empty() {
        return Err(DatabaseError::other(TableMissing));
    }
    Ok(columns)
}

/// All rows with the mapped columns aliased to `post_id`, `latitude` and
/// `longitude`. SQLite columns are read as stored, since its text conversion
/// of floats keeps only 15 digits. Postgres casts to text, which is exact for
/// floating point and also covers types the `any` driver cannot decode.
pub async fn rows<'c, E>(
    executor: E,
    backend: Backend,
    mapping: &ColumnMapping,
) -> Result<Vec<RawCoordinates>>
where
    E: Executor<'c, Database = Any>,
{
    let select = |column: &str| match backend {
        Backend::Postgres => format!("CAST({} AS TEXT)", quote_identifier(column)),
        Backend::Sqlite => quote_identifier(column),
    };
    let query = format!(
        "
        SELECT
            {} AS post_id,
            {} AS latitude,
            {} AS longitude
        FROM {};
        ",
        select(&mapping.post_id),
        select(&mapping.latitude),
        select(&mapping.longitude),
        TABLE
    );

    sqlx::query_as(&query)
        .fetch_all(executor)
        .await
        .map(|rows: Vec<LatLongRow>| rows.into_iter().map(RawCoordinates::from).collect())
        .map_err(convert_error)
}
