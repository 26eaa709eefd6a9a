use async_trait::async_trait;
use geoposts::{
    columns::ColumnMapping,
    database::{LatLongRepo, Result},
};
use model::latlong::RawCoordinates;
use sqlx::{any::AnyRow, FromRow, Row};

use crate::{queries::latlong, SqlDatabaseAutocommit, SqlDatabaseTransaction};

/// The mapped columns of one `latlongdata` row as text. Cells are decoded by
/// their stored type, so floats keep every digit.
#[derive(Debug, Clone)]
pub struct LatLongRow {
    pub post_id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl<'r> FromRow<'r, AnyRow> for LatLongRow {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        Ok(Self {
            post_id: cell_as_text(row, "post_id"),
            latitude: cell_as_text(row, "latitude"),
            longitude: cell_as_text(row, "longitude"),
        })
    }
}

/// Tries float, integer and text in that order. `NULL` and anything else
/// (e.g. blobs) become `None`.
fn cell_as_text(row: &AnyRow, column: &str) -> Option<String> {
    if let Ok(value) = row.try_get::<Option<f64>, _>(column) {
        return value.map(|value| value.to_string());
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(column) {
        return value.map(|value| value.to_string());
    }
    row.try_get::<Option<String>, _>(column).ok().flatten()
}

impl From<LatLongRow> for RawCoordinates {
    fn from(row: LatLongRow) -> Self {
        Self {
            post_id: row.post_id,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[async_trait]
impl LatLongRepo for SqlDatabaseAutocommit {
    async fn latlong_columns(&mut self) -> Result<Vec<String>> {
        latlong::columns(&self.pool, self.backend).await
    }

    async fn latlong_rows(&mut self, mapping: &ColumnMapping) -> Result<Vec<RawCoordinates>> {
        latlong::rows(&self.pool, self.backend, mapping).await
    }
}

#[async_trait]
impl LatLongRepo for SqlDatabaseTransaction {
    async fn latlong_columns(&mut self) -> Result<Vec<String>> {
        latlong::columns(&mut *self.tx, self.backend).await
    }

    async fn latlong_rows(&mut self, mapping: &ColumnMapping) -> Result<Vec<RawCoordinates>> {
        latlong::rows(&mut *self.tx, self.backend, mapping).await
    }
}
