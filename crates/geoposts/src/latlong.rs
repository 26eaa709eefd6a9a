use model::latlong::{NormalizedCoordinates, RawCoordinates};
use thiserror::Error;
use utility::geo::ToCoordinate;

use crate::{
    columns::{ColumnMapping, ColumnMappingError, MappingStrategy},
    database::{DatabaseError, LatLongRepo},
};

/// Reasons the `latlongdata` table could not be read. None of them leave any
/// trace in the database.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("latlongdata table not found or DB error")]
    Unavailable(#[source] DatabaseError),

    #[error(transparent)]
    Mapping(#[from] ColumnMappingError),

    #[error("failed to select from latlongdata")]
    Unreadable(#[source] DatabaseError),
}

/// Everything read from `latlongdata` in one pass.
#[derive(Debug, Clone)]
pub struct SourceSnapshot {
    pub columns: Vec<String>,
    pub mapping: ColumnMapping,
    pub rows: Vec<RawCoordinates>,
}

pub async fn read_source<O>(operations: &mut O) -> Result<SourceSnapshot, SourceError>
where
    O: LatLongRepo + Send,
{
    let columns = operations.latlong_columns().await.map_err(|why| {
        log::error!("failed to read from latlongdata table: {}", why);
        SourceError::Unavailable(why)
    })?;
    log::info!("latlongdata columns detected: {:?}", columns);

    let mapping = ColumnMapping::resolve(columns.as_slice())?;
    if mapping.strategy == MappingStrategy::Positional {
        log::warn!("latlongdata column names not recognized, mapping by position");
    }
    log::info!(
        "using columns: post_id={}, latitude={}, longitude={}",
        mapping.post_id,
        mapping.latitude,
        mapping.longitude
    );

    let rows = operations.latlong_rows(&mapping).await.map_err(|why| {
        log::error!("failed to select from latlongdata: {}", why);
        SourceError::Unreadable(why)
    })?;

    Ok(SourceSnapshot {
        columns,
        mapping,
        rows,
    })
}

/// Parses a post id. Surrounding whitespace is ignored and integral floats
/// like `7.0` are accepted, anything else is rejected.
pub fn parse_post_id(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Some(id);
    }
    let float = raw.parse::<f64>().ok()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then_some(float as i64)
}

/// Best effort coercion of one row. Each field is coerced on its own; a
/// field that does not coerce becomes `None` without affecting the others.
pub fn normalize(raw: &RawCoordinates) -> NormalizedCoordinates {
    NormalizedCoordinates {
        post_id: raw.post_id.as_deref().and_then(parse_post_id),
        lat: raw.latitude.to_coordinate(),
        lng: raw.longitude.to_coordinate(),
    }
}
