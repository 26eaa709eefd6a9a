use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

/// A row of the externally owned `latlongdata` staging table, typed the way
/// the table is documented. The live table is not trusted to match this, so
/// imports read `RawCoordinates` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatLongData {
    pub post_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl HasId for LatLongData {
    type IdType = i64;
}

/// One `latlongdata` row with every mapped column read as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCoordinates {
    pub post_id: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl RawCoordinates {
    pub fn new<S: Into<String>>(post_id: S, latitude: S, longitude: S) -> Self {
        Self {
            post_id: Some(post_id.into()),
            latitude: Some(latitude.into()),
            longitude: Some(longitude.into()),
        }
    }
}

/// A `latlongdata` row after best effort coercion. Fields that could not be
/// coerced are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedCoordinates {
    pub post_id: Option<i64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}
