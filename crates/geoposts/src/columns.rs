use thiserror::Error;

pub const POST_ID: &str = "post_id";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingStrategy {
    /// Every role matched a column name, ignoring case.
    ByName,
    /// The first three columns were taken in order.
    Positional,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnMappingError {
    #[error("latlongdata must have at least 3 columns, found {found}")]
    TooFewColumns { found: usize },
}

/// Which columns of the external table hold the post id and the coordinates.
/// Names are kept in their original spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub post_id: String,
    pub latitude: String,
    pub longitude: String,
    pub strategy: MappingStrategy,
}

impl ColumnMapping {
    pub fn resolve<S: AsRef<str>>(columns: &[S]) -> Result<Self, ColumnMappingError> {
        let by_name = |expected: &str| {
            columns
                .iter()
                .map(|column| column.as_ref())
                .find(|column| column.eq_ignore_ascii_case(expected))
                .map(|column| column.to_owned())
        };

        if let (Some(post_id), Some(latitude), Some(longitude)) =
            (by_name(POST_ID), by_name(LATITUDE), by_name(LONGITUDE))
        {
            return Ok(Self {
                post_id,
                latitude,
                longitude,
                strategy: MappingStrategy::ByName,
            });
        }

        match columns {
            [post_id, latitude, longitude, ..] => {
                log::warn!(
                    "column names do not match {:?}; assuming the first three columns are post id, latitude and longitude in order",
                    [POST_ID, LATITUDE, LONGITUDE]
                );
                Ok(Self {
                    post_id: post_id.as_ref().to_owned(),
                    latitude: latitude.as_ref().to_owned(),
                    longitude: longitude.as_ref().to_owned(),
                    strategy: MappingStrategy::Positional,
                })
            }
            _ => Err(ColumnMappingError::TooFewColumns {
                found: columns.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_name_regardless_of_order() {
        let mapping = ColumnMapping::resolve(&["latitude", "post_id", "longitude"]).unwrap();
        assert_eq!(mapping.strategy, MappingStrategy::ByName);
        assert_eq!(mapping.post_id, "post_id");
        assert_eq!(mapping.latitude, "latitude");
        assert_eq!(mapping.longitude, "longitude");
    }

    #[test]
    fn name_matching_ignores_case_but_keeps_spelling() {
        let mapping =
            ColumnMapping::resolve(&["ID", "Post_ID", "LATITUDE", "Longitude"]).unwrap();
        assert_eq!(mapping.strategy, MappingStrategy::ByName);
        assert_eq!(mapping.post_id, "Post_ID");
        assert_eq!(mapping.latitude, "LATITUDE");
        assert_eq!(mapping.longitude, "Longitude");
    }

    #[test]
    fn falls_back_to_positions() {
        let mapping = ColumnMapping::resolve(&["a", "b", "c"]).unwrap();
        assert_eq!(mapping.strategy, MappingStrategy::Positional);
        assert_eq!(
            (mapping.post_id.as_str(), mapping.latitude.as_str(), mapping.longitude.as_str()),
            ("a", "b", "c")
        );
    }

    #[test]
    fn partial_name_match_uses_positions_for_everything() {
        let mapping = ColumnMapping::resolve(&["lat", "post_id", "lng", "note"]).unwrap();
        assert_eq!(mapping.strategy, MappingStrategy::Positional);
        assert_eq!(mapping.post_id, "lat");
        assert_eq!(mapping.latitude, "post_id");
        assert_eq!(mapping.longitude, "lng");
    }

    #[test]
    fn too_few_columns_is_an_error() {
        assert_eq!(
            ColumnMapping::resolve(&["a", "b"]),
            Err(ColumnMappingError::TooFewColumns { found: 2 })
        );
        assert_eq!(
            ColumnMapping::resolve::<&str>(&[]),
            Err(ColumnMappingError::TooFewColumns { found: 0 })
        );
    }
}
