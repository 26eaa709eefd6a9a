//! Copies coordinates from the external `latlongdata` table into posts.
//!
//! The source is read completely before anything is written. All writes go
//! through a single transaction that is committed once at the end, so a run
//! either applies every change or none.

use model::{import::ImportStatistics, latlong::RawCoordinates, post::Post, WithId};
use thiserror::Error;
use utility::{
    geo::{self, ToCoordinate},
    id::Id,
};

use crate::{
    columns::ColumnMappingError,
    database::{Database, DatabaseError, DatabaseTransaction, PostRepo},
    latlong::{self, SourceError},
    not_found_to_none,
};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to write posts")]
    Write(#[source] DatabaseError),
}

impl ImportError {
    pub fn is_mapping_error(&self) -> bool {
        matches!(self, Self::Source(SourceError::Mapping(_)))
    }

    /// The underlying cause, for error payloads.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Source(SourceError::Unavailable(why))
            | Self::Source(SourceError::Unreadable(why))
            | Self::Write(why) => Some(why.to_string()),
            Self::Source(SourceError::Mapping(ColumnMappingError::TooFewColumns {
                found,
            })) => Some(format!("{} columns found", found)),
        }
    }
}

/// What to do with one source row.
#[derive(Debug, Clone, PartialEq)]
enum RowDecision {
    SkipInvalid,
    SkipOutsideBoundingBox,
    Apply {
        id: i64,
        latitude: f64,
        longitude: f64,
    },
}

fn classify(row: &RawCoordinates) -> RowDecision {
    let id = match row.post_id.as_deref().and_then(latlong::parse_post_id) {
        Some(id) => id,
        None => {
            log::warn!("skipping row with invalid post_id={:?}", row.post_id);
            return RowDecision::SkipInvalid;
        }
    };

    if !geo::is_valid_coordinate(&row.latitude, &row.longitude) {
        log::warn!(
            "skipping post_id={} due to invalid coordinates: lat={:?}, lng={:?}",
            id,
            row.latitude,
            row.longitude
        );
        return RowDecision::SkipInvalid;
    }

    let (Some(latitude), Some(longitude)) =
        (row.latitude.to_coordinate(), row.longitude.to_coordinate())
    else {
        return RowDecision::SkipInvalid;
    };

    if !geo::is_in_philippines(latitude, longitude) {
        log::warn!(
            "skipping post_id={} as coordinates are outside the Philippines: ({},{})",
            id,
            latitude,
            longitude
        );
        return RowDecision::SkipOutsideBoundingBox;
    }

    RowDecision::Apply {
        id,
        latitude,
        longitude,
    }
}

/// Creates missing posts and moves existing ones whose coordinates changed.
/// Running it again on an unchanged source changes nothing.
pub async fn import_from_latlong<D: Database>(
    database: &D,
) -> Result<ImportStatistics, ImportError> {
    let source = latlong::read_source(&mut database.auto()).await?;

    let mut statistics = ImportStatistics {
        total_rows: source.rows.len() as u64,
        ..Default::default()
    };

    let mut tx = database.transaction().await.map_err(ImportError::Write)?;

    for row in source.rows.iter() {
        let (id, latitude, longitude) = match classify(row) {
            RowDecision::SkipInvalid => {
                statistics.skipped_invalid += 1;
                continue;
            }
            RowDecision::SkipOutsideBoundingBox => {
                statistics.skipped_outside_bbox += 1;
                continue;
            }
            RowDecision::Apply {
                id,
                latitude,
                longitude,
            } => (id, latitude, longitude),
        };

        let existing = not_found_to_none(tx.post(Id::new(id)).await)
            .map_err(ImportError::Write)?;
        match existing {
            Some(post) if post.content.is_at(latitude, longitude) => {}
            Some(post) => {
                log::info!(
                    "updating post {}: ({},{}) -> ({},{})",
                    id,
                    post.content.latitude,
                    post.content.longitude,
                    latitude,
                    longitude
                );
                tx.update_post_location(Id::new(id), latitude, longitude)
                    .await
                    .map_err(ImportError::Write)?;
                statistics.updated += 1;
            }
            None => {
                log::info!("creating post {} at ({},{})", id, latitude, longitude);
                tx.put_post(WithId::new(
                    Id::new(id),
                    Post::imported(id, latitude, longitude),
                ))
                .await
                .map_err(ImportError::Write)?;
                statistics.created += 1;
            }
        }
    }

    tx.commit().await.map_err(ImportError::Write)?;
    log::info!("import complete: {:?}", statistics);

    Ok(statistics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_classified_in_order_of_checks() {
        assert_eq!(
            classify(&RawCoordinates::new("x", "10", "120")),
            RowDecision::SkipInvalid
        );
        assert_eq!(
            classify(&RawCoordinates::new("5", "91", "120")),
            RowDecision::SkipInvalid
        );
        assert_eq!(
            classify(&RawCoordinates {
                post_id: Some("5".to_owned()),
                latitude: None,
                longitude: Some("120".to_owned()),
            }),
            RowDecision::SkipInvalid
        );
        assert_eq!(
            classify(&RawCoordinates::new("5", "40.7128", "-74.0060")),
            RowDecision::SkipOutsideBoundingBox
        );
        assert_eq!(
            classify(&RawCoordinates::new("7", "10.0", "120.0")),
            RowDecision::Apply {
                id: 7,
                latitude: 10.0,
                longitude: 120.0,
            }
        );
    }

    #[test]
    fn mapping_errors_are_recognizable() {
        let error = ImportError::from(SourceError::from(
            ColumnMappingError::TooFewColumns { found: 2 },
        ));
        assert!(error.is_mapping_error());
        assert_eq!(error.detail().as_deref(), Some("2 columns found"));
        assert_eq!(
            error.to_string(),
            "latlongdata must have at least 3 columns, found 2"
        );
    }
}
