use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo::haversine_distance_meters,
    id::{HasId, Id},
};

use crate::{post::Post, user::User};

/// A line drawn on the map, e.g. a cable run between posts.
/// Owns its points; deleting a connection deletes them as well.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub name: Option<String>,
    /// Meters.
    pub total_length: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<Id<User>>,
    /// Ordered by `seq`.
    pub points: Vec<ConnectionPoint>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPoint {
    pub seq: i64,
    pub post_id: Option<Id<Post>>,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters from the previous point.
    pub segment_length: Option<f64>,
}

/// A point to route a connection through, either a post or a free location.
#[derive(Debug, Clone)]
pub struct Waypoint {
    pub post_id: Option<Id<Post>>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Waypoint {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            post_id: None,
            latitude,
            longitude,
        }
    }

    pub fn post(id: Id<Post>, post: &Post) -> Self {
        Self {
            post_id: Some(id),
            latitude: post.latitude,
            longitude: post.longitude,
        }
    }
}

impl Connection {
    /// Builds a connection through the waypoints in order. Segment lengths are
    /// great circle distances to the previous point; the first point starts at 0.
    pub fn through(
        name: Option<String>,
        created_by: Option<Id<User>>,
        waypoints: Vec<Waypoint>,
    ) -> Self {
        let mut previous: Option<(f64, f64)> = None;
        let points = waypoints
            .into_iter()
            .enumerate()
            .map(|(seq, waypoint)| {
                let segment_length = previous.map(|(latitude, longitude)| {
                    haversine_distance_meters(
                        latitude,
                        longitude,
                        waypoint.latitude,
                        waypoint.longitude,
                    )
                });
                previous = Some((waypoint.latitude, waypoint.longitude));
                ConnectionPoint {
                    seq: seq as i64,
                    post_id: waypoint.post_id,
                    latitude: waypoint.latitude,
                    longitude: waypoint.longitude,
                    segment_length: segment_length.or(Some(0.0)),
                }
            })
            .collect::<Vec<_>>();

        let mut connection = Self {
            name,
            total_length: None,
            created_at: Utc::now(),
            created_by,
            points,
        };
        connection.total_length = Some(connection.measured_length());
        connection
    }

    /// Sum of all known segment lengths.
    pub fn measured_length(&self) -> f64 {
        self.points
            .iter()
            .filter_map(|point| point.segment_length)
            .sum()
    }
}

impl HasId for Connection {
    type IdType = i64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_lengths_follow_point_order() {
        let connection = Connection::through(
            Some("feeder 1".to_owned()),
            None,
            vec![
                Waypoint::at(10.0, 120.0),
                Waypoint::at(10.001, 120.0),
                Waypoint::at(10.001, 120.001),
            ],
        );

        let seqs = connection.points.iter().map(|p| p.seq).collect::<Vec<_>>();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(connection.points[0].segment_length, Some(0.0));

        let first = connection.points[1].segment_length.unwrap();
        assert!((first - 111.19).abs() < 0.5, "got {first}");

        let total = connection.total_length.unwrap();
        let sum = connection.points[1].segment_length.unwrap()
            + connection.points[2].segment_length.unwrap();
        assert!((total - sum).abs() < 1e-9);
    }

    #[test]
    fn empty_connection_has_zero_length() {
        let connection = Connection::through(None, None, vec![]);
        assert!(connection.points.is_empty());
        assert_eq!(connection.total_length, Some(0.0));
    }

    #[test]
    fn waypoints_on_posts_keep_the_reference() {
        let post = Post::imported(4, 11.0, 125.0);
        let connection = Connection::through(
            None,
            None,
            vec![Waypoint::post(Id::new(4), &post), Waypoint::at(11.0, 125.1)],
        );
        assert_eq!(connection.points[0].post_id, Some(Id::new(4)));
        assert_eq!(connection.points[1].post_id, None);
    }
}
