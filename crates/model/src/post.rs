use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::{
    geo::BoundingBox,
    id::{HasId, Id},
};

use crate::{ExampleData, WithId};

/// A named, geolocated record shown on the map. E.g., an electric pole.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: Option<String>,
    pub area: Option<String>,
}

impl Post {
    /// A post created from imported coordinates, named after its id.
    pub fn imported(id: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            name: format!("Post {}", id),
            latitude,
            longitude,
            status: None,
            area: None,
        }
    }

    /// Exact comparison, without any tolerance.
    pub fn is_at(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude == latitude && self.longitude == longitude
    }

    pub fn is_within(&self, bounding_box: &BoundingBox) -> bool {
        bounding_box.contains(self.latitude, self.longitude)
    }
}

impl HasId for Post {
    type IdType = i64;
}

impl ExampleData for Post {
    fn example_data() -> Self {
        Self {
            name: "Pole 0117".to_owned(),
            latitude: 11.2433,
            longitude: 125.0047,
            status: Some("active".to_owned()),
            area: Some("Tacloban".to_owned()),
        }
    }
}

/// The shape in which posts are handed to the map front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostMarker {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub status: Option<String>,
}

impl PostMarker {
    pub fn is_within(&self, bounding_box: &BoundingBox) -> bool {
        bounding_box.contains(self.lat, self.lng)
    }
}

impl From<WithId<Post>> for PostMarker {
    fn from(post: WithId<Post>) -> Self {
        Self {
            id: post.id.raw(),
            name: post.content.name,
            lat: post.content.latitude,
            lng: post.content.longitude,
            status: post.content.status,
        }
    }
}

impl ExampleData for PostMarker {
    fn example_data() -> Self {
        WithId::new(Id::new(117), Post::example_data()).into()
    }
}

/// A post as it appears in a seed fixture. Ids are assigned by the database.
#[derive(Debug, Clone, Deserialize)]
pub struct PostSeed {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
}

impl From<PostSeed> for Post {
    fn from(seed: PostSeed) -> Self {
        Self {
            name: seed.name,
            latitude: seed.lat,
            longitude: seed.lng,
            status: seed.status,
            area: seed.area,
        }
    }
}
