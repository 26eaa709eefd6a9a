use schemars::JsonSchema;
use serde::Serialize;
use std::fmt::Debug;
use utility::id::{HasId, Id};

pub use serde_with;

pub mod connection;
pub mod import;
pub mod latlong;
pub mod post;
pub mod user;

pub trait ExampleData {
    fn example_data() -> Self;
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub id: Id<V>,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V>
where
    V: HasId,
    V::IdType: Serialize + Debug + Clone,
{
    pub fn new(id: Id<V>, content: V) -> Self {
        Self { id, content }
    }
}
