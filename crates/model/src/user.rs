use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::HasId;

pub const DEFAULT_ROLE: &str = "viewer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
}

impl User {
    pub fn new<S: Into<String>, H: Into<String>>(username: S, password_hash: H) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role: DEFAULT_ROLE.to_owned(),
        }
    }

    pub fn with_role<S: Into<String>>(mut self, role: S) -> Self {
        self.role = role.into();
        self
    }
}

impl HasId for User {
    type IdType = i64;
}
