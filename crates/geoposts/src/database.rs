use std::{error, fmt, result};

use async_trait::async_trait;
use model::{
    connection::Connection,
    latlong::RawCoordinates,
    post::Post,
    user::User,
    WithId,
};
use utility::{geo::BoundingBox, id::Id};

use crate::columns::ColumnMapping;

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl DatabaseError {
    pub fn other<T: error::Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no matching row"),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::NotFound => None,
            Self::Other(why) => Some(why.as_ref()),
        }
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait PostRepo {
    async fn post(&mut self, id: Id<Post>) -> Result<WithId<Post>>;

    /// All posts, ordered by id.
    async fn posts(&mut self) -> Result<Vec<WithId<Post>>>;

    /// Posts inside the bounding box, filtered by the database.
    async fn posts_within(
        &mut self,
        bounding_box: BoundingBox,
    ) -> Result<Vec<WithId<Post>>>;

    async fn first_post(&mut self) -> Result<Option<WithId<Post>>>;

    async fn count_posts(&mut self) -> Result<u64>;

    async fn count_posts_within(&mut self, bounding_box: BoundingBox) -> Result<u64>;

    /// Inserts a post and lets the database assign its id.
    async fn insert_post(&mut self, post: Post) -> Result<WithId<Post>>;

    /// Inserts a post with a known id.
    async fn put_post(&mut self, post: WithId<Post>) -> Result<WithId<Post>>;

    async fn update_post_location(
        &mut self,
        id: Id<Post>,
        latitude: f64,
        longitude: f64,
    ) -> Result<()>;
}

#[async_trait]
pub trait ConnectionRepo {
    /// Stores the connection together with all of its points.
    async fn insert_connection(
        &mut self,
        connection: Connection,
    ) -> Result<WithId<Connection>>;

    /// Returns the connection with its points ordered by `seq`.
    async fn connection(&mut self, id: Id<Connection>) -> Result<WithId<Connection>>;

    /// Deletes the connection and every point it owns.
    async fn delete_connection(&mut self, id: Id<Connection>) -> Result<()>;
}

#[async_trait]
pub trait UserRepo {
    async fn insert_user(&mut self, user: User) -> Result<WithId<User>>;

    async fn user_by_username<S: Into<String> + Send>(
        &mut self,
        username: S,
    ) -> Result<WithId<User>>;
}

/// Read access to the externally owned `latlongdata` table. Never writes.
#[async_trait]
pub trait LatLongRepo {
    /// Column names in table order. Fails if the table does not exist.
    async fn latlong_columns(&mut self) -> Result<Vec<String>>;

    /// All rows, with the mapped columns read as text.
    async fn latlong_rows(
        &mut self,
        mapping: &ColumnMapping,
    ) -> Result<Vec<RawCoordinates>>;
}

pub trait DatabaseOperations:
    PostRepo + ConnectionRepo + UserRepo + LatLongRepo + Send
{
}

#[async_trait]
pub trait DatabaseTransaction {
    /// Changes made through the transaction are discarded unless committed.
    async fn commit(self) -> Result<()>;
}

#[async_trait]
pub trait Database: Clone + Send + Sync + Sized + 'static {
    type Transaction: DatabaseTransaction + DatabaseOperations + Send;
    type Autocommit: DatabaseOperations + Send;

    fn auto(&self) -> Self::Autocommit;

    async fn transaction(&self) -> Result<Self::Transaction>;
}
