use model::{
    connection::Connection,
    import::ImportStatistics,
    latlong::NormalizedCoordinates,
    post::{Post, PostSeed},
    user::User,
    WithId,
};
use utility::{geo::BoundingBox, id::Id};

use crate::{
    database::{
        ConnectionRepo, Database, DatabaseTransaction, LatLongRepo, PostRepo, UserRepo,
    },
    import::{self, ImportError},
    latlong::{self, SourceError},
    RequestResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded(usize),
    AlreadySeeded,
}

/// Entry point for everything that reads or writes posts.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database + Send + Sync + Sized + 'static,
{
    id: String,
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new<S>(id: S, database: D) -> Self
    where
        S: Into<String>,
    {
        Self {
            id: id.into(),
            database,
        }
    }

    // posts

    /// All posts, or only those inside `bounding_box` if one is given.
    pub async fn get_posts(
        &self,
        bounding_box: Option<BoundingBox>,
    ) -> RequestResult<Vec<WithId<Post>>> {
        let mut auto = self.database.auto();
        let posts = match bounding_box {
            Some(bounding_box) => auto.posts_within(bounding_box).await?,
            None => auto.posts().await?,
        };
        Ok(posts)
    }

    pub async fn get_post(&self, id: Id<Post>) -> RequestResult<WithId<Post>> {
        Ok(self.database.auto().post(id).await?)
    }

    pub async fn first_post(&self) -> RequestResult<Option<WithId<Post>>> {
        Ok(self.database.auto().first_post().await?)
    }

    pub async fn count_posts(
        &self,
        bounding_box: Option<BoundingBox>,
    ) -> RequestResult<u64> {
        let mut auto = self.database.auto();
        let count = match bounding_box {
            Some(bounding_box) => auto.count_posts_within(bounding_box).await?,
            None => auto.count_posts().await?,
        };
        Ok(count)
    }

    /// Inserts all seeds in one transaction, but only into an empty post table.
    pub async fn seed_posts(&self, seeds: Vec<PostSeed>) -> RequestResult<SeedOutcome> {
        if self.database.auto().first_post().await?.is_some() {
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let mut tx = self.database.transaction().await?;
        let count = seeds.len();
        for seed in seeds {
            tx.insert_post(Post::from(seed)).await?;
        }
        tx.commit().await?;

        log::info!("seeded {} posts", count);
        Ok(SeedOutcome::Seeded(count))
    }

    // latlongdata

    pub async fn import_latlong(&self) -> Result<ImportStatistics, ImportError> {
        log::info!("[{}] importing from latlongdata", self.id);
        import::import_from_latlong(&self.database).await
    }

    pub async fn latlong_columns(&self) -> RequestResult<Vec<String>> {
        Ok(self.database.auto().latlong_columns().await?)
    }

    /// Rows of `latlongdata` with coerced fields, in table order.
    pub async fn latlong_data(&self) -> Result<Vec<NormalizedCoordinates>, SourceError> {
        let source = latlong::read_source(&mut self.database.auto()).await?;
        Ok(source.rows.iter().map(latlong::normalize).collect())
    }

    // connections

    pub async fn create_connection(
        &self,
        connection: Connection,
    ) -> RequestResult<WithId<Connection>> {
        let mut tx = self.database.transaction().await?;
        let connection = tx.insert_connection(connection).await?;
        tx.commit().await?;
        Ok(connection)
    }

    pub async fn get_connection(
        &self,
        id: Id<Connection>,
    ) -> RequestResult<WithId<Connection>> {
        Ok(self.database.auto().connection(id).await?)
    }

    pub async fn delete_connection(&self, id: Id<Connection>) -> RequestResult<()> {
        let mut tx = self.database.transaction().await?;
        tx.delete_connection(id).await?;
        tx.commit().await?;
        Ok(())
    }

    // users

    pub async fn create_user(&self, user: User) -> RequestResult<WithId<User>> {
        Ok(self.database.auto().insert_user(user).await?)
    }

    pub async fn get_user<S: Into<String> + Send>(
        &self,
        username: S,
    ) -> RequestResult<WithId<User>> {
        Ok(self.database.auto().user_by_username(username).await?)
    }
}
