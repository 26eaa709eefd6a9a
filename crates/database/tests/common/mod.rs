#![allow(dead_code)]

use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use database::{DatabaseConnectionInfo, SqlDatabase};
use geoposts::client::Client;

pub struct TempDatabase {
    pub client: Client<SqlDatabase>,
    path: PathBuf,
}

impl TempDatabase {
    pub async fn new(label: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "geoposts-{}-{}-{}.sqlite",
            label,
            std::process::id(),
            nanos
        ));
        let url = format!("sqlite://{}?mode=rwc", path.display());

        let database = SqlDatabase::connect(DatabaseConnectionInfo::Url(url))
            .await
            .expect("sqlite database should open and migrate");

        Self {
            client: Client::new(label, database),
            path,
        }
    }

    /// Runs a raw statement, e.g. to build the external `latlongdata` table.
    pub async fn execute(&self, statement: &str) {
        sqlx::query(statement)
            .execute(self.client.database.pool())
            .await
            .expect("statement should succeed");
    }

    /// Inserts a `latlongdata` row with bound values, so floats arrive bit for bit.
    pub async fn insert_latlong(&self, post_id: i64, latitude: f64, longitude: f64) {
        sqlx::query("INSERT INTO latlongdata(post_id, latitude, longitude) VALUES ($1, $2, $3);")
            .bind(post_id)
            .bind(latitude)
            .bind(longitude)
            .execute(self.client.database.pool())
            .await
            .expect("insert should succeed");
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {};", table))
            .fetch_one(self.client.database.pool())
            .await
            .expect("count should succeed")
    }

    pub async fn close(self) {
        self.client.database.pool().close().await;
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.path.clone().into_os_string();
            path.push(suffix);
            let _ = tokio::fs::remove_file(path).await;
        }
    }
}
