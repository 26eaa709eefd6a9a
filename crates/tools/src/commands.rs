use std::{fs, io, path::Path};

use geoposts::{
    client::{Client, SeedOutcome},
    database::Database,
    import::ImportError,
    latlong::SourceError,
    RequestError,
};
use itertools::Itertools;
use model::post::PostSeed;
use thiserror::Error;
use utility::geo::PHILIPPINES;

use crate::cli::Commands;

const SAMPLE_SIZE: usize = 3;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not read {path}: {source}")]
    Fixture {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid fixture {path}: {source}")]
    FixtureFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error querying database: {0}")]
    Request(#[from] RequestError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

pub async fn run<D: Database>(client: &Client<D>, command: Commands) -> Result<String, ToolError> {
    match command {
        Commands::Seed { file } => seed(client, &file).await,
        Commands::Import => import(client).await,
        Commands::DescribeLatlong => describe_latlong(client).await,
        Commands::CheckLatlong => check_latlong(client).await,
        Commands::CheckPosts => check_posts(client).await,
        Commands::CheckPhCounts => check_ph_counts(client).await,
    }
}

pub async fn seed<D: Database>(client: &Client<D>, file: &Path) -> Result<String, ToolError> {
    if client.first_post().await?.is_some() {
        return Ok("posts already exist; skipping seed.".to_owned());
    }
    if !file.exists() {
        return Ok(format!("{} not found.", file.display()));
    }

    let path = file.display().to_string();
    let contents = fs::read_to_string(file).map_err(|source| ToolError::Fixture {
        path: path.clone(),
        source,
    })?;
    let seeds: Vec<PostSeed> = serde_json::from_str(&contents)
        .map_err(|source| ToolError::FixtureFormat { path, source })?;

    Ok(match client.seed_posts(seeds).await? {
        SeedOutcome::Seeded(count) => format!("seeded {} posts.", count),
        SeedOutcome::AlreadySeeded => "posts already exist; skipping seed.".to_owned(),
    })
}

pub async fn import<D: Database>(client: &Client<D>) -> Result<String, ToolError> {
    let statistics = client.import_latlong().await?;
    Ok(format!(
        "total rows: {}\nskipped (invalid): {}\nskipped (outside bbox): {}\nupdated: {}\ncreated: {}",
        statistics.total_rows,
        statistics.skipped_invalid,
        statistics.skipped_outside_bbox,
        statistics.updated,
        statistics.created
    ))
}

pub async fn describe_latlong<D: Database>(client: &Client<D>) -> Result<String, ToolError> {
    let columns = client.latlong_columns().await?;
    let mut out = String::from("latlongdata columns:");
    for column in columns {
        out.push_str(&format!("\n  {}", column));
    }
    Ok(out)
}

pub async fn check_latlong<D: Database>(client: &Client<D>) -> Result<String, ToolError> {
    let rows = client.latlong_data().await?;
    let mut out = format!("latlongdata count: {}", rows.len());
    match rows.first() {
        Some(row) => out.push_str(&format!(
            "\nfirst row: {} {} {}",
            display(row.post_id),
            display(row.lat),
            display(row.lng)
        )),
        None => out.push_str("\nfirst row: none"),
    }

    out.push('\n');
    out.push_str(&check_posts(client).await?);
    Ok(out)
}

pub async fn check_posts<D: Database>(client: &Client<D>) -> Result<String, ToolError> {
    let count = client.count_posts(None).await?;
    let mut out = format!("posts count: {}", count);
    match client.first_post().await? {
        Some(post) => out.push_str(&format!(
            "\nfirst post: {} {} {} {}",
            post.id, post.content.name, post.content.latitude, post.content.longitude
        )),
        None => out.push_str("\nfirst post: none"),
    }
    Ok(out)
}

pub async fn check_ph_counts<D: Database>(client: &Client<D>) -> Result<String, ToolError> {
    let total = client.count_posts(None).await?;
    let within = client.get_posts(Some(PHILIPPINES)).await?;

    let sample = within
        .iter()
        .take(SAMPLE_SIZE)
        .map(|post| {
            format!(
                "({}, {}, {})",
                post.id, post.content.latitude, post.content.longitude
            )
        })
        .join(", ");

    Ok(format!(
        "total posts: {}\nposts in PH bbox: {}\nsample: [{}]",
        total,
        within.len(),
        sample
    ))
}

fn display<T: ToString>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| "null".to_owned())
}
