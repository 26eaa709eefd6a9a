use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_SEED_FILE: &str = "data/sample_posts.json";

#[derive(Parser, Debug)]
#[command(name = "tools", version, about = "Maintenance commands for the post map")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Insert fixture posts into an empty post table.
    Seed {
        #[arg(long, default_value = DEFAULT_SEED_FILE)]
        file: PathBuf,
    },
    /// Copy coordinates from latlongdata into posts.
    Import,
    /// Print the columns of latlongdata.
    DescribeLatlong,
    /// Count latlongdata rows and posts, with the first of each.
    CheckLatlong,
    /// Count posts and print the first one.
    CheckPosts,
    /// Count posts inside the Philippines and print a few.
    CheckPhCounts,
}
