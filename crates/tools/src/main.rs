use std::process::ExitCode;

use clap::Parser;
use database::{DatabaseConnectionInfo, SqlDatabase};
use geoposts::client::Client;
use tools::{cli::Cli, commands};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    let database = match SqlDatabase::connect(DatabaseConnectionInfo::from_env()).await {
        Ok(database) => database,
        Err(why) => {
            eprintln!("could not connect to database: {}", why);
            return ExitCode::FAILURE;
        }
    };
    let client = Client::new("tools", database);

    match commands::run(&client, cli.command).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(why) => {
            log::error!("{:?}", why);
            eprintln!("{}", why);
            ExitCode::FAILURE
        }
    }
}
