use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands};
use crate::command_handler::CommandHandler;
use crate::config::Config;

mod args;
mod command_handler;
mod config;
mod error;
mod listing;
mod page;
mod storage;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse_arguments();
    let config = Config::from_env().override_with(cli.bucket, cli.region, cli.endpoint);
    let command_handler = CommandHandler::new(config);

    match &cli.command {
        Some(Commands::List { json }) => {
            command_handler
                .handle_list(*json, &mut io::stdout().lock())
                .await?
        }
        None => {
            println!("Please give a valid command, try --help");
        }
    }

    Ok(())
}
