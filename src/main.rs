//! agentmesh CLI entry point.

use clap::Parser;

use agentmesh::cli::{commands, handle_error, Cli, Commands};
use agentmesh::infrastructure::config::ConfigLoader;
use agentmesh::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };

    // Keeps the file writer flushing until exit
    let logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args, &config, cli.json).await,
        Commands::Agents => commands::agents::execute(cli.json),
        Commands::Config => commands::config::execute(&config, cli.json),
    };

    if let Err(err) = result {
        drop(logger);
        handle_error(err, cli.json);
    }
}
