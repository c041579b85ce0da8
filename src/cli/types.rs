//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use super::commands::run::RunArgs;

#[derive(Parser, Debug)]
#[command(name = "agentmesh")]
#[command(about = "agentmesh - watch a five-agent mesh plan and carry out a mission", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a mission through the mesh
    Run(RunArgs),

    /// Show the agent roster every mesh starts from
    Agents,

    /// Show the effective configuration
    Config,
}
