//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::workspace::Workspace;
use super::{category, data, logging, product};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Manage a product catalog of categories and products")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: from config, else text]
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Working data file [default: from config, else catalog_data.json]
    #[arg(long, global = true, env = "CATALOG_DATA_FILE", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage categories
    #[command(subcommand)]
    Category(category::CategoryCommands),

    /// Manage products
    #[command(subcommand)]
    Product(product::ProductCommands),

    /// Save a copy of the catalog to a file
    Save {
        /// Destination file
        path: PathBuf,
    },

    /// Replace the catalog with the contents of a file
    Load {
        /// Source file
        path: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load()?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("Catalog CLI starting");

    let data_file = cli.data_file.unwrap_or(config.data_file);
    output.verbose_ctx("config", &format!("Data file: {}", data_file.display()));

    let mut workspace = Workspace::open(data_file, config.load_policy, &output)?;

    match cli.command {
        Commands::Category(cmd) => category::run(cmd, &mut workspace, &output)?,
        Commands::Product(cmd) => product::run(cmd, &mut workspace, &output)?,
        Commands::Save { path } => data::save(&workspace, &output, &path)?,
        Commands::Load { path } => data::load(&mut workspace, &output, &path, config.load_policy)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
