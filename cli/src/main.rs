#![deny(missing_docs)]

//! # Protodef CLI
//!
//! Command Line Interface turning API designs into proto3 service definitions.
//!
//! Supported Commands:
//! - `generate`: Writes `api.proto` for a design.
//! - `schema`: Prints the normalized service schema as JSON.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cleanup::GeneratedFiles;
use crate::error::CliResult;

mod cleanup;
mod error;
mod generator;
mod schema;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API design to proto3 generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate `api.proto` from a design file.
    Generate(generator::GenerateArgs),
    /// Print the normalized service schema as JSON.
    Schema(schema::SchemaArgs),
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "protodef=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => {
            let files = GeneratedFiles::default();
            let watcher = cleanup::spawn_interrupt_watcher(files.clone());
            let result = generator::execute(args, &files);
            watcher.abort();
            println!("{}", result?.display());
        }
        Commands::Schema(args) => schema::execute(args)?,
    }

    Ok(())
}
