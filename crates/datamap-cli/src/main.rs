//! # datamap-cli
//!
//! Command-line interface for datamap.
//!
//! Initializes project config and schema files, generates TypeScript
//! models, entities and mappers from the schema, and converts JSON records
//! between entity and model shapes.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "datamap")]
#[command(about = "Entity/model mapper generator")]
#[command(version)]
struct Cli {
    /// Project root directory
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Path to configuration file (default: <dir>/tw-config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Reject duplicate groups and source paths instead of keeping the last
    #[arg(long, global = true)]
    strict: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the config file
    Init,

    /// Work with the schema file
    Schema {
        #[command(subcommand)]
        command: SchemaCommand,
    },

    /// Convert JSON records between entity and model shapes
    Transform {
        /// Input JSON file (an object or an array of objects), `-` for stdin
        input: PathBuf,

        /// Schema group whose mapping to apply
        #[arg(short, long)]
        group: String,

        /// Shape to convert into
        #[arg(long, value_enum, default_value_t = Direction::Model)]
        to: Direction,
    },
}

#[derive(Subcommand)]
enum SchemaCommand {
    /// Write a starter schema file
    Init,

    /// Generate model, entity, and mapper files from the schema
    Generate,

    /// Print the parsed schema
    Inspect {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Direction {
    /// Entity input, model output
    Model,
    /// Model input, entity output
    Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project = commands::Project::new(cli.dir, cli.config, cli.strict);

    match cli.command {
        Commands::Init => commands::init_config(&project),
        Commands::Schema { command } => match command {
            SchemaCommand::Init => commands::init_schema(&project),
            SchemaCommand::Generate => commands::generate(&project),
            SchemaCommand::Inspect { format } => commands::inspect(&project, format),
        },
        Commands::Transform { input, group, to } => {
            commands::transform(&project, &input, &group, to)
        }
    }
}
