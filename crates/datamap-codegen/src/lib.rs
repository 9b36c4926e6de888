//! # datamap-codegen
//!
//! TypeScript generation for datamap schemas.
//!
//! For every entity group this crate emits a model interface, an entity
//! interface, and a mapper module whose transformation map is keyed by model
//! path. Generation is planned in full before anything is written, so a run
//! that would overwrite existing files fails without touching the disk.

pub mod config;
pub mod emit;
pub mod generator;
pub mod naming;

pub use config::GeneratorConfig;
pub use generator::{ArtifactKind, GenerationReport, Generator, OutputConflict};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config file already exists: {}", .0.display())]
    ConfigExists(PathBuf),

    #[error("Output already exists: {}", describe_conflicts(.conflicts))]
    OutputExists { conflicts: Vec<OutputConflict> },

    #[error("Groups '{first_group}' and '{group}' would both write {}", .path.display())]
    DuplicateOutput {
        path: PathBuf,
        first_group: String,
        group: String,
    },

    #[error("Schema error: {0}")]
    Schema(#[from] datamap_schema::Error),
}

fn describe_conflicts(conflicts: &[OutputConflict]) -> String {
    conflicts
        .iter()
        .map(|c| format!("{} (group '{}')", c.path.display(), c.group))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
