//! # datamap-schema
//!
//! Schema model, parser, and loader for datamap.
//!
//! A schema file lists entity groups, each with field mappings between the
//! model shape and the entity shape of a record:
//!
//! ```text
//! user:
//!   id: number <=> id
//!   companyName: string <=> company.name
//! ```

pub mod loader;
pub mod model;
pub mod parser;

pub use loader::SchemaLoader;
pub use model::{EntityGroup, FieldMapping, SchemaDocument, TypedField};
pub use parser::{DuplicatePolicy, ParseOptions, SchemaParser};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed schema at line {line}: {reason}")]
    MalformedSchema {
        group: Option<String>,
        line: usize,
        reason: String,
    },

    #[error(
        "Duplicate source path '{path}' in group '{group}' at line {line} (first declared at line {first_line})"
    )]
    DuplicateSourcePath {
        group: String,
        path: String,
        line: usize,
        first_line: usize,
    },

    #[error("Duplicate group '{group}' at line {line} (first declared at line {first_line})")]
    DuplicateGroup {
        group: String,
        line: usize,
        first_line: usize,
    },

    #[error("Schema file not found: {}", .0.display())]
    SchemaNotFound(PathBuf),

    #[error("Schema file already exists: {}", .0.display())]
    SchemaExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

impl Error {
    /// Build a malformed-schema error at a line, inside an optional group
    pub fn malformed(group: Option<&str>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            group: group.map(str::to_owned),
            line,
            reason: reason.into(),
        }
    }

    /// Group the error belongs to, when one was open
    pub fn group(&self) -> Option<&str> {
        match self {
            Self::MalformedSchema { group, .. } => group.as_deref(),
            Self::DuplicateSourcePath { group, .. } | Self::DuplicateGroup { group, .. } => {
                Some(group)
            }
            _ => None,
        }
    }

    /// 1-based schema line the error points at, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedSchema { line, .. }
            | Self::DuplicateSourcePath { line, .. }
            | Self::DuplicateGroup { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
