//! Schema loader for project directories

use crate::model::SchemaDocument;
use crate::parser::SchemaParser;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Directory holding the schema, relative to the project root
pub const SCHEMA_DIR: &str = "schema";

/// Schema file name inside [`SCHEMA_DIR`]
pub const SCHEMA_FILE: &str = "schema.tws";

/// Starter schema written by [`SchemaLoader::init`]
pub const STARTER_SCHEMA: &str = "user:
  id: number <=> id
  name: string <=> name
  email: string <=> email
  companyName: string <=> company.name
  companyAddress: string <=> company.address.street
";

/// Loads the schema of a project rooted at a directory
#[derive(Debug, Clone)]
pub struct SchemaLoader {
    root: PathBuf,
    parser: SchemaParser,
}

impl SchemaLoader {
    /// Create a loader for the project at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: SchemaParser::new(),
        }
    }

    /// Use a specific parser configuration
    #[must_use]
    pub fn with_parser(mut self, parser: SchemaParser) -> Self {
        self.parser = parser;
        self
    }

    /// Location of the schema file
    pub fn schema_path(&self) -> PathBuf {
        self.root.join(SCHEMA_DIR).join(SCHEMA_FILE)
    }

    /// Load and parse the project schema
    ///
    /// # Errors
    ///
    /// Returns `SchemaNotFound` when the file does not exist, or any parse
    /// error.
    pub fn load(&self) -> Result<SchemaDocument> {
        self.load_file(&self.schema_path())
    }

    /// Load and parse a schema file at an explicit path
    ///
    /// # Errors
    ///
    /// Returns `SchemaNotFound` when the file does not exist, or any parse
    /// error.
    pub fn load_file(&self, path: &Path) -> Result<SchemaDocument> {
        if !path.exists() {
            return Err(Error::SchemaNotFound(path.to_path_buf()));
        }

        debug!("Loading schema from {}", path.display());
        let content = fs::read_to_string(path)?;
        let document = self.parser.parse(&content)?;
        info!(
            groups = document.len(),
            "Loaded schema {}",
            path.display()
        );
        Ok(document)
    }

    /// Write the starter schema, creating the schema directory if needed
    ///
    /// # Errors
    ///
    /// Returns `SchemaExists` when a schema file is already present, or an
    /// I/O error.
    pub fn init(&self) -> Result<PathBuf> {
        let path = self.schema_path();
        if path.exists() {
            return Err(Error::SchemaExists(path));
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, STARTER_SCHEMA)?;
        info!("Created schema file {}", path.display());
        Ok(path)
    }
}
