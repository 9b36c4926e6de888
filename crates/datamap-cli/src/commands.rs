//! Command implementations

use crate::{Direction, Format};
use anyhow::{Context, bail};
use datamap_codegen::{GeneratorConfig, Generator};
use datamap_mapping::Mapper;
use datamap_record::Record;
use datamap_schema::{SchemaDocument, SchemaLoader, SchemaParser};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Project root plus the global options every command shares
pub struct Project {
    root: PathBuf,
    config_path: Option<PathBuf>,
    strict: bool,
}

impl Project {
    pub fn new(root: PathBuf, config_path: Option<PathBuf>, strict: bool) -> Self {
        Self {
            root,
            config_path,
            strict,
        }
    }

    fn loader(&self) -> SchemaLoader {
        let parser = if self.strict {
            SchemaParser::strict()
        } else {
            SchemaParser::new()
        };
        SchemaLoader::new(&self.root).with_parser(parser)
    }

    fn config(&self) -> anyhow::Result<GeneratorConfig> {
        let config = match &self.config_path {
            Some(path) => GeneratorConfig::load_file(path),
            None => GeneratorConfig::load(&self.root),
        };
        Ok(config?)
    }

    fn schema(&self) -> anyhow::Result<SchemaDocument> {
        let loader = self.loader();
        match loader.load() {
            Ok(document) => Ok(document),
            Err(datamap_schema::Error::SchemaNotFound(path)) => bail!(
                "Schema file does not exist. Create {} or run `datamap schema init`",
                path.display()
            ),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to parse {}", loader.schema_path().display())),
        }
    }
}

pub fn init_config(project: &Project) -> anyhow::Result<()> {
    let path = GeneratorConfig::init(&project.root)?;
    info!("Config file created successfully at {}", path.display());
    Ok(())
}

pub fn init_schema(project: &Project) -> anyhow::Result<()> {
    let path = project.loader().init()?;
    info!("Schema file created successfully at {}", path.display());
    Ok(())
}

pub fn generate(project: &Project) -> anyhow::Result<()> {
    let document = project.schema()?;
    let generator = Generator::new(&project.root, project.config()?);
    let report = generator.generate(&document)?;

    for group in &report.groups {
        info!(
            files = group.files.len(),
            "Generated code for {} ({})",
            group.type_name,
            group.group
        );
    }
    Ok(())
}

pub fn inspect(project: &Project, format: Format) -> anyhow::Result<()> {
    let document = project.schema()?;
    let rendered = match format {
        Format::Json => document.to_json()?,
        Format::Yaml => document.to_yaml()?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

pub fn transform(
    project: &Project,
    input: &Path,
    group: &str,
    to: Direction,
) -> anyhow::Result<()> {
    let document = project.schema()?;
    let Some(entity_group) = document.get(group) else {
        bail!(
            "Unknown group '{group}' (available: {})",
            document.names().join(", ")
        );
    };
    let mapper = Mapper::from_group(entity_group);

    let text = read_input(input)?;
    let json: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON from {}", input.display()))?;

    let output = match json {
        serde_json::Value::Array(items) => {
            let records = items
                .into_iter()
                .map(Record::from_json_value)
                .collect::<Result<Vec<_>, _>>()?;
            let converted = match to {
                Direction::Model => mapper.to_model_array(&records),
                Direction::Entity => mapper.to_entity_array(&records),
            };
            serde_json::Value::Array(converted.iter().map(Record::to_json_value).collect())
        }
        other => {
            let record = Record::from_json_value(other)?;
            let converted = match to {
                Direction::Model => mapper.to_model(&record),
                Direction::Entity => mapper.to_entity(&record),
            };
            converted.to_json_value()
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
