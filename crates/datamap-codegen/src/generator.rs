//! Generation planning and file output

use crate::config::GeneratorConfig;
use crate::emit::{MapperSource, render_interface, render_mapper};
use crate::naming::{kebab_case, pascal_case};
use crate::{Error, Result};
use datamap_schema::{EntityGroup, SchemaDocument, SchemaLoader};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Kind of generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Model,
    Entity,
    Mapper,
}

/// A file the generator intends to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Everything one group will produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupPlan {
    pub group: String,
    pub type_name: String,
    pub files: Vec<PlannedFile>,
}

/// An output file that already exists and may not be overwritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputConflict {
    pub group: String,
    pub path: PathBuf,
}

/// Files written for one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub group: String,
    pub type_name: String,
    pub files: Vec<PathBuf>,
}

/// Outcome of a generation run, one entry per group in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub groups: Vec<GroupReport>,
}

impl GenerationReport {
    /// Total number of files written
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }
}

/// Generates model, entity, and mapper files for a project
#[derive(Debug, Clone)]
pub struct Generator {
    root: PathBuf,
    config: GeneratorConfig,
}

impl Generator {
    /// Create a generator writing under `root`
    pub fn new(root: impl Into<PathBuf>, config: GeneratorConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Configuration in effect
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Directory generated files go into
    pub fn module_dir(&self) -> PathBuf {
        self.config.module_dir(&self.root)
    }

    /// Render the three files for a group without touching the disk
    pub fn plan_group(&self, group: &EntityGroup) -> GroupPlan {
        let type_name = pascal_case(&group.name);
        let kebab_name = kebab_case(&type_name);
        let folder = self.module_dir().join(&kebab_name);

        let model_type = format!("{type_name}{}", pascal_case(&self.config.model_suffix));
        let entity_type = format!("{type_name}{}", pascal_case(&self.config.entity_suffix));
        let mapper_name = format!("{type_name}Mapper");
        let model_import = format!("./{kebab_name}{}", self.config.model_suffix);
        let entity_import = format!("./{kebab_name}{}", self.config.entity_suffix);

        let mapper = render_mapper(
            &MapperSource {
                mapper_name: &mapper_name,
                model_type: &model_type,
                entity_type: &entity_type,
                model_import: &model_import,
                entity_import: &entity_import,
                runtime_package: &self.config.runtime_package,
            },
            &group.transformation_pairs(),
        );

        let file = |kind: ArtifactKind, suffix: &str, contents: String| PlannedFile {
            kind,
            path: folder.join(format!("{kebab_name}{suffix}.ts")),
            contents,
        };

        GroupPlan {
            group: group.name.clone(),
            files: vec![
                file(
                    ArtifactKind::Model,
                    &self.config.model_suffix,
                    render_interface(&model_type, &group.model_fields()),
                ),
                file(
                    ArtifactKind::Entity,
                    &self.config.entity_suffix,
                    render_interface(&entity_type, &group.entity_fields()),
                ),
                file(ArtifactKind::Mapper, &self.config.mapper_suffix, mapper),
            ],
            type_name,
        }
    }

    /// Plan every group in schema order
    ///
    /// # Errors
    ///
    /// Returns `DuplicateOutput` when two groups map to the same file, e.g.
    /// `user_profile` and `userProfile`.
    pub fn plan(&self, document: &SchemaDocument) -> Result<Vec<GroupPlan>> {
        let plans: Vec<GroupPlan> = document.iter().map(|g| self.plan_group(g)).collect();

        let mut owners: HashMap<&Path, &str> = HashMap::new();
        for plan in &plans {
            for file in &plan.files {
                if let Some(first_group) = owners.insert(&file.path, &plan.group) {
                    return Err(Error::DuplicateOutput {
                        path: file.path.clone(),
                        first_group: first_group.to_string(),
                        group: plan.group.clone(),
                    });
                }
            }
        }

        Ok(plans)
    }

    /// Planned files that already exist on disk
    pub fn conflicts(&self, plans: &[GroupPlan]) -> Vec<OutputConflict> {
        plans
            .iter()
            .flat_map(|plan| {
                plan.files
                    .iter()
                    .filter(|file| file.path.exists())
                    .map(|file| OutputConflict {
                        group: plan.group.clone(),
                        path: file.path.clone(),
                    })
            })
            .collect()
    }

    /// Remove the output directory when `clean_module` is set
    ///
    /// Returns true when a directory was removed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when removal fails.
    pub fn clean_module(&self) -> Result<bool> {
        let dir = self.module_dir();
        if !self.config.clean_module || !dir.exists() {
            return Ok(false);
        }
        info!("Cleaning module directory {}", dir.display());
        fs::remove_dir_all(&dir)?;
        Ok(true)
    }

    /// Generate files for every group
    ///
    /// Nothing is written or removed unless every group can be written:
    /// planning runs before `clean_module`, and with `overwrite` off any
    /// existing target fails the run with `OutputExists` listing each
    /// conflicting group and path.
    ///
    /// # Errors
    ///
    /// Returns `OutputExists`, `DuplicateOutput`, or an I/O error.
    pub fn generate(&self, document: &SchemaDocument) -> Result<GenerationReport> {
        let plans = self.plan(document)?;
        self.clean_module()?;

        if !self.config.overwrite {
            let conflicts = self.conflicts(&plans);
            if !conflicts.is_empty() {
                for conflict in &conflicts {
                    warn!(
                        group = %conflict.group,
                        "{} already exists",
                        conflict.path.display()
                    );
                }
                return Err(Error::OutputExists { conflicts });
            }
        }

        let mut report = GenerationReport::default();
        for plan in plans {
            info!("Generating code for {}", plan.type_name);
            let mut files = Vec::with_capacity(plan.files.len());
            for file in plan.files {
                write_file(&file)?;
                files.push(file.path);
            }
            report.groups.push(GroupReport {
                group: plan.group,
                type_name: plan.type_name,
                files,
            });
        }

        info!(
            groups = report.groups.len(),
            files = report.file_count(),
            "Generation finished"
        );
        Ok(report)
    }

    /// Load the project schema and generate it
    ///
    /// # Errors
    ///
    /// Returns schema loading errors, or any error from [`Self::generate`].
    pub fn run(&self, loader: &SchemaLoader) -> Result<GenerationReport> {
        let document = loader.load()?;
        self.generate(&document)
    }
}

fn write_file(file: &PlannedFile) -> Result<()> {
    if let Some(parent) = file.path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file.path, &file.contents)?;
    debug!(kind = ?file.kind, "Wrote {}", file.path.display());
    Ok(())
}
