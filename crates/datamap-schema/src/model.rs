//! Schema model definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A parsed schema: entity groups in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub groups: Vec<EntityGroup>,
}

/// A named group of field mappings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityGroup {
    pub name: String,
    pub fields: Vec<FieldMapping>,
}

/// One declared correspondence between a model path and an entity path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Dotted path on the model side
    pub source_path: String,
    /// Opaque type name, emitted verbatim
    pub declared_type: String,
    /// Dotted path on the entity side
    pub target_path: String,
}

/// A path with its declared type, as handed to the type emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedField {
    pub path: String,
    pub declared_type: String,
}

impl SchemaDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a group by name
    pub fn get(&self, name: &str) -> Option<&EntityGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Iterate over groups in source order
    pub fn iter(&self) -> std::slice::Iter<'_, EntityGroup> {
        self.groups.iter()
    }

    /// Group names in source order
    pub fn names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when the document has no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render the document as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Render the document as YAML
    ///
    /// # Errors
    ///
    /// Returns an error when serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Serialize(e.to_string()))
    }
}

impl<'a> IntoIterator for &'a SchemaDocument {
    type Item = &'a EntityGroup;
    type IntoIter = std::slice::Iter<'a, EntityGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl EntityGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field mapping
    pub fn with_field(mut self, field: FieldMapping) -> Self {
        self.fields.push(field);
        self
    }

    /// Find a field mapping by source path
    pub fn field(&self, source_path: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|f| f.source_path == source_path)
    }

    /// Model-side declarations: `(source_path, declared_type)` in order
    pub fn model_fields(&self) -> Vec<TypedField> {
        self.fields
            .iter()
            .map(|f| TypedField::new(&f.source_path, &f.declared_type))
            .collect()
    }

    /// Entity-side declarations: `(target_path, declared_type)` in order
    pub fn entity_fields(&self) -> Vec<TypedField> {
        self.fields
            .iter()
            .map(|f| TypedField::new(&f.target_path, &f.declared_type))
            .collect()
    }

    /// Raw `(source_path, target_path)` pairs in order
    pub fn transformation_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.source_path.clone(), f.target_path.clone()))
            .collect()
    }
}

impl FieldMapping {
    /// Create a field mapping
    pub fn new(
        source_path: impl Into<String>,
        declared_type: impl Into<String>,
        target_path: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            declared_type: declared_type.into(),
            target_path: target_path.into(),
        }
    }

    /// True when the entity path differs from the model path
    pub fn is_renamed(&self) -> bool {
        self.source_path != self.target_path
    }
}

impl TypedField {
    /// Create a typed field
    pub fn new(path: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            declared_type: declared_type.into(),
        }
    }
}
