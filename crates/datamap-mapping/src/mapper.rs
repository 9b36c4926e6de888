//! Entity/model mapper

use crate::map::TransformationMap;
use crate::transformer::{invert, transform, transform_sequence};
use datamap_record::Record;
use datamap_schema::EntityGroup;
use tracing::debug;

/// Converts records between an entity shape and a model shape
///
/// The map is keyed by model path with entity paths as inputs, so it drives
/// entity-to-model conversion directly; the inverse is computed once at
/// construction and drives model-to-entity conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapper {
    to_model: TransformationMap,
    to_entity: TransformationMap,
}

impl Mapper {
    /// Create a mapper from a `model path -> entity path` map
    pub fn new(map: TransformationMap) -> Self {
        let to_entity = invert(&map);
        if to_entity.len() < map.len() {
            debug!(
                pairs = map.len(),
                inverse_pairs = to_entity.len(),
                "Entity paths are shared between model fields, model-to-entity conversion is lossy"
            );
        }
        Self {
            to_model: map,
            to_entity,
        }
    }

    /// Create a mapper for a schema group
    pub fn from_group(group: &EntityGroup) -> Self {
        Self::new(TransformationMap::from_group(group))
    }

    /// The `model path -> entity path` map
    pub fn transformation_map(&self) -> &TransformationMap {
        &self.to_model
    }

    /// The `entity path -> model path` map
    pub fn inverse_map(&self) -> &TransformationMap {
        &self.to_entity
    }

    /// Convert an entity into a model
    pub fn to_model(&self, entity: &Record) -> Record {
        transform(entity, &self.to_model)
    }

    /// Convert entities into models
    pub fn to_model_array(&self, entities: &[Record]) -> Vec<Record> {
        transform_sequence(entities, &self.to_model)
    }

    /// Convert a model into an entity
    pub fn to_entity(&self, model: &Record) -> Record {
        transform(model, &self.to_entity)
    }

    /// Convert models into entities
    pub fn to_entity_array(&self, models: &[Record]) -> Vec<Record> {
        transform_sequence(models, &self.to_entity)
    }
}

impl From<TransformationMap> for Mapper {
    fn from(map: TransformationMap) -> Self {
        Self::new(map)
    }
}
