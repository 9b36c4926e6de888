//! Record builder
#![allow(clippy::return_self_not_must_use)] // `set` chains through `&mut Self`.

use crate::path::FieldPath;
use crate::value::{Record, Value};
use indexmap::IndexMap;
use tracing::trace;

/// Builds a [`Record`] one dotted path at a time.
///
/// Each path segment except the last names a child builder that is created
/// on first use and reused afterwards, so `company.name` and
/// `company.address.street` end up in the same `company` record. A later
/// path that conflicts with an earlier one wins at the conflicting key: a
/// leaf replaces a branch, and a branch replaces a scalar leaf. A record
/// leaf that is later descended into is copied into the branch first, so
/// its fields are kept. Keys stay where they were first set.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    entries: IndexMap<String, Slot>,
}

/// A key holds `leaf` when set, otherwise the nested `branch`
#[derive(Debug, Default)]
struct Slot {
    leaf: Option<Value>,
    branch: RecordBuilder,
}

impl RecordBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a value at a dotted path, creating intermediate records
    pub fn set(&mut self, path: &FieldPath, value: Value) -> &mut Self {
        let Some((leaf, parents)) = path.segments().split_last() else {
            return self;
        };

        let mut node = &mut *self;
        for segment in parents {
            node = node.branch(segment);
        }

        trace!(path = %path, kind = value.kind(), "Setting record leaf");
        node.entries.insert(leaf.clone(), Slot::leaf(value));
        self
    }

    /// True when nothing has been set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finalize into an immutable record
    pub fn build(self) -> Record {
        self.entries
            .into_iter()
            .map(|(key, slot)| match slot.leaf {
                Some(value) => (key, value),
                None => (key, Value::Record(slot.branch.build())),
            })
            .collect()
    }

    fn branch(&mut self, key: &str) -> &mut RecordBuilder {
        let slot = self.entries.entry(key.to_owned()).or_default();
        if let Some(leaf) = slot.leaf.take() {
            slot.branch = match leaf {
                Value::Record(record) => RecordBuilder::from(record),
                _ => RecordBuilder::new(),
            };
        }
        &mut slot.branch
    }
}

impl Slot {
    fn leaf(value: Value) -> Self {
        Self {
            leaf: Some(value),
            branch: RecordBuilder::new(),
        }
    }
}

impl From<Record> for RecordBuilder {
    fn from(record: Record) -> Self {
        Self {
            entries: record
                .into_iter()
                .map(|(key, value)| (key, Slot::leaf(value)))
                .collect(),
        }
    }
}
