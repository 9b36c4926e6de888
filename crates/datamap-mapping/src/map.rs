//! Transformation map

use datamap_schema::EntityGroup;

/// Ordered `output path -> input path` pairs with unique output paths
///
/// Inserting an output path that is already present replaces its input path
/// and keeps the pair at its original position. Equality compares the pairs
/// as a set.
#[derive(Debug, Clone, Default)]
pub struct TransformationMap {
    pairs: Vec<(String, String)>,
}

impl TransformationMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Map from a schema group, keyed by model path with entity paths as
    /// inputs
    pub fn from_group(group: &EntityGroup) -> Self {
        group
            .fields
            .iter()
            .map(|f| (f.source_path.as_str(), f.target_path.as_str()))
            .collect()
    }

    /// Insert a pair, returning the input path it replaced
    pub fn insert(&mut self, output: impl Into<String>, input: impl Into<String>) -> Option<String> {
        let output = output.into();
        let input = input.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == output) {
            Some((_, slot)) => Some(std::mem::replace(slot, input)),
            None => {
                self.pairs.push((output, input));
                None
            }
        }
    }

    /// Input path for an output path
    pub fn get(&self, output: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == output)
            .map(|(_, input)| input.as_str())
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when the map has no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order as `(output, input)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(output, input)| (output.as_str(), input.as_str()))
    }

    /// Output paths in insertion order
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(output, _)| output.as_str())
    }

    /// True when no two output paths read the same input path, which is
    /// exactly when inversion is lossless
    pub fn has_unique_inputs(&self) -> bool {
        let mut inputs: Vec<&str> = self.pairs.iter().map(|(_, input)| input.as_str()).collect();
        inputs.sort_unstable();
        inputs.windows(2).all(|w| w[0] != w[1])
    }
}

impl PartialEq for TransformationMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(output, input)| other.get(output) == Some(input))
    }
}

impl Eq for TransformationMap {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransformationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for TransformationMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (output, input) in iter {
            self.insert(output, input);
        }
    }
}
