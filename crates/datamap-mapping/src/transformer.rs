//! Path-aware record transformer

use crate::map::TransformationMap;
use datamap_record::{FieldPath, Record, RecordBuilder, Value};
use tracing::trace;

/// Value written for an input path that does not resolve
pub const MISSING_VALUE: &str = "";

/// Transform a record according to a map
///
/// For each `(output, input)` pair, `input` is resolved against `source` and
/// the result is written at `output`. Output paths that share a prefix merge
/// into one nested record. An input that is absent, or that runs through a
/// non-record value, yields [`MISSING_VALUE`].
pub fn transform(source: &Record, map: &TransformationMap) -> Record {
    let mut builder = RecordBuilder::new();

    for (output, input) in map.iter() {
        let value = source
            .resolve(&FieldPath::parse(input))
            .to_value()
            .unwrap_or_else(|| {
                trace!(input, output, "Input path missing, writing empty value");
                Value::String(MISSING_VALUE.to_owned())
            });
        builder.set(&FieldPath::parse(output), value);
    }

    builder.build()
}

/// Transform every record in order
pub fn transform_sequence(sources: &[Record], map: &TransformationMap) -> Vec<Record> {
    sources.iter().map(|source| transform(source, map)).collect()
}

/// Swap both sides of every pair
///
/// When several outputs read the same input, the inverse keeps only the last
/// of them (in map order), at the position of the first. Inverting twice
/// gives back the original map only when its inputs are unique.
pub fn invert(map: &TransformationMap) -> TransformationMap {
    map.iter().map(|(output, input)| (input, output)).collect()
}
