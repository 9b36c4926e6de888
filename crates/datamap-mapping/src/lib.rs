//! # datamap-mapping
//!
//! Transformation maps and the path-aware record transformer.
//!
//! A [`TransformationMap`] pairs output paths with input paths. Applying it
//! with [`transform`] reads every input path from a source record and writes
//! the value at the matching output path, nesting as the dotted output path
//! requires. [`invert`] swaps both sides, and [`Mapper`] packages a map and
//! its inverse as entity/model conversions.
//!
//! None of these operations fail: a missing input becomes an empty string.

pub mod map;
pub mod mapper;
pub mod transformer;

pub use map::TransformationMap;
pub use mapper::Mapper;
pub use transformer::{MISSING_VALUE, invert, transform, transform_sequence};
