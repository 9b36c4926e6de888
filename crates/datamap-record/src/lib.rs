#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # datamap-record
//!
//! Structured record values and dotted-path access for datamap.
//!
//! A [`Record`] is a string-keyed tree of scalars and nested records. It is
//! the shape the mapping runtime reads from and writes to: values are looked
//! up with [`Record::resolve`] and output records are assembled with a
//! [`RecordBuilder`], which creates intermediate records lazily per path
//! segment.

/// Lazy, merge-friendly record construction by dotted path.
pub mod builder;
/// Dotted field paths such as `company.address.street`.
pub mod path;
/// Scalar and record value types plus path resolution.
pub mod value;

/// Builder for assembling records one path at a time.
pub use builder::RecordBuilder;
/// Parsed dotted path.
pub use path::FieldPath;
/// Record tree primitives.
pub use value::{Record, Resolved, Value};

use thiserror::Error;

/// Errors that can occur when loading records
#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected a record, found {found}")]
    NotARecord { found: &'static str },

    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a not-a-record error naming the kind of value that was found.
    pub fn not_a_record(found: &'static str) -> Self {
        Self::NotARecord { found }
    }
}

/// Crate-local result type for record operations.
pub type Result<T> = std::result::Result<T, Error>;
