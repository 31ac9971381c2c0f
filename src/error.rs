use std::fmt;

use thiserror::Error;

/// The field of a [`StarRecord`](crate::StarRecord) that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    RightAscension,
    Declination,
    Magnitude,
    ColorIndex,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordField::RightAscension => "ra",
            RecordField::Declination => "dec",
            RecordField::Magnitude => "magnitude",
            RecordField::ColorIndex => "bp_rp",
        })
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidKind {
    /// NaN or infinite (including cells missing from the source).
    NonFinite,
    /// Finite but outside the field's domain.
    OutOfRange,
}

impl fmt::Display for InvalidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidKind::NonFinite => "not finite",
            InvalidKind::OutOfRange => "out of range",
        })
    }
}

/// A star record the mapper skipped.
///
/// Skipped records never abort a batch; they are collected in
/// [`MappedBatch::skipped`](crate::MappedBatch) in input order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("record {index} (id {id}): {field} = {value} is {kind}")]
pub struct InvalidRecord {
    /// Position of the record in the input sequence.
    pub index: usize,
    pub id: u64,
    pub field: RecordField,
    pub value: f64,
    pub kind: InvalidKind,
}

/// Mapper configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("size scale must be finite and > 0, got {0}")]
    InvalidSizeScale(f64),

    #[error("invalid radial distance: {message}")]
    InvalidRadialDistance { message: String },
}

impl MapError {
    pub fn invalid_radial_distance(message: impl Into<String>) -> Self {
        Self::InvalidRadialDistance {
            message: message.into(),
        }
    }
}
