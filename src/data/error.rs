//! Shared error types for dataset construction.

/// Which coordinate of a sample failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    X,
    Y,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::X => f.write_str("x"),
            Field::Y => f.write_str("y"),
        }
    }
}

/// Errors that can occur when building a [`Dataset`](super::Dataset).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset must contain at least one sample")]
    Empty,

    #[error("sample {index} has non-finite {field}: {value}")]
    NonFinite { index: usize, field: Field, value: f64 },

    #[error("length mismatch: {xs} x values but {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },

    #[error("original indices must be a permutation of 0..{n}: {reason}")]
    InvalidIndices { n: usize, reason: String },

    #[error("invalid generator parameter {field}: {reason}")]
    InvalidParams { field: &'static str, reason: String },
}
