// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PartitionError {
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("No EEZ records found in input (parent_subtype must contain \"eez\")")]
    MissingEez,

    #[error("No seed points generated (check coastlines / buffer distance)")]
    NoSeedPoints,

    #[error("Insufficient seed points for tessellation: expected at least {expected}, got {actual}")]
    InsufficientSeeds { expected: usize, actual: usize },

    #[error("Seed points are degenerate (collinear or coincident), no tessellation possible")]
    DegenerateSeeds,

    #[error("Malformed shape id {shape_id:?}: missing dotted numeric fragment")]
    MalformedShapeId { shape_id: String },

    #[error("Triangulation failed: {reason}")]
    TriangulationFailed { reason: String },
}

pub type PartitionResult<T> = Result<T, PartitionError>;
