//! Error types in arbor
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    /// Attribute columns and labels do not line up, or a named attribute is absent
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}
