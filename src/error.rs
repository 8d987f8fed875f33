//! Error types for resumark library.

use std::io;
use thiserror::Error;

/// Result type alias for resumark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering or exporting a resume.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering (HTML, Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error assembling the PDF object graph.
    #[error("PDF assembly error: {0}")]
    Pdf(String),

    /// The export pipeline failed (layout, rasterization or assembly).
    #[error("Export failed: {0}")]
    Export(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A learning module id was not found in the path.
    #[error("Learning module not found: {0}")]
    ModuleNotFound(String),

    /// A learning resource id was not found in the module.
    #[error("Learning resource not found: {resource} (module {module})")]
    ResourceNotFound {
        /// Module that was searched
        module: String,
        /// Missing resource id
        resource: String,
    },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}
