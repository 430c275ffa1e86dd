//! Error types for the harness.
//!
//! Every error here is converted into a [`crate::stages::StageResult`] at the
//! stage boundary; none of them escapes to the pipeline caller.

use std::path::PathBuf;
use thiserror::Error;

/// The error type for harness-internal operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A generated configuration document could not be written.
    #[error("failed to write {path}: {source}")]
    ArtifactWrite {
        /// Destination path of the failed write.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The simulator manifest could not be encoded as TOML.
    #[error("manifest encoding failed: {0}")]
    ManifestEncode(#[from] toml::ser::Error),

    /// The diagram document could not be encoded as JSON.
    #[error("diagram encoding failed: {0}")]
    DiagramEncode(#[from] serde_json::Error),

    /// A generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
