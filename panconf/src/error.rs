use panconf_core::{ParseError, QueryError, WriteError};
use thiserror::Error;

use crate::profile::ProfileLoadError;

/// Errors returned by [`crate::document::PanConfig`] and the renderers.
#[derive(Debug, Error)]
pub enum PanConfigError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Write(#[from] WriteError),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Profile(#[from] ProfileLoadError),
    /// The document has no usable version, so no release profile applies.
    #[error("<{root_tag}> is not a versioned <config> document; pass an explicit query")]
    UnrecognizedDocument { root_tag: String },
    /// The profile table has no record for this role and vsys layout.
    #[error("no release profile in {source_name} matches version {version}")]
    NoProfile {
        source_name: String,
        version: String,
    },
}
