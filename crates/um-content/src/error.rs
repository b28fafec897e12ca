//! Error types for content loading.

use std::path::PathBuf;

use thiserror::Error;
use um_core::ContentError;

/// Result type for content loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while reading and building authored content.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The JSON did not match the authoring schema.
    #[error("invalid content: {0}")]
    Parse(#[from] serde_json::Error),

    /// A content file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The records parsed but describe an invalid story graph.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A record names a hook that is not registered.
    #[error("{path}: unknown hook `{name}`")]
    UnknownHook {
        /// Location of the reference.
        path: String,
        /// The unresolved hook name.
        name: String,
    },

    /// Two characters share a name.
    #[error("duplicate character name: {0}")]
    DuplicateCharacter(String),

    /// No character matches a requested name.
    #[error("no character named \"{name}\"{}", did_you_mean(.suggestions))]
    CharacterNotFound {
        /// The name that was requested.
        name: String,
        /// Close matches, best first.
        suggestions: Vec<String>,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}
