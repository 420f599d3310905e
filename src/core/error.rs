use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the profile store and library model.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Document ────────────────────────────────────────
    #[error("Profile document at {path:?} is malformed: {source}")]
    DocumentParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Library descriptors ─────────────────────────────
    #[error("Invalid library descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ── Profiles ────────────────────────────────────────
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Profile already exists: {0}")]
    ProfileAlreadyExists(String),

    // ── Collaborators ───────────────────────────────────
    #[error("Remote service error: {0}")]
    Remote(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl LauncherError {
    /// True for the failures the store surfaces from file access or parsing.
    pub fn is_io_failure(&self) -> bool {
        matches!(
            self,
            LauncherError::Io { .. } | LauncherError::DocumentParse { .. } | LauncherError::Json(_)
        )
    }
}

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
