use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure turning a note into file text.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Failures surfaced by store mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Note {0} not found")]
    NotFound(String),

    #[error("Could not serialize note: {0}")]
    Serialize(#[from] NoteError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
