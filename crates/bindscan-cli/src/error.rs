use bindscan::core::io::document::DocumentError;
use bindscan::core::io::requests::RequestFileError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Query for '{pdb_id}' failed: {reason}")]
    Query { pdb_id: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn documents(path: impl Into<PathBuf>, source: DocumentError) -> Self {
        Self::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn requests(path: impl Into<PathBuf>, source: RequestFileError) -> Self {
        Self::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }
}
