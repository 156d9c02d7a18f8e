use thiserror::Error;

/// Failures raised while reading or persisting a collection document.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read document '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("document '{name}' is not valid JSON for this collection: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize document '{name}': {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write document '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Name of the document the failure relates to.
    pub fn document(&self) -> &str {
        match self {
            Self::Read { name, .. }
            | Self::Parse { name, .. }
            | Self::Serialize { name, .. }
            | Self::Write { name, .. } => name,
        }
    }
}
