#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Seed fetch failed: {0}")]
    Seed(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
