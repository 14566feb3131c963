use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscatError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid catalog document: {0}")]
    InvalidDocument(String),

    #[error("No disc ids left after {0}")]
    IdsExhausted(u64),

    #[error("Api Error: {0}")]
    Api(String),
}

impl DiscatError {
    /// True for failures raised while reading or writing the catalog file.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            DiscatError::Io(_) | DiscatError::Serialization(_) | DiscatError::InvalidDocument(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DiscatError>;
