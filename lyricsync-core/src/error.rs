use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Lyric parsing errors (recoverable: the offending tag is dropped)
    #[error("Invalid timestamp tag {tag}")]
    InvalidTimestamp { tag: String },

    // Configuration errors
    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
