use thiserror::Error;

#[derive(Debug, Error)]
pub enum WardenError {
    #[error("invalid identifier '{0}': must be non-empty ASCII alphanumeric/hyphen/underscore/dot")]
    InvalidName(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WardenError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "invalid_name",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, WardenError>;
