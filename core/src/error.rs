use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing request fields. Raised before any mutation.
    #[error("invalid {field}: {message}")]
    Shape {
        field: String,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("persistence error: {0}")]
    Persistence(String),
}

impl Error {
    pub fn shape(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Shape {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_shape(&self) -> bool {
        matches!(self, Error::Shape { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}
