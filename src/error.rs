//! Error types for the bean classifier front end

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Main error type for the classifier front end
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Client-side input problem, reported before any request is sent
    #[error("{0}")]
    Validation(String),

    /// Error message returned by the prediction service in its `error` field
    #[error("{0}")]
    Server(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The three ways an action can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally, no request issued
    Validation,
    /// The service answered with an error field
    Server,
    /// Transport, decoding or local I/O failure
    Transport,
}

impl ClassifierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifierError::Validation(_) => ErrorKind::Validation,
            ClassifierError::Server(_) => ErrorKind::Server,
            ClassifierError::Http(_)
            | ClassifierError::Decode(_)
            | ClassifierError::Url(_)
            | ClassifierError::Config(_)
            | ClassifierError::Io(_) => ErrorKind::Transport,
        }
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        ClassifierError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClassifierError::Server("Expected 16 features, got 3".to_string());
        assert_eq!(err.to_string(), "Expected 16 features, got 3");

        let err = ClassifierError::Decode("missing field `bean_type`".to_string());
        assert_eq!(err.to_string(), "Invalid response: missing field `bean_type`");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ClassifierError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(ClassifierError::Server("x".into()).kind(), ErrorKind::Server);
        assert_eq!(ClassifierError::Decode("x".into()).kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<Vec<f64>>("[1,").unwrap_err();
        let err: ClassifierError = json_err.into();
        assert!(matches!(err, ClassifierError::Decode(_)));
    }
}
