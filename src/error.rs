use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Upstream rejected credentials: {0}")]
    UpstreamAuth(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Json(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
#[cfg(feature = "server")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

// Transport-level failures never carry credential problems; those come back
// as a response body and are classified in `assistant::gemini`.
#[cfg(feature = "server")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::UpstreamUnavailable(err.to_string())
    }
}

// Convert to HTTP status codes for API responses
#[cfg(feature = "server")]
impl From<&Error> for axum::http::StatusCode {
    fn from(err: &Error) -> Self {
        use axum::http::StatusCode;
        match err {
            Error::UpstreamAuth(_) => StatusCode::UNAUTHORIZED,
            Error::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
