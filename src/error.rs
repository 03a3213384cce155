use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] libsql::Error),

    #[error("Login failed ({status}): {detail}")]
    Auth { status: StatusCode, detail: String },

    #[error("Registration failed ({status}): {detail}")]
    Registration { status: StatusCode, detail: String },

    /// The server rejected the stored token.
    #[error("Session expired")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Failed to load history ({status})")]
    HistoryLoad { status: StatusCode },

    #[error("Prediction failed ({status}): {detail}")]
    Prediction { status: StatusCode, detail: String },

    #[error("Error accessing camera: {0}")]
    CameraAccess(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn camera(msg: impl Into<String>) -> Self {
        Self::CameraAccess(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
