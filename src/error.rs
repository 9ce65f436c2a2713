use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The renderer could not produce a page (navigation timeout, crash, disconnect).
    #[error("Renderer failed: {0}")]
    Renderer(String),

    #[error("Advisory service error: {0}")]
    Advisory(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
