use swatchbook_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("extraction error: {0}")]
    Extraction(String),
    #[error("clipboard error: {0}")]
    Clipboard(String),
}
