use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("color must be #rrggbb, got {0:?}")]
    InvalidColorHex(String),
    #[error("palette index {index} is out of range for {len} swatches")]
    SwatchOutOfRange { index: usize, len: usize },
}
