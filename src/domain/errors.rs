use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No product found for code '{0}'")]
    ProductNotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Video source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
