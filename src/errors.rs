use thiserror::Error;

use crate::domain::errors::DomainError;

/// User-visible failure taxonomy for the order-creation view. Nothing here
/// is fatal to the application; every notice is scoped to the view that
/// raised it.
#[derive(Debug, Error)]
pub enum Notice {
    #[error("Camera unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Could not resolve code '{code}': {message}")]
    LookupFailed { code: String, message: String },

    #[error("'{title}' has no stock left")]
    StockExhausted { title: String },

    #[error("Order was not submitted: {0}")]
    SubmissionFailed(String),

    #[error("{0}")]
    Validation(String),
}

impl Notice {
    /// Notice for a failed inventory lookup, always naming the offending
    /// code.
    pub fn lookup_failed(code: impl Into<String>, err: &DomainError) -> Self {
        Notice::LookupFailed {
            code: code.into(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for Notice {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::ProductNotFound(code) => Notice::LookupFailed {
                message: format!("No product found for code '{code}'"),
                code,
            },
            DomainError::Validation(msg) => Notice::Validation(msg),
            DomainError::SourceUnavailable(msg) => Notice::SourceUnavailable(msg),
            DomainError::Backend(msg) | DomainError::Internal(msg) => {
                Notice::SubmissionFailed(msg)
            }
        }
    }
}
