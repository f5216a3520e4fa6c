//! User-facing error returned by a rate fetch.

use crate::core::Currency;
use crate::providers::xml::XmlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Currency request error: failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Currency request error ({currency}): {source}")]
    Request {
        currency: Currency,
        #[source]
        source: reqwest::Error,
    },

    #[error("Currency request error ({currency}): HTTP status {status}")]
    Status {
        currency: Currency,
        status: reqwest::StatusCode,
    },

    #[error("Currency request error ({currency}): response exceeds {limit} bytes")]
    ResponseTooLarge { currency: Currency, limit: usize },

    #[error("Currency request error ({currency}): malformed XML: {source}")]
    Parse {
        currency: Currency,
        #[source]
        source: XmlError,
    },

    #[error(
        "Currency request error ({currency}): expected at least 2 Value elements, found {found}"
    )]
    MissingSamples { currency: Currency, found: usize },

    #[error("Currency request error ({currency}): invalid rate value '{value}'")]
    InvalidNumber { currency: Currency, value: String },
}

impl FetchError {
    /// Currency whose request failed, if the failure is tied to one.
    pub fn currency(&self) -> Option<Currency> {
        match self {
            FetchError::Client(_) => None,
            FetchError::Request { currency, .. }
            | FetchError::Status { currency, .. }
            | FetchError::ResponseTooLarge { currency, .. }
            | FetchError::Parse { currency, .. }
            | FetchError::MissingSamples { currency, .. }
            | FetchError::InvalidNumber { currency, .. } => Some(*currency),
        }
    }
}
