/// Error types for catalog parsing and fetching
use thiserror::Error;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// The catalog endpoint answered with a non-success status
    #[error("Catalog endpoint returned status {0}")]
    BadStatus(u16),

    /// Failed to parse the JSON body of a catalog response
    #[error("Failed to parse catalog response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A `part_type` value that maps to no known category
    #[error("Unknown component category: {0}")]
    UnknownCategory(String),

    /// A row with a missing, negative or non-numeric TDP
    #[error("Invalid TDP for {model}: {value}")]
    InvalidTdp { model: String, value: String },

    /// A row without a model name
    #[error("Catalog row is missing a model name")]
    MissingModelName,

    /// The backing store failed
    #[error("Catalog store error: {0}")]
    Store(String),

    /// Every retry against the catalog source failed
    #[error("Catalog source unreachable after {attempts} attempts: {last_error}")]
    Unreachable { attempts: u32, last_error: String },
}

impl CatalogError {
    /// Whether another attempt against the same source could succeed:
    /// transport failures, 429 and 5xx statuses.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "api")]
            CatalogError::HttpRequest(_) => true,
            CatalogError::BadStatus(status) => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

/// Type alias for Results using CatalogError
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(CatalogError::BadStatus(503).is_retryable());
        assert!(CatalogError::BadStatus(500).is_retryable());
        assert!(CatalogError::BadStatus(429).is_retryable());
        assert!(!CatalogError::BadStatus(401).is_retryable());
        assert!(!CatalogError::BadStatus(403).is_retryable());
        assert!(!CatalogError::BadStatus(404).is_retryable());
        let parse = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        assert!(!CatalogError::ResponseParse(parse).is_retryable());
    }
}
