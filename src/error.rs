use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid filter: {reason}")]
    InvalidFilter { reason: String },

    #[error("Listing not found: {id}")]
    ListingNotFound { id: String },

    #[error("Invalid listing catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Listing source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl ExplorerError {
    pub(crate) fn invalid_filter(reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_catalog(reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_display() {
        let err = ExplorerError::invalid_filter("min price exceeds max price");
        let msg = err.to_string();
        assert!(msg.contains("Invalid filter"));
        assert!(msg.contains("min price exceeds max price"));
    }

    #[test]
    fn listing_not_found_display() {
        let err = ExplorerError::ListingNotFound { id: "999".into() };
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn invalid_catalog_display() {
        let err = ExplorerError::invalid_catalog("duplicate listing id '3'");
        let msg = err.to_string();
        assert!(msg.contains("catalog"));
        assert!(msg.contains("'3'"));
    }

    #[test]
    fn source_unavailable_display() {
        let err = ExplorerError::SourceUnavailable {
            reason: "HTTP 503".into(),
        };
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{invalid").unwrap_err();
        let err: ExplorerError = json_err.into();
        assert!(matches!(err, ExplorerError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn error_from_url() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: ExplorerError = url_err.into();
        assert!(matches!(err, ExplorerError::Url(_)));
    }
}
