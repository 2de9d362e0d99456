//! Fetch error types.

/// Errors that can occur while fetching the price feed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (connection error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Every attempt failed
    #[error("giving up after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<FetchError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = FetchError::Json {
            message: "expected value at line 1 column 1".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
    }

    #[test]
    fn exhausted_mentions_last_failure() {
        let err = FetchError::Exhausted {
            attempts: 5,
            last: Box::new(FetchError::Api {
                status: 500,
                message: "boom".into(),
            }),
        };
        let text = err.to_string();
        assert!(text.contains("5 attempts"));
        assert!(text.contains("API error 500: boom"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
