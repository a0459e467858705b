//! Error taxonomy for page fetching.
//!
//! Filter rejections and duplicate skips are normal discard paths in the
//! collector, not errors; nothing here covers them.

/// A failed page fetch. Never escapes the collector: one of these halts
/// the run and is reported to the caller as a warning alongside whatever
/// was gathered before it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection or timeout failure before a usable response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The response body was not the expected JSON shape.
    #[error("malformed search payload: {0}")]
    Decode(String),
}

/// Convenience result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = FetchError::HttpStatus {
            status: 503,
            url: "https://unsplash.com/napi/search/photos".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("napi/search/photos"));
    }

    #[test]
    fn test_decode_display() {
        let err = FetchError::Decode("missing field `results`".to_string());
        assert!(err.to_string().starts_with("malformed search payload"));
    }
}
