use arbuz_core::DomainError;
use thiserror::Error;

/// Failure of a single request to the judge backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("backend answered with a redirect (HTTP {status})")]
    Redirect {
        status: u16,
        location: Option<String>,
    },

    #[error("request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Submitting failed; the attempt is over and is not retried.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid submission: {0}")]
    Invalid(#[from] DomainError),

    #[error("backend accepted the submission but returned no handle")]
    MissingHandle,

    #[error("submission rejected: {0}")]
    Backend(#[from] BackendError),
}

/// A status query failed. Logged and followed by the next scheduled query.
#[derive(Debug, Error)]
pub enum PollTransportError {
    #[error("status query failed: {0}")]
    Backend(#[from] BackendError),

    #[error("unreadable status response: {0}")]
    Decode(#[from] DomainError),
}

/// Retrieving or decoding the final result failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unknown verdict code: {0}")]
    UnknownVerdict(i64),

    #[error("malformed result payload: {0}")]
    Malformed(String),

    #[error("result request failed: {0}")]
    Transport(#[from] BackendError),
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_is_reported_with_status() {
        let err = BackendError::Redirect {
            status: 307,
            location: None,
        };

        assert_eq!(err.to_string(), "backend answered with a redirect (HTTP 307)");
    }

    #[test]
    fn submission_error_keeps_backend_cause() {
        let err = SubmissionError::from(BackendError::Http {
            status: 503,
            message: "Busy".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "submission rejected: backend returned HTTP 503: Busy"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn tracker_error_is_transparent_for_fetch() {
        let err = TrackerError::from(FetchError::UnknownVerdict(9));
        assert_eq!(err.to_string(), "unknown verdict code: 9");
    }
}
