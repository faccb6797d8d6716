use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("task id must not be empty")]
    EmptyTask,
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("submission handle must not be empty")]
    EmptyHandle,
    #[error("pending status without a queue position")]
    MissingQueuePosition,
    #[error("invalid queue position: {0}. position must be >= 1")]
    InvalidQueuePosition(i64),
    #[error("unknown verdict code: {0}")]
    UnknownVerdict(i64),
}
