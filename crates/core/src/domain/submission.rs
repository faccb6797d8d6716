use std::fmt;

use super::{DomainError, Language};

/// Identifier of a task from the backend's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(DomainError::EmptyTask);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One code-judging attempt, built from form state at submit time.
///
/// The source text is not validated here; an empty program is the backend's
/// call to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    language: Language,
    task: TaskId,
    source_text: String,
}

impl Submission {
    pub fn new(language: Language, task: TaskId, source_text: impl Into<String>) -> Self {
        Self {
            language,
            task,
            source_text: source_text.into(),
        }
    }

    /// Builds a submission from raw form values.
    pub fn from_form(
        language: &str,
        task: &str,
        source_text: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(language.parse()?, TaskId::new(task)?, source_text))
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn task(&self) -> &TaskId {
        &self.task
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn into_source_text(self) -> String {
        self.source_text
    }
}

/// Opaque identifier the backend assigns to an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionHandle(String);

impl SubmissionHandle {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyHandle);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
