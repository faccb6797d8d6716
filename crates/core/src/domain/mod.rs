mod catalog;
mod error;
mod ids;
mod language;
mod markup;
mod poll_status;
mod submission;
mod verdict;

pub use catalog::{TaskCatalog, TaskListing};
pub use error::DomainError;
pub use ids::AttemptId;
pub use language::Language;
pub use markup::escape_markup;
pub use poll_status::{PENDING_STATUS_CODE, PollStatus, QueueNotice, QueuePosition};
pub use submission::{Submission, SubmissionHandle, TaskId};
pub use verdict::{TestCaseResult, Timing, Verdict, VerdictCode};
