use std::fmt;
use std::num::NonZeroU32;

use super::DomainError;

/// Status code of the queue endpoint meaning "still waiting".
///
/// Only meaningful for status queries. The result endpoint reuses the same
/// number for a wrong answer; see [`super::VerdictCode`].
pub const PENDING_STATUS_CODE: i64 = 1;

/// 1-based rank of a submission waiting for execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueuePosition(NonZeroU32);

impl QueuePosition {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(DomainError::InvalidQueuePosition(value))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Whether the submission will be picked up next.
    pub fn is_next(self) -> bool {
        self.get() == 1
    }

    /// Ordinal suffix shown after the position.
    ///
    /// Position 1 has none because it is announced as "next in line". Only 2
    /// and 3 get special suffixes; everything else, 11 to 13 and 21 included,
    /// is "th".
    pub fn ordinal_suffix(self) -> Option<&'static str> {
        match self.get() {
            1 => None,
            2 => Some("nd"),
            3 => Some("rd"),
            _ => Some("th"),
        }
    }

    pub fn notice(self) -> QueueNotice {
        match self.ordinal_suffix() {
            None => QueueNotice::NextInLine,
            Some(suffix) => QueueNotice::Ranked {
                position: self.get(),
                suffix,
            },
        }
    }
}

impl fmt::Display for QueuePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the waiting screen should say about a queue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueNotice {
    NextInLine,
    Ranked { position: u32, suffix: &'static str },
}

/// Outcome of one status query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    Pending { queue_position: QueuePosition },
    /// Polling must stop. `raw_code` is the status code, not the verdict.
    Terminal { raw_code: i64 },
}

impl PollStatus {
    /// Classifies a status response. Any code other than
    /// [`PENDING_STATUS_CODE`] is terminal.
    pub fn decode(code: i64, position: Option<i64>) -> Result<Self, DomainError> {
        if code != PENDING_STATUS_CODE {
            return Ok(PollStatus::Terminal { raw_code: code });
        }

        let position = position.ok_or(DomainError::MissingQueuePosition)?;
        Ok(PollStatus::Pending {
            queue_position: QueuePosition::new(position)?,
        })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PollStatus::Terminal { .. })
    }
}
