pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod hooks;
pub mod poller;
pub mod tracker;

pub use backend::{HttpBackend, JudgeBackend, PollContext};
pub use client::SubmissionClient;
pub use config::TrackerConfig;
pub use error::{
    BackendError, FetchError, PollTransportError, Result, SubmissionError, TrackerError,
};
pub use events::{EventBroadcaster, EventStream, TrackerEvent};
pub use fetcher::{ResultFetcher, decode_verdict};
pub use hooks::{BroadcastHooks, TrackerHooks};
pub use poller::{PollHandle, PollState, StatusPoller};
pub use tracker::{SubmissionTracker, TrackOutcome, TrackReport};
