//! Domain model of a judged submission: what is sent, how the queue reports
//! progress, and how the final verdict is classified.

pub mod domain;

pub use domain::*;
