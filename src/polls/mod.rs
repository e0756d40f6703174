//! Polls
//!
//! The poll data model and the operations that create and fetch polls.

pub mod client;
pub mod model;
pub mod request;

pub use client::{create, get, PollClient};
pub use model::{Dupcheck, Poll, Tally, TallyIter, DEFAULT_ROUNDING, UNKNOWN_POLL_ID};
pub use request::NewPoll;
