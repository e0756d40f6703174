//! strawpoll
//!
//! A small synchronous client for the StrawPoll v2 API. Create polls, fetch
//! them by id, refresh their vote counts and turn the counts into
//! percentages.
//!
//! ```no_run
//! use strawpoll::{NewPoll, PollClient};
//!
//! let client = PollClient::with_defaults()?;
//! let mut poll = client.create(&NewPoll::new("Lunch?", ["Pizza", "Tacos"]))?;
//! poll.refresh(&client)?;
//! for (option, percent) in poll.normalise_default().iter() {
//!     println!("{option}: {percent}%");
//! }
//! # Ok::<(), strawpoll::Error>(())
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod logging;
pub mod polls;
pub mod transport;

pub use config::{ClientConfig, USER_AGENT};
pub use error::{ApiError, Error};
pub use polls::{create, get, Dupcheck, NewPoll, Poll, PollClient, Tally};
pub use transport::{HttpTransport, Transport};
