//! Poll operations
//!
//! Creates and fetches polls through a [`Transport`].

use super::model::{Poll, UNKNOWN_POLL_ID};
use super::request::NewPoll;
use crate::config::ClientConfig;
use crate::decode::decode_response;
use crate::error::Error;
use crate::transport::{HttpTransport, Transport};

const POLLS_PATH: &str = "/polls";

/// StrawPoll API client
#[derive(Debug, Clone)]
pub struct PollClient<T = HttpTransport> {
    transport: T,
}

impl PollClient<HttpTransport> {
    /// Create a client that talks HTTP using `config`
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }

    /// Create a client for the public StrawPoll API
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> PollClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create a poll on the server and return it with its assigned id.
    pub fn create(&self, request: &NewPoll) -> Result<Poll, Error> {
        let body = serde_json::to_value(request)?;
        let raw = self.transport.post_json(POLLS_PATH, &body)?;
        let poll = Poll::from_json(decode_response(&raw)?)?;
        tracing::info!(poll_id = poll.id(), title = %request.title, "created poll");
        Ok(poll)
    }

    /// Fetch an existing poll by id.
    pub fn get(&self, id: i64) -> Result<Poll, Error> {
        let poll = Poll::from_json(self.fetch(id)?)?;
        tracing::info!(poll_id = id, total_votes = poll.total_votes(), "fetched poll");
        Ok(poll)
    }

    /// Reload the options and votes of `poll` from the server.
    ///
    /// Title, id and settings keep their local values.
    pub fn refresh(&self, poll: &mut Poll) -> Result<(), Error> {
        if poll.id() == UNKNOWN_POLL_ID {
            tracing::debug!("refreshing a poll without a server id");
        }
        poll.apply_refresh(self.fetch(poll.id())?)?;
        tracing::info!(
            poll_id = poll.id(),
            total_votes = poll.total_votes(),
            "refreshed poll"
        );
        Ok(())
    }

    fn fetch(&self, id: i64) -> Result<serde_json::Value, Error> {
        let raw = self.transport.get(&format!("{}/{}", POLLS_PATH, id))?;
        decode_response(&raw)
    }
}

impl Poll {
    /// Reload options and votes through `client`. See [`PollClient::refresh`].
    pub fn refresh<T: Transport>(&mut self, client: &PollClient<T>) -> Result<(), Error> {
        client.refresh(self)
    }
}

/// Create a poll using the default client.
///
/// `request` carries the title, options, `multi`, `dupcheck` and `captcha`
/// settings; see [`NewPoll::new`] for their defaults.
pub fn create(request: &NewPoll) -> Result<Poll, Error> {
    PollClient::with_defaults()?.create(request)
}

/// Fetch a poll using the default client.
pub fn get(id: i64) -> Result<Poll, Error> {
    PollClient::with_defaults()?.get(id)
}
