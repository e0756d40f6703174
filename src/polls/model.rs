//! Poll data model
//!
//! A [`Poll`] keeps its options and vote counts index-aligned and derives the
//! per-option results and the vote total from them.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Id of a poll that has not been created on the server.
pub const UNKNOWN_POLL_ID: i64 = -1;

/// Default precision of [`Poll::normalise`] percentages.
pub const DEFAULT_ROUNDING: u32 = 2;

/// Server-side handling of duplicate votes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dupcheck {
    /// IP-based duplicate checking
    Normal,
    /// Cookie-based, more lenient checking
    Permissive,
    /// No duplicate checking
    Disabled,
}

impl Dupcheck {
    /// Map the deprecated boolean `permissive` flag onto a dupcheck policy.
    pub fn from_permissive(permissive: bool) -> Self {
        if permissive {
            Dupcheck::Permissive
        } else {
            Dupcheck::Disabled
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dupcheck::Normal => "normal",
            Dupcheck::Permissive => "permissive",
            Dupcheck::Disabled => "disabled",
        }
    }
}

impl fmt::Display for Dupcheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dupcheck {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Dupcheck::Normal),
            "permissive" => Ok(Dupcheck::Permissive),
            "disabled" => Ok(Dupcheck::Disabled),
            other => Err(Error::InvalidPoll(format!(
                "unknown dupcheck '{}', expected normal, permissive or disabled",
                other
            ))),
        }
    }
}

/// Mapping from option text to a value, in first-seen option order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for Tally<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Tally<T> {
    pub fn get(&self, option: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(text, _)| text == option)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> TallyIter<'_, T> {
        self.into_iter()
    }

    /// Option texts in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(text, _)| text.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, option: String, value: T) {
        self.entries.push((option, value));
    }
}

impl Tally<u64> {
    /// Add votes to an option, creating the entry on first sight.
    fn add(&mut self, option: &str, votes: u64) -> Result<(), Error> {
        match self.entries.iter_mut().find(|(text, _)| text == option) {
            Some((_, total)) => {
                *total = total
                    .checked_add(votes)
                    .ok_or_else(|| vote_overflow(option))?;
            }
            None => self.entries.push((option.to_string(), votes)),
        }
        Ok(())
    }
}

impl<T: Serialize> Serialize for Tally<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (text, value) in &self.entries {
            map.serialize_entry(text, value)?;
        }
        map.end()
    }
}

/// Iterator over `(option, value)` pairs of a [`Tally`]
pub type TallyIter<'a, T> =
    std::iter::Map<std::slice::Iter<'a, (String, T)>, fn(&'a (String, T)) -> (&'a str, &'a T)>;

fn entry_ref<T>(entry: &(String, T)) -> (&str, &T) {
    (entry.0.as_str(), &entry.1)
}

impl<'a, T> IntoIterator for &'a Tally<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = TallyIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(entry_ref as fn(&'a (String, T)) -> (&'a str, &'a T))
    }
}

fn vote_overflow(option: &str) -> Error {
    Error::InvalidPoll(format!("vote count for '{}' overflows", option))
}

/// A StrawPoll poll and its current results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Poll {
    id: i64,
    title: String,
    options: Vec<String>,
    votes: Vec<u64>,
    multi: bool,
    dupcheck: Dupcheck,
    captcha: bool,
    results: Tally<u64>,
    total_votes: u64,
}

impl Default for Poll {
    fn default() -> Self {
        Self {
            id: UNKNOWN_POLL_ID,
            title: String::new(),
            options: Vec::new(),
            votes: Vec::new(),
            multi: false,
            dupcheck: Dupcheck::from_permissive(false),
            captcha: false,
            results: Tally::default(),
            total_votes: 0,
        }
    }
}

impl Poll {
    /// Create a poll from options and their vote counts.
    ///
    /// Empty `votes` means every option starts at zero. Otherwise both
    /// sequences must have the same length.
    pub fn new(options: Vec<String>, votes: Vec<u64>) -> Result<Self, Error> {
        let mut poll = Self::default();
        poll.set_tallies(options, votes)?;
        Ok(poll)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn with_dupcheck(mut self, dupcheck: Dupcheck) -> Self {
        self.dupcheck = dupcheck;
        self
    }

    pub fn with_captcha(mut self, captcha: bool) -> Self {
        self.captcha = captcha;
        self
    }

    /// Build a poll from a decoded API response. Unknown fields are ignored.
    pub fn from_json(value: serde_json::Value) -> Result<Self, Error> {
        let payload: PollPayload = serde_json::from_value(value)?;
        let dupcheck = payload
            .dupcheck
            .unwrap_or_else(|| Dupcheck::from_permissive(payload.permissive));

        let mut poll = Self {
            id: payload.id,
            title: payload.title.unwrap_or_default(),
            multi: payload.multi,
            dupcheck,
            captcha: payload.captcha,
            ..Self::default()
        };
        poll.set_tallies(
            payload.options.unwrap_or_default(),
            payload.votes.unwrap_or_default(),
        )?;
        Ok(poll)
    }

    /// Replace options and votes with a fresh server response.
    ///
    /// Only the tallies change; id, title and settings are left as they are.
    pub(crate) fn apply_refresh(&mut self, value: serde_json::Value) -> Result<(), Error> {
        let payload: PollPayload = serde_json::from_value(value)?;
        self.set_tallies(
            payload.options.unwrap_or_default(),
            payload.votes.unwrap_or_default(),
        )
    }

    /// Store options/votes and recompute results and the vote total.
    fn set_tallies(&mut self, options: Vec<String>, votes: Vec<u64>) -> Result<(), Error> {
        let votes = if votes.is_empty() {
            vec![0; options.len()]
        } else if votes.len() != options.len() {
            return Err(Error::InvalidPoll(format!(
                "{} options but {} vote counts",
                options.len(),
                votes.len()
            )));
        } else {
            votes
        };

        let mut results = Tally::default();
        let mut total_votes = 0u64;
        for (option, count) in options.iter().zip(&votes) {
            results.add(option, *count)?;
            total_votes = total_votes
                .checked_add(*count)
                .ok_or_else(|| Error::InvalidPoll("vote total overflows".to_string()))?;
        }

        self.options = options;
        self.votes = votes;
        self.results = results;
        self.total_votes = total_votes;
        Ok(())
    }

    /// Percentage of the total vote for each option, rounded to `rounding`
    /// decimal places (halves round away from zero).
    ///
    /// Every option is `0.0` while nobody has voted.
    pub fn normalise(&self, rounding: u32) -> Tally<f64> {
        let mut percentages = Tally::default();
        for (option, votes) in self.results.iter() {
            let percentage = if self.total_votes == 0 {
                0.0
            } else {
                round_to(*votes as f64 / self.total_votes as f64 * 100.0, rounding)
            };
            percentages.push(option.to_string(), percentage);
        }
        percentages
    }

    /// [`Poll::normalise`] with two decimal places
    pub fn normalise_default(&self) -> Tally<f64> {
        self.normalise(DEFAULT_ROUNDING)
    }

    /// Whether the poll has a server-assigned id
    pub fn is_created(&self) -> bool {
        self.id != UNKNOWN_POLL_ID
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Vote counts, index-aligned with [`Poll::options`]
    pub fn votes(&self) -> &[u64] {
        &self.votes
    }

    pub fn multi(&self) -> bool {
        self.multi
    }

    pub fn dupcheck(&self) -> Dupcheck {
        self.dupcheck
    }

    pub fn captcha(&self) -> bool {
        self.captcha
    }

    /// Votes per option text; duplicate option texts are summed
    pub fn results(&self) -> &Tally<u64> {
        &self.results
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }
}

/// Poll fields as the API sends them
#[derive(Debug, Deserialize)]
struct PollPayload {
    #[serde(default = "unknown_id")]
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    votes: Option<Vec<u64>>,
    #[serde(default)]
    multi: bool,
    #[serde(default)]
    dupcheck: Option<Dupcheck>,
    /// Deprecated predecessor of `dupcheck`
    #[serde(default)]
    permissive: bool,
    #[serde(default)]
    captcha: bool,
}

fn unknown_id() -> i64 {
    UNKNOWN_POLL_ID
}

fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places.min(i32::MAX as u32) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}
