//! Poll creation request

use serde::Serialize;

use super::model::Dupcheck;

/// Body of a poll creation request.
///
/// Serializes to exactly the five fields the API accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPoll {
    pub title: String,
    pub options: Vec<String>,
    /// Allow voters to pick more than one option
    pub multi: bool,
    pub dupcheck: Dupcheck,
    /// Require a captcha to vote
    pub captcha: bool,
}

impl NewPoll {
    /// Single-choice poll with normal duplicate checking and no captcha
    pub fn new<I, S>(title: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            options: options.into_iter().map(Into::into).collect(),
            multi: false,
            dupcheck: Dupcheck::Normal,
            captcha: false,
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_poll_defaults() {
        let poll = NewPoll::new("Lunch?", ["Pizza", "Tacos"]);
        assert_eq!(poll.options, vec!["Pizza".to_string(), "Tacos".to_string()]);
        assert!(!poll.multi);
        assert_eq!(poll.dupcheck, Dupcheck::Normal);
        assert!(!poll.captcha);
    }

    #[test]
    fn test_new_poll_payload() {
        let poll = NewPoll::new("Lunch?", ["Pizza", "Tacos"]);
        insta::assert_json_snapshot!(poll, @r###"
        {
          "title": "Lunch?",
          "options": [
            "Pizza",
            "Tacos"
          ],
          "multi": false,
          "dupcheck": "normal",
          "captcha": false
        }
        "###);
    }

    #[test]
    fn test_new_poll_setters() {
        let poll = NewPoll::new("Best editor", vec!["vim".to_string(), "emacs".to_string()])
            .with_multi(true)
            .with_dupcheck(Dupcheck::Permissive)
            .with_captcha(true);
        let value = serde_json::to_value(&poll).unwrap();
        assert_eq!(value["multi"], true);
        assert_eq!(value["dupcheck"], "permissive");
        assert_eq!(value["captcha"], true);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
