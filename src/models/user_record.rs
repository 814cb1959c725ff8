//! A user and the best quiz score they have reached.
use serde::{Deserialize, Serialize};

use crate::error::InputError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub high_score: u32,
}

impl UserRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            high_score: 0,
        }
    }

    /// Raises the high score if `score` beats it. Returns true when it changed.
    pub fn offer_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

pub fn parse_score(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| InputError::InvalidScore(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_starts_at_zero() {
        let user = UserRecord::new("alice");
        assert_eq!(user.high_score, 0);
    }

    #[test]
    fn test_offer_score_only_raises() {
        let mut user = UserRecord::new("alice");

        assert!(user.offer_score(5));
        assert!(!user.offer_score(3));
        assert!(!user.offer_score(5));
        assert_eq!(user.high_score, 5);

        assert!(user.offer_score(7));
        assert_eq!(user.high_score, 7);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score(" 12 "), Ok(12));
        assert_eq!(
            parse_score("twelve"),
            Err(InputError::InvalidScore("twelve".to_string()))
        );
    }
}
