//! Flashcard is a question with its expected answer, identified by a numeric ID.
use serde::{Deserialize, Serialize};

use crate::error::InputError;

pub type CardId = u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashCard {
    pub id: CardId,
    pub question: String,
    pub answer: String,
}

impl FlashCard {
    pub fn new(id: CardId, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Parses an ID typed by the user. Surrounding whitespace is ignored.
pub fn parse_card_id(input: &str) -> Result<CardId, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse::<CardId>()
        .map_err(|_| InputError::InvalidId(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flashcard_creation() {
        let card = FlashCard::new(1, "Capital of France?", "Paris");

        assert_eq!(card.id, 1);
        assert_eq!(card.question, "Capital of France?");
        assert_eq!(card.answer, "Paris");
    }

    #[test]
    fn test_parse_card_id() {
        assert_eq!(parse_card_id("42"), Ok(42));
        assert_eq!(parse_card_id("  7\n"), Ok(7));
    }

    #[test]
    fn test_parse_card_id_rejects_garbage() {
        assert_eq!(
            parse_card_id("abc"),
            Err(InputError::InvalidId("abc".to_string()))
        );
        assert!(parse_card_id("-3").is_err());
        assert!(parse_card_id("").is_err());
        assert!(parse_card_id("1.5").is_err());
    }
}
