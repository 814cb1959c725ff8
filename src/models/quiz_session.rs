//! Quiz session: one pass over a snapshot of the deck.
//! Each card gets exactly one answer, compared case-insensitively to the stored one.

use super::{CardId, FlashCard};
use std::io;

/// Supplies the user's answer for a card. Blocks until a line is available.
pub trait AnswerSource {
    fn next_answer(&mut self, card: &FlashCard) -> io::Result<String>;
}

impl<F> AnswerSource for F
where
    F: FnMut(&FlashCard) -> io::Result<String>,
{
    fn next_answer(&mut self, card: &FlashCard) -> io::Result<String> {
        self(card)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: u32,
    pub total: u32,
}

/// What happened to a single card during the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub card_id: CardId,
    pub given: String,
    pub expected: String,
    pub correct: bool,
}

pub struct QuizSession {
    cards: Vec<FlashCard>,
    current_index: usize,
    outcomes: Vec<AnswerOutcome>,
}

impl QuizSession {
    pub fn new(cards: Vec<FlashCard>) -> Self {
        Self {
            cards,
            current_index: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn current_card(&self) -> Option<&FlashCard> {
        self.cards.get(self.current_index)
    }

    /// Scores `answer` against the current card and moves on to the next one.
    /// Returns `None` once every card has been answered.
    pub fn submit(&mut self, answer: &str) -> Option<&AnswerOutcome> {
        let card = self.cards.get(self.current_index)?;
        let outcome = AnswerOutcome {
            card_id: card.id,
            given: answer.to_string(),
            expected: card.answer.clone(),
            correct: answers_match(answer, &card.answer),
        };
        self.current_index += 1;
        self.outcomes.push(outcome);
        self.outcomes.last()
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn outcomes(&self) -> &[AnswerOutcome] {
        &self.outcomes
    }

    pub fn correct_count(&self) -> u32 {
        saturating_count(self.outcomes.iter().filter(|o| o.correct).count())
    }

    pub fn total_count(&self) -> u32 {
        saturating_count(self.cards.len())
    }

    pub fn result(&self) -> QuizResult {
        QuizResult {
            correct: self.correct_count(),
            total: self.total_count(),
        }
    }
}

/// Runs a whole session, pulling one answer per card from `source`.
pub fn run(cards: &[FlashCard], source: &mut impl AnswerSource) -> io::Result<QuizResult> {
    let mut session = QuizSession::new(cards.to_vec());
    while let Some(card) = session.current_card().cloned() {
        let answer = source.next_answer(&card)?;
        session.submit(&answer);
    }
    let result = session.result();
    log::debug!("Quiz finished: {}/{}", result.correct, result.total);
    Ok(result)
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Case-insensitive ordinal comparison. No trimming, no locale rules.
pub fn answers_match(given: &str, expected: &str) -> bool {
    given.chars().count() == expected.chars().count()
        && given
            .chars()
            .zip(expected.chars())
            .all(|(a, b)| fold_case(a) == fold_case(b))
}

/// Simple one-to-one uppercase mapping. Characters whose uppercase form is
/// more than one character (such as 'ß') are left alone.
fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
