//! The deck and its backing file.
//!
//! Cards keep insertion order. IDs come from a counter that always sits above
//! the largest ID ever loaded or assigned, so deleted IDs are not handed out
//! again; once `CardId::MAX` is taken, adding fails. Every mutation rewrites the whole file; if the write fails the
//! in-memory deck is put back the way it was.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::file::{check_field, read_if_exists, write_atomically};
use crate::error::{Result, StoreError};
use crate::models::{CardId, FlashCard};

pub const DELIMITER: char = '|';

/// Result of listing the deck. An empty deck is not an error.
#[derive(Debug, PartialEq)]
pub enum Listing<'a> {
    Empty,
    Cards(&'a [FlashCard]),
}

pub struct CardStore {
    path: PathBuf,
    cards: Vec<FlashCard>,
    /// `None` once `CardId::MAX` has been handed out.
    next_id: Option<CardId>,
}

impl CardStore {
    /// Loads the deck from `path`. A missing file is an empty deck; malformed
    /// lines are skipped.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cards = match read_if_exists(&path)? {
            Some(contents) => parse_deck(&path, &contents),
            None => Vec::new(),
        };
        let next_id = cards
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));

        log::info!("Loaded {} flashcards from {:?}", cards.len(), path);
        Ok(Self {
            path,
            cards,
            next_id,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn next_id(&self) -> Option<CardId> {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in insertion order.
    pub fn cards(&self) -> &[FlashCard] {
        &self.cards
    }

    pub fn list(&self) -> Listing<'_> {
        if self.cards.is_empty() {
            Listing::Empty
        } else {
            Listing::Cards(&self.cards)
        }
    }

    pub fn get(&self, id: CardId) -> Option<&FlashCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn add(&mut self, question: &str, answer: &str) -> Result<FlashCard> {
        validate(question, answer)?;

        let id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        let card = FlashCard::new(id, question, answer);
        let previous_next_id = self.next_id;
        self.cards.push(card.clone());
        self.next_id = id.checked_add(1);

        if let Err(e) = self.save() {
            self.cards.pop();
            self.next_id = previous_next_id;
            return Err(e);
        }
        log::debug!("Added flashcard {}", card.id);
        Ok(card)
    }

    /// Replaces question and answer of the card with `id`. The ID never changes.
    pub fn update(&mut self, id: CardId, question: &str, answer: &str) -> Result<()> {
        validate(question, answer)?;

        let pos = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let previous = std::mem::replace(&mut self.cards[pos], FlashCard::new(id, question, answer));
        if let Err(e) = self.save() {
            self.cards[pos] = previous;
            return Err(e);
        }
        log::debug!("Updated flashcard {}", id);
        Ok(())
    }

    /// Removes every card with `id`. Nothing is written when no card matches.
    pub fn remove(&mut self, id: CardId) -> Result<()> {
        if !self.cards.iter().any(|c| c.id == id) {
            return Err(StoreError::NotFound(id));
        }

        let previous = self.cards.clone();
        self.cards.retain(|c| c.id != id);
        if let Err(e) = self.save() {
            self.cards = previous;
            return Err(e);
        }
        log::debug!("Removed flashcard {}", id);
        Ok(())
    }

    /// Appends a batch of question/answer pairs with fresh IDs in a single rewrite.
    /// Nothing is added if any pair is rejected.
    pub fn import<I>(&mut self, pairs: I) -> Result<Vec<FlashCard>>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let pairs: Vec<(String, String)> = pairs.into_iter().collect();
        for (question, answer) in &pairs {
            validate(question, answer)?;
        }

        if pairs.is_empty() {
            return Ok(Vec::new());
        }
        let first_id = self.next_id.ok_or(StoreError::IdsExhausted)?;
        let last_id = CardId::try_from(pairs.len() - 1)
            .ok()
            .and_then(|offset| first_id.checked_add(offset))
            .ok_or(StoreError::IdsExhausted)?;

        let previous_len = self.cards.len();
        let previous_next_id = self.next_id;
        let mut added = Vec::with_capacity(pairs.len());
        for ((question, answer), id) in pairs.into_iter().zip(first_id..=last_id) {
            let card = FlashCard::new(id, question, answer);
            self.cards.push(card.clone());
            added.push(card);
        }
        self.next_id = last_id.checked_add(1);

        if let Err(e) = self.save() {
            self.cards.truncate(previous_len);
            self.next_id = previous_next_id;
            return Err(e);
        }
        log::debug!("Imported {} flashcards", added.len());
        Ok(added)
    }

    fn save(&self) -> Result<()> {
        let mut contents = String::new();
        for card in &self.cards {
            contents.push_str(&format_record(card));
            contents.push('\n');
        }
        write_atomically(&self.path, &contents)?;
        log::debug!("Wrote {} flashcards to {:?}", self.cards.len(), self.path);
        Ok(())
    }
}

fn validate(question: &str, answer: &str) -> Result<()> {
    check_field("question", question, DELIMITER)?;
    check_field("answer", answer, DELIMITER)?;
    Ok(())
}

fn format_record(card: &FlashCard) -> String {
    format!(
        "{}{DELIMITER}{}{DELIMITER}{}",
        card.id, card.question, card.answer
    )
}

/// Parses one `id|question|answer` line.
fn parse_record(line: &str) -> Option<FlashCard> {
    let mut fields = line.split(DELIMITER);
    let (id, question, answer) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }
    let id = id.trim().parse::<CardId>().ok()?;
    Some(FlashCard::new(id, question, answer))
}

fn parse_deck(path: &Path, contents: &str) -> Vec<FlashCard> {
    let mut seen = HashSet::new();
    let mut cards = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(card) if seen.insert(card.id) => cards.push(card),
            Some(card) => {
                log::warn!(
                    "Skipping duplicate flashcard {} at {:?} line {}",
                    card.id,
                    path,
                    index + 1
                );
            }
            None => {
                log::warn!("Skipping malformed record at {:?} line {}", path, index + 1);
            }
        }
    }
    cards
}
