//! Flat-file persistence for the deck and the high scores.
//!
//! Both files are newline-terminated records rewritten in full on every
//! change:
//! ```text
//! flashcards.txt   id|question|answer
//! scores.txt       username,score
//! ```

pub mod card_store;
pub mod file;
pub mod score_tracker;

pub use card_store::{CardStore, Listing};
pub use score_tracker::ScoreTracker;
