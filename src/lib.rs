pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod storage;

pub use config::Config;
pub use error::{InputError, Result, StoreError};
pub use models::{CardId, FlashCard, QuizResult, QuizSession, UserRecord};
pub use storage::{CardStore, Listing, ScoreTracker};
