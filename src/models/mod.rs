pub mod flashcard;
pub mod quiz_session;
pub mod user_record;

pub use flashcard::{CardId, FlashCard, parse_card_id};
pub use quiz_session::{AnswerOutcome, AnswerSource, QuizResult, QuizSession, answers_match};
pub use user_record::{UserRecord, parse_score};
