//! Console menu. Reads commands line by line and renders what the stores and
//! the quiz report. Generic over its input and output so it can be scripted.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::export::json::{export_json_to_path, import_json_into};
use crate::models::{QuizSession, parse_card_id};
use crate::storage::{CardStore, Listing, ScoreTracker};

/// What the menu loop does after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct App<R, W> {
    input: R,
    output: W,
    cards: CardStore,
    scores: ScoreTracker,
    username: String,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(cards: CardStore, scores: ScoreTracker, input: R, output: W) -> Self {
        Self {
            input,
            output,
            cards,
            scores,
            username: String::new(),
        }
    }

    pub fn cards(&self) -> &CardStore {
        &self.cards
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    /// Asks for a name, then serves the menu until exit or end of input.
    pub fn run(&mut self) -> Result<()> {
        if !self.login()? {
            return Ok(());
        }

        loop {
            self.show_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };

            let flow = match self.handle(choice.trim()) {
                Ok(flow) => flow,
                Err(e @ (StoreError::NotFound(_) | StoreError::InvalidInput(_))) => {
                    writeln!(self.output, "{}", e)?;
                    Flow::Continue
                }
                Err(e) => {
                    log::error!("Command failed: {}", e);
                    writeln!(self.output, "Error: {}", e)?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "Thank you for playing. Goodbye!")?;
        Ok(())
    }

    fn handle(&mut self, choice: &str) -> Result<Flow> {
        match choice {
            "1" => self.add_card(),
            "2" => self.list_cards(),
            "3" => self.update_card(),
            "4" => self.delete_card(),
            "5" => self.play(),
            "6" => self.export_deck(),
            "7" => self.import_deck(),
            "8" => Ok(Flow::Exit),
            _ => {
                writeln!(self.output, "Invalid option. Please choose again.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn login(&mut self) -> Result<bool> {
        loop {
            let Some(name) = self.prompt("Enter your name: ")? else {
                return Ok(false);
            };
            let name = name.trim().to_string();

            match self.scores.register(&name) {
                Ok(true) => {
                    writeln!(self.output, "Welcome, {}! Your profile was created.", name)?;
                }
                Ok(false) => {
                    let best = self.scores.load(&name);
                    writeln!(self.output, "Welcome back, {}! High score: {}", name, best)?;
                }
                Err(StoreError::InvalidInput(e)) => {
                    writeln!(self.output, "Invalid name: {}", e)?;
                    continue;
                }
                Err(e) => return Err(e),
            }
            self.username = name;
            return Ok(true);
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== FlashLearn: {} ===", self.username)?;
        writeln!(self.output, "1. Add a flashcard")?;
        writeln!(self.output, "2. View all flashcards")?;
        writeln!(self.output, "3. Update a flashcard")?;
        writeln!(self.output, "4. Delete a flashcard")?;
        writeln!(self.output, "5. Start the quiz")?;
        writeln!(self.output, "6. Export deck to JSON")?;
        writeln!(self.output, "7. Import deck from JSON")?;
        writeln!(self.output, "8. Exit")?;
        write!(self.output, "Choose an option: ")?;
        self.output.flush()
    }

    fn add_card(&mut self) -> Result<Flow> {
        let Some(question) = self.prompt("Enter the question: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(answer) = self.prompt("Enter the answer: ")? else {
            return Ok(Flow::Exit);
        };

        let card = self.cards.add(&question, &answer)?;
        writeln!(self.output, "Flashcard {} added.", card.id)?;
        Ok(Flow::Continue)
    }

    fn list_cards(&mut self) -> Result<Flow> {
        match self.cards.list() {
            Listing::Empty => writeln!(self.output, "No flashcards available.")?,
            Listing::Cards(cards) => {
                writeln!(self.output, "List of flashcards:")?;
                for card in cards {
                    writeln!(
                        self.output,
                        "ID: {} | Question: {} | Answer: {}",
                        card.id, card.question, card.answer
                    )?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn update_card(&mut self) -> Result<Flow> {
        let Some(raw_id) = self.prompt("Enter the ID of the flashcard to update: ")? else {
            return Ok(Flow::Exit);
        };
        let id = parse_card_id(&raw_id)?;
        if self.cards.get(id).is_none() {
            return Err(StoreError::NotFound(id));
        }

        let Some(question) = self.prompt("Enter the new question: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(answer) = self.prompt("Enter the new answer: ")? else {
            return Ok(Flow::Exit);
        };

        self.cards.update(id, &question, &answer)?;
        writeln!(self.output, "Flashcard {} updated.", id)?;
        Ok(Flow::Continue)
    }

    fn delete_card(&mut self) -> Result<Flow> {
        let Some(raw_id) = self.prompt("Enter the ID of the flashcard to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let id = parse_card_id(&raw_id)?;

        self.cards.remove(id)?;
        writeln!(self.output, "Flashcard {} deleted.", id)?;
        Ok(Flow::Continue)
    }

    fn play(&mut self) -> Result<Flow> {
        if self.cards.is_empty() {
            writeln!(
                self.output,
                "No flashcards available to start the quiz. Add flashcards first."
            )?;
            return Ok(Flow::Continue);
        }

        let mut session = QuizSession::new(self.cards.cards().to_vec());
        writeln!(
            self.output,
            "Starting the quiz with {} flashcards.",
            session.total_count()
        )?;

        while let Some(card) = session.current_card() {
            let question = format!("{}\n> ", card.question);
            let Some(answer) = self.prompt(&question)? else {
                return Ok(Flow::Exit);
            };
            if let Some(outcome) = session.submit(&answer) {
                if outcome.correct {
                    writeln!(self.output, "Correct!")?;
                } else {
                    writeln!(self.output, "Wrong! The correct answer is {}.", outcome.expected)?;
                }
            }
        }

        let result = session.result();
        writeln!(self.output, "Quiz over! Your score: {}/{}.", result.correct, result.total)?;
        if self.scores.update(&self.username, result.correct)? {
            writeln!(self.output, "New high score: {}!", result.correct)?;
        }
        Ok(Flow::Continue)
    }

    fn export_deck(&mut self) -> Result<Flow> {
        let Some(path) = self.prompt("Export to file: ")? else {
            return Ok(Flow::Exit);
        };
        let export = export_json_to_path(self.cards.cards(), PathBuf::from(path.trim()))?;
        writeln!(self.output, "Exported {} flashcards.", export.cards.len())?;
        Ok(Flow::Continue)
    }

    fn import_deck(&mut self) -> Result<Flow> {
        let Some(path) = self.prompt("Import from file: ")? else {
            return Ok(Flow::Exit);
        };
        let added = import_json_into(&mut self.cards, PathBuf::from(path.trim()))?;
        writeln!(self.output, "Imported {} flashcards.", added.len())?;
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next input line without its line ending, or `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
