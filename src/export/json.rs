//! JSON import/export module for the deck.
//! Exported files carry questions and answers only; IDs belong to the store
//! they live in and are reassigned on import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::FlashCard;
use crate::storage::CardStore;
use crate::storage::file::write_atomically;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedCard {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckExport {
    pub exported_at: DateTime<Utc>,
    pub cards: Vec<ExportedCard>,
}

impl DeckExport {
    pub fn from_cards(cards: &[FlashCard]) -> Self {
        Self {
            exported_at: Utc::now(),
            cards: cards
                .iter()
                .map(|c| ExportedCard {
                    question: c.question.clone(),
                    answer: c.answer.clone(),
                })
                .collect(),
        }
    }
}

/// Exports the cards to a JSON file at the specified path.
pub fn export_json_to_path(cards: &[FlashCard], path: impl AsRef<Path>) -> Result<DeckExport> {
    let path = path.as_ref();
    let export = DeckExport::from_cards(cards);
    let json_string = serde_json::to_string_pretty(&export)?;
    write_atomically(path, &json_string)?;

    log::info!("Exported {} flashcards to {:?}", export.cards.len(), path);
    Ok(export)
}

/// Reads a JSON export. Fails if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: impl AsRef<Path>) -> Result<DeckExport> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let export: DeckExport = serde_json::from_str(&contents)?;

    log::info!("Read {} flashcards from {:?}", export.cards.len(), path);
    Ok(export)
}

/// Imports a JSON export into `store`, giving every card a fresh ID.
pub fn import_json_into(store: &mut CardStore, path: impl AsRef<Path>) -> Result<Vec<FlashCard>> {
    let export = import_json(path)?;
    store.import(
        export
            .cards
            .into_iter()
            .map(|c| (c.question, c.answer)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_cards() -> Vec<FlashCard> {
        vec![
            FlashCard::new(4, "hello", "cześć"),
            FlashCard::new(9, "goodbye", "do widzenia"),
        ]
    }

    #[test]
    fn test_export_json_to_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deck.json");

        let export = export_json_to_path(&create_test_cards(), &path).unwrap();

        assert_eq!(export.cards.len(), 2);
        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["cards"][1]["answer"], "do widzenia");
        assert!(written["exported_at"].is_string());
    }

    #[test]
    fn test_import_json() {
        let json_content = r#"{
  "exported_at": "2024-05-01T12:00:00Z",
  "cards": [
    {
      "question": "test question",
      "answer": "test answer"
    }
  ]
}"#;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("import.json");
        fs::write(&path, json_content).unwrap();

        let export = import_json(&path).unwrap();
        assert_eq!(export.cards.len(), 1);
        assert_eq!(export.cards[0].question, "test question");
        assert_eq!(export.cards[0].answer, "test answer");
        assert_eq!(export.exported_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_export_and_import_into_store() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("deck.json");
        export_json_to_path(&create_test_cards(), &path).unwrap();

        let mut store = CardStore::open(temp.path().join("flashcards.txt")).unwrap();
        store.add("already here", "yes").unwrap();
        let added = import_json_into(&mut store, &path).unwrap();

        assert_eq!(added.iter().map(|c| c.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(store.get(2).unwrap().question, "hello");
        assert_eq!(store.get(3).unwrap().answer, "do widzenia");
    }

    #[test]
    fn test_import_nonexistent_file() {
        let temp = TempDir::new().unwrap();
        let result = import_json(temp.path().join("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        assert!(matches!(import_json(&path), Err(StoreError::Json(_))));
    }
}
