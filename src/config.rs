//! Where the data files live.
//!
//! The binary reads an optional `flashlearn.json` next to where it is started;
//! every field falls back to its default when absent.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const CONFIG_FILE: &str = "flashlearn.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub deck_file: String,
    pub score_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            deck_file: "flashcards.txt".to_string(),
            score_file: "scores.txt".to_string(),
        }
    }
}

impl Config {
    /// Loads a JSON config file, or the defaults if there is none.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn deck_path(&self) -> PathBuf {
        self.data_dir.join(&self.deck_file)
    }

    pub fn score_path(&self) -> PathBuf {
        self.data_dir.join(&self.score_file)
    }
}
