//! High scores, one line per user.
//!
//! A user's score only ever goes up. Unknown users and unreadable lines count
//! as a score of zero.

use std::path::{Path, PathBuf};

use super::file::{check_field, read_if_exists, write_atomically};
use crate::error::{InputError, Result};
use crate::models::UserRecord;

pub const DELIMITER: char = ',';

pub struct ScoreTracker {
    path: PathBuf,
    records: Vec<UserRecord>,
}

impl ScoreTracker {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match read_if_exists(&path)? {
            Some(contents) => parse_scores(&path, &contents),
            None => Vec::new(),
        };

        log::info!("Loaded {} user records from {:?}", records.len(), path);
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn is_registered(&self, username: &str) -> bool {
        self.find(username).is_some()
    }

    /// Stored high score for `username`, or 0 if there is none.
    pub fn load(&self, username: &str) -> u32 {
        self.find(username).map_or(0, |r| r.high_score)
    }

    /// Creates a zero-score record for a new user. Returns false if the user
    /// already exists.
    pub fn register(&mut self, username: &str) -> Result<bool> {
        validate_username(username)?;
        if self.is_registered(username) {
            return Ok(false);
        }

        self.records.push(UserRecord::new(username));
        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }
        log::debug!("Registered user {:?}", username);
        Ok(true)
    }

    /// Records `score` if it beats the stored one. Returns true when the file
    /// was rewritten.
    pub fn update(&mut self, username: &str, score: u32) -> Result<bool> {
        validate_username(username)?;
        if score <= self.load(username) {
            return Ok(false);
        }

        let position = self.records.iter().position(|r| r.username == username);
        let previous = match position {
            Some(pos) => {
                let previous = self.records[pos].high_score;
                self.records[pos].offer_score(score);
                Some((pos, previous))
            }
            None => {
                let mut record = UserRecord::new(username);
                record.offer_score(score);
                self.records.push(record);
                None
            }
        };

        if let Err(e) = self.save() {
            match previous {
                Some((pos, high_score)) => self.records[pos].high_score = high_score,
                None => {
                    self.records.pop();
                }
            }
            return Err(e);
        }
        log::debug!("New high score for {:?}: {}", username, score);
        Ok(true)
    }

    fn find(&self, username: &str) -> Option<&UserRecord> {
        self.records.iter().find(|r| r.username == username)
    }

    fn save(&self) -> Result<()> {
        let mut contents = String::new();
        for record in &self.records {
            contents.push_str(&format!(
                "{}{DELIMITER}{}\n",
                record.username, record.high_score
            ));
        }
        write_atomically(&self.path, &contents)?;
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(InputError::EmptyUsername.into());
    }
    check_field("username", username, DELIMITER)?;
    Ok(())
}

/// Reads the first two fields of `username,score`; anything after them is ignored.
fn parse_record(line: &str) -> Option<UserRecord> {
    let mut fields = line.split(DELIMITER);
    let (username, score) = (fields.next()?, fields.next()?);
    if username.is_empty() {
        return None;
    }
    let high_score = score.trim().parse::<u32>().ok()?;
    Some(UserRecord {
        username: username.to_string(),
        high_score,
    })
}

/// Later lines for the same user replace earlier ones.
fn parse_scores(path: &Path, contents: &str) -> Vec<UserRecord> {
    let mut records: Vec<UserRecord> = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let Some(record) = parse_record(line) else {
            log::warn!("Skipping malformed score at {:?} line {}", path, index + 1);
            continue;
        };
        match records.iter_mut().find(|r| r.username == record.username) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tracker() -> (ScoreTracker, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let tracker = ScoreTracker::open(temp_dir.path().join("scores.txt")).unwrap();
        (tracker, temp_dir)
    }

    #[test]
    fn test_unknown_user_scores_zero() {
        let (tracker, _temp) = create_test_tracker();
        assert_eq!(tracker.load("alice"), 0);
        assert!(!tracker.is_registered("alice"));
    }

    #[test]
    fn test_high_score_only_rises() {
        let (mut tracker, _temp) = create_test_tracker();

        assert!(tracker.update("alice", 5).unwrap());
        assert!(!tracker.update("alice", 3).unwrap());
        assert_eq!(tracker.load("alice"), 5);

        assert!(tracker.update("alice", 7).unwrap());
        assert_eq!(tracker.load("alice"), 7);

        let reloaded = ScoreTracker::open(tracker.path()).unwrap();
        assert_eq!(reloaded.load("alice"), 7);
    }

    #[test]
    fn test_equal_score_is_not_an_improvement() {
        let (mut tracker, _temp) = create_test_tracker();
        tracker.update("alice", 4).unwrap();
        let before = fs::read(tracker.path()).unwrap();

        assert!(!tracker.update("alice", 4).unwrap());
        assert_eq!(fs::read(tracker.path()).unwrap(), before);
    }

    #[test]
    fn test_zero_score_does_not_create_record() {
        let (mut tracker, _temp) = create_test_tracker();
        assert!(!tracker.update("alice", 0).unwrap());
        assert!(!tracker.is_registered("alice"));
        assert!(!tracker.path().exists());
    }

    #[test]
    fn test_scores_are_per_user() {
        let (mut tracker, _temp) = create_test_tracker();
        tracker.update("alice", 5).unwrap();
        tracker.update("bob", 2).unwrap();
        tracker.update("Alice", 9).unwrap();

        assert_eq!(tracker.load("alice"), 5);
        assert_eq!(tracker.load("bob"), 2);
        assert_eq!(tracker.load("Alice"), 9);
        assert_eq!(
            fs::read_to_string(tracker.path()).unwrap(),
            "alice,5\nbob,2\nAlice,9\n"
        );
    }

    #[test]
    fn test_register() {
        let (mut tracker, _temp) = create_test_tracker();

        assert!(tracker.register("alice").unwrap());
        assert!(!tracker.register("alice").unwrap());
        assert!(tracker.is_registered("alice"));
        assert_eq!(tracker.load("alice"), 0);
        assert_eq!(fs::read_to_string(tracker.path()).unwrap(), "alice,0\n");
    }

    #[test]
    fn test_invalid_usernames() {
        let (mut tracker, _temp) = create_test_tracker();

        assert!(matches!(
            tracker.register(""),
            Err(StoreError::InvalidInput(InputError::EmptyUsername))
        ));
        assert!(tracker.update("a,b", 3).is_err());
        assert!(tracker.records().is_empty());
    }

    #[test]
    fn test_malformed_lines_degrade_to_zero() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scores.txt");
        fs::write(&path, "alice\nbob,lots\ncarol,4\n,3\n").unwrap();

        let tracker = ScoreTracker::open(&path).unwrap();
        assert_eq!(tracker.load("alice"), 0);
        assert_eq!(tracker.load("bob"), 0);
        assert_eq!(tracker.load("carol"), 4);
        assert_eq!(tracker.records().len(), 1);
    }

    #[test]
    fn test_single_slot_file_still_loads() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user.txt");
        fs::write(&path, "alice,6").unwrap();

        let tracker = ScoreTracker::open(&path).unwrap();
        assert_eq!(tracker.load("alice"), 6);
        assert_eq!(tracker.load("bob"), 0);
    }

    #[test]
    fn test_trailing_fields_are_ignored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scores.txt");
        fs::write(&path, "alice,6,extra\nbob,2,\n").unwrap();

        let tracker = ScoreTracker::open(&path).unwrap();
        assert_eq!(tracker.load("alice"), 6);
        assert_eq!(tracker.load("bob"), 2);
    }

    #[test]
    fn test_duplicate_user_last_line_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scores.txt");
        fs::write(&path, "alice,2\nalice,8\n").unwrap();

        let tracker = ScoreTracker::open(&path).unwrap();
        assert_eq!(tracker.load("alice"), 8);
        assert_eq!(tracker.records().len(), 1);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let (mut tracker, _temp) = create_test_tracker();
        tracker.update("alice", 3).unwrap();
        fs::create_dir(crate::storage::file::tmp_path_for(tracker.path())).unwrap();

        assert!(matches!(tracker.update("alice", 9), Err(StoreError::Io(_))));
        assert!(matches!(tracker.update("bob", 1), Err(StoreError::Io(_))));

        assert_eq!(tracker.load("alice"), 3);
        assert!(!tracker.is_registered("bob"));
    }
}
