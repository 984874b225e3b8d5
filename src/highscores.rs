//! High score leaderboard
//!
//! Five entries, sorted descending. A fresh table is seeded with placeholder
//! pilots so a first run has something to beat. A finished run that makes
//! the table is inserted nameless; the name entry screen fills it in.
//! Storage is the caller's business; the table is plain serde data.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Name recorded when the player does not enter one
pub const DEFAULT_NAME: &str = "PLYR";

/// Longest name the entry screen accepts
pub const MAX_NAME_LENGTH: usize = 15;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    /// Set on the entry added by the latest finished run
    #[serde(default)]
    pub recent: bool,
}

impl HighScoreEntry {
    /// Append typed characters, uppercased. Characters outside `' '..='Z'`
    /// are dropped, as is anything past [`MAX_NAME_LENGTH`].
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars().map(|c| c.to_ascii_uppercase()) {
            if self.name.len() < MAX_NAME_LENGTH && (' '..='Z').contains(&c) {
                self.name.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        self.name.pop();
    }

    /// Finish editing; a blank name becomes [`DEFAULT_NAME`]
    pub fn commit_name(&mut self) {
        if self.name.is_empty() {
            self.name = DEFAULT_NAME.to_string();
        }
    }
}

/// Receives the final score of each finished episode
pub trait ScoreRecorder {
    fn record_score(&mut self, score: u32);
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Table seeded with placeholder scores `5, 4, 3, 2, 1`
    pub fn new() -> Self {
        let entries = (1..=MAX_HIGH_SCORES as u32)
            .rev()
            .map(|score| HighScoreEntry {
                name: DEFAULT_NAME.to_string(),
                score,
                recent: false,
            })
            .collect();
        Self { entries }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a score under `name`. The new entry becomes the only `recent` one.
    ///
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    /// Ties rank below existing entries.
    pub fn add_score(&mut self, name: &str, score: u32) -> Option<usize> {
        for entry in &mut self.entries {
            entry.recent = false;
        }
        if !self.qualifies(score) {
            log::debug!("score {} does not make the table", score);
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            recent: true,
        };
        let index = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("New high score {} at rank {}", score, index + 1);
        Some(index + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Table index and entry from the latest run, if it made the table
    pub fn recent(&self) -> Option<(usize, &HighScoreEntry)> {
        self.entries.iter().enumerate().find(|(_, e)| e.recent)
    }
}

impl ScoreRecorder for HighScores {
    /// Insert the run with a blank name, left for the entry screen
    fn record_score(&mut self, score: u32) {
        self.add_score("", score);
    }
}
