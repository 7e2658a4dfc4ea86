//! High score ledger
//!
//! One top-10 list per game mode, highest first. Persisted to LocalStorage on
//! the web under one key per mode; kept in memory elsewhere.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::sim::GameMode;

/// Maximum number of high scores to keep per mode
pub const MAX_HIGH_SCORES: usize = 10;

/// Durable per-mode score storage
pub trait ScoreLedger {
    /// Record a finished session's score.
    /// Returns the rank achieved (1-indexed), or None if it fell off the list.
    fn save(&mut self, score: u64, mode: GameMode) -> Result<Option<usize>, LedgerError>;

    /// Best `n` scores for `mode`, highest first
    fn top_n(&self, mode: GameMode, n: usize) -> Vec<u64>;
}

/// In-memory per-mode leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HighScores {
    pub modes: BTreeMap<GameMode, Vec<u64>>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            modes: BTreeMap::new(),
        }
    }

    /// Full history for a mode, highest first
    pub fn history(&self, mode: GameMode) -> &[u64] {
        self.modes.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a score would make the list
    pub fn qualifies(&self, mode: GameMode, score: u64) -> bool {
        let entries = self.history(mode);
        if entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        entries.last().map(|&lowest| score > lowest).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, mode: GameMode, score: u64) -> Option<usize> {
        if !self.qualifies(mode, score) {
            return None;
        }
        let entries = self.history(mode);
        let rank = entries.iter().position(|&e| score > e);
        Some(rank.unwrap_or(entries.len()) + 1)
    }

    /// Insert a score, keep the list sorted descending and capped.
    /// Ties rank below existing equal scores.
    pub fn add_score(&mut self, mode: GameMode, score: u64) -> Option<usize> {
        let entries = self.modes.entry(mode).or_default();
        let pos = entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(entries.len());
        entries.insert(pos, score);
        entries.truncate(MAX_HIGH_SCORES);
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Replace one mode's list, re-sorting and capping whatever was stored
    pub fn set_history(&mut self, mode: GameMode, mut scores: Vec<u64>) {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_HIGH_SCORES);
        self.modes.insert(mode, scores);
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.modes.values().all(Vec::is_empty)
    }

    /// Get the top score for a mode (if any)
    pub fn top_score(&self, mode: GameMode) -> Option<u64> {
        self.history(mode).first().copied()
    }
}

impl ScoreLedger for HighScores {
    fn save(&mut self, score: u64, mode: GameMode) -> Result<Option<usize>, LedgerError> {
        Ok(self.add_score(mode, score))
    }

    fn top_n(&self, mode: GameMode, n: usize) -> Vec<u64> {
        self.history(mode).iter().take(n).copied().collect()
    }
}

/// LocalStorage key for one mode's list
pub fn storage_key(mode: GameMode) -> String {
    format!("ar_shooter_scores_{}", mode.as_str())
}

/// Decode a stored list (a JSON array of scores)
pub fn decode_history(json: &str) -> Result<Vec<u64>, LedgerError> {
    serde_json::from_str(json).map_err(|e| LedgerError::Parse(e.to_string()))
}

pub fn encode_history(scores: &[u64]) -> Result<String, LedgerError> {
    serde_json::to_string(scores).map_err(|e| LedgerError::Serialize(e.to_string()))
}

/// Ledger backed by the browser's LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageLedger {
    cache: HighScores,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageLedger {
    fn storage() -> Result<web_sys::Storage, LedgerError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(LedgerError::Unavailable)
    }

    /// Load every mode's list; unreadable entries start fresh
    pub fn load() -> Self {
        let mut cache = HighScores::new();
        match Self::storage() {
            Ok(storage) => {
                for mode in GameMode::ALL {
                    let Ok(Some(json)) = storage.get_item(&storage_key(mode)) else {
                        continue;
                    };
                    match decode_history(&json) {
                        Ok(scores) => cache.set_history(mode, scores),
                        Err(e) => log::warn!("Discarding {} scores: {}", mode.as_str(), e),
                    }
                }
                log::info!("Loaded high scores");
            }
            Err(e) => log::warn!("High scores unavailable: {}", e),
        }
        Self { cache }
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreLedger for LocalStorageLedger {
    fn save(&mut self, score: u64, mode: GameMode) -> Result<Option<usize>, LedgerError> {
        let rank = self.cache.add_score(mode, score);
        let storage = Self::storage()?;
        let json = encode_history(self.cache.history(mode))?;
        storage
            .set_item(&storage_key(mode), &json)
            .map_err(|e| LedgerError::Write(format!("{:?}", e)))?;
        log::info!("High scores saved ({})", mode.as_str());
        Ok(rank)
    }

    fn top_n(&self, mode: GameMode, n: usize) -> Vec<u64> {
        self.cache.top_n(mode, n)
    }
}
