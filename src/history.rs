//! Match history and win/loss stats
//!
//! Persisted to LocalStorage, bounded to the last 10 matches. Any load
//! failure degrades to an empty history; stats over an empty history are
//! all zero.

use serde::{Deserialize, Serialize};

/// Maximum number of match records to keep
pub const MAX_MATCHES: usize = 10;

/// A single completed match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Whether the player won
    pub won: bool,
    pub player_score: u32,
    pub ai_score: u32,
    /// Unix timestamp (ms) when the match ended
    pub timestamp: f64,
}

/// Bounded match history, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchHistory {
    pub entries: Vec<MatchRecord>,
}

/// Aggregate win/loss figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    pub wins: u32,
    pub losses: u32,
    /// Win percentage, rounded; 0 when no matches are recorded
    pub win_rate: u32,
}

impl MatchHistory {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_pong_matches";

    /// Create empty history
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished match; the oldest record is dropped beyond the cap
    pub fn save_match(&mut self, won: bool, player_score: u32, ai_score: u32, timestamp: f64) {
        self.entries.insert(
            0,
            MatchRecord {
                won,
                player_score,
                ai_score,
                timestamp,
            },
        );
        self.entries.truncate(MAX_MATCHES);
    }

    /// Win/loss counts and win rate over the retained records
    pub fn stats(&self) -> MatchStats {
        let wins = self.entries.iter().filter(|m| m.won).count() as u32;
        let losses = self.entries.len() as u32 - wins;
        let total = wins + losses;
        let win_rate = if total > 0 {
            (wins as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        MatchStats {
            wins,
            losses,
            win_rate,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent records, newest first
    pub fn recent(&self, count: usize) -> &[MatchRecord] {
        &self.entries[..count.min(self.entries.len())]
    }

    /// Load history from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(history) = serde_json::from_str::<MatchHistory>(&json) {
                    log::info!("Loaded {} match records", history.entries.len());
                    return history;
                }
            }
        }

        log::info!("No match history found, starting fresh");
        Self::new()
    }

    /// Save history to LocalStorage (WASM only); failures are swallowed
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Match history saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
