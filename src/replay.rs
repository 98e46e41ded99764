//! Replaying recorded reaction streams through a burst manager.
//!
//! A replay file is a JSON array of reactions with millisecond timestamps:
//!
//! ```json
//! [
//!   { "emoji": "❤️", "participant": "a", "name": "Alice", "timestamp_ms": 0 },
//!   { "emoji": "❤️", "participant": "b", "timestamp_ms": 1000 }
//! ]
//! ```

use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::burst::{BurstDelegate, BurstStats, ReactionBurst, ReactionBurstManager};
use crate::clock::ManualClock;
use crate::config::BurstConfig;
use crate::error::ReplayError;
use crate::reaction::Reaction;

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayEntry {
    pub emoji: String,
    pub participant: String,
    /// Display name; defaults to the participant id.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub local: bool,
    pub timestamp_ms: u64,
}

impl ReplayEntry {
    fn to_reaction(&self) -> Reaction {
        let name = self.name.as_deref().unwrap_or(&self.participant);
        let reaction = Reaction::new(
            self.emoji.as_str(),
            self.participant.as_str(),
            name,
            Duration::from_millis(self.timestamp_ms),
        );
        if self.local { reaction.local() } else { reaction }
    }
}

/// Result of a replay.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub bursts: Vec<ReactionBurst>,
    pub stats: BurstStats,
}

#[derive(Default)]
struct Collector {
    bursts: Mutex<Vec<ReactionBurst>>,
}

impl BurstDelegate for Collector {
    fn on_burst(&self, burst: &ReactionBurst) {
        if let Ok(mut bursts) = self.bursts.lock() {
            bursts.push(burst.clone());
        }
    }
}

pub fn parse_entries(json: &str) -> Result<Vec<ReplayEntry>, ReplayError> {
    let entries: Vec<ReplayEntry> = serde_json::from_str(json)?;
    if let Some(index) = entries
        .windows(2)
        .position(|pair| pair[1].timestamp_ms < pair[0].timestamp_ms)
    {
        return Err(ReplayError::UnsortedTimestamps { index: index + 1 });
    }
    Ok(entries)
}

pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<ReplayEntry>, ReplayError> {
    let json = std::fs::read_to_string(path)?;
    parse_entries(&json)
}

/// Feed `entries` through a fresh manager, advancing a manual clock to each
/// reaction's timestamp before it is added.
pub fn replay(
    entries: &[ReplayEntry],
    config: BurstConfig,
) -> Result<ReplayOutcome, ReplayError> {
    let clock = Arc::new(ManualClock::default());
    let collector = Arc::new(Collector::default());
    let mut manager =
        ReactionBurstManager::with_clock(config, collector.clone(), clock.clone())?;

    for entry in entries {
        clock.set(Duration::from_millis(entry.timestamp_ms));
        manager.add(entry.to_reaction());
    }

    let stats = manager.stats().clone();
    debug!("Replayed {} reactions: {:?}", entries.len(), stats);

    let bursts = collector
        .bursts
        .lock()
        .map(|bursts| bursts.clone())
        .unwrap_or_default();
    Ok(ReplayOutcome { bursts, stats })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let entries = parse_entries(
            r#"[{"emoji": "👍", "participant": "a", "timestamp_ms": 5},
                {"emoji": "👍", "participant": "b", "name": "Bob", "local": true, "timestamp_ms": 5}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);

        let first = entries[0].to_reaction();
        assert_eq!(first.name, "a");
        assert!(!first.is_local);

        let second = entries[1].to_reaction();
        assert_eq!(second.name, "Bob");
        assert!(second.is_local);
    }

    #[test]
    fn test_unsorted_timestamps_rejected() {
        let err = parse_entries(
            r#"[{"emoji": "👍", "participant": "a", "timestamp_ms": 10},
                {"emoji": "👍", "participant": "b", "timestamp_ms": 20},
                {"emoji": "👍", "participant": "c", "timestamp_ms": 15}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReplayError::UnsortedTimestamps { index: 2 }));
    }

    #[test]
    fn test_replay_collects_bursts() {
        let entries = parse_entries(
            r#"[{"emoji": "❤️", "participant": "a", "timestamp_ms": 0},
                {"emoji": "❤️", "participant": "b", "timestamp_ms": 1000},
                {"emoji": "❤️", "participant": "c", "timestamp_ms": 2000},
                {"emoji": "❤️", "participant": "d", "timestamp_ms": 2500}]"#,
        )
        .unwrap();

        let outcome = replay(&entries, BurstConfig::default()).unwrap();
        assert_eq!(outcome.bursts.len(), 1);
        assert_eq!(outcome.bursts[0].fired_at, Duration::from_secs(2));
        assert_eq!(outcome.stats.reactions_received, 4);
        assert_eq!(outcome.stats.bursts_fired, 1);
    }
}
