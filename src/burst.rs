//! Reaction burst detection.
//!
//! A burst fires when enough distinct participants react with the same emoji
//! (ignoring skin tone) within the detection window. Two limits keep bursts
//! from flooding the call screen:
//!
//! - a per-emoji cooloff, so the same emoji cannot burst again right away
//! - a global throttle, capping the number of bursts in a rolling window
//!
//! All evaluation happens synchronously inside [`ReactionBurstManager::add`],
//! including the delegate callback.

use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

use crate::clock::{Clock, MonotonicClock};
use crate::config::BurstConfig;
use crate::error::ConfigError;
use crate::emoji::EmojiKey;
use crate::reaction::Reaction;
use crate::window::{BoundedWindow, Timestamped, WindowReference};

/// A triggered burst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionBurst {
    pub key: EmojiKey,
    /// The qualifying reactions, oldest first.
    pub reactions: Vec<Reaction>,
    /// Clock time at which the burst fired.
    pub fired_at: Duration,
}

/// Receives bursts. Runs inline within [`ReactionBurstManager::add`], so
/// implementations should return quickly.
pub trait BurstDelegate: Send + Sync {
    fn on_burst(&self, burst: &ReactionBurst);
}

impl<F> BurstDelegate for F
where
    F: Fn(&ReactionBurst) + Send + Sync,
{
    fn on_burst(&self, burst: &ReactionBurst) {
        self(burst)
    }
}

impl BurstDelegate for broadcast::Sender<Arc<ReactionBurst>> {
    fn on_burst(&self, burst: &ReactionBurst) {
        if self.send(Arc::new(burst.clone())).is_err() {
            debug!("No burst subscribers, dropping burst for {}", burst.key);
        }
    }
}

impl BurstDelegate for mpsc::UnboundedSender<Arc<ReactionBurst>> {
    fn on_burst(&self, burst: &ReactionBurst) {
        if self.send(Arc::new(burst.clone())).is_err() {
            debug!("Burst receiver closed, dropping burst for {}", burst.key);
        }
    }
}

/// Counters describing what the manager has done so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BurstStats {
    /// Total reactions passed to `add`.
    pub reactions_received: u64,
    /// Pending reactions replaced by a newer one from the same participant.
    pub reactions_superseded: u64,
    pub bursts_fired: u64,
    /// Threshold met but the emoji was still cooling off.
    pub suppressed_cooling_off: u64,
    /// Threshold met but the global burst limit was reached.
    pub suppressed_throttled: u64,
}

/// Timestamp of a fired burst, kept for the global throttle.
#[derive(Debug, Clone, Copy)]
struct BurstRecord {
    fired_at: Duration,
}

impl Timestamped for BurstRecord {
    fn timestamp(&self) -> Duration {
        self.fired_at
    }
}

/// Aggregates reactions into bursts for one call.
///
/// The manager is not reentrant. Calling back into it from a delegate while a
/// burst is being delivered is undefined behaviour: with direct ownership the
/// borrow checker rejects it, but a manager shared behind a `Mutex` deadlocks
/// and one behind a `RefCell` panics.
pub struct ReactionBurstManager {
    config: BurstConfig,
    delegate: Arc<dyn BurstDelegate>,
    clock: Arc<dyn Clock>,
    /// Pending reactions per emoji, at most one per participant.
    pending: HashMap<EmojiKey, BoundedWindow<Reaction>>,
    /// Last burst time per emoji.
    cooloffs: HashMap<EmojiKey, Duration>,
    recent_bursts: BoundedWindow<BurstRecord>,
    stats: BurstStats,
}

impl std::fmt::Debug for ReactionBurstManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionBurstManager")
            .field("config", &self.config)
            .field("pending", &self.pending)
            .field("cooloffs", &self.cooloffs)
            .field("recent_bursts", &self.recent_bursts)
            .field("stats", &self.stats)
            .finish()
    }
}

impl ReactionBurstManager {
    /// Create a manager using the process monotonic clock.
    pub fn new(
        config: BurstConfig,
        delegate: Arc<dyn BurstDelegate>,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(config, delegate, Arc::new(MonotonicClock::new()))
    }

    /// Create a manager reading time from `clock`. Reaction timestamps are
    /// expected on the same timeline.
    pub fn with_clock(
        config: BurstConfig,
        delegate: Arc<dyn BurstDelegate>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let recent_bursts = BoundedWindow::new(config.max_bursts, config.throttle_window());
        Ok(Self {
            config,
            delegate,
            clock,
            pending: HashMap::new(),
            cooloffs: HashMap::new(),
            recent_bursts,
            stats: BurstStats::default(),
        })
    }

    /// Time source shared with the caller, e.g. to stamp reactions.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn config(&self) -> &BurstConfig {
        &self.config
    }

    pub fn stats(&self) -> &BurstStats {
        &self.stats
    }

    /// Reactions currently waiting towards a burst of `key`, oldest first.
    pub fn pending(&self, key: &EmojiKey) -> Vec<&Reaction> {
        self.pending
            .get(key)
            .map(|window| window.iter().collect())
            .unwrap_or_default()
    }

    /// Feed one reaction. Notifies the delegate if it completes a burst.
    pub fn add(&mut self, reaction: Reaction) {
        let now = self.clock.now();
        self.stats.reactions_received += 1;
        self.prune(now, reaction.timestamp);

        let key = reaction.key.clone();
        let threshold = self.config.threshold;
        let detection_window = self.config.detection_window();
        let window = self
            .pending
            .entry(key.clone())
            .or_insert_with(|| BoundedWindow::new(threshold, detection_window));

        let superseded = window.remove_where(|pending| pending.is_from(&reaction.participant));
        self.stats.reactions_superseded += superseded as u64;

        debug!(
            "Reaction {} from {} ({} pending for {})",
            reaction.emoji,
            reaction.participant,
            window.len() + 1,
            key
        );
        window.append(reaction);

        let threshold_met = window.is_saturated_within_window(WindowReference::Newest);
        if !threshold_met {
            return;
        }

        if self.is_cooling_off(&key, now) {
            debug!("Burst for {} suppressed: cooling off", key);
            self.stats.suppressed_cooling_off += 1;
            return;
        }

        if self.are_bursts_shut_off(now) {
            debug!("Burst for {} suppressed: too many recent bursts", key);
            self.stats.suppressed_throttled += 1;
            return;
        }

        self.fire(key, now);
    }

    /// Forget all pending reactions, cooloffs and burst history.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.cooloffs.clear();
        self.recent_bursts.clear();
    }

    /// Drop pending windows that can no longer reach the threshold and
    /// cooloffs that have expired.
    fn prune(&mut self, now: Duration, incoming: Duration) {
        let detection_window = self.config.detection_window();
        self.pending.retain(|_, window| {
            window
                .last()
                .is_some_and(|newest| incoming.saturating_sub(newest.timestamp) <= detection_window)
        });

        let cooloff = self.config.cooloff();
        self.cooloffs.retain(|_, last| now.saturating_sub(*last) < cooloff);
    }

    /// Number of emoji with pending reactions or an active cooloff.
    pub fn tracked_keys(&self) -> usize {
        self.pending
            .keys()
            .chain(self.cooloffs.keys())
            .collect::<std::collections::HashSet<_>>()
            .len()
    }

    fn is_cooling_off(&self, key: &EmojiKey, now: Duration) -> bool {
        self.cooloffs
            .get(key)
            .is_some_and(|last| now.saturating_sub(*last) < self.config.cooloff())
    }

    fn are_bursts_shut_off(&self, now: Duration) -> bool {
        self.recent_bursts.is_saturated_within_window(WindowReference::At(now))
    }

    fn fire(&mut self, key: EmojiKey, now: Duration) {
        let Some(window) = self.pending.remove(&key) else {
            return;
        };
        let burst = ReactionBurst {
            key: key.clone(),
            reactions: window.to_vec(),
            fired_at: now,
        };

        info!(
            "Reaction burst {} from [{}]",
            burst.key,
            burst
                .reactions
                .iter()
                .map(|r| r.participant.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        self.delegate.on_burst(&burst);

        self.cooloffs.insert(key, now);
        self.recent_bursts.append(BurstRecord { fired_at: now });
        self.stats.bursts_fired += 1;
    }
}
