//! Reaction burst detection for group call screens.
//!
//! Incoming reactions are grouped by emoji, ignoring skin tone. When enough
//! distinct participants send the same emoji in a short span, a
//! [`ReactionBurst`] is delivered to a [`BurstDelegate`], which owns any
//! animation. Per-emoji cooloffs and a global cap keep bursts rare.
//!
//! ```
//! use std::sync::Arc;
//! use call_reactions::{BurstConfig, ReactionBurst, ReactionBurstManager, Reaction};
//!
//! let mut manager = ReactionBurstManager::new(
//!     BurstConfig::default(),
//!     Arc::new(|burst: &ReactionBurst| println!("burst of {}", burst.key)),
//! )?;
//! manager.add(Reaction::new("🎉", "aci-1", "Alice", manager.clock().now()));
//! # Ok::<(), call_reactions::ConfigError>(())
//! ```

pub mod burst;
pub mod cli;
pub mod clock;
pub mod config;
pub mod emoji;
pub mod error;
pub mod reaction;
pub mod replay;
pub mod sink;
pub mod window;

pub use burst::{BurstDelegate, BurstStats, ReactionBurst, ReactionBurstManager};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::BurstConfig;
pub use emoji::EmojiKey;
pub use error::{ConfigError, ReplayError};
pub use reaction::{ParticipantId, Reaction};
pub use sink::{ReactionReceiver, ReactionsSink};
pub use window::{BoundedWindow, Timestamped, WindowReference};
