//! Reactions sent by call participants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::emoji::EmojiKey;
use crate::window::Timestamped;

/// Stable identifier of a participant for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single emoji reaction received during a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reaction {
    /// Emoji as sent, possibly with a skin tone.
    pub emoji: String,
    /// Normalized key the reaction is aggregated under.
    pub key: EmojiKey,
    /// Who reacted.
    pub participant: ParticipantId,
    /// Resolved display name ("You" for the local user).
    pub name: String,
    /// Whether the local user sent this reaction.
    pub is_local: bool,
    /// Monotonic time the reaction was received.
    pub timestamp: Duration,
}

impl Reaction {
    pub fn new(
        emoji: impl Into<String>,
        participant: impl Into<ParticipantId>,
        name: impl Into<String>,
        timestamp: Duration,
    ) -> Self {
        let emoji = emoji.into();
        let key = EmojiKey::from_emoji(&emoji);
        Self {
            emoji,
            key,
            participant: participant.into(),
            name: name.into(),
            is_local: false,
            timestamp,
        }
    }

    /// Mark the reaction as sent by the local user.
    pub fn local(mut self) -> Self {
        self.is_local = true;
        self
    }

    pub fn is_from(&self, participant: &ParticipantId) -> bool {
        &self.participant == participant
    }
}

impl Timestamped for Reaction {
    fn timestamp(&self) -> Duration {
        self.timestamp
    }
}
