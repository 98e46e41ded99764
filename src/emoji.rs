//! Skin-tone independent emoji keys.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fitzpatrick skin-tone modifiers (U+1F3FB..=U+1F3FF).
const SKIN_TONE_MODIFIERS: std::ops::RangeInclusive<char> = '\u{1F3FB}'..='\u{1F3FF}';

/// Base form of an emoji, used to group skin-tone variants together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmojiKey(String);

impl EmojiKey {
    /// Normalize an emoji by stripping skin-tone modifiers.
    ///
    /// Returns `None` when nothing recognisable remains: an empty or
    /// whitespace-only value, or one made only of modifiers.
    pub fn normalize(emoji: &str) -> Option<Self> {
        let base: String = emoji
            .chars()
            .filter(|c| !SKIN_TONE_MODIFIERS.contains(c))
            .collect();

        if base.trim().is_empty() {
            return None;
        }
        Some(Self(base))
    }

    /// Use the value as-is, without normalization.
    pub fn raw(emoji: &str) -> Self {
        Self(emoji.to_string())
    }

    /// Normalize, falling back to the raw value when normalization fails.
    pub fn from_emoji(emoji: &str) -> Self {
        Self::normalize(emoji).unwrap_or_else(|| {
            warn!("Could not normalize emoji {:?}, using raw value as key", emoji);
            Self::raw(emoji)
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmojiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EmojiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
