//! Fixed-capacity, time-aware ring buffer.
//!
//! A [`BoundedWindow`] keeps the most recent `capacity` items in insertion
//! order. Appending to a full window evicts the oldest item. The window can
//! then answer whether it is "saturated": full, with all items falling inside
//! the configured duration.

use std::time::Duration;

/// Items that carry a monotonic timestamp.
pub trait Timestamped {
    /// Time since the clock origin at which the item occurred.
    fn timestamp(&self) -> Duration;
}

/// Reference point used when checking saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowReference {
    /// Measure from the oldest to the newest stored item.
    Newest,
    /// Measure from the oldest stored item to the given instant.
    At(Duration),
}

/// Ring buffer of timestamped items, oldest first.
pub struct BoundedWindow<T> {
    /// Backing storage; its length is the capacity.
    slots: Box<[Option<T>]>,
    /// Physical index of the oldest item.
    head: usize,
    /// Number of stored items.
    len: usize,
    /// Maximum span for the window to count as saturated.
    duration: Duration,
}

impl<T: Timestamped> BoundedWindow<T> {
    /// Create an empty window holding at most `capacity` items.
    pub fn new(capacity: usize, duration: Duration) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            head: 0,
            len: 0,
            duration,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    fn physical(&self, logical: usize) -> usize {
        (self.head + logical) % self.capacity()
    }

    /// Append an item, evicting the oldest one if the window is full.
    ///
    /// Returns the evicted item, if any. A zero-capacity window drops every
    /// item it is given.
    pub fn append(&mut self, item: T) -> Option<T> {
        if self.capacity() == 0 {
            return Some(item);
        }

        if self.is_full() {
            let evicted = self.slots[self.head].replace(item);
            self.head = (self.head + 1) % self.capacity();
            return evicted;
        }

        let tail = self.physical(self.len);
        self.slots[tail] = Some(item);
        self.len += 1;
        None
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.head = 0;
        self.len = 0;
    }

    /// Remove every item matching `predicate`, keeping survivors in order.
    ///
    /// Returns the number of removed items.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let original_len = self.len;
        let mut kept = 0;

        for logical in 0..original_len {
            let src = self.physical(logical);
            let Some(item) = self.slots[src].take() else {
                continue;
            };
            if predicate(&item) {
                continue;
            }
            // `kept <= logical`, so the destination slot has already been drained.
            let dst = self.physical(kept);
            self.slots[dst] = Some(item);
            kept += 1;
        }

        self.len = kept;
        original_len - kept
    }

    /// Oldest stored item.
    pub fn first(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// Newest stored item.
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.physical(self.len - 1)].as_ref()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |logical| self.slots[self.physical(logical)].as_ref())
    }

    /// Whether the window is full and its span fits within the duration.
    ///
    /// The span runs from the oldest item to either the newest item or the
    /// supplied instant. An instant earlier than the oldest item counts as a
    /// zero span. Any missing endpoint yields `false`.
    pub fn is_saturated_within_window(&self, reference: WindowReference) -> bool {
        if self.is_empty() || !self.is_full() {
            return false;
        }

        let Some(first) = self.first() else {
            return false;
        };
        let end = match reference {
            WindowReference::At(now) => now,
            WindowReference::Newest => match self.last() {
                Some(last) => last.timestamp(),
                None => return false,
            },
        };

        end.saturating_sub(first.timestamp()) <= self.duration
    }
}

impl<T: Timestamped + Clone> BoundedWindow<T> {
    /// Copy the contents out, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: std::fmt::Debug + Timestamped> std::fmt::Debug for BoundedWindow<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedWindow")
            .field("capacity", &self.capacity())
            .field("duration", &self.duration)
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
