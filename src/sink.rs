//! Fan-out of incoming call reactions.

use crate::burst::ReactionBurstManager;
use crate::reaction::Reaction;

/// Something that consumes batches of reactions, e.g. an on-screen feed.
pub trait ReactionReceiver {
    fn add_reactions(&mut self, reactions: &[Reaction]);
}

impl ReactionReceiver for ReactionBurstManager {
    fn add_reactions(&mut self, reactions: &[Reaction]) {
        for reaction in reactions {
            self.add(reaction.clone());
        }
    }
}

/// Delivers every batch to each receiver, in registration order.
#[derive(Default)]
pub struct ReactionsSink {
    receivers: Vec<Box<dyn ReactionReceiver + Send>>,
}

impl ReactionsSink {
    pub fn new(receivers: Vec<Box<dyn ReactionReceiver + Send>>) -> Self {
        Self { receivers }
    }

    pub fn push_receiver(&mut self, receiver: Box<dyn ReactionReceiver + Send>) {
        self.receivers.push(receiver);
    }

    pub fn len(&self) -> usize {
        self.receivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receivers.is_empty()
    }

    pub fn add_reactions(&mut self, reactions: &[Reaction]) {
        if reactions.is_empty() {
            return;
        }
        for receiver in self.receivers.iter_mut() {
            receiver.add_reactions(reactions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::burst::{BurstDelegate, ReactionBurst};
    use crate::clock::ManualClock;
    use crate::config::BurstConfig;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct Feed {
        log: Arc<Mutex<Vec<String>>>,
        label: &'static str,
    }

    impl ReactionReceiver for Feed {
        fn add_reactions(&mut self, reactions: &[Reaction]) {
            let mut log = self.log.lock().unwrap();
            for r in reactions {
                log.push(format!("{}:{}", self.label, r.name));
            }
        }
    }

    #[test]
    fn test_batches_reach_receivers_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let receivers: Vec<Box<dyn ReactionReceiver + Send>> = vec![
            Box::new(Feed {
                log: log.clone(),
                label: "feed",
            }),
            Box::new(Feed {
                log: log.clone(),
                label: "burst",
            }),
        ];
        let mut sink = ReactionsSink::new(receivers);
        assert_eq!(sink.len(), 2);

        sink.add_reactions(&[
            Reaction::new("👋", "a", "Alice", Duration::ZERO),
            Reaction::new("👋", "me", "You", Duration::ZERO).local(),
        ]);
        sink.add_reactions(&[]);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["feed:Alice", "feed:You", "burst:Alice", "burst:You"]
        );
    }

    #[test]
    fn test_manager_as_receiver() {
        let fired = Arc::new(Mutex::new(Vec::<ReactionBurst>::new()));
        let out = fired.clone();
        let delegate: Arc<dyn BurstDelegate> =
            Arc::new(move |b: &ReactionBurst| out.lock().unwrap().push(b.clone()));
        let manager = ReactionBurstManager::with_clock(
            BurstConfig::default(),
            delegate,
            Arc::new(ManualClock::default()),
        )
        .unwrap();

        let mut sink = ReactionsSink::default();
        assert!(sink.is_empty());
        sink.push_receiver(Box::new(manager));

        let batch: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|p| Reaction::new("🙌", *p, *p, Duration::from_millis(5)))
            .collect();
        sink.add_reactions(&batch);

        let fired = fired.lock().unwrap();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].reactions, batch);
    }
}
