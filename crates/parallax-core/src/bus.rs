//! Signal bus: fan-out pub/sub over crossbeam channels.
//!
//! Delivery is at-least-once from the producer's point of view (a publish
//! reaches every live subscriber); handlers must tolerate duplicates.
//! Publishing is best-effort — a disconnected subscriber is dropped, never
//! an error.

use std::sync::Mutex;

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

/// Signals carried on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// A learner graph was mutated by an event.
    LearnerGraphUpdated {
        user_id: String,
        content_id: String,
    },
    /// The extraction pipeline finished producing structural signals for a
    /// content item.
    ContentExtractionCompleted { content_id: String },
}

/// Publish side of the bus. Engines hold this as a trait object so tests
/// can substitute a recording fake.
pub trait ISignalBus: Send + Sync {
    fn publish(&self, signal: Signal);
}

/// Crossbeam-backed fan-out bus. Each subscriber gets its own unbounded
/// channel; `publish` clones the signal to every live subscriber.
#[derive(Default)]
pub struct ChannelBus {
    senders: Mutex<Vec<Sender<Signal>>>,
}

impl ChannelBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber and return its receiving end.
    pub fn subscribe(&self) -> Receiver<Signal> {
        let (tx, rx) = unbounded();
        if let Ok(mut senders) = self.senders.lock() {
            senders.push(tx);
        }
        rx
    }
}

impl ISignalBus for ChannelBus {
    fn publish(&self, signal: Signal) {
        let Ok(mut senders) = self.senders.lock() else {
            return;
        };
        // Drop subscribers whose receiver is gone.
        senders.retain(|tx| tx.send(signal.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_a_publish() {
        let bus = ChannelBus::new();
        let rx1 = bus.subscribe();
        let rx2 = bus.subscribe();

        bus.publish(Signal::ContentExtractionCompleted {
            content_id: "c1".into(),
        });

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[test]
    fn dropped_subscriber_does_not_break_publish() {
        let bus = ChannelBus::new();
        let rx = bus.subscribe();
        drop(rx);

        bus.publish(Signal::LearnerGraphUpdated {
            user_id: "u1".into(),
            content_id: "c1".into(),
        });

        let rx2 = bus.subscribe();
        bus.publish(Signal::LearnerGraphUpdated {
            user_id: "u1".into(),
            content_id: "c1".into(),
        });
        assert_eq!(rx2.len(), 1);
    }
}
