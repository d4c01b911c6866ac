use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Identity of a connected subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle returned to a new subscriber. Dropping it closes the subscription.
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: mpsc::UnboundedReceiver<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub pruned: Vec<SubscriberId>,
}

/// Fan-out of text messages to every active subscriber.
///
/// A failed send marks the subscriber as gone; pruning happens afterwards
/// and removes by identity, so a subscriber that already disconnected is
/// simply skipped.
pub struct BroadcastRegistry {
    next_id: AtomicU64,
    subscribers: RwLock<HashMap<SubscriberId, mpsc::UnboundedSender<String>>>,
}

impl BroadcastRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    pub async fn connect(&self) -> Subscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (sender, receiver) = mpsc::unbounded_channel();

        self.subscribers.write().await.insert(id, sender);
        debug!("Subscriber {} connected", id);

        Subscription { id, receiver }
    }

    /// Remove a subscriber. Returns false when it was already gone.
    pub async fn disconnect(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.write().await.remove(&id).is_some();
        if removed {
            debug!("Subscriber {} disconnected", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.subscribers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.subscribers.read().await.is_empty()
    }

    pub async fn broadcast(&self, message: &str) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        {
            let subscribers = self.subscribers.read().await;
            for (id, sender) in subscribers.iter() {
                match sender.send(message.to_string()) {
                    Ok(()) => report.delivered += 1,
                    Err(_) => report.pruned.push(*id),
                }
            }
        }

        for id in &report.pruned {
            self.disconnect(*id).await;
        }

        report.pruned.sort();
        report
    }
}

impl Default for BroadcastRegistry {
    fn default() -> Self {
        Self::new()
    }
}
