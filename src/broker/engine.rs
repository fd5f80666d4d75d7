//! Broker engine
//!
//! This module contains the in-memory broker responsible for:
//! - managing topics and their ordered subscriber lists
//! - fanning published events out to every subscriber of a topic
//!
//! Concurrency and usage notes:
//! - Every method takes `&self`; share the broker as `Arc<Broker<T>>` (or by
//!   reference) between publishers and subscribers.
//! - The registry sits behind one `RwLock`. `subscribe` and `unsubscribe` take
//!   the write lock; `publish` takes the read lock just long enough to copy
//!   the subscriber list. The lock is never held while sending.
//! - Delivery runs on a spawned Tokio task per `publish` call. A subscriber
//!   that never drains its channel stalls only the remainder of that one
//!   delivery, never the publisher.
//! - `publish` works from any thread. Deliveries go to the broker's runtime
//!   handle, else the caller's runtime, else a shared single-worker delivery
//!   runtime started on first use.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::{debug, error, trace, warn};

use crate::broker::channel::DataChannel;
use crate::broker::message::Event;
use crate::broker::topic::Topic;

/// Runs deliveries for publishes made outside any Tokio runtime.
/// Never dropped, so it is safe to reach from async and sync code alike.
static DELIVERY_RUNTIME: OnceLock<Option<Runtime>> = OnceLock::new();

fn delivery_runtime() -> Option<&'static Runtime> {
    DELIVERY_RUNTIME
        .get_or_init(|| {
            Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("popbus-delivery")
                .enable_all()
                .build()
                .map_err(|e| error!("failed to start delivery runtime: {e}"))
                .ok()
        })
        .as_ref()
}

/// Represents the in-process broker that routes events from publishers to
/// the channels subscribed to each topic.
/// The broker holds one registry of topics, each with its ordered list of
/// subscriber channels, and never owns the channels themselves.
pub struct Broker<T> {
    topics: RwLock<HashMap<String, Topic<T>>>,
    runtime: Option<Handle>,
}

impl<T> Default for Broker<T> {
    fn default() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            runtime: Handle::try_current().ok(),
        }
    }
}

impl<T> std::fmt::Debug for Broker<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broker")
            .field("topics", &self.topic_count())
            .field("runtime", &self.runtime.is_some())
            .finish()
    }
}

impl<T> Broker<T> {
    /// Creates a broker with an empty registry.
    ///
    /// When called inside a Tokio runtime, deliveries are spawned on that
    /// runtime for the broker's whole life, including publishes made from
    /// plain threads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a broker whose deliveries always run on `handle`.
    ///
    /// Use this when publishers are plain threads outside any runtime.
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            runtime: Some(handle),
        }
    }

    /// Appends `channel` to the subscribers of `topic`, creating the topic on
    /// first use. Subscribing the same channel twice delivers every event twice.
    pub fn subscribe(&self, topic: &str, channel: DataChannel<T>) {
        let mut topics = self.write();
        let entry = topics
            .entry(topic.to_string())
            .or_insert_with(|| Topic::new(topic));
        entry.subscribe(channel);
        debug!(topic, subscribers = entry.len(), "subscribed");
    }

    /// Removes the first occurrence of `channel` from `topic`.
    ///
    /// Unknown topics and channels are ignored. The topic entry is kept even
    /// when its last subscriber leaves.
    pub fn unsubscribe(&self, topic: &str, channel: &DataChannel<T>) {
        let mut topics = self.write();
        let Some(entry) = topics.get_mut(topic) else {
            trace!(topic, "unsubscribe from unknown topic");
            return;
        };
        if entry.unsubscribe(channel) {
            debug!(topic, subscribers = entry.len(), "unsubscribed");
        } else {
            trace!(topic, "unsubscribe of channel not subscribed to topic");
        }
    }

    /// Number of subscriptions on `topic`, counting duplicates. Zero for unknown topics.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.read().get(topic).map_or(0, Topic::len)
    }

    /// Number of topic entries, including topics whose subscribers all left.
    pub fn topic_count(&self) -> usize {
        self.read().len()
    }

    /// Topic names in sorted order.
    pub fn topics(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Current subscribers of `topic`, in delivery order.
    pub fn subscribers(&self, topic: &str) -> Vec<DataChannel<T>> {
        self.read().get(topic).map(Topic::snapshot).unwrap_or_default()
    }

    // A panic while holding the lock cannot leave a topic half-updated: each
    // mutation is a single push or remove.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Topic<T>>> {
        self.topics.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Topic<T>>> {
        self.topics.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Broker<T>
where
    T: Clone + Send + 'static,
{
    /// Publishes `data` to every current subscriber of `topic`.
    ///
    /// The subscriber list is copied under the read lock and handed to a new
    /// task; this call returns without waiting for any subscriber. Channels
    /// subscribed after the copy was taken do not see this event, channels
    /// unsubscribed after it still do.
    ///
    /// Returns the delivery task, or `None` when the topic has no subscribers
    /// (or, in the unlikely case no delivery runtime could be started).
    /// Dropping the handle does not cancel delivery.
    pub fn publish(&self, topic: &str, data: T) -> Option<JoinHandle<()>> {
        let snapshot = {
            let topics = self.read();
            match topics.get(topic) {
                Some(entry) if !entry.is_empty() => entry.snapshot(),
                _ => {
                    trace!(topic, "publish with no subscribers");
                    return None;
                }
            }
        };

        debug!(topic, subscribers = snapshot.len(), "publishing");
        let delivery = fan_out(Event::new(topic, data), snapshot);
        if let Some(handle) = &self.runtime {
            return Some(handle.spawn(delivery));
        }
        if let Ok(handle) = Handle::try_current() {
            return Some(handle.spawn(delivery));
        }
        match delivery_runtime() {
            Some(runtime) => Some(runtime.spawn(delivery)),
            None => {
                error!(topic, "no runtime available, event dropped");
                None
            }
        }
    }
}

async fn fan_out<T: Clone>(event: Event<T>, channels: Vec<DataChannel<T>>) {
    let Some((last, rest)) = channels.split_last() else {
        return;
    };
    for (position, channel) in rest.iter().enumerate() {
        if let Err(dropped) = channel.deliver(event.clone()).await {
            log_closed(&dropped, position);
        }
    }
    if let Err(dropped) = last.deliver(event).await {
        log_closed(&dropped, rest.len());
    }
}

fn log_closed<T>(event: &Event<T>, position: usize) {
    warn!(
        topic = %event.topic,
        position,
        "subscriber channel closed, event dropped for it"
    );
}
