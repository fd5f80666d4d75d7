//! Topic management
//!
//! A `Topic` holds the ordered list of endpoints subscribed under one name.
//! Order is insertion order and doubles as delivery order. The same endpoint
//! may appear more than once; each occurrence receives its own copy.
//!
//! Concurrency note: callers must synchronize access to `Topic` (the broker
//! keeps every topic behind its registry lock).

use crate::broker::channel::DataChannel;

/// The ordered subscriber list kept under one topic name.
#[derive(Debug)]
pub struct Topic<T> {
    pub name: String,
    pub subscribers: Vec<DataChannel<T>>,
}

impl<T> Topic<T> {
    /// Create a new topic with the given name and no subscribers.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscribers: Vec::new(),
        }
    }

    /// Append a subscriber. Duplicates are kept.
    pub fn subscribe(&mut self, channel: DataChannel<T>) {
        self.subscribers.push(channel);
    }

    /// Remove the first occurrence of `channel`, keeping the others in order.
    ///
    /// Returns `false` if the channel was not subscribed.
    pub fn unsubscribe(&mut self, channel: &DataChannel<T>) -> bool {
        match self
            .subscribers
            .iter()
            .position(|existing| existing.same_channel(channel))
        {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of subscriptions, counting duplicates.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Copy of the current subscriber list, detached from the topic.
    pub fn snapshot(&self) -> Vec<DataChannel<T>> {
        self.subscribers.clone()
    }
}
