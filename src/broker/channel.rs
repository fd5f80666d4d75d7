//! Subscriber endpoints
//!
//! A `DataChannel` is the sending half of a Tokio `mpsc` channel owned by the
//! caller. The broker keeps clones of it in the registry but never closes it;
//! the channel lives as long as the caller keeps the receiving half around.
//!
//! Two `DataChannel`s are the same endpoint when they feed the same underlying
//! channel, regardless of how many times the sender was cloned.

use std::fmt;

use tokio::sync::mpsc::{self, Receiver, Sender, UnboundedReceiver, UnboundedSender};

use crate::broker::message::Event;

/// A caller-owned subscriber endpoint: the sending half of a bounded or
/// unbounded Tokio channel carrying `Event<T>`.
pub enum DataChannel<T> {
    Bounded(Sender<Event<T>>),
    Unbounded(UnboundedSender<Event<T>>),
}

impl<T> DataChannel<T> {
    /// Returns `true` if both handles deliver into the same channel.
    pub fn same_channel(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bounded(a), Self::Bounded(b)) => a.same_channel(b),
            (Self::Unbounded(a), Self::Unbounded(b)) => a.same_channel(b),
            _ => false,
        }
    }

    /// Returns `true` once the receiving half has been dropped.
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Bounded(tx) => tx.is_closed(),
            Self::Unbounded(tx) => tx.is_closed(),
        }
    }

    /// Sends one event, waiting for capacity on a bounded channel.
    ///
    /// Hands the event back if the receiver is gone.
    pub(crate) async fn deliver(&self, event: Event<T>) -> Result<(), Event<T>> {
        match self {
            Self::Bounded(tx) => tx.send(event).await.map_err(|e| e.0),
            Self::Unbounded(tx) => tx.send(event).map_err(|e| e.0),
        }
    }
}

// Derived impls would require `T: Clone` / `T: Debug` even though the senders don't.
impl<T> Clone for DataChannel<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Bounded(tx) => Self::Bounded(tx.clone()),
            Self::Unbounded(tx) => Self::Unbounded(tx.clone()),
        }
    }
}

impl<T> fmt::Debug for DataChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Bounded(_) => "Bounded",
            Self::Unbounded(_) => "Unbounded",
        };
        f.debug_struct("DataChannel")
            .field("kind", &kind)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl<T> From<Sender<Event<T>>> for DataChannel<T> {
    fn from(tx: Sender<Event<T>>) -> Self {
        Self::Bounded(tx)
    }
}

impl<T> From<UnboundedSender<Event<T>>> for DataChannel<T> {
    fn from(tx: UnboundedSender<Event<T>>) -> Self {
        Self::Unbounded(tx)
    }
}

/// Creates a bounded endpoint and its receiver.
///
/// A capacity of zero is raised to one, the smallest buffer Tokio supports.
pub fn channel<T>(capacity: usize) -> (DataChannel<T>, Receiver<Event<T>>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (DataChannel::Bounded(tx), rx)
}

/// Creates an unbounded endpoint and its receiver.
pub fn unbounded_channel<T>() -> (DataChannel<T>, UnboundedReceiver<Event<T>>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DataChannel::Unbounded(tx), rx)
}
