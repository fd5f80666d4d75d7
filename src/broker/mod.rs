//! The `broker` module holds the in-process publish/subscribe engine.
//!
//! - `engine`: the `Broker`, its topic registry and the publish fan-out.
//! - `channel`: `DataChannel`, the caller-owned subscriber endpoint.
//! - `message`: `Event`, the value every subscriber receives.
//! - `topic`: the ordered subscriber list kept per topic.

pub mod channel;
pub mod engine;
pub mod message;
pub mod topic;

pub use channel::{DataChannel, channel, unbounded_channel};
pub use engine::Broker;
pub use message::Event;
