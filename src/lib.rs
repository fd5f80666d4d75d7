//! # PopBus
//!
//! `popbus` is a minimalist, in-process publish/subscribe broker built on Tokio.
//! Producers publish a value under a topic name and every channel subscribed to
//! that topic receives its own copy, delivered on a background task so the
//! publisher never waits on slow consumers.
//!
//! ```rust
//! use popbus::broker::{Broker, channel};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let broker = Broker::new();
//! let (ch, mut rx) = channel(8);
//! broker.subscribe("greetings", ch);
//!
//! broker.publish("greetings", "hello");
//!
//! let event = rx.recv().await.unwrap();
//! assert_eq!(event.topic, "greetings");
//! assert_eq!(event.data, "hello");
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - `broker`: the topic registry, subscriber channels and publish fan-out.
//! - `config`: loading and validating configuration.
//! - `utils`: shared error type and logging setup.

pub mod broker;
pub mod config;
pub mod utils;
