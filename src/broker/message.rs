/// An event delivered to subscribers of a topic.
///
/// Every subscriber receives its own clone of the event. The broker never
/// looks inside `data`; it only routes on `topic`.
///
/// # Example
///
/// ```rust
/// use popbus::broker::Event;
///
/// let event = Event::new("sensor_updates", 25);
/// assert_eq!(event.topic, "sensor_updates");
/// assert_eq!(event.data, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<T> {
    pub topic: String,
    pub data: T,
}

impl<T> Event<T> {
    pub fn new(topic: impl Into<String>, data: T) -> Self {
        Self {
            topic: topic.into(),
            data,
        }
    }
}
