//! Events handed from the transport to the render loop.

use serde_json::Value;

/// One thing that happened on the subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A subscribed event arrived; the JSON payload still has to be decoded into a sample.
    Payload(Value),
    /// A subscribed event arrived with a payload that is not JSON at all.
    Undecodable { description: String },
    /// The connection closed or the transport reported an error.
    Disconnected { reason: String },
}

impl StreamEvent {
    /// Whether the event stands for a (possibly bad) sample rather than a connection change.
    pub fn carries_sample(&self) -> bool {
        matches!(
            self,
            StreamEvent::Payload(_) | StreamEvent::Undecodable { .. }
        )
    }
}
