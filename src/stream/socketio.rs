//! Socket.IO subscription.
//!
//! Registers one handler for the configured event on the configured namespace. The handler
//! awaits room in the event channel before returning, which holds the transport's reader until
//! the render loop catches up.

use crate::config::StreamConfig;
use crate::error::{AmpviewError, Result};
use crate::stream::protocol::StreamEvent;
use crate::stream::source::{ChannelSource, SampleSource};
use async_trait::async_trait;
use futures::FutureExt;
use rust_socketio::asynchronous::{Client, ClientBuilder};
use rust_socketio::{Event, Payload};
use serde_json::Value;
use tokio::sync::mpsc::Sender;

/// Live subscription to a Socket.IO server.
pub struct SocketIoSource {
    client: Client,
    events: ChannelSource,
}

impl SocketIoSource {
    /// Connect once and subscribe. Failure to connect is final.
    pub async fn connect(config: &StreamConfig) -> Result<Self> {
        let url = config.url();
        let (tx, events) = ChannelSource::new(config.queue_depth);
        log::info!(
            "Connecting to {url}{} for '{}' events",
            config.namespace,
            config.event
        );

        let sample_tx = tx.clone();
        let close_tx = tx.clone();
        let error_tx = tx;

        let client = ClientBuilder::new(url.clone())
            .namespace(config.namespace.clone())
            .reconnect(config.reconnect)
            .on(
                config.event.clone(),
                move |payload: Payload, _client: Client| {
                    let tx = sample_tx.clone();
                    async move { forward(&tx, payload_event(payload)).await }.boxed()
                },
            )
            .on(Event::Close, move |_payload: Payload, _client: Client| {
                let tx = close_tx.clone();
                async move {
                    let event = StreamEvent::Disconnected {
                        reason: "connection closed".to_string(),
                    };
                    forward(&tx, event).await
                }
                .boxed()
            })
            .on(Event::Error, move |payload: Payload, _client: Client| {
                let tx = error_tx.clone();
                async move {
                    let event = StreamEvent::Disconnected {
                        reason: format!("transport error: {}", describe(&payload)),
                    };
                    forward(&tx, event).await
                }
                .boxed()
            })
            .connect()
            .await
            .map_err(|err| AmpviewError::transport(format!("cannot connect to {url}: {err}")))?;

        log::info!("Subscribed to '{}' on {}", config.event, config.namespace);
        Ok(Self { client, events })
    }
}

#[async_trait]
impl SampleSource for SocketIoSource {
    async fn next_event(&mut self) -> Option<StreamEvent> {
        self.events.next_event().await
    }

    fn try_next_event(&mut self) -> Option<StreamEvent> {
        self.events.try_next_event()
    }

    async fn close(&mut self) -> Result<()> {
        self.events.close().await?;
        self.client
            .disconnect()
            .await
            .map_err(|err| AmpviewError::transport(format!("disconnect failed: {err}")))
    }
}

async fn forward(tx: &Sender<StreamEvent>, event: StreamEvent) {
    if tx.send(event).await.is_err() {
        log::debug!("Render loop has stopped; dropping stream event");
    }
}

/// Map a raw Socket.IO payload onto a stream event.
///
/// A single-argument emit becomes that argument; any other argument count is packed into an
/// array, which only decodes when it holds exactly one element.
#[allow(deprecated)]
fn payload_event(payload: Payload) -> StreamEvent {
    match payload {
        Payload::Text(mut values) => {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            StreamEvent::Payload(value)
        }
        Payload::String(text) => {
            StreamEvent::Payload(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        }
        Payload::Binary(bytes) => StreamEvent::Undecodable {
            description: format!("{} bytes of binary data", bytes.len()),
        },
    }
}

#[allow(deprecated)]
fn describe(payload: &Payload) -> String {
    match payload {
        Payload::Text(values) => values
            .iter()
            .map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Payload::String(text) => text.clone(),
        Payload::Binary(bytes) => format!("{} bytes of binary data", bytes.len()),
    }
}
