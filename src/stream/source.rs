//! Pull-side interface of the sample stream.

use crate::error::Result;
use crate::stream::protocol::StreamEvent;
use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TryRecvError, Receiver, Sender};

/// Ordered source of stream events consumed by the render loop.
#[async_trait]
pub trait SampleSource: Send {
    /// Wait for the next event. `None` means the stream has ended for good.
    async fn next_event(&mut self) -> Option<StreamEvent>;

    /// Take an already-queued event without waiting.
    fn try_next_event(&mut self) -> Option<StreamEvent>;

    /// Tear down the subscription.
    async fn close(&mut self) -> Result<()>;
}

/// Source fed through an in-process channel.
///
/// The transport side holds the [`Sender`]; dropping every sender ends the stream.
pub struct ChannelSource {
    rx: Receiver<StreamEvent>,
}

impl ChannelSource {
    /// Create a source with room for `capacity` queued events (at least one).
    pub fn new(capacity: usize) -> (Sender<StreamEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self { rx })
    }
}

#[async_trait]
impl SampleSource for ChannelSource {
    async fn next_event(&mut self) -> Option<StreamEvent> {
        self.rx.recv().await
    }

    fn try_next_event(&mut self) -> Option<StreamEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.rx.close();
        Ok(())
    }
}
