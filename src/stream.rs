//! Sample stream subscription.
//!
//! The transport pushes events into a bounded channel; the render loop pulls them out one at a
//! time through [`SampleSource`]. A full channel makes the transport wait, so samples are never
//! reordered or silently dropped on the way in.

pub mod protocol;
pub mod socketio;
pub mod source;

pub use protocol::StreamEvent;
pub use socketio::SocketIoSource;
pub use source::{ChannelSource, SampleSource};
