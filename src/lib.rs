//! # ampview - Live Current Readout
//!
//! Subscribes to a Socket.IO stream of current samples and keeps the latest one on a small
//! graphical display, scaled to a readable unit (`nA`, `µA`, `mA`, `A`).
//!
//! ## Architecture
//!
//! Each sample flows through the modules in order:
//!
//! - [`stream`] - Socket.IO subscription feeding an ordered event channel
//! - [`sample`] - payload decoding and SI-prefixed formatting
//! - [`render`] - one full repaint per sample
//! - [`display`] - scoped frames over pluggable surfaces (terminal, log, memory)
//! - [`app`] - the receive loop tying source and renderer together
//!
//! Supporting modules: [`config`] for TOML/CLI settings and [`error`] for the shared error type.

pub mod error;

pub mod config;
pub mod display;
pub mod render;
pub mod sample;
pub mod stream;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{AmpviewError, Result};

pub use app::{Application, PipelinePolicy, PipelineStats};
pub use config::Config;
pub use render::SampleRenderer;
pub use sample::{format_current, Sample};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
