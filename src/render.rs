//! Rendering subsystem.
//!
//! Turns samples into committed display frames.

pub mod renderer;

pub use renderer::{SampleRenderer, DEFAULT_ANCHOR};
