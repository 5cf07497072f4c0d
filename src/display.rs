//! Display subsystem.
//!
//! A [`DisplaySurface`] is the device boundary: it reports its pixel size and accepts whole
//! canvases to show. Drawing happens on a [`Frame`], a scoped guard over an in-memory
//! [`Canvas`] that is committed to the surface exactly once, whichever way the draw ends.

pub mod canvas;
pub mod frame;
pub mod log_panel;
pub mod style;
pub mod surface;
pub mod terminal;

pub use canvas::{Canvas, TextRun};
pub use frame::Frame;
pub use log_panel::LogPanel;
pub use style::{parse_color, FontChoice, TextStyle};
pub use surface::{DisplaySurface, FrameHistory, MemorySurface};
pub use terminal::TerminalPanel;

pub use embedded_graphics::geometry::{Point, Size};
pub use embedded_graphics::pixelcolor::Rgb565;
