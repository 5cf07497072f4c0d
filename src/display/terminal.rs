//! Terminal panel using ratatui.
//!
//! Shows the canvas pixel-for-pixel with upper half-block cells: each terminal cell carries two
//! vertically stacked pixels, the upper one as foreground and the lower one as background. On a
//! real terminal the panel lives in an inline viewport, so the last frame stays in the
//! scrollback after the process exits.

use crate::display::canvas::Canvas;
use crate::display::surface::DisplaySurface;
use crate::error::Result;
use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal, TerminalOptions, Viewport,
};
use std::io::{self, Stdout};

const HALF_BLOCK: &str = "▀";

/// Display surface drawing into a terminal.
pub struct TerminalPanel<B: Backend> {
    terminal: Terminal<B>,
    size: Size,
}

impl TerminalPanel<CrosstermBackend<Stdout>> {
    /// Panel on stdout, in an inline viewport tall enough for `size`.
    pub fn stdout(size: Size) -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(cell_rows(size.height)),
            },
        )?;
        Ok(Self { terminal, size })
    }
}

impl<B: Backend> TerminalPanel<B> {
    /// Panel on an arbitrary backend, using the backend's full area.
    pub fn with_backend(backend: B, size: Size) -> Result<Self> {
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal, size })
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend + Send> DisplaySurface for TerminalPanel<B> {
    fn initialize(&mut self) -> Result<()> {
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        Ok(())
    }

    fn size(&self) -> Size {
        self.size
    }

    fn commit(&mut self, canvas: &Canvas) -> Result<()> {
        let lines = canvas_lines(canvas);
        self.terminal.draw(|frame| {
            let area = frame.size();
            frame.render_widget(Paragraph::new(lines), area);
        })?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.terminal.show_cursor()?;
        Ok(())
    }
}

/// Terminal rows needed for `height` pixels.
fn cell_rows(height: u32) -> u16 {
    u16::try_from(height.div_ceil(2)).unwrap_or(u16::MAX)
}

fn canvas_lines(canvas: &Canvas) -> Vec<Line<'static>> {
    let rows: Vec<&[Rgb565]> = canvas.rows().collect();
    rows.chunks(2)
        .map(|pair| {
            let upper = pair[0];
            let lower = pair.get(1).copied();
            let spans: Vec<Span<'static>> = upper
                .iter()
                .enumerate()
                .map(|(x, &top)| {
                    let bottom = lower.map_or(Rgb565::BLACK, |row| row[x]);
                    Span::styled(
                        HALF_BLOCK,
                        Style::default().fg(to_color(top)).bg(to_color(bottom)),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn to_color(pixel: Rgb565) -> Color {
    let rgb = Rgb888::from(pixel);
    Color::Rgb(rgb.r(), rgb.g(), rgb.b())
}
