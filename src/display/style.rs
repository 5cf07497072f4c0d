//! Fonts and colours for panel text.
//!
//! Fonts are the fixed-size bitmap faces bundled with `embedded-graphics`. The ISO-8859-1
//! variants are used so the micro sign in `µA` has a glyph.

use crate::error::{AmpviewError, Result};
use embedded_graphics::mono_font::iso_8859_1::{FONT_10X20, FONT_6X10, FONT_8X13, FONT_9X18};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb565, Rgb888};
use embedded_graphics::prelude::*;

/// Bundled font faces, named by cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontChoice {
    Font6x10,
    Font8x13,
    Font9x18,
    #[default]
    Font10x20,
}

impl FontChoice {
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim() {
            "6x10" => Ok(FontChoice::Font6x10),
            "8x13" => Ok(FontChoice::Font8x13),
            "9x18" => Ok(FontChoice::Font9x18),
            "10x20" => Ok(FontChoice::Font10x20),
            other => Err(AmpviewError::config(format!(
                "unknown font '{other}' (expected 6x10, 8x13, 9x18 or 10x20)"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FontChoice::Font6x10 => "6x10",
            FontChoice::Font8x13 => "8x13",
            FontChoice::Font9x18 => "9x18",
            FontChoice::Font10x20 => "10x20",
        }
    }

    pub fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontChoice::Font6x10 => &FONT_6X10,
            FontChoice::Font8x13 => &FONT_8X13,
            FontChoice::Font9x18 => &FONT_9X18,
            FontChoice::Font10x20 => &FONT_10X20,
        }
    }
}

/// Everything needed to draw the readout: face, ink and the colour a fresh frame starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontChoice,
    pub color: Rgb565,
    pub background: Rgb565,
}

impl Default for TextStyle {
    /// White on black, matching the reference panel.
    fn default() -> Self {
        Self {
            font: FontChoice::default(),
            color: Rgb565::WHITE,
            background: Rgb565::BLACK,
        }
    }
}

impl TextStyle {
    pub fn character_style(&self) -> MonoTextStyle<'static, Rgb565> {
        MonoTextStyle::new(self.font.font(), self.color)
    }
}

/// Parse a colour name or `#rrggbb` hex triplet.
pub fn parse_color(spec: &str) -> Result<Rgb565> {
    let spec = spec.trim();
    let named = match spec.to_ascii_lowercase().as_str() {
        "white" => Some(Rgb565::WHITE),
        "black" => Some(Rgb565::BLACK),
        "red" => Some(Rgb565::RED),
        "green" => Some(Rgb565::GREEN),
        "blue" => Some(Rgb565::BLUE),
        "yellow" => Some(Rgb565::YELLOW),
        "cyan" => Some(Rgb565::CYAN),
        "magenta" => Some(Rgb565::MAGENTA),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }

    let invalid = || AmpviewError::config(format!("invalid colour '{spec}'"));
    let hex = spec.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(Rgb888::new(r, g, b).into()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = TextStyle::default();
        assert_eq!(style.font, FontChoice::Font10x20);
        assert_eq!(style.color, Rgb565::WHITE);
        assert_eq!(style.background, Rgb565::BLACK);
        assert_eq!(style.character_style().font.character_size, Size::new(10, 20));
    }

    #[test]
    fn test_font_names_round_trip() {
        for font in [
            FontChoice::Font6x10,
            FontChoice::Font8x13,
            FontChoice::Font9x18,
            FontChoice::Font10x20,
        ] {
            assert_eq!(FontChoice::parse(font.name()).unwrap(), font);
        }
        assert!(FontChoice::parse("12x24").is_err());
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("white").unwrap(), Rgb565::WHITE);
        assert_eq!(parse_color(" Yellow ").unwrap(), Rgb565::YELLOW);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#ffffff").unwrap(), Rgb565::WHITE);
        assert_eq!(parse_color("#000000").unwrap(), Rgb565::BLACK);
        assert_eq!(parse_color("#FF0000").unwrap(), Rgb565::RED);
    }

    #[test]
    fn test_invalid_colors() {
        for spec in ["", "purple-ish", "#12345", "#gggggg", "ffffff"] {
            match parse_color(spec) {
                Err(AmpviewError::Config { .. }) => {}
                other => panic!("expected Config error for {spec:?}, got {other:?}"),
            }
        }
    }
}
