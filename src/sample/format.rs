//! SI-prefixed current formatting.
//!
//! The unit tier is picked from the magnitude of the reading so the number on the display stays
//! short: nanoamps are shown as whole numbers, every other tier as a value rounded to two
//! decimals and printed in `%g` style (six significant digits, trailing zeros dropped).

use super::Sample;

/// Significant digits used by general (`%g`) number formatting.
const SIGNIFICANT_DIGITS: i32 = 6;

/// Exponent below which general formatting switches to scientific notation.
const MIN_FIXED_EXPONENT: i32 = -4;

/// Magnitude range that decides the unit a reading is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Nano,
    Micro,
    Milli,
    Unit,
}

impl Tier {
    /// Pick the tier for a reading in amperes. All bounds are strict upper bounds.
    pub fn for_amps(amps: f64) -> Self {
        let magnitude = amps.abs();
        if magnitude < 1e-6 {
            Tier::Nano
        } else if magnitude < 1e-4 {
            Tier::Micro
        } else if magnitude < 1.0 {
            Tier::Milli
        } else {
            Tier::Unit
        }
    }

    /// Factor that converts amperes into this tier's unit.
    pub fn scale(self) -> f64 {
        match self {
            Tier::Nano => 1e9,
            Tier::Micro => 1e6,
            Tier::Milli => 1e3,
            Tier::Unit => 1.0,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Tier::Nano => "nA",
            Tier::Micro => "µA",
            Tier::Milli => "mA",
            Tier::Unit => "A",
        }
    }
}

/// Render a sample as `<number><unit>`, e.g. `2.3mA` or `-500nA`.
pub fn format_current(sample: Sample) -> String {
    let amps = sample.amps();
    let tier = Tier::for_amps(amps);
    let scaled = amps * tier.scale();

    let number = match tier {
        Tier::Nano => format_whole(scaled),
        Tier::Micro | Tier::Milli | Tier::Unit => format_general(round_to_hundredths(scaled)),
    };

    format!("{number}{}", tier.unit())
}

fn format_whole(value: f64) -> String {
    let rounded = value.round_ties_even();
    if rounded == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    format!("{rounded:.0}")
}

/// Decimal rounding to two places, going through the exact decimal expansion so that values
/// such as `2.675` (stored as `2.67499…`) round the same way they print.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// C-style `%g` with six significant digits.
fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = (SIGNIFICANT_DIGITS - 1) as usize;
    let scientific = format!("{value:.precision$e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < MIN_FIXED_EXPONENT || exponent >= SIGNIFICANT_DIGITS {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
