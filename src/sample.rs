//! Current samples and their human-readable rendering.
//!
//! A [`Sample`] is one instantaneous current reading in amperes. The type only admits finite
//! values, so everything downstream of construction (formatting, rendering) is total.

pub mod decode;
pub mod format;

pub use decode::decode_payload;
pub use format::{format_current, Tier};

use crate::error::{AmpviewError, Result};
use std::fmt;

/// A single finite current reading, in amperes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Sample(f64);

impl Sample {
    /// Wrap a reading, rejecting NaN and infinities.
    pub fn new(amps: f64) -> Result<Self> {
        if amps.is_finite() {
            Ok(Self(amps))
        } else {
            Err(AmpviewError::NonFiniteSample { value: amps })
        }
    }

    pub fn amps(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Sample {
    type Error = AmpviewError;

    fn try_from(amps: f64) -> Result<Self> {
        Self::new(amps)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_current(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_values_are_accepted() {
        assert_eq!(Sample::new(0.0023).unwrap().amps(), 0.0023);
        assert_eq!(Sample::new(-12.5).unwrap().amps(), -12.5);
        assert_eq!(Sample::new(0.0).unwrap().amps(), 0.0);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match Sample::new(value) {
                Err(AmpviewError::NonFiniteSample { .. }) => {}
                other => panic!("expected NonFiniteSample for {value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_display_uses_formatter() {
        let sample = Sample::try_from(0.0023).unwrap();
        assert_eq!(sample.to_string(), "2.3mA");
    }
}
