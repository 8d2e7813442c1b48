//! Decimal degrees <-> degrees/minutes/seconds conversion.

use crate::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which axis a value belongs to; selects the cardinal letter pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// North/South axis
    Latitude,
    /// East/West axis
    Longitude,
}

/// Hemisphere indicator letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinal {
    /// Positive latitude
    North,
    /// Negative latitude
    South,
    /// Positive longitude
    East,
    /// Negative longitude
    West,
}

impl Cardinal {
    /// Parses a single cardinal letter, case-insensitive.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'N' => Some(Cardinal::North),
            'S' => Some(Cardinal::South),
            'E' => Some(Cardinal::East),
            'W' => Some(Cardinal::West),
            _ => None,
        }
    }

    /// Returns the display letter.
    pub fn letter(self) -> char {
        match self {
            Cardinal::North => 'N',
            Cardinal::South => 'S',
            Cardinal::East => 'E',
            Cardinal::West => 'W',
        }
    }

    /// Returns true for the negative hemispheres (South, West).
    #[inline]
    pub fn is_negative(self) -> bool {
        matches!(self, Cardinal::South | Cardinal::West)
    }
}

/// A degrees/minutes/seconds decomposition of one angle.
///
/// Either `degrees` carries the sign (no cardinal) or `degrees` is unsigned
/// and the hemisphere is carried by `cardinal`, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DmsAngle {
    /// Whole degrees; signed when `cardinal` is `None`
    pub degrees: f64,
    /// Whole minutes, 0..60
    pub minutes: f64,
    /// Seconds with fraction, rounded to 5 decimal places
    pub seconds: f64,
    /// Hemisphere letter, if requested at conversion time
    pub cardinal: Option<Cardinal>,
}

impl fmt::Display for DmsAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\u{b0} {}' {:.5}\"",
            self.degrees, self.minutes, self.seconds
        )?;
        if let Some(cardinal) = self.cardinal {
            write!(f, " {}", cardinal.letter())?;
        }
        Ok(())
    }
}

/// Decomposes a decimal degree value into degrees, minutes, and seconds.
///
/// Seconds are rounded to 5 decimal places. With `include_cardinal` the
/// degrees are unsigned and the hemisphere letter for `axis` is attached;
/// without it the degrees mirror the sign of `value`.
///
/// Returns `None` for non-finite input.
pub fn decimal_to_dms(value: f64, axis: Axis, include_cardinal: bool) -> Option<DmsAngle> {
    if !value.is_finite() {
        return None;
    }

    let magnitude = value.abs();
    let degrees = magnitude.floor();
    let minutes = ((magnitude - degrees) * 60.0).floor();
    let seconds = round_to(((magnitude - degrees) * 60.0 - minutes) * 60.0, 5);

    if include_cardinal {
        let cardinal = match (axis, value < 0.0) {
            (Axis::Latitude, false) => Cardinal::North,
            (Axis::Latitude, true) => Cardinal::South,
            (Axis::Longitude, false) => Cardinal::East,
            (Axis::Longitude, true) => Cardinal::West,
        };
        Some(DmsAngle {
            degrees,
            minutes,
            seconds,
            cardinal: Some(cardinal),
        })
    } else {
        Some(DmsAngle {
            degrees: if value < 0.0 { -degrees } else { degrees },
            minutes,
            seconds,
            cardinal: None,
        })
    }
}

/// Recombines degrees/minutes/seconds into a decimal degree value.
///
/// The result is negative if `degrees` is negative or `cardinal` indicates
/// the South/West hemisphere. A negative zero in `degrees` counts as
/// negative, so sub-degree angles like -0° 15' survive the round trip.
/// Returns `None` for non-finite components.
pub fn dms_to_decimal(
    degrees: f64,
    minutes: f64,
    seconds: f64,
    cardinal: Option<Cardinal>,
) -> Option<f64> {
    if !degrees.is_finite() || !minutes.is_finite() || !seconds.is_finite() {
        return None;
    }

    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    let negative = degrees.is_sign_negative() || cardinal.is_some_and(Cardinal::is_negative);

    Some(if negative { -magnitude } else { magnitude })
}

/// Formats a decimal degree value at full copy/paste fidelity (10 places).
pub fn format_decimal_degrees(value: f64) -> String {
    format!("{value:.10}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_to_dms_positive() {
        let dms = decimal_to_dms(44.4734245277, Axis::Latitude, false).unwrap();
        assert_eq!(dms.degrees, 44.0);
        assert_eq!(dms.minutes, 28.0);
        assert!((dms.seconds - 24.32830).abs() < 1e-5);
        assert!(dms.cardinal.is_none());
    }

    #[test]
    fn test_decimal_to_dms_signed() {
        let dms = decimal_to_dms(-70.888627, Axis::Longitude, false).unwrap();
        assert_eq!(dms.degrees, -70.0);
        assert_eq!(dms.minutes, 53.0);
    }

    #[test]
    fn test_decimal_to_dms_cardinal() {
        let dms = decimal_to_dms(-70.888627, Axis::Longitude, true).unwrap();
        assert_eq!(dms.degrees, 70.0);
        assert_eq!(dms.cardinal, Some(Cardinal::West));

        let dms = decimal_to_dms(44.47, Axis::Latitude, true).unwrap();
        assert_eq!(dms.cardinal, Some(Cardinal::North));
    }

    #[test]
    fn test_decimal_to_dms_rejects_non_finite() {
        assert!(decimal_to_dms(f64::NAN, Axis::Latitude, false).is_none());
        assert!(decimal_to_dms(f64::INFINITY, Axis::Longitude, true).is_none());
    }

    #[test]
    fn test_dms_to_decimal() {
        let value = dms_to_decimal(44.0, 28.0, 24.32661, None).unwrap();
        assert!((value - 44.4734240583).abs() < 1e-9);
    }

    #[test]
    fn test_dms_to_decimal_negative_degrees() {
        let value = dms_to_decimal(-70.0, 53.0, 19.05717, None).unwrap();
        assert!((value + 70.8886270).abs() < 1e-6);
    }

    #[test]
    fn test_dms_to_decimal_cardinal_sign() {
        let south = dms_to_decimal(36.0, 6.0, 13.58925, Some(Cardinal::South)).unwrap();
        assert!(south < 0.0);
        let east = dms_to_decimal(140.0, 5.0, 16.27815, Some(Cardinal::East)).unwrap();
        assert!(east > 0.0);
    }

    #[test]
    fn test_dms_to_decimal_negative_zero_degrees() {
        // -0° 15' 0" is a quarter degree south of the equator
        let value = dms_to_decimal(-0.0, 15.0, 0.0, None).unwrap();
        assert_eq!(value, -0.25);
    }

    #[test]
    fn test_dms_to_decimal_rejects_non_finite() {
        assert!(dms_to_decimal(f64::NAN, 0.0, 0.0, None).is_none());
        assert!(dms_to_decimal(0.0, f64::INFINITY, 0.0, None).is_none());
    }

    #[test]
    fn test_round_trip() {
        for &value in &[0.0, 45.5, -122.4194, 89.999, -0.25, 179.9999] {
            let dms = decimal_to_dms(value, Axis::Longitude, false).unwrap();
            let back = dms_to_decimal(dms.degrees, dms.minutes, dms.seconds, None).unwrap();
            assert!((back - value).abs() < 1e-5, "{value} -> {back}");
        }
    }

    #[test]
    fn test_display_formats() {
        let dms = decimal_to_dms(44.4734245277, Axis::Latitude, true).unwrap();
        let text = dms.to_string();
        assert!(text.starts_with("44\u{b0} 28' "));
        assert!(text.ends_with(" N"));
    }

    #[test]
    fn test_format_decimal_degrees_precision() {
        assert_eq!(format_decimal_degrees(44.5), "44.5000000000");
        assert_eq!(format_decimal_degrees(-70.8886275083), "-70.8886275083");
    }
}
