//! Coordinate text parsing and format detection.
//!
//! Recognizes several DMS and decimal notations. Patterns are tried in a
//! fixed precedence order, most structurally specific first, and the first
//! structural match wins; there is no plausibility scoring.

use crate::error::{GeoError, Result};
use crate::validate::{is_valid_elevation, validate_and_normalize};
use crate::Coordinate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Coarse category of a coordinate notation, used by callers to pick a
/// default display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateFormat {
    /// Degrees/minutes/seconds notation
    Dms,
    /// Decimal degrees notation
    Decimal,
    /// No supported notation matched
    Unknown,
}

/// One notation variant: a structural pattern plus its value extractor.
struct FormatPattern {
    name: &'static str,
    format: CoordinateFormat,
    pattern: &'static Lazy<Regex>,
    extract: fn(&Captures) -> Option<(f64, f64)>,
}

/// Space-separated DMS sextuple, no symbols, no cardinal letters:
/// `41 48 15.79259 112 50 1.04150`
static DMS_SEXTUPLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^([+-]?\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+([+-]?\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)$",
    )
    .unwrap()
});

/// DMS with leading cardinal letters, symbols optional:
/// `N 41° 48' 15.79" W 112° 50' 1.04"`
static DMS_LEADING_CARDINAL: Lazy<Regex> = Lazy::new(|| {
    // components must be separated by a symbol or whitespace, otherwise a
    // decimal like N44.4734 could be split into fake minutes and seconds
    Regex::new(
        r#"(?i)^([ns])\s*(\d+(?:\.\d+)?)(?:\s*°\s*|\s+)(\d+(?:\.\d+)?)(?:\s*['′’]\s*|\s+)(\d+(?:\.\d+)?)\s*["″”]?\s*,?\s*([ew])\s*(\d+(?:\.\d+)?)(?:\s*°\s*|\s+)(\d+(?:\.\d+)?)(?:\s*['′’]\s*|\s+)(\d+(?:\.\d+)?)\s*["″”]?$"#,
    )
    .unwrap()
});

/// Symbolic DMS with optional trailing cardinal letters; straight and curly
/// quote marks both accepted:
/// `44° 28' 24.32661" N 70° 53' 19.05717" W`
static DMS_TRAILING_CARDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^([+-]?\d+(?:\.\d+)?)\s*°\s*(\d+(?:\.\d+)?)\s*['′’]\s*(\d+(?:\.\d+)?)\s*["″”]\s*(?i:([ns]))?\s*,?\s*([+-]?\d+(?:\.\d+)?)\s*°\s*(\d+(?:\.\d+)?)\s*['′’]\s*(\d+(?:\.\d+)?)\s*["″”]\s*(?i:([ew]))?$"#,
    )
    .unwrap()
});

/// Decimal degrees with leading cardinal letters: `N44.4734 W70.8886`
static DECIMAL_CARDINAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([ns])\s*(\d+(?:\.\d+)?)\s*°?\s*,?\s*([ew])\s*(\d+(?:\.\d+)?)\s*°?$")
        .unwrap()
});

/// Bare signed decimal pair: `44.4734 -70.8886`
static DECIMAL_PAIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([+-]?\d+(?:\.\d+)?)[,;\s]+([+-]?\d+(?:\.\d+)?)$").unwrap());

/// Longest float prefix, mimicking lenient numeric coercion in the batch
/// fallback path.
static FLOAT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").unwrap());

/// Token separators for batch input lines.
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,;|]+").unwrap());

/// Supported notations in strict precedence order.
static PATTERNS: Lazy<Vec<FormatPattern>> = Lazy::new(|| {
    vec![
        FormatPattern {
            name: "dms-sextuple",
            format: CoordinateFormat::Dms,
            pattern: &DMS_SEXTUPLE,
            extract: extract_sextuple,
        },
        FormatPattern {
            name: "dms-leading-cardinal",
            format: CoordinateFormat::Dms,
            pattern: &DMS_LEADING_CARDINAL,
            extract: extract_leading_cardinal,
        },
        FormatPattern {
            name: "dms-trailing-cardinal",
            format: CoordinateFormat::Dms,
            pattern: &DMS_TRAILING_CARDINAL,
            extract: extract_trailing_cardinal,
        },
        FormatPattern {
            name: "decimal-cardinal",
            format: CoordinateFormat::Decimal,
            pattern: &DECIMAL_CARDINAL,
            extract: extract_decimal_cardinal,
        },
        FormatPattern {
            name: "decimal-pair",
            format: CoordinateFormat::Decimal,
            pattern: &DECIMAL_PAIR,
            extract: extract_decimal_pair,
        },
    ]
});

fn dms_magnitude(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees.abs() + minutes / 60.0 + seconds / 3600.0
}

fn capture_f64(caps: &Captures, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().parse().ok()
}

/// Sextuple rule: an unsigned latitude defaults to North, an unsigned
/// longitude defaults to West. An explicit leading sign wins.
fn extract_sextuple(caps: &Captures) -> Option<(f64, f64)> {
    let lat_token = caps.get(1)?.as_str();
    let lon_token = caps.get(4)?.as_str();

    let lat_magnitude = dms_magnitude(
        capture_f64(caps, 1)?,
        capture_f64(caps, 2)?,
        capture_f64(caps, 3)?,
    );
    let lon_magnitude = dms_magnitude(
        capture_f64(caps, 4)?,
        capture_f64(caps, 5)?,
        capture_f64(caps, 6)?,
    );

    let lat = if lat_token.starts_with('-') {
        -lat_magnitude
    } else {
        lat_magnitude
    };
    let lon = if lon_token.starts_with('-') {
        -lon_magnitude
    } else if lon_token.starts_with('+') {
        lon_magnitude
    } else {
        // West-default for unsigned longitudes
        -lon_magnitude
    };

    Some((lat, lon))
}

fn extract_leading_cardinal(caps: &Captures) -> Option<(f64, f64)> {
    let lat_negative = caps.get(1)?.as_str().eq_ignore_ascii_case("s");
    let lon_negative = caps.get(5)?.as_str().eq_ignore_ascii_case("w");

    let lat_magnitude = dms_magnitude(
        capture_f64(caps, 2)?,
        capture_f64(caps, 3)?,
        capture_f64(caps, 4)?,
    );
    let lon_magnitude = dms_magnitude(
        capture_f64(caps, 6)?,
        capture_f64(caps, 7)?,
        capture_f64(caps, 8)?,
    );

    Some((
        if lat_negative { -lat_magnitude } else { lat_magnitude },
        if lon_negative { -lon_magnitude } else { lon_magnitude },
    ))
}

/// Trailing-cardinal rule: an explicit sign is applied first, then an S/W
/// letter negates the value again. Inputs are expected to carry one or the
/// other, not both.
fn extract_trailing_cardinal(caps: &Captures) -> Option<(f64, f64)> {
    let lat_token = caps.get(1)?.as_str();
    let lon_token = caps.get(5)?.as_str();

    let mut lat = dms_magnitude(
        capture_f64(caps, 1)?,
        capture_f64(caps, 2)?,
        capture_f64(caps, 3)?,
    );
    if lat_token.starts_with('-') {
        lat = -lat;
    }
    if caps
        .get(4)
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("s"))
    {
        lat = -lat;
    }

    let mut lon = dms_magnitude(
        capture_f64(caps, 5)?,
        capture_f64(caps, 6)?,
        capture_f64(caps, 7)?,
    );
    if lon_token.starts_with('-') {
        lon = -lon;
    }
    if caps
        .get(8)
        .is_some_and(|m| m.as_str().eq_ignore_ascii_case("w"))
    {
        lon = -lon;
    }

    Some((lat, lon))
}

fn extract_decimal_cardinal(caps: &Captures) -> Option<(f64, f64)> {
    let lat_negative = caps.get(1)?.as_str().eq_ignore_ascii_case("s");
    let lon_negative = caps.get(3)?.as_str().eq_ignore_ascii_case("w");
    let lat = capture_f64(caps, 2)?;
    let lon = capture_f64(caps, 4)?;

    Some((
        if lat_negative { -lat } else { lat },
        if lon_negative { -lon } else { lon },
    ))
}

fn extract_decimal_pair(caps: &Captures) -> Option<(f64, f64)> {
    Some((capture_f64(caps, 1)?, capture_f64(caps, 2)?))
}

/// Parses one line of coordinate text into a coordinate pair.
///
/// Values are taken structurally; range validation happens downstream via
/// [`validate_and_normalize`](crate::validate_and_normalize). Returns `None`
/// when no supported notation matches.
///
/// # Example
/// ```
/// use waypoint_geo::parse_coordinate;
///
/// let coord = parse_coordinate("44° 28' 24.32661\" -70° 53' 19.05717\"").unwrap();
/// assert!((coord.latitude - 44.473424).abs() < 1e-5);
/// assert!((coord.longitude + 70.888627).abs() < 1e-5);
/// ```
pub fn parse_coordinate(text: &str) -> Option<Coordinate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for variant in PATTERNS.iter() {
        if let Some(caps) = variant.pattern.captures(text) {
            if let Some((lat, lon)) = (variant.extract)(&caps) {
                return Some(Coordinate::new(lat, lon));
            }
        }
    }

    None
}

/// Strict single-line parse for callers that need a diagnosable failure.
///
/// Unlike [`parse_coordinate`], the result is range-validated and the
/// longitude normalized, and failures carry an error instead of collapsing
/// to `None`.
pub fn try_parse_coordinate(text: &str) -> Result<Coordinate> {
    let coord = parse_coordinate(text)
        .ok_or_else(|| GeoError::UnrecognizedFormat(text.trim().to_string()))?;
    let (lat, lon) = validate_and_normalize(coord.latitude, coord.longitude).ok_or_else(|| {
        GeoError::InvalidCoordinate(format!(
            "latitude {}, longitude {}",
            coord.latitude, coord.longitude
        ))
    })?;
    Ok(Coordinate::new(lat, lon))
}

/// Classifies coordinate text without extracting values.
///
/// Predicate-only re-run of the same pattern set; the result is a display
/// hint and never alters parsing precedence.
pub fn detect_format(text: &str) -> CoordinateFormat {
    let text = text.trim();
    PATTERNS
        .iter()
        .find(|variant| variant.pattern.is_match(text))
        .map_or(CoordinateFormat::Unknown, |variant| variant.format)
}

/// Returns the name of the first matching notation, for diagnostics.
pub fn matched_pattern_name(text: &str) -> Option<&'static str> {
    let text = text.trim();
    PATTERNS
        .iter()
        .find(|variant| variant.pattern.is_match(text))
        .map(|variant| variant.name)
}

fn parse_strict_pair(a: &str, b: &str) -> Option<(f64, f64)> {
    Some((a.parse().ok()?, b.parse().ok()?))
}

/// Mimics lenient numeric coercion: longest float prefix, else NaN.
fn lenient_float(token: &str) -> f64 {
    FLOAT_PREFIX
        .find(token)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(f64::NAN)
}

fn parse_sextuple_window(tokens: &[&str]) -> Option<(f64, f64)> {
    let joined = tokens.join(" ");
    let caps = DMS_SEXTUPLE.captures(&joined)?;
    extract_sextuple(&caps)
}

/// Interprets one tokenized line as `(lat, lon, elevation)`.
///
/// Two tokens form a bare decimal pair, three add a trailing elevation.
/// Longer lines get a sliding-window match: 6-token DMS windows first (the
/// common "DMS lat + DMS lon + elevation" case), then 2-token decimal
/// windows, with the token after the consumed window read as elevation.
/// The last resort coerces the first two tokens leniently; the result may be
/// a nonsensical pair, which range validation rejects afterwards.
fn parse_line_tokens(tokens: &[&str]) -> Option<(f64, f64, Option<f64>)> {
    match tokens.len() {
        0 | 1 => None,
        2 => {
            let (lat, lon) = parse_strict_pair(tokens[0], tokens[1])?;
            Some((lat, lon, None))
        }
        3 => {
            let (lat, lon) = parse_strict_pair(tokens[0], tokens[1])?;
            Some((lat, lon, tokens[2].parse().ok()))
        }
        n => {
            if n >= 6 {
                for start in 0..=n - 6 {
                    if let Some((lat, lon)) = parse_sextuple_window(&tokens[start..start + 6]) {
                        let elevation = tokens.get(start + 6).and_then(|t| t.parse().ok());
                        return Some((lat, lon, elevation));
                    }
                }
            }
            for start in 0..=n - 2 {
                if let Some((lat, lon)) = parse_strict_pair(tokens[start], tokens[start + 1]) {
                    let elevation = tokens.get(start + 2).and_then(|t| t.parse().ok());
                    return Some((lat, lon, elevation));
                }
            }
            let lat = lenient_float(tokens[0]);
            let lon = lenient_float(tokens[1]);
            Some((lat, lon, tokens.get(2).and_then(|t| t.parse().ok())))
        }
    }
}

/// Batch-parses multi-line coordinate text.
///
/// Lines tokenize on whitespace, comma, semicolon, and pipe. Unparseable or
/// out-of-range lines are dropped silently; out-of-range elevations are
/// dropped while the coordinate itself is kept.
///
/// # Example
/// ```
/// use waypoint_geo::parse_multiple_coordinates;
///
/// let coords = parse_multiple_coordinates("52.52, 13.405\n48.8566 2.3522 35\nnot a point");
/// assert_eq!(coords.len(), 2);
/// assert_eq!(coords[1].elevation, Some(35.0));
/// ```
pub fn parse_multiple_coordinates(text: &str) -> Vec<Coordinate> {
    let mut coords = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = TOKEN_SPLIT.split(line).filter(|t| !t.is_empty()).collect();
        let Some((lat, lon, elevation)) = parse_line_tokens(&tokens) else {
            continue;
        };
        let Some((lat, lon)) = validate_and_normalize(lat, lon) else {
            continue;
        };

        let mut coord = Coordinate::new(lat, lon);
        if let Some(e) = elevation {
            if is_valid_elevation(e) {
                coord.elevation = Some(e);
            }
        }
        coords.push(coord);
    }

    coords
}
