//! Magnitude-adaptive unit formatting and elevation unit conversion.

use crate::error::{GeoError, Result};
use crate::round_to;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// International foot in meters.
pub const INTERNATIONAL_FOOT_M: f64 = 0.3048;

/// US survey foot in meters, distinct from the international foot.
pub const SURVEY_FOOT_M: f64 = 0.30480061;

/// Unit system for dynamic distance display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSystem {
    /// Millimeters through kilometers
    Meters,
    /// Inches through miles, international foot
    Feet,
    /// Inches through miles, US survey foot
    SurveyFeet,
}

impl UnitSystem {
    fn default_unit(self) -> &'static str {
        match self {
            UnitSystem::Meters => "m",
            UnitSystem::Feet | UnitSystem::SurveyFeet => "ft",
        }
    }

    fn foot_in_meters(self) -> f64 {
        match self {
            UnitSystem::Meters | UnitSystem::Feet => INTERNATIONAL_FOOT_M,
            UnitSystem::SurveyFeet => SURVEY_FOOT_M,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitSystem::Meters => "meters",
            UnitSystem::Feet => "feet",
            UnitSystem::SurveyFeet => "survey-feet",
        };
        f.write_str(name)
    }
}

impl FromStr for UnitSystem {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "meters" => Ok(UnitSystem::Meters),
            "feet" => Ok(UnitSystem::Feet),
            "survey-feet" => Ok(UnitSystem::SurveyFeet),
            other => Err(GeoError::UnknownUnitSystem(other.to_string())),
        }
    }
}

/// A display-only value/unit projection; never fed back into computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormattedDistance {
    /// Scaled magnitude
    pub value: f64,
    /// Unit label for the magnitude
    pub unit: &'static str,
}

/// Scales a raw kilometer value to a human-appropriate magnitude and unit.
///
/// The metric bracket chain reproduces the historical display behavior the
/// surrounding application settled on, including its conversion constants;
/// changing it would silently re-scale saved reports.
///
/// Invalid input (`NaN`, infinite, negative) yields a zero value with the
/// system's default unit.
///
/// # Example
/// ```
/// use waypoint_geo::{format_distance_with_dynamic_units, UnitSystem};
///
/// let formatted = format_distance_with_dynamic_units(0.0005, UnitSystem::Meters);
/// assert_eq!(formatted.value, 0.5);
/// assert_eq!(formatted.unit, "mm");
/// ```
pub fn format_distance_with_dynamic_units(km: f64, system: UnitSystem) -> FormattedDistance {
    if !km.is_finite() || km < 0.0 {
        return FormattedDistance {
            value: 0.0,
            unit: system.default_unit(),
        };
    }

    match system {
        UnitSystem::Meters => format_metric(km),
        UnitSystem::Feet | UnitSystem::SurveyFeet => format_imperial(km, system.foot_in_meters()),
    }
}

fn format_metric(km: f64) -> FormattedDistance {
    let mm = km * 1000.0;
    let cm = mm / 10.0;
    let m = cm / 100.0;

    if (0.1..10.0).contains(&mm) {
        FormattedDistance {
            value: round_to(mm, 3),
            unit: "mm",
        }
    } else if (10.0..1000.0).contains(&mm) {
        FormattedDistance {
            value: round_to(cm, 4),
            unit: "cm",
        }
    } else if (100.0..10_000.0).contains(&cm) {
        FormattedDistance {
            value: round_to(m, 3),
            unit: "m",
        }
    } else if (0.001..1000.0).contains(&m) {
        let places = if m < 1.0 { 6 } else { 3 };
        FormattedDistance {
            value: round_to(m, places),
            unit: "m",
        }
    } else {
        FormattedDistance {
            value: round_to(km, 6),
            unit: "km",
        }
    }
}

fn format_imperial(km: f64, foot_m: f64) -> FormattedDistance {
    let feet = km * 1000.0 / foot_m;
    let inches = feet * 12.0;
    let miles = feet / 5280.0;

    if (0.1..12.0).contains(&inches) {
        FormattedDistance {
            value: round_to(inches, 3),
            unit: "in",
        }
    } else if (1.0..5280.0).contains(&feet) {
        FormattedDistance {
            value: round_to(feet, 3),
            unit: "ft",
        }
    } else {
        FormattedDistance {
            value: round_to(miles, 6),
            unit: "mi",
        }
    }
}

/// Elevation unit for conversion helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElevationUnit {
    /// Meters
    Meters,
    /// International feet
    Feet,
    /// US survey feet
    SurveyFeet,
}

impl ElevationUnit {
    fn in_meters(self) -> f64 {
        match self {
            ElevationUnit::Meters => 1.0,
            ElevationUnit::Feet => INTERNATIONAL_FOOT_M,
            ElevationUnit::SurveyFeet => SURVEY_FOOT_M,
        }
    }
}

impl FromStr for ElevationUnit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "meters" | "m" => Ok(ElevationUnit::Meters),
            "feet" | "ft" => Ok(ElevationUnit::Feet),
            "survey-feet" | "sft" => Ok(ElevationUnit::SurveyFeet),
            other => Err(GeoError::UnknownUnitSystem(other.to_string())),
        }
    }
}

/// Converts an elevation value between units, always round-tripping through
/// meters as the canonical internal unit.
#[inline]
pub fn convert_elevation(value: f64, from: ElevationUnit, to: ElevationUnit) -> f64 {
    value * from.in_meters() / to.in_meters()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_mm_bracket_boundary() {
        let f = format_distance_with_dynamic_units(0.0005, UnitSystem::Meters);
        assert_eq!(f.value, 0.5);
        assert_eq!(f.unit, "mm");
    }

    #[test]
    fn test_metric_bracket_chain() {
        let f = format_distance_with_dynamic_units(0.005, UnitSystem::Meters);
        assert_eq!(f.unit, "mm");

        let f = format_distance_with_dynamic_units(0.05, UnitSystem::Meters);
        assert_eq!(f.unit, "cm");
        assert_eq!(f.value, 5.0);

        let f = format_distance_with_dynamic_units(2.5, UnitSystem::Meters);
        assert_eq!(f.unit, "m");
        assert_eq!(f.value, 2.5);

        let f = format_distance_with_dynamic_units(2500.0, UnitSystem::Meters);
        assert_eq!(f.unit, "km");
        assert_eq!(f.value, 2500.0);
    }

    #[test]
    fn test_metric_below_all_brackets_falls_to_km() {
        let f = format_distance_with_dynamic_units(0.00005, UnitSystem::Meters);
        assert_eq!(f.unit, "km");
        assert_eq!(f.value, 0.00005);
    }

    #[test]
    fn test_metric_plain_meters_branch() {
        let f = format_distance_with_dynamic_units(500.0, UnitSystem::Meters);
        assert_eq!(f.unit, "m");
        assert_eq!(f.value, 500.0);
    }

    #[test]
    fn test_feet_brackets() {
        // 10 km -> ~32808 ft -> miles
        let f = format_distance_with_dynamic_units(10.0, UnitSystem::Feet);
        assert_eq!(f.unit, "mi");
        assert!((f.value - 6.213712).abs() < 1e-6);

        // 100 m -> 328.084 ft
        let f = format_distance_with_dynamic_units(0.1, UnitSystem::Feet);
        assert_eq!(f.unit, "ft");
        assert!((f.value - 328.084).abs() < 1e-3);

        // 10 cm -> 3.937 in
        let f = format_distance_with_dynamic_units(0.0001, UnitSystem::Feet);
        assert_eq!(f.unit, "in");
        assert!((f.value - 3.937).abs() < 1e-3);
    }

    #[test]
    fn test_survey_feet_uses_survey_constant() {
        let international = format_distance_with_dynamic_units(0.1, UnitSystem::Feet);
        let survey = format_distance_with_dynamic_units(0.1, UnitSystem::SurveyFeet);
        assert_eq!(survey.unit, "ft");
        assert!(survey.value < international.value);
        assert!((survey.value - international.value).abs() > 1e-5);
    }

    #[test]
    fn test_invalid_input_zeroes() {
        let f = format_distance_with_dynamic_units(f64::NAN, UnitSystem::Meters);
        assert_eq!(f.value, 0.0);
        assert_eq!(f.unit, "m");

        let f = format_distance_with_dynamic_units(-1.0, UnitSystem::Feet);
        assert_eq!(f.value, 0.0);
        assert_eq!(f.unit, "ft");

        let f = format_distance_with_dynamic_units(f64::INFINITY, UnitSystem::SurveyFeet);
        assert_eq!(f.value, 0.0);
        assert_eq!(f.unit, "ft");
    }

    #[test]
    fn test_unit_system_round_trips_from_str() {
        for name in ["meters", "feet", "survey-feet"] {
            let system: UnitSystem = name.parse().unwrap();
            assert_eq!(system.to_string(), name);
        }
        assert!("furlongs".parse::<UnitSystem>().is_err());
    }

    #[test]
    fn test_convert_elevation() {
        let feet = convert_elevation(100.0, ElevationUnit::Meters, ElevationUnit::Feet);
        assert!((feet - 328.0839895).abs() < 1e-6);

        let back = convert_elevation(feet, ElevationUnit::Feet, ElevationUnit::Meters);
        assert!((back - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_elevation_survey_vs_international() {
        let survey = convert_elevation(1000.0, ElevationUnit::SurveyFeet, ElevationUnit::Meters);
        let international = convert_elevation(1000.0, ElevationUnit::Feet, ElevationUnit::Meters);
        assert!(survey > international);
        assert!((survey - 304.80061).abs() < 1e-9);
    }
}
