//! WASM bindings for the geo crate.
//!
//! JSON-string boundary so the crate can be used from JavaScript/TypeScript
//! in both browser and Deno environments.

use crate::{
    calculate_distance_matrix, detect_format, format_distance_with_dynamic_units,
    parse_coordinate, parse_multiple_coordinates, try_parse_coordinate, Coordinate, UnitSystem,
};
use wasm_bindgen::prelude::*;

/// Parse one line of coordinate text.
///
/// # Returns
/// JSON object with `latitude`/`longitude`, or the string `"null"` if the
/// text is unrecognized.
#[wasm_bindgen]
pub fn parse_one(text: &str) -> Result<String, JsValue> {
    match parse_coordinate(text) {
        Some(coord) => serde_json::to_string(&coord)
            .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {e}"))),
        None => Ok("null".to_string()),
    }
}

/// Strict variant of [`parse_one`]: the result is range-validated, and
/// unrecognized or out-of-range input raises an error carrying the error
/// code instead of returning `"null"`.
#[wasm_bindgen]
pub fn parse_strict(text: &str) -> Result<String, JsValue> {
    let coord = try_parse_coordinate(text)
        .map_err(|e| JsValue::from_str(&format!("{} ({:?})", e, e.code())))?;
    serde_json::to_string(&coord)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {e}")))
}

/// Batch-parse multi-line coordinate text.
///
/// # Returns
/// JSON array of coordinates; unrecognized lines are dropped.
#[wasm_bindgen]
pub fn parse_batch(text: &str) -> Result<String, JsValue> {
    let coords = parse_multiple_coordinates(text);
    serde_json::to_string(&coords)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {e}")))
}

/// Classify coordinate text as `"dms"`, `"decimal"`, or `"unknown"`.
#[wasm_bindgen]
pub fn coordinate_format(text: &str) -> String {
    match detect_format(text) {
        crate::CoordinateFormat::Dms => "dms",
        crate::CoordinateFormat::Decimal => "decimal",
        crate::CoordinateFormat::Unknown => "unknown",
    }
    .to_string()
}

/// Compute the full distance report for a JSON array of coordinates.
///
/// # Arguments
/// * `coords_json` - JSON array of `{latitude, longitude, elevation?}` objects
/// * `include_2d` - compute the great-circle matrix
/// * `include_3d` - compute the elevation-aware matrix
///
/// # Returns
/// JSON report with matrices, statistics, and cumulative path distances, or
/// the string `"null"` for fewer than 2 coordinates.
#[wasm_bindgen]
pub fn distance_report(
    coords_json: &str,
    include_2d: bool,
    include_3d: bool,
) -> Result<String, JsValue> {
    let coords: Vec<Coordinate> = serde_json::from_str(coords_json)
        .map_err(|e| JsValue::from_str(&format!("JSON parse error: {e}")))?;

    match calculate_distance_matrix(&coords, include_2d, include_3d) {
        Some(report) => serde_json::to_string(&report)
            .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {e}"))),
        None => Ok("null".to_string()),
    }
}

/// Scale a kilometer value for display under the named unit system.
///
/// # Arguments
/// * `km` - raw kilometer value
/// * `system` - `"meters"`, `"feet"`, or `"survey-feet"`
///
/// # Returns
/// JSON object with `value` and `unit`.
#[wasm_bindgen]
pub fn format_distance(km: f64, system: &str) -> Result<String, JsValue> {
    let system: UnitSystem = system
        .parse()
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;

    let formatted = format_distance_with_dynamic_units(km, system);
    serde_json::to_string(&formatted)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {e}")))
}
