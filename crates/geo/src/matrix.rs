//! Pairwise distance matrices, cumulative path distance, and statistics.

use crate::distance::{calculate_2d_distance, calculate_3d_distance, Distance};
use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// Square matrix of pairwise distances; `None` marks a cell whose inputs
/// failed validation, which is distinct from a zero distance.
pub type DistanceMatrix = Vec<Vec<Option<Distance>>>;

/// Aggregate statistics over a set of kilometer observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Smallest observation
    pub min: f64,
    /// Largest observation
    pub max: f64,
    /// Arithmetic mean
    pub average: f64,
    /// Number of observations
    pub count: usize,
}

/// Everything computed for one matrix request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    /// Pairwise great-circle distances, if requested
    pub matrix_2d: Option<DistanceMatrix>,
    /// Pairwise elevation-aware distances, if requested
    pub matrix_3d: Option<DistanceMatrix>,
    /// Statistics over the 2D upper triangle
    pub stats_2d: Option<Statistics>,
    /// Statistics over the 3D upper triangle
    pub stats_3d: Option<Statistics>,
    /// Path length following input order, 2D
    pub cumulative_2d: Option<Distance>,
    /// Path length following input order, 3D
    pub cumulative_3d: Option<Distance>,
}

/// Computes min/max/average over kilometer observations.
///
/// Returns `None` for an empty input.
pub fn distance_statistics(observations: &[f64]) -> Option<Statistics> {
    if observations.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &km in observations {
        min = min.min(km);
        max = max.max(km);
        sum += km;
    }

    Some(Statistics {
        min,
        max,
        average: sum / observations.len() as f64,
        count: observations.len(),
    })
}

fn pair_2d(a: &Coordinate, b: &Coordinate) -> Option<Distance> {
    calculate_2d_distance(a.latitude, a.longitude, b.latitude, b.longitude)
}

fn pair_3d(a: &Coordinate, b: &Coordinate) -> Option<Distance> {
    calculate_3d_distance(
        a.latitude,
        a.longitude,
        a.elevation,
        b.latitude,
        b.longitude,
        b.elevation,
    )
}

fn build_matrix(
    coords: &[Coordinate],
    cell: fn(&Coordinate, &Coordinate) -> Option<Distance>,
) -> DistanceMatrix {
    let row = |i: usize| -> Vec<Option<Distance>> {
        coords.iter().map(|other| cell(&coords[i], other)).collect()
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..coords.len()).into_par_iter().map(row).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..coords.len()).map(row).collect()
    }
}

/// Kilometer observations from the upper triangle, diagonal excluded,
/// invalid cells skipped.
fn upper_triangle_km(matrix: &DistanceMatrix) -> Vec<f64> {
    let mut observations = Vec::new();
    for (i, row) in matrix.iter().enumerate() {
        for cell in row.iter().skip(i + 1) {
            if let Some(distance) = cell {
                observations.push(distance.km);
            }
        }
    }
    observations
}

fn cumulative(
    coords: &[Coordinate],
    pair: fn(&Coordinate, &Coordinate) -> Option<Distance>,
) -> Option<Distance> {
    if coords.len() < 2 {
        return None;
    }
    Some(
        coords
            .windows(2)
            .filter_map(|leg| pair(&leg[0], &leg[1]))
            .fold(Distance::zero(), Distance::add),
    )
}

/// Sum of consecutive 2D distances along the input order.
///
/// This is a traversal path, not the sum of all pairs. Legs with an invalid
/// endpoint contribute nothing. Returns `None` for fewer than 2 points.
pub fn cumulative_distance(coords: &[Coordinate]) -> Option<Distance> {
    cumulative(coords, pair_2d)
}

/// Sum of consecutive 3D distances along the input order.
pub fn cumulative_distance_3d(coords: &[Coordinate]) -> Option<Distance> {
    cumulative(coords, pair_3d)
}

/// Computes the full pairwise report for a set of coordinates.
///
/// Each requested matrix is `n x n` with a zero diagonal and `None` cells
/// where an endpoint failed validation; cells are computed independently but
/// the underlying formulas are symmetric in their arguments, so
/// `matrix[i][j] == matrix[j][i]`. Statistics cover the upper triangle.
/// Returns `None` for fewer than 2 coordinates.
pub fn calculate_distance_matrix(
    coords: &[Coordinate],
    include_2d: bool,
    include_3d: bool,
) -> Option<DistanceReport> {
    if coords.len() < 2 {
        return None;
    }

    let matrix_2d = include_2d.then(|| build_matrix(coords, pair_2d));
    let matrix_3d = include_3d.then(|| build_matrix(coords, pair_3d));

    let stats_2d = matrix_2d
        .as_ref()
        .and_then(|m| distance_statistics(&upper_triangle_km(m)));
    let stats_3d = matrix_3d
        .as_ref()
        .and_then(|m| distance_statistics(&upper_triangle_km(m)));

    let cumulative_2d = include_2d.then(|| cumulative_distance(coords)).flatten();
    let cumulative_3d = include_3d
        .then(|| cumulative_distance_3d(coords))
        .flatten();

    Some(DistanceReport {
        matrix_2d,
        matrix_3d,
        stats_2d,
        stats_3d,
        cumulative_2d,
        cumulative_3d,
    })
}
