//! waypoint: CLI for GPS coordinate parsing and distance calculations.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use std::io::Read;
use std::path::PathBuf;
use waypoint_geo::{
    calculate_distance_matrix, decimal_to_dms, format_decimal_degrees,
    format_distance_with_dynamic_units, matched_pattern_name, parse_multiple_coordinates,
    validate_and_normalize, Axis, Coordinate, DistanceReport, UnitSystem,
};

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "GPS coordinate parsing and distance calculation CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse coordinate text and show decimal and DMS forms
    Parse {
        /// Input file with one coordinate per line, or - for stdin
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compute pairwise distances, statistics, and path length
    Distance {
        /// Input file with one coordinate per line, or - for stdin
        input: PathBuf,
        /// Also compute elevation-aware 3D distances
        #[arg(long)]
        three_d: bool,
        /// Unit system for scaled display values
        #[arg(long, default_value = "meters")]
        units: UnitSystem,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a single decimal coordinate pair to DMS
    Convert {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse { input, json } => run_parse(&input, json),
        Commands::Distance {
            input,
            three_d,
            units,
            json,
        } => run_distance(&input, three_d, units, json),
        Commands::Convert { lat, lon } => run_convert(lat, lon),
    }
}

fn read_input(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

fn load_coordinates(path: &PathBuf) -> anyhow::Result<Vec<Coordinate>> {
    let text = read_input(path)?;
    let coords = parse_multiple_coordinates(&text);

    if coords.is_empty() {
        bail!("no valid coordinates found in input");
    }
    Ok(coords)
}

fn point_label(coord: &Coordinate, index: usize) -> String {
    coord
        .name
        .clone()
        .unwrap_or_else(|| format!("P{}", index + 1))
}

fn run_parse(input: &PathBuf, json: bool) -> anyhow::Result<()> {
    let text = read_input(input)?;
    let coords = parse_multiple_coordinates(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&coords)?);
        return Ok(());
    }

    if coords.is_empty() {
        bail!("no valid coordinates found in input");
    }

    for (i, coord) in coords.iter().enumerate() {
        let lat_dms = decimal_to_dms(coord.latitude, Axis::Latitude, true)
            .context("latitude out of range")?;
        let lon_dms = decimal_to_dms(coord.longitude, Axis::Longitude, true)
            .context("longitude out of range")?;

        println!("{}", point_label(coord, i).bold());
        println!(
            "  decimal: {}, {}",
            format_decimal_degrees(coord.latitude),
            format_decimal_degrees(coord.longitude)
        );
        println!("  dms:     {lat_dms} {lon_dms}");
        if let Some(elevation) = coord.elevation {
            println!("  elev:    {elevation} m");
        }
    }

    let dropped = text.lines().filter(|l| !l.trim().is_empty()).count() - coords.len();
    if dropped > 0 {
        eprintln!(
            "{} {} line(s) not recognized as coordinates",
            "⚠".yellow(),
            dropped
        );
    }
    Ok(())
}

fn print_matrix(labels: &[String], matrix: &[Vec<Option<waypoint_geo::Distance>>]) {
    print!("{:>10}", "");
    for label in labels {
        print!(" {label:>12}");
    }
    println!();

    for (i, row) in matrix.iter().enumerate() {
        print!("{:>10}", labels[i]);
        for cell in row {
            match cell {
                Some(d) => print!(" {:>9.3} km", d.km),
                None => print!(" {:>12}", "-"),
            }
        }
        println!();
    }
}

fn print_stats(title: &str, stats: &waypoint_geo::Statistics, units: UnitSystem) {
    let min = format_distance_with_dynamic_units(stats.min, units);
    let max = format_distance_with_dynamic_units(stats.max, units);
    let average = format_distance_with_dynamic_units(stats.average, units);

    println!("{}", title.bold());
    println!("  pairs:   {}", stats.count);
    println!("  min:     {} {}", min.value, min.unit);
    println!("  max:     {} {}", max.value, max.unit);
    println!("  average: {} {}", average.value, average.unit);
}

fn run_distance(
    input: &PathBuf,
    three_d: bool,
    units: UnitSystem,
    json: bool,
) -> anyhow::Result<()> {
    let coords = load_coordinates(input)?;

    let Some(report) = calculate_distance_matrix(&coords, true, three_d) else {
        bail!("need at least 2 valid coordinates, got {}", coords.len());
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "coordinates": coords,
                "report": report,
            }))?
        );
        return Ok(());
    }

    let labels: Vec<String> = coords
        .iter()
        .enumerate()
        .map(|(i, c)| point_label(c, i))
        .collect();

    print_report(&labels, &report, three_d, units);
    Ok(())
}

fn print_report(labels: &[String], report: &DistanceReport, three_d: bool, units: UnitSystem) {
    if let Some(matrix) = &report.matrix_2d {
        println!("{}", "Great-circle distances".bold().underline());
        print_matrix(labels, matrix);
        println!();
    }
    if let Some(stats) = &report.stats_2d {
        print_stats("2D statistics", stats, units);
        println!();
    }
    if let Some(total) = &report.cumulative_2d {
        let formatted = format_distance_with_dynamic_units(total.km, units);
        println!(
            "{} {:.6} km ({} {})",
            "Path length (2D):".bold(),
            total.km,
            formatted.value,
            formatted.unit
        );
    }

    if !three_d {
        return;
    }

    println!();
    if let Some(matrix) = &report.matrix_3d {
        println!("{}", "Elevation-aware distances".bold().underline());
        print_matrix(labels, matrix);
        println!();
    }
    if let Some(stats) = &report.stats_3d {
        print_stats("3D statistics", stats, units);
        println!();
    }
    if let Some(total) = &report.cumulative_3d {
        let formatted = format_distance_with_dynamic_units(total.km, units);
        println!(
            "{} {:.6} km ({} {})",
            "Path length (3D):".bold(),
            total.km,
            formatted.value,
            formatted.unit
        );
    }
}

fn run_convert(lat: f64, lon: f64) -> anyhow::Result<()> {
    let Some((lat, lon)) = validate_and_normalize(lat, lon) else {
        bail!("invalid coordinate: latitude must be within [-90, 90] and both values finite");
    };

    let lat_dms = decimal_to_dms(lat, Axis::Latitude, true).context("latitude out of range")?;
    let lon_dms = decimal_to_dms(lon, Axis::Longitude, true).context("longitude out of range")?;
    let lat_signed = decimal_to_dms(lat, Axis::Latitude, false).context("latitude out of range")?;
    let lon_signed =
        decimal_to_dms(lon, Axis::Longitude, false).context("longitude out of range")?;

    println!(
        "decimal:        {}, {}",
        format_decimal_degrees(lat),
        format_decimal_degrees(lon)
    );
    println!("dms (cardinal): {lat_dms} {lon_dms}");
    println!("dms (signed):   {lat_signed} {lon_signed}");
    println!(
        "notation:       {}",
        matched_pattern_name(&format!("{lat} {lon}")).unwrap_or("unknown")
    );
    Ok(())
}
