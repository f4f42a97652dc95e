//! Command‑line entry point for the `ghash` tool.
//!
//! Provides subcommands to encode and decode geohashes, list neighbors, and
//! print the edge-case, precision and timing reports.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geohashkit::DEFAULT_LENGTH;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI command implementations.
mod cmd;

/// Sample point used when `profile` is given no coordinates.
const SAMPLE_LAT_LNG: [f64; 2] = [37.7749, -122.4194];
/// Sample geohash used when `profile` is given none.
const SAMPLE_GEOHASH: &str = "9q8yyzjfwqr";

#[derive(Parser)]
#[command(name = "ghash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
/// Top‑level CLI options and subcommands.
struct Cli {
    /// Sets the level of verbosity (`-v`, `-vv`, ...).
    #[arg(short, action = clap::ArgAction::Count, help = "Sets the level of verbosity")]
    v: u8,

    /// Command to execute.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Subcommands supported by the `ghash` tool.
enum Commands {
    #[command(about = "Encode a latitude/longitude pair")]
    /// Encode a coordinate pair into a geohash.
    Encode {
        #[arg(allow_negative_numbers = true, help = "Latitude in degrees")]
        /// Latitude; out-of-range values are normalized.
        lat: f64,

        #[arg(allow_negative_numbers = true, help = "Longitude in degrees")]
        /// Longitude; out-of-range values are normalized.
        lng: f64,

        #[arg(
            short = 'l',
            long = "length",
            default_value_t = DEFAULT_LENGTH,
            value_parser = clap::value_parser!(usize),
            help = "Number of geohash characters"
        )]
        /// Geohash length in characters.
        length: usize,
    },

    #[command(about = "Decode a geohash to its center or bounding intervals")]
    /// Decode a geohash.
    Decode {
        #[arg(help = "Geohash to decode")]
        /// Geohash string; uppercase is accepted.
        geohash: String,

        #[arg(
            long = "interval",
            conflicts_with = "rounded",
            help = "Print the latitude and longitude intervals"
        )]
        /// Print the bounding intervals instead of the center.
        interval: bool,

        #[arg(long = "rounded", help = "Round the center to the cell's precision")]
        /// Round the center to the decimal places the cell size supports.
        rounded: bool,
    },

    #[command(about = "List the cells around a geohash, clockwise from north-west")]
    /// List neighboring cells.
    Neighbors {
        #[arg(help = "Geohash at the center")]
        /// Geohash string; uppercase is accepted.
        geohash: String,

        #[arg(
            short = 'o',
            long = "order",
            default_value_t = 1,
            help = "Grid distance to reach"
        )]
        /// Chebyshev distance in cells.
        order: u32,

        #[arg(long = "ring", help = "Only list cells at exactly the given order")]
        /// List only the outermost ring.
        ring: bool,
    },

    #[command(about = "Encode the extreme corners of the globe at every length")]
    /// Print geohashes for the nine extreme latitude/longitude corners.
    Edges {
        #[arg(
            long = "max-length",
            default_value_t = 12,
            value_parser = clap::value_parser!(usize),
            help = "Longest geohash to print"
        )]
        /// Longest geohash length to print.
        max_length: usize,
    },

    #[command(about = "Show how cell size shrinks with each geohash character")]
    /// Print intervals, sizes and bits for every prefix of a geohash.
    Precision {
        #[arg(help = "Geohash to analyse")]
        /// Geohash string; uppercase is accepted.
        geohash: String,
    },

    #[command(about = "Time the core operations")]
    /// Run each operation repeatedly and report timings.
    Profile {
        #[arg(
            long = "repeat-count",
            default_value_t = 10_000,
            help = "Base number of repetitions"
        )]
        /// Base repetition count; cheaper operations scale it down.
        repeat_count: u32,

        #[arg(
            long = "lat-lng",
            num_args = 2,
            value_names = ["LAT", "LNG"],
            allow_negative_numbers = true,
            default_values_t = SAMPLE_LAT_LNG,
            help = "Coordinates to encode"
        )]
        /// Latitude and longitude to encode.
        lat_lng: Vec<f64>,

        #[arg(
            long = "geohash",
            default_value = SAMPLE_GEOHASH,
            help = "Geohash to decode"
        )]
        /// Geohash to decode and surround.
        geohash: String,

        #[arg(long = "output", help = "Write the report here instead of stdout")]
        /// Optional report path.
        output: Option<PathBuf>,
    },
}

/// Install a stderr subscriber filtered by `RUST_LOG`, or by `-v` when unset.
fn init_logging(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Print a report, or write it to `output` when given.
fn deliver_report(report: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, report)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{report}"),
    }
    Ok(())
}

/// Dispatch the selected subcommand.
fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Encode { lat, lng, length } => {
            debug!(lat, lng, length, "encoding");
            println!("{}", cmd::encode(lat, lng, length)?);
        }
        Commands::Decode {
            geohash,
            interval,
            rounded,
        } => {
            debug!(%geohash, interval, rounded, "decoding");
            println!("{}", cmd::decode(&geohash, interval, rounded)?);
        }
        Commands::Neighbors {
            geohash,
            order,
            ring,
        } => {
            debug!(%geohash, order, ring, "listing neighbors");
            for cell in cmd::neighbors(&geohash, order, ring)? {
                println!("{cell}");
            }
        }
        Commands::Edges { max_length } => print!("{}", cmd::edges(max_length)?),
        Commands::Precision { geohash } => print!("{}", cmd::precision(&geohash)?),
        Commands::Profile {
            repeat_count,
            lat_lng,
            geohash,
            output,
        } => {
            let [lat, lng] = lat_lng[..] else {
                anyhow::bail!("--lat-lng takes exactly two values");
            };
            info!(repeat_count, lat, lng, %geohash, "profiling");
            let report = cmd::profile(repeat_count, (lat, lng), &geohash)?;
            deliver_report(&report, output.as_deref())?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.v);
    if let Err(err) = run(cli.command) {
        eprintln!("{err:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_parse_as_positionals() {
        let cli = Cli::try_parse_from(["ghash", "encode", "-33.8688", "-151.2093", "-l", "6"])
            .expect("negative positionals parse");
        match cli.command {
            Commands::Encode { lat, lng, length } => {
                assert_eq!(lat, -33.8688);
                assert_eq!(lng, -151.2093);
                assert_eq!(length, 6);
            }
            _ => panic!("expected encode"),
        }
    }

    #[test]
    fn profile_defaults() {
        let cli = Cli::try_parse_from(["ghash", "profile"]).expect("defaults parse");
        match cli.command {
            Commands::Profile {
                repeat_count,
                lat_lng,
                geohash,
                output,
            } => {
                assert_eq!(repeat_count, 10_000);
                assert_eq!(lat_lng, SAMPLE_LAT_LNG);
                assert_eq!(geohash, SAMPLE_GEOHASH);
                assert!(output.is_none());
            }
            _ => panic!("expected profile"),
        }
    }

    #[test]
    fn interval_and_rounded_conflict() {
        assert!(Cli::try_parse_from(["ghash", "decode", "9q8yyk", "--interval", "--rounded"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["ghash", "-vvv", "edges"]).expect("parses");
        assert_eq!(cli.v, 3);
    }
}
