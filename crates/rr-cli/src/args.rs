//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser};

use rr_core::GeoPoint;

/// Shortest driving route between two points, summarized per road.
///
/// Prints one `<name> <distance>` line per run of consecutive same-named
/// road segments, distances in metres.
#[derive(Parser, Debug)]
#[command(name = "rr-route", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Start: a map node id, or `LAT,LON` to snap to the nearest node.
    #[arg(allow_hyphen_values = true)]
    pub start: Endpoint,

    /// End: a map node id, or `LAT,LON` to snap to the nearest node.
    #[arg(allow_hyphen_values = true)]
    pub end: Endpoint,

    /// Load every road in both directions, ignoring `oneway`.
    #[arg(long)]
    pub ignore_oneway: bool,

    /// Abort the route search after this many milliseconds.
    #[arg(long, value_name = "MS")]
    pub deadline_ms: Option<u64>,

    /// Decimal places for printed distances.
    #[arg(long, value_name = "N")]
    pub precision: Option<usize>,

    /// Append a `total <distance>` line.
    #[arg(long)]
    pub total: bool,
}

/// Where the map comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = true)]
pub struct SourceArgs {
    /// Node CSV (`id,lat,lon`).
    #[arg(long, value_name = "FILE", requires = "edges")]
    pub nodes: Option<PathBuf>,

    /// Edge CSV (`from,to,name,oneway`).
    #[arg(long, value_name = "FILE", requires = "nodes")]
    pub edges: Option<PathBuf>,

    /// OpenStreetMap PBF extract.
    #[cfg(feature = "osm")]
    #[arg(long, value_name = "FILE", conflicts_with_all = ["nodes", "edges"])]
    pub pbf: Option<PathBuf>,
}

/// A route endpoint as given on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Endpoint {
    /// Source-map node id.
    Node(i64),
    /// Free coordinate, snapped to the nearest road node.
    Coord(GeoPoint),
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            return s.parse().map(Endpoint::Coord);
        }
        s.trim()
            .parse()
            .map(Endpoint::Node)
            .map_err(|_| format!("expected a node id or \"lat,lon\", got {s:?}"))
    }
}
