//! `rr-cli` — the `rr-route` command.
//!
//! All work happens in [`run`], which takes parsed arguments and an output
//! sink, so the whole pipeline is testable without spawning a process.
//! Stdout carries only the report; diagnostics go through `tracing` to
//! stderr.
//!
//! # Exit codes
//!
//! | Code | Cause                                                    |
//! |------|----------------------------------------------------------|
//! | 0    | success                                                  |
//! | 1    | anything not listed below (e.g. writing stdout failed)   |
//! | 2    | bad configuration, unreadable or malformed map           |
//! | 3    | unknown start/end node, or no route between them         |
//! | 4    | internal path inconsistency, or search aborted            |

pub mod args;
pub mod report;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use rr_core::{NodeId, RouteConfig, RrError, RrResult};
use rr_spatial::{load_csv, plan_route_nodes, DijkstraRouter, MapData, RoadNetwork, SpatialError};

pub use args::{Cli, Endpoint, SourceArgs};
pub use report::format_report;

/// Execute one routing request and write the report to `out`.
///
/// Nothing is written unless the whole pipeline succeeds.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let config = load_config(cli)?;

    let map = load_map(&cli.source, config.oneway_aware)?;
    let network = RoadNetwork::from_map_data(&map)?;
    drop(map);

    let mut router = DijkstraRouter::new();
    if let Some(budget) = config.deadline() {
        router = router.with_deadline(budget);
    }

    let from = resolve_endpoint(&network, cli.start)?;
    let to   = resolve_endpoint(&network, cli.end)?;
    let plan = plan_route_nodes(&network, &router, from, to)?;
    info!(
        segments = plan.route.segment_count(),
        records = plan.records.len(),
        distance_m = plan.total_distance_m(),
        "route planned"
    );

    out.write_all(format_report(&plan, &config).as_bytes())
        .context("writing report")?;
    out.flush().context("writing report")?;
    Ok(())
}

/// Map an error from [`run`] to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<SpatialError>() {
        return match e {
            SpatialError::MapLoad(_)
            | SpatialError::MalformedInput { .. }
            | SpatialError::InvalidCoordinate { .. }
            | SpatialError::DuplicateNode(_) => 2,
            SpatialError::UnknownNode(_)
            | SpatialError::NodeNotFound(_)
            | SpatialError::NoRoute { .. } => 3,
            SpatialError::MissingEdge { .. } | SpatialError::SearchAborted(_) => 4,
        };
    }
    if err.downcast_ref::<RrError>().is_some() {
        return 2;
    }
    1
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Build the run configuration: defaults, then the `--config` file, then
/// command-line flags.
pub fn load_config(cli: &Cli) -> RrResult<RouteConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => RouteConfig::default(),
    };

    if cli.ignore_oneway {
        config.oneway_aware = false;
    }
    if let Some(ms) = cli.deadline_ms {
        config.deadline_ms = Some(ms);
    }
    if let Some(p) = cli.precision {
        config.precision = p;
    }
    if cli.total {
        config.print_total = true;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a TOML config file.  Missing keys take their defaults; unknown
/// keys are rejected.
pub fn read_config_file(path: &Path) -> RrResult<RouteConfig> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str(&text).map_err(|e| RrError::Parse(format!("{}: {e}", path.display())))
}

// ── Map source ────────────────────────────────────────────────────────────────

fn load_map(source: &SourceArgs, oneway_aware: bool) -> Result<MapData> {
    #[cfg(feature = "osm")]
    {
        if let Some(pbf) = &source.pbf {
            return Ok(rr_spatial::osm::load_from_pbf(pbf, oneway_aware)?);
        }
    }

    match (&source.nodes, &source.edges) {
        (Some(nodes), Some(edges)) => Ok(load_csv(nodes, edges, oneway_aware)?),
        // clap enforces `--nodes` and `--edges` together.
        _ => Err(RrError::Config("no map source given".into()).into()),
    }
}

fn resolve_endpoint(network: &RoadNetwork, endpoint: Endpoint) -> Result<NodeId> {
    match endpoint {
        Endpoint::Node(ext) => Ok(network.resolve(ext)?),
        Endpoint::Coord(pos) => {
            let node = network
                .snap_to_node(pos)
                .ok_or_else(|| SpatialError::MapLoad("map contains no road nodes".into()))?;
            info!(%pos, node = network.ext_id(node), "snapped coordinate to node");
            Ok(node)
        }
    }
}
