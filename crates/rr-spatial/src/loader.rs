//! CSV map loader.
//!
//! # CSV format
//!
//! Two files.  Nodes:
//!
//! ```csv
//! id,lat,lon
//! 178641055,39.1582,-75.5244
//! 178641060,39.1590,-75.5240
//! ```
//!
//! Edges, one row per road segment:
//!
//! ```csv
//! from,to,name,oneway
//! 178641055,178641060,State St,
//! 178641060,178641071,,yes
//! ```
//!
//! **`name`** may be empty (unnamed road).  **`oneway`** follows OSM
//! conventions:
//!
//! | Value              | Edges added        |
//! |--------------------|--------------------|
//! | `yes`/`1`/`true`   | `from → to`        |
//! | `-1`/`reverse`     | `to → from`        |
//! | empty, `no`, other | both directions    |
//!
//! The `name` and `oneway` columns may be omitted entirely.
//!
//! Node rows with a non-finite or out-of-range `lat`/`lon` are rejected.
//! Rows are not validated against each other here; dangling endpoints are
//! reported when the network is built.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use rr_core::GeoPoint;

use crate::map::{Direction, MapData};
use crate::{SpatialError, SpatialResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:  i64,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from:   i64,
    to:     i64,
    #[serde(default)]
    name:   Option<String>,
    #[serde(default)]
    oneway: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load map data from a node CSV and an edge CSV.
///
/// With `oneway_aware = false` every segment is loaded in both directions.
pub fn load_csv(nodes: &Path, edges: &Path, oneway_aware: bool) -> SpatialResult<MapData> {
    let open = |path: &Path| {
        File::open(path).map_err(|e| SpatialError::MapLoad(format!("{}: {e}", path.display())))
    };
    let map = load_csv_readers(open(nodes)?, open(edges)?, oneway_aware)?;
    info!(
        nodes = map.node_count(),
        edges = map.edge_count(),
        source = %nodes.display(),
        "loaded CSV map"
    );
    Ok(map)
}

/// Like [`load_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from streams.
pub fn load_csv_readers<N: Read, E: Read>(
    nodes: N,
    edges: E,
    oneway_aware: bool,
) -> SpatialResult<MapData> {
    let mut map = MapData::new();

    let mut node_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(nodes);
    for result in node_reader.deserialize::<NodeRecord>() {
        let row = result.map_err(|e| SpatialError::MapLoad(format!("nodes: {e}")))?;
        let pos = GeoPoint::new(row.lat, row.lon);
        if !pos.is_valid() {
            return Err(SpatialError::MapLoad(format!(
                "nodes: node {} has invalid coordinate {},{}",
                row.id, row.lat, row.lon
            )));
        }
        map.add_node(row.id, pos);
    }

    let mut edge_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| SpatialError::MapLoad(format!("edges: {e}")))?;
        let direction = if oneway_aware {
            Direction::from_oneway_tag(row.oneway.as_deref())
        } else {
            Direction::Both
        };
        map.add_segment(row.from, row.to, row.name.as_deref(), direction);
    }

    Ok(map)
}
