//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use rr_spatial::{osm::load_from_pbf, RoadNetwork};
//!
//! let map = load_from_pbf(Path::new("delaware-latest.osm.pbf"), true)?;
//! let network = RoadNetwork::from_map_data(&map)?;
//! ```
//!
//! # What is loaded
//!
//! Only car-drivable `highway=*` ways are included (see [`is_drivable`]).
//! Each consecutive pair of way nodes becomes one segment named after the
//! way's `name` tag.  Node ids are the OSM ids, so routes can be requested
//! with ids read off the map.
//!
//! Regional extracts clip ways at the boundary, leaving references to nodes
//! that are not in the file.  Segments touching such nodes are dropped and
//! counted in a warning.
//!
//! # Memory note
//!
//! The loader buffers all OSM nodes in a `HashMap<i64, GeoPoint>` for the
//! first pass, because ways reference nodes by id and may precede them.
//! Only road-referenced nodes are copied into the returned [`MapData`].

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};
use tracing::{info, warn};

use rr_core::GeoPoint;

use crate::map::{Direction, MapData};
use crate::{SpatialError, SpatialResult};

// ── Public entry point ────────────────────────────────────────────────────────

/// Load drivable roads from an OSM PBF file.
///
/// With `oneway_aware = false`, `oneway` tags (explicit and implicit) are
/// ignored and every segment is loaded in both directions.
///
/// # Errors
///
/// Returns [`SpatialError::MapLoad`] if the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path, oneway_aware: bool) -> SpatialResult<MapData> {
    let map_err = |e: osmpbf::Error| SpatialError::MapLoad(format!("{}: {e}", path.display()));

    // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(map_err)?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let tag = |key: &str| tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

                let Some(highway) = tag("highway").filter(|h| is_drivable(h)) else {
                    return;
                };
                let direction = if oneway_aware {
                    way_direction(highway, tag("oneway"))
                } else {
                    Direction::Both
                };
                road_ways.push(OsmWay {
                    refs: w.refs().collect(),
                    name: tag("name").map(str::to_owned),
                    direction,
                });
            }
            _ => {}
        })
        .map_err(map_err)?;

    // ── Phase 2: keep only road-referenced nodes that exist in the file ───
    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    let mut map = MapData::new();
    for osm_id in &road_node_ids {
        if let Some(&pos) = all_nodes.get(osm_id) {
            map.add_node(*osm_id, pos);
        }
    }
    drop(all_nodes);

    let present: HashSet<i64> = map.nodes.iter().map(|n| n.id).collect();

    // ── Phase 3: segments from way node sequences ─────────────────────────
    let mut dropped = 0usize;
    for way in &road_ways {
        for window in way.refs.windows(2) {
            let (a, b) = (window[0], window[1]);
            if present.contains(&a) && present.contains(&b) {
                map.add_segment(a, b, way.name.as_deref(), way.direction);
            } else {
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, "skipped way segments referencing nodes outside the extract");
    }
    info!(
        nodes = map.node_count(),
        edges = map.edge_count(),
        ways = road_ways.len(),
        source = %path.display(),
        "loaded OSM map"
    );

    Ok(map)
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:      Vec<i64>,
    name:      Option<String>,
    direction: Direction,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` if a `highway` value is drivable by car.
fn is_drivable(highway: &str) -> bool {
    !matches!(
        highway,
        "footway" | "path" | "cycleway" | "pedestrian" | "steps" | "track"
            | "bridleway" | "corridor" | "proposed" | "construction" | "platform"
    )
}

/// Travel direction of a way.  Motorways and motorway links are implicitly
/// one-way in OSM convention unless tagged `oneway=no`.
fn way_direction(highway: &str, oneway: Option<&str>) -> Direction {
    match oneway {
        Some(_) => Direction::from_oneway_tag(oneway),
        None if matches!(highway, "motorway" | "motorway_link") => Direction::Forward,
        None => Direction::Both,
    }
}
