//! Raw map entities, as produced by a loader and consumed by
//! [`RoadNetwork::from_map_data`](crate::RoadNetwork::from_map_data).
//!
//! Nothing here is validated: edges may reference missing nodes and node ids
//! may repeat.  Validation happens once, when the network is built.

use rr_core::GeoPoint;

/// A map node keyed by its source id.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawNode {
    pub id:  i64,
    pub pos: GeoPoint,
}

/// A **directed** road connection between two source ids.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawEdge {
    pub from: i64,
    pub to:   i64,
    pub name: Option<String>,
}

/// Which directed edges a road segment contributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Both,
    /// Drawn order only (`oneway=yes`).
    Forward,
    /// Against drawn order only (`oneway=-1`).
    Reverse,
}

impl Direction {
    /// Interpret an OSM-style `oneway` value.  Missing, empty, `no` and
    /// unrecognised values are two-way.
    pub fn from_oneway_tag(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("yes" | "1" | "true") => Direction::Forward,
            Some("-1" | "reverse") => Direction::Reverse,
            _ => Direction::Both,
        }
    }
}

/// Node set plus directed edge list for one map source.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapData {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
}

impl MapData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, id: i64, pos: GeoPoint) {
        self.nodes.push(RawNode { id, pos });
    }

    pub fn add_directed_edge(&mut self, from: i64, to: i64, name: Option<&str>) {
        self.edges.push(RawEdge { from, to, name: name.map(str::to_owned) });
    }

    /// Add the edges for one road segment `a → b` according to `direction`.
    pub fn add_segment(&mut self, a: i64, b: i64, name: Option<&str>, direction: Direction) {
        match direction {
            Direction::Both => self.add_road(a, b, name),
            Direction::Forward => self.add_directed_edge(a, b, name),
            Direction::Reverse => self.add_directed_edge(b, a, name),
        }
    }

    /// Convenience: add edges in **both directions**.
    pub fn add_road(&mut self, a: i64, b: i64, name: Option<&str>) {
        self.add_directed_edge(a, b, name);
        self.add_directed_edge(b, a, name);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }
}
