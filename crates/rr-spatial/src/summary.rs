//! Turn a node path into driving directions: one record per run of
//! consecutive edges sharing a road name.
//!
//! ```text
//! path      a ──Main St── b ──Main St── c ──Oak Ave── d
//! records   [("Main St", |ab| + |bc|), ("Oak Ave", |cd|)]
//! ```
//!
//! Only adjacent steps merge.  `A, B, A` yields three records.  Unnamed
//! edges form runs of their own like any other name.

use rr_core::{NameId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// A maximal run of same-named path steps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryRecord {
    /// Road name; empty for unnamed roads.
    pub name: String,
    /// Summed edge length of the run, in metres.
    pub distance_m: f64,
}

impl SummaryRecord {
    pub fn new(name: impl Into<String>, distance_m: f64) -> Self {
        Self { name: name.into(), distance_m }
    }

    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }
}

/// Summarize `path` over `network`.
///
/// Paths with fewer than two nodes have no steps and yield an empty list.
/// The function is all-or-nothing: on error no records are returned.
///
/// # Errors
///
/// - [`SpatialError::NodeNotFound`] if a path entry is outside `network`.
/// - [`SpatialError::MissingEdge`] if two consecutive entries are not joined
///   by an edge.
pub fn summarize(network: &RoadNetwork, path: &[NodeId]) -> SpatialResult<Vec<SummaryRecord>> {
    let mut steps = path.windows(2).map(|w| step(network, w[0], w[1]));

    let Some(first) = steps.next() else {
        return Ok(Vec::new());
    };
    let (mut current, mut run_m) = first?;

    let mut records = Vec::new();
    for s in steps {
        let (name, length_m) = s?;
        if name == current {
            run_m += length_m;
        } else {
            records.push(SummaryRecord::new(network.name(current), run_m));
            current = name;
            run_m = length_m;
        }
    }

    // The last run has no following name change to emit it.
    records.push(SummaryRecord::new(network.name(current), run_m));
    Ok(records)
}

/// Name and length of the edge behind one path step.
fn step(network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<(NameId, f64)> {
    for node in [from, to] {
        if !network.contains(node) {
            return Err(SpatialError::NodeNotFound(node));
        }
    }
    let edge = network.edge_between(from, to).ok_or(SpatialError::MissingEdge {
        from: network.ext_id(from),
        to:   network.ext_id(to),
    })?;
    Ok((network.edge_name[edge.index()], network.edge_length_m[edge.index()]))
}
