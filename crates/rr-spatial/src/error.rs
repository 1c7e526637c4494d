//! Spatial-subsystem error type.
//!
//! Node identifiers in messages are the *external* ids from the map source,
//! so a failure can be looked up in the original data without translation.

use thiserror::Error;

use rr_core::{GeoPoint, NodeId};

/// Errors produced by `rr-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The map source could not be read or parsed.
    #[error("map load error: {0}")]
    MapLoad(String),

    /// An edge names an endpoint that is not in the node set.
    #[error("edge {from} -> {to} references unknown node {missing}")]
    MalformedInput { from: i64, to: i64, missing: i64 },

    /// A node position that is non-finite or outside WGS-84 range.
    #[error("node {id} has invalid coordinate {pos}")]
    InvalidCoordinate { id: i64, pos: GeoPoint },

    #[error("node {0} appears more than once in map data")]
    DuplicateNode(i64),

    /// A start or end id given by the caller is not in the network.
    #[error("node {0} not found in network")]
    UnknownNode(i64),

    /// An internal index outside the network.
    #[error("node {0} out of range for network")]
    NodeNotFound(NodeId),

    #[error("no route from {from} to {to}")]
    NoRoute { from: i64, to: i64 },

    /// A path step with no backing edge.  Never produced for a route returned
    /// by a `Router` over the same network.
    #[error("path step {from} -> {to} has no edge in the network")]
    MissingEdge { from: i64, to: i64 },

    #[error("route search aborted: {0}")]
    SearchAborted(&'static str),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
