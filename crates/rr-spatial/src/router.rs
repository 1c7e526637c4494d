//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers go through the [`Router`] trait, so an A* or contraction-hierarchy
//! router can replace [`DijkstraRouter`] without touching the summarizer or
//! the CLI.
//!
//! # Cost units
//!
//! Edge cost is exactly `edge_length_m`, the cached haversine length, in
//! metres.  There is no heuristic and no turn penalty.
//!
//! # Tie-breaking
//!
//! Among equal-length shortest paths the result is whichever one the
//! relaxation order settles first.  That order is fixed for a given network
//! (CSR edge order and `NodeId` as the secondary heap key), so repeated
//! queries agree.  Networks built from the same roads in a different input
//! order may pick a different, equally short path.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ordered_float::OrderedFloat;
use tracing::debug;

use rr_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::{SpatialError, SpatialResult};

/// Heap pops between deadline/cancellation checks.
const ABORT_CHECK_INTERVAL: u64 = 1024;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the visited nodes in order and the summed
/// edge length.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes from source to destination inclusive.  Consecutive entries are
    /// joined by an edge of the network the route was computed on.
    pub nodes: Vec<NodeId>,
    /// Sum of `edge_length_m` along the route, in metres.
    pub total_distance_m: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() < 2
    }

    /// Number of edges traversed.
    pub fn segment_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// The route as source-map node ids.
    pub fn ext_ids(&self, network: &RoadNetwork) -> Vec<i64> {
        self.nodes.iter().map(|&n| network.ext_id(n)).collect()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
///
/// Implementations must be `Send + Sync` so one router can serve queries
/// from several threads against a shared, read-only network.
pub trait Router: Send + Sync {
    /// Compute a minimum-distance route from `from` to `to`.
    ///
    /// `from == to` yields the single-node route `[from]`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NodeNotFound`] if either id is outside `network`.
    /// - [`SpatialError::NoRoute`] if `to` is unreachable from `from`.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route>;
}

// ── CancelToken ───────────────────────────────────────────────────────────────

/// Shared flag for aborting an in-flight search from another thread.
///
/// Clones share the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph.
///
/// By default the search is unbounded.  [`with_deadline`](Self::with_deadline)
/// and [`with_cancel_token`](Self::with_cancel_token) bound it; both are
/// polled every 1024 heap pops and fail the query with
/// [`SpatialError::SearchAborted`].
#[derive(Clone, Debug, Default)]
pub struct DijkstraRouter {
    deadline: Option<Duration>,
    cancel:   Option<CancelToken>,
}

impl DijkstraRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up on a query once it has run for `budget`.
    pub fn with_deadline(mut self, budget: Duration) -> Self {
        self.deadline = Some(budget);
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn check_abort(&self, started: Instant) -> SpatialResult<()> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(SpatialError::SearchAborted("cancelled"));
        }
        if self.deadline.is_some_and(|budget| started.elapsed() >= budget) {
            return Err(SpatialError::SearchAborted("deadline exceeded"));
        }
        Ok(())
    }
}

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        for node in [from, to] {
            if !network.contains(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
        }
        if from == to {
            return Ok(Route { nodes: vec![from], total_distance_m: 0.0 });
        }
        self.dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

impl DijkstraRouter {
    fn dijkstra(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
        let started = Instant::now();
        let n = network.node_count();
        // dist[v] = best known distance (m) to reach v.
        let mut dist = vec![f64::INFINITY; n];
        // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
        let mut prev_edge = vec![EdgeId::INVALID; n];

        dist[from.index()] = 0.0;

        // Min-heap: (distance, node). Reverse makes BinaryHeap (max) behave as min-heap.
        // Secondary key NodeId ensures deterministic tie-breaking.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((OrderedFloat(0.0), from)));

        let mut pops: u64 = 0;
        while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
            if pops % ABORT_CHECK_INTERVAL == 0 {
                self.check_abort(started)?;
            }
            pops += 1;

            if node == to {
                debug!(pops, distance_m = cost, "route found");
                return Ok(reconstruct(network, &prev_edge, to, cost));
            }

            // Skip stale heap entries.
            if cost > dist[node.index()] {
                continue;
            }

            for edge in network.out_edges(node) {
                let neighbor = network.edge_to[edge.index()];
                let new_cost = cost + network.edge_length_m[edge.index()];

                if new_cost < dist[neighbor.index()] {
                    dist[neighbor.index()] = new_cost;
                    prev_edge[neighbor.index()] = edge;
                    heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
                }
            }
        }

        debug!(pops, "destination unreachable");
        Err(SpatialError::NoRoute {
            from: network.ext_id(from),
            to:   network.ext_id(to),
        })
    }
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: NodeId, total_m: f64) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Route { nodes, total_distance_m: total_m }
}
