//! One-call entry point: resolve ids, route, summarize.

use rr_core::NodeId;

use crate::network::RoadNetwork;
use crate::router::{Route, Router};
use crate::summary::{summarize, SummaryRecord};
use crate::SpatialResult;

/// A computed route together with its per-road summary.
#[derive(Clone, Debug)]
pub struct RoutePlan {
    pub route:   Route,
    pub records: Vec<SummaryRecord>,
}

impl RoutePlan {
    pub fn total_distance_m(&self) -> f64 {
        self.route.total_distance_m
    }
}

/// Plan a route between two source-map node ids.
///
/// # Errors
///
/// [`SpatialError::UnknownNode`](crate::SpatialError::UnknownNode) before any
/// search if either id is absent; otherwise whatever the router or
/// [`summarize`] reports.
pub fn plan_route<R: Router + ?Sized>(
    network: &RoadNetwork,
    router:  &R,
    start:   i64,
    end:     i64,
) -> SpatialResult<RoutePlan> {
    let from = network.resolve(start)?;
    let to   = network.resolve(end)?;
    plan_route_nodes(network, router, from, to)
}

/// Like [`plan_route`] but takes internal ids, e.g. from
/// [`RoadNetwork::snap_to_node`].
pub fn plan_route_nodes<R: Router + ?Sized>(
    network: &RoadNetwork,
    router:  &R,
    from:    NodeId,
    to:      NodeId,
) -> SpatialResult<RoutePlan> {
    let route = router.route(network, from, to)?;
    let records = summarize(network, &route.nodes)?;
    Ok(RoutePlan { route, records })
}
