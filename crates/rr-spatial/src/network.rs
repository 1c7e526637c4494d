//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length_m`, `edge_name`)
//! are sorted by source node and indexed by `EdgeId`.  Within one source
//! node, edges keep the order they were added in, so search results are
//! reproducible for a given input.
//!
//! # Edge lengths
//!
//! `edge_length_m` is always the haversine distance between the edge's
//! endpoints, computed once in [`RoadNetworkBuilder::add_directed_edge`].
//! The builder has no way to accept a caller-supplied length.
//!
//! # Road names
//!
//! Names are interned: `edge_name[e]` is a [`NameId`] into a table where
//! slot 0 is the shared "unnamed" entry.  Equal names always intern to the
//! same `NameId`, so name comparison on hot paths is an integer compare.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over node positions as points on the unit sphere.
//! Straight-line distance between those points grows monotonically with
//! great-circle distance, so nearest-neighbour queries rank nodes exactly as
//! `GeoPoint::distance_m` would.  Used to snap free coordinates to road nodes.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;
use tracing::debug;

use rr_core::{EdgeId, GeoPoint, NameId, NodeId};

use crate::map::MapData;
use crate::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a node's unit-sphere position
/// with the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 3],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared chord length on the unit sphere.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// `pos` as a point on the unit sphere.
fn unit_vector(pos: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (pos.lat.to_radians(), pos.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Read-only once built.  Edge arrays are `pub` for direct indexed access
/// on hot paths.  Do not construct directly; use [`RoadNetworkBuilder`] or
/// [`RoadNetwork::from_map_data`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Source-map id of each node.  Indexed by `NodeId`.
    pub node_ext_id: Vec<i64>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Redundant with CSR but lets a path step be
    /// traced back to its source without a search.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Haversine length of each edge in metres.  Used as Dijkstra edge cost.
    pub edge_length_m: Vec<f64>,

    /// Interned road name of each edge.
    pub edge_name: Vec<NameId>,

    // ── Lookup tables ─────────────────────────────────────────────────────
    names:       Vec<String>,
    ext_index:   FxHashMap<i64, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    /// Build a network from raw loader output.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::DuplicateNode`] if a node id occurs twice.
    /// - [`SpatialError::MalformedInput`] if an edge references a node id
    ///   absent from `map.nodes`.
    pub fn from_map_data(map: &MapData) -> SpatialResult<Self> {
        let mut b = RoadNetworkBuilder::with_capacity(map.node_count(), map.edge_count());
        for node in &map.nodes {
            b.add_node(node.id, node.pos)?;
        }
        for edge in &map.edges {
            b.add_directed_edge(edge.from, edge.to, edge.name.as_deref())?;
        }
        Ok(b.build())
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// `true` if `node` is a valid index into this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Identifier translation ────────────────────────────────────────────

    /// Internal id for a source-map node id.
    pub fn node_by_ext(&self, ext_id: i64) -> Option<NodeId> {
        self.ext_index.get(&ext_id).copied()
    }

    /// Like [`node_by_ext`](Self::node_by_ext) but fails with
    /// [`SpatialError::UnknownNode`].
    pub fn resolve(&self, ext_id: i64) -> SpatialResult<NodeId> {
        self.node_by_ext(ext_id).ok_or(SpatialError::UnknownNode(ext_id))
    }

    /// Source-map id of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of range; check with [`contains`](Self::contains).
    #[inline]
    pub fn ext_id(&self, node: NodeId) -> i64 {
        self.node_ext_id[node.index()]
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// The edge `from → to`, if any.
    ///
    /// When parallel edges exist the shortest wins, first in CSR order on a
    /// tie.  This is the same edge Dijkstra relaxes through, so a route and
    /// its summary always agree on which edge a step used.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        let mut best: Option<EdgeId> = None;
        for e in self.out_edges(from) {
            if self.edge_to[e.index()] != to {
                continue;
            }
            match best {
                Some(b) if self.edge_length_m[b.index()] <= self.edge_length_m[e.index()] => {}
                _ => best = Some(e),
            }
        }
        best
    }

    // ── Names ─────────────────────────────────────────────────────────────

    /// Road name text for `id`; `""` for [`NameId::UNNAMED`].
    #[inline]
    pub fn name(&self, id: NameId) -> &str {
        &self.names[id.index()]
    }

    /// Road name of edge `e`.
    #[inline]
    pub fn edge_name_str(&self, e: EdgeId) -> &str {
        self.name(self.edge_name[e.index()])
    }

    /// Distinct road names, including the unnamed slot.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&unit_vector(pos))
            .map(|e| e.id)
    }

    /// Return up to `k` nearest nodes to `pos`, sorted by ascending distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&unit_vector(pos))
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// Nodes are keyed by their source-map id.  Every edge must reference nodes
/// added earlier; its length is computed from their positions on insertion.
///
/// # Example
///
/// ```
/// use rr_core::GeoPoint;
/// use rr_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// b.add_node(100, GeoPoint::new(39.158, -75.524)).unwrap();
/// b.add_node(200, GeoPoint::new(39.160, -75.524)).unwrap();
/// b.add_road(100, 200, Some("State St")).unwrap();
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:      Vec<GeoPoint>,
    ext_ids:    Vec<i64>,
    ext_index:  FxHashMap<i64, NodeId>,
    raw_edges:  Vec<PendingEdge>,
    names:      Vec<String>,
    name_index: FxHashMap<String, NameId>,
}

struct PendingEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
    name:     NameId,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and edges to reduce
    /// reallocations when bulk-loading from OSM or CSV.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            ext_ids:    Vec::with_capacity(nodes),
            ext_index:  FxHashMap::with_capacity_and_hasher(nodes, Default::default()),
            raw_edges:  Vec::with_capacity(edges),
            names:      vec![String::new()],
            name_index: FxHashMap::default(),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    ///
    /// `pos` must be finite and within WGS-84 range; anything else fails
    /// with [`SpatialError::InvalidCoordinate`].
    pub fn add_node(&mut self, ext_id: i64, pos: GeoPoint) -> SpatialResult<NodeId> {
        let id = NodeId(dense_index(self.nodes.len(), "node")?);
        if !pos.is_valid() {
            return Err(SpatialError::InvalidCoordinate { id: ext_id, pos });
        }
        if self.ext_index.contains_key(&ext_id) {
            return Err(SpatialError::DuplicateNode(ext_id));
        }
        self.ext_index.insert(ext_id, id);
        self.nodes.push(pos);
        self.ext_ids.push(ext_id);
        Ok(id)
    }

    /// Add a **directed** edge `from → to` between two previously added
    /// nodes.  `None` and `Some("")` both mean "unnamed".
    pub fn add_directed_edge(&mut self, from: i64, to: i64, name: Option<&str>) -> SpatialResult<()> {
        let missing = |m| SpatialError::MalformedInput { from, to, missing: m };
        let a = *self.ext_index.get(&from).ok_or_else(|| missing(from))?;
        let b = *self.ext_index.get(&to).ok_or_else(|| missing(to))?;
        // EdgeIds double as u32 CSR offsets.
        dense_index(self.raw_edges.len(), "edge")?;

        let length_m = self.nodes[a.index()].distance_m(self.nodes[b.index()]);
        let name = self.intern(name)?;
        self.raw_edges.push(PendingEdge { from: a, to: b, length_m, name });
        Ok(())
    }

    /// Convenience: add edges in **both directions** for an undirected road
    /// segment.
    pub fn add_road(&mut self, a: i64, b: i64, name: Option<&str>) -> SpatialResult<()> {
        self.add_directed_edge(a, b, name)?;
        self.add_directed_edge(b, a, name)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    fn intern(&mut self, name: Option<&str>) -> SpatialResult<NameId> {
        let name = match name {
            None | Some("") => return Ok(NameId::UNNAMED),
            Some(n) => n,
        };
        if let Some(&id) = self.name_index.get(name) {
            return Ok(id);
        }
        let id = NameId(dense_index(self.names.len(), "road name")?);
        self.names.push(name.to_owned());
        self.name_index.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for edge sort + O(N log N) for R-tree bulk
    /// load, where N = nodes, E = edges.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable sort: insertion order survives within each source node.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();
        let edge_name:     Vec<NameId> = raw.iter().map(|e| e.name).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: unit_vector(pos),
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        debug!(
            nodes = node_count,
            edges = edge_count,
            names = self.names.len(),
            "built road network"
        );

        RoadNetwork {
            node_pos: self.nodes,
            node_ext_id: self.ext_ids,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_name,
            names: self.names,
            ext_index: self.ext_index,
            spatial_idx,
        }
    }
}

/// The id for the next item in a table holding `len` items.
///
/// Every id type is a `u32` whose `MAX` is its `INVALID` sentinel, so the
/// usable range ends one short of it.
pub(crate) fn dense_index(len: usize, what: &str) -> SpatialResult<u32> {
    match u32::try_from(len) {
        Ok(i) if i != u32::MAX => Ok(i),
        _ => Err(SpatialError::MapLoad(format!("{what} count exceeds u32 range"))),
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
