//! `rr-spatial` — road network, shortest-path routing, and route summaries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`map`]     | `MapData` — raw nodes/edges as handed over by a loader      |
//! | [`network`] | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`          |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`, `CancelToken`   |
//! | [`summary`] | `summarize`, `SummaryRecord`                                |
//! | [`plan`]    | `plan_route` — resolve ids, route, summarize                |
//! | [`loader`]  | `load_csv`, `load_csv_readers`                              |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Pipeline
//!
//! ```text
//! loader ─▶ MapData ─▶ RoadNetwork::from_map_data ─▶ Router::route ─▶ summarize
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod loader;
pub mod map;
pub mod network;
pub mod plan;
pub mod router;
pub mod summary;

#[cfg(feature = "osm")]
pub mod osm;


pub use error::{SpatialError, SpatialResult};
pub use loader::{load_csv, load_csv_readers};
pub use map::{Direction, MapData, RawEdge, RawNode};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use plan::{plan_route, plan_route_nodes, RoutePlan};
pub use router::{CancelToken, DijkstraRouter, Route, Router};
pub use summary::{summarize, SummaryRecord};
