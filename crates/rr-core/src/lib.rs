//! `rr-core` — foundational types for the `rust_route` road router.
//!
//! This crate is a dependency of every other `rr-*` crate.  It intentionally
//! has no `rr-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `NameId`                          |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`config`]      | `RouteConfig`                                         |
//! | [`error`]       | `RrError`, `RrResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by the `rr-route` TOML config loader.             |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RouteConfig;
pub use error::{RrError, RrResult};
pub use geo::{haversine_m, GeoPoint};
pub use ids::{EdgeId, NameId, NodeId};
