//! Run configuration.
//!
//! `RouteConfig` is a plain value: the CLI fills it from an optional TOML
//! file and then applies command-line overrides.  Library code never reads
//! global state; everything it needs is passed in explicitly.

use std::time::Duration;

use crate::{RrError, RrResult};

/// Largest accepted `precision`.  Haversine distances are not meaningful
/// below a micrometre.
pub const MAX_PRECISION: usize = 6;

/// Settings for one routing run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RouteConfig {
    /// Honour `oneway` tags when loading.  When `false`, every road is
    /// loaded in both directions.
    pub oneway_aware: bool,

    /// Abort the shortest-path search after this many milliseconds.
    /// `None` = unbounded.
    pub deadline_ms: Option<u64>,

    /// Decimal places used when printing distances.
    pub precision: usize,

    /// Append a `total <distance>` line after the segment list.
    pub print_total: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            oneway_aware: true,
            deadline_ms:  None,
            precision:    1,
            print_total:  false,
        }
    }
}

impl RouteConfig {
    /// Check value ranges.  Called once after all overrides are applied.
    pub fn validate(&self) -> RrResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(RrError::Config(format!(
                "precision {} exceeds maximum of {MAX_PRECISION}",
                self.precision
            )));
        }
        if self.deadline_ms == Some(0) {
            return Err(RrError::Config(
                "deadline_ms must be positive (omit it for no deadline)".into(),
            ));
        }
        Ok(())
    }

    /// Search deadline as a `Duration`, if any.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}
