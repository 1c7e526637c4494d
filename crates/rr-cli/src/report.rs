//! Plain-text route report.

use rr_core::RouteConfig;
use rr_spatial::RoutePlan;

/// Printed in place of an empty road name.
pub const UNNAMED_LABEL: &str = "(unnamed)";

/// One `<name> <distance>` line per summary record, plus an optional
/// `total <distance>` line.  A trivial route (start == end) has no records,
/// so only the total line, if requested, is produced.
pub fn format_report(plan: &RoutePlan, config: &RouteConfig) -> String {
    let precision = config.precision;
    let mut lines: Vec<String> = plan
        .records
        .iter()
        .map(|r| {
            let name = if r.is_unnamed() { UNNAMED_LABEL } else { r.name.as_str() };
            format!("{name} {:.*}\n", precision, r.distance_m)
        })
        .collect();

    if config.print_total {
        lines.push(format!("total {:.*}\n", precision, plan.total_distance_m()));
    }
    lines.concat()
}
