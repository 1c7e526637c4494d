//! Unit tests for the rr-route front end.

#[cfg(test)]
mod fixtures {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;

    /// A short stretch of downtown Dover, DE.
    ///
    /// ```text
    ///   1 ─State St─ 2 ─State St─ 3 ─Loockerman St─ 4
    ///                │
    ///             (unnamed, one-way 2→5)
    ///                │
    ///                5        6 (isolated)
    /// ```
    pub const NODES: &str = "\
id,lat,lon
1,39.1550,-75.5245
2,39.1560,-75.5245
3,39.1570,-75.5245
4,39.1570,-75.5230
5,39.1560,-75.5260
6,39.2000,-75.6000
";

    pub const EDGES: &str = "\
from,to,name,oneway
1,2,State St,
2,3,State St,
3,4,Loockerman St,
2,5,,yes
";

    pub struct MapFiles {
        _dir:      TempDir,
        pub nodes: PathBuf,
        pub edges: PathBuf,
    }

    pub fn write_map(nodes: &str, edges: &str) -> MapFiles {
        let dir = tempfile::tempdir().unwrap();
        let node_path = dir.path().join("nodes.csv");
        let edge_path = dir.path().join("edges.csv");
        std::fs::File::create(&node_path).unwrap().write_all(nodes.as_bytes()).unwrap();
        std::fs::File::create(&edge_path).unwrap().write_all(edges.as_bytes()).unwrap();
        MapFiles { _dir: dir, nodes: node_path, edges: edge_path }
    }

    pub fn dover() -> MapFiles {
        write_map(NODES, EDGES)
    }
}

// ── Argument parsing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod args {
    use clap::{CommandFactory, Parser};

    use rr_core::GeoPoint;

    use crate::{Cli, Endpoint};

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ids_and_coords() {
        let cli = Cli::try_parse_from([
            "rr-route", "--nodes", "n.csv", "--edges", "e.csv", "-vv", "178641055", "-33.9,18.4",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.start, Endpoint::Node(178641055));
        assert_eq!(cli.end, Endpoint::Coord(GeoPoint::new(-33.9, 18.4)));
    }

    #[test]
    fn source_is_required() {
        assert!(Cli::try_parse_from(["rr-route", "1", "2"]).is_err());
    }

    #[test]
    fn nodes_requires_edges() {
        assert!(Cli::try_parse_from(["rr-route", "--nodes", "n.csv", "1", "2"]).is_err());
    }

    #[test]
    fn endpoint_parse_errors() {
        assert!("abc".parse::<Endpoint>().is_err());
        assert!("1.5,abc".parse::<Endpoint>().is_err());
        assert_eq!("42".parse::<Endpoint>().unwrap(), Endpoint::Node(42));
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use std::io::Write;

    use clap::Parser;

    use rr_core::RrError;

    use crate::{load_config, read_config_file, Cli};

    fn cli(extra: &[&str]) -> Cli {
        let mut argv = vec!["rr-route", "--nodes", "n.csv", "--edges", "e.csv"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["1", "2"]);
        Cli::try_parse_from(argv).unwrap()
    }

    fn config_file(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_without_file() {
        let cfg = load_config(&cli(&[])).unwrap();
        assert!(cfg.oneway_aware);
        assert_eq!(cfg.precision, 1);
        assert!(!cfg.print_total);
    }

    #[test]
    fn file_values_then_flag_overrides() {
        let f = config_file("precision = 3\nprint_total = true\ndeadline_ms = 500\n");
        let path = f.path().to_str().unwrap();

        let cfg = load_config(&cli(&["--config", path])).unwrap();
        assert_eq!(cfg.precision, 3);
        assert!(cfg.print_total);
        assert_eq!(cfg.deadline_ms, Some(500));
        assert!(cfg.oneway_aware);

        let cfg = load_config(&cli(&["--config", path, "--precision", "0", "--ignore-oneway"])).unwrap();
        assert_eq!(cfg.precision, 0);
        assert!(!cfg.oneway_aware);
    }

    #[test]
    fn unknown_key_rejected() {
        let f = config_file("precison = 2\n");
        assert!(matches!(read_config_file(f.path()), Err(RrError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_config_file(&dir.path().join("absent.toml")),
            Err(RrError::Io(_))
        ));
    }

    #[test]
    fn invalid_override_rejected() {
        assert!(matches!(
            load_config(&cli(&["--precision", "12"])),
            Err(RrError::Config(_))
        ));
    }
}

// ── End-to-end runs ───────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use clap::Parser;

    use crate::{exit_code, run, Cli};

    use super::fixtures::{dover, write_map, MapFiles};

    fn exec(map: &MapFiles, extra: &[&str]) -> (anyhow::Result<()>, String) {
        let mut argv = vec![
            "rr-route".to_string(),
            "--nodes".into(),
            map.nodes.display().to_string(),
            "--edges".into(),
            map.edges.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let result = run(&cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    fn distance_of(line: &str) -> f64 {
        line.rsplit(' ').next().unwrap().parse().unwrap()
    }

    #[test]
    fn prints_merged_segments() {
        let map = dover();
        let (result, out) = exec(&map, &["1", "4"]);
        result.unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2, "{out}");
        assert!(lines[0].starts_with("State St "));
        assert!(lines[1].starts_with("Loockerman St "));
        // 0.002° of latitude ≈ 222.4 m
        assert!((distance_of(lines[0]) - 222.4).abs() < 0.2, "{out}");
    }

    #[test]
    fn unnamed_label_and_total() {
        let map = dover();
        let (result, out) = exec(&map, &["--total", "--precision", "0", "1", "5"]);
        result.unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3, "{out}");
        assert!(lines[0].starts_with("State St "));
        assert!(lines[1].starts_with("(unnamed) "));
        assert!(lines[2].starts_with("total "));
        assert!(!lines[2].contains('.'));
    }

    #[test]
    fn same_start_and_end_prints_nothing() {
        let map = dover();
        let (result, out) = exec(&map, &["3", "3"]);
        result.unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn coordinates_snap_to_nodes() {
        let map = dover();
        let (result, out) = exec(&map, &["39.15501,-75.52449", "39.15699,-75.52302"]);
        result.unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn one_way_blocks_reverse_trip() {
        let map = dover();
        let (result, out) = exec(&map, &["5", "1"]);
        let err = result.unwrap_err();
        assert_eq!(exit_code(&err), 3);
        assert!(out.is_empty());

        let (result, _) = exec(&map, &["--ignore-oneway", "5", "1"]);
        result.unwrap();
    }

    #[test]
    fn unreachable_node() {
        let map = dover();
        let (result, out) = exec(&map, &["1", "6"]);
        assert_eq!(exit_code(&result.unwrap_err()), 3);
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_node() {
        let map = dover();
        let (result, _) = exec(&map, &["1", "999"]);
        let err = result.unwrap_err();
        assert_eq!(exit_code(&err), 3);
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn malformed_map() {
        let map = write_map(super::fixtures::NODES, "from,to,name,oneway\n1,77,Ghost Rd,\n");
        let (result, out) = exec(&map, &["1", "2"]);
        assert_eq!(exit_code(&result.unwrap_err()), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn unparseable_map() {
        let map = write_map("id,lat,lon\n1,north,west\n", super::fixtures::EDGES);
        let (result, _) = exec(&map, &["1", "2"]);
        assert_eq!(exit_code(&result.unwrap_err()), 2);
    }

    #[test]
    fn corrupt_coordinate_prints_nothing() {
        let nodes = "id,lat,lon\n1,39.1550,-75.5245\n2,NaN,-75.5245\n3,39.1570,-75.5245\n";
        let map = write_map(nodes, "from,to,name\n1,2,A\n2,3,A\n");
        let (result, out) = exec(&map, &["1", "3"]);
        assert_eq!(exit_code(&result.unwrap_err()), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn bad_config_exit_code() {
        let map = dover();
        let (result, _) = exec(&map, &["--deadline-ms", "0", "1", "4"]);
        assert_eq!(exit_code(&result.unwrap_err()), 2);
    }
}
