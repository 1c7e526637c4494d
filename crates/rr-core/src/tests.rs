//! Unit tests for rr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NameId, NodeId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(EdgeId(100) > EdgeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn unnamed_is_slot_zero() {
        assert!(NameId(0).is_unnamed());
        assert!(!NameId(1).is_unnamed());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{haversine_m, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(38.907, -77.072);
        assert_eq!(p.distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_latitude() {
        // 1° of latitude on a 6 371 008.8 m sphere = 111 195.08 m.
        let a = GeoPoint::new(39.0, -75.5);
        let b = GeoPoint::new(40.0, -75.5);
        let d = a.distance_m(b);
        assert!((d - 111_195.08).abs() < 0.1, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(39.1582, -75.5244);
        let b = GeoPoint::new(39.7391, -75.5398);
        assert_eq!(a.distance_m(b), b.distance_m(a));
    }

    #[test]
    fn free_function_matches_method() {
        let a = GeoPoint::new(51.5007, -0.1246);
        let b = GeoPoint::new(40.6892, -74.0445);
        assert_eq!(haversine_m(a.lat, a.lon, b.lat, b.lon), a.distance_m(b));
        // Big Ben → Statue of Liberty ≈ 5 574.8 km.
        assert!((a.distance_m(b) - 5_574_840.0).abs() < 1_000.0);
    }

    #[test]
    fn antipodal_is_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let half = std::f64::consts::PI * crate::geo::EARTH_RADIUS_M;
        assert!((a.distance_m(b) - half).abs() < 1e-6);
    }

    #[test]
    fn validity_rejects_non_finite_and_out_of_range() {
        assert!(GeoPoint::new(39.1582, -75.5244).is_valid());
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, f64::INFINITY).is_valid());
        assert!(!GeoPoint::new(500.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
    }

    #[test]
    fn nan_input_yields_nan_distance() {
        let a = GeoPoint::new(0.0, 0.0);
        assert!(haversine_m(f64::NAN, 0.001, 0.0, 0.0).is_nan());
        assert!(a.distance_m(GeoPoint::new(0.0, f64::NAN)).is_nan());
    }

    #[test]
    fn parse_coordinate() {
        let p: GeoPoint = " 38.9 , -77.07 ".parse().unwrap();
        assert_eq!(p, GeoPoint::new(38.9, -77.07));
        assert!("38.9".parse::<GeoPoint>().is_err());
        assert!("91.0,0.0".parse::<GeoPoint>().is_err());
        assert!("abc,0.0".parse::<GeoPoint>().is_err());
        assert!("NaN,0.0".parse::<GeoPoint>().is_err());
        assert!("0.0,inf".parse::<GeoPoint>().is_err());
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{RouteConfig, RrError};

    #[test]
    fn defaults_are_valid() {
        let cfg = RouteConfig::default();
        assert!(cfg.oneway_aware);
        assert_eq!(cfg.precision, 1);
        assert!(cfg.deadline().is_none());
        cfg.validate().unwrap();
    }

    #[test]
    fn rejects_excess_precision() {
        let cfg = RouteConfig { precision: 9, ..RouteConfig::default() };
        assert!(matches!(cfg.validate(), Err(RrError::Config(_))));
    }

    #[test]
    fn rejects_zero_deadline() {
        let cfg = RouteConfig { deadline_ms: Some(0), ..RouteConfig::default() };
        assert!(matches!(cfg.validate(), Err(RrError::Config(_))));
    }

    #[test]
    fn deadline_converts_to_duration() {
        let cfg = RouteConfig { deadline_ms: Some(250), ..RouteConfig::default() };
        assert_eq!(cfg.deadline(), Some(Duration::from_millis(250)));
    }
}
