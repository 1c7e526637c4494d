//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Edge distances are summed along
//! whole routes and compared by the shortest-path search, so the extra
//! precision over `f32` keeps long sums stable to well under a millimetre.

/// Mean Earth radius in metres (IUGG), the value used by common haversine
/// implementations.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Pure and deterministic: the same pair of points always yields the
    /// same bit pattern, and `a.distance_m(b) == b.distance_m(a)`.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        haversine_m(self.lat, self.lon, other.lat, other.lon)
    }

    /// `true` if both components are finite and within WGS-84 range.
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Haversine distance in metres between `(lat0, lon0)` and `(lat1, lon1)`,
/// all in degrees.
pub fn haversine_m(lat0: f64, lon0: f64, lat1: f64, lon1: f64) -> f64 {
    let d_lat = (lat1 - lat0).to_radians();
    let d_lon = (lon1 - lon0).to_radians();

    let lat0 = lat0.to_radians();
    let lat1 = lat1.to_radians();

    let a = (d_lat * 0.5).sin().powi(2)
        + lat0.cos() * lat1.cos() * (d_lon * 0.5).sin().powi(2);

    // Clamp guards asin against a > 1 from rounding on antipodal points.
    // `clamp` keeps NaN, unlike `min`.
    2.0 * EARTH_RADIUS_M * a.sqrt().clamp(0.0, 1.0).asin()
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = String;

    /// Parse `"lat,lon"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lon\", got {s:?}"))?;
        let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude {lat:?}"))?;
        let lon: f64 = lon.trim().parse().map_err(|_| format!("invalid longitude {lon:?}"))?;
        let pos = GeoPoint::new(lat, lon);
        if !pos.is_valid() {
            return Err(format!("coordinate out of range: {lat},{lon}"));
        }
        Ok(pos)
    }
}
