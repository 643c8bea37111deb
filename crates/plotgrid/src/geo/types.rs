//! Coordinate and segment types shared by all primitives.

use std::fmt;

/// A position in decimal degrees. Field order is always (lon, lat).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// GeoJSON position order: `[lon, lat]`.
    #[inline]
    pub fn to_position(self) -> Vec<f64> {
        vec![self.lon, self.lat]
    }
}

/// Directed segment between two lon/lat points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: LonLat,
    pub b: LonLat,
}

impl Segment {
    #[inline]
    pub fn new(a: LonLat, b: LonLat) -> Self {
        Self { a, b }
    }
}

/// Numeric domain violations. All are fatal for a run.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Segment endpoints coincide in the cartesian embedding.
    DegenerateSegment { a: LonLat, b: LonLat },
    /// Orientation references share one center; no angle is defined.
    DegenerateReference { center: LonLat },
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::DegenerateSegment { a, b } => write!(
                f,
                "degenerate segment ({}, {}) -> ({}, {}) has zero length",
                a.lon, a.lat, b.lon, b.lat
            ),
            GeoError::DegenerateReference { center } => write!(
                f,
                "orientation references share the center ({}, {})",
                center.lon, center.lat
            ),
        }
    }
}

impl std::error::Error for GeoError {}
