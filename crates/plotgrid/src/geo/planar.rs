//! Local flat-plane projection and 2D rotation of meter offsets.

use nalgebra::{Rotation2, Vector2};

use super::cfg::EARTH_RADIUS_M;
use super::types::LonLat;

/// Treat `offset` (meters, x east / y north) as a planar displacement from
/// `center` and return the displaced lon/lat.
///
/// Each axis is converted independently as the angle subtended at the Earth's
/// center, `atan2(d, R)`. No `cos(lat)` correction is applied to x.
#[inline]
pub fn planar_offset(center: LonLat, offset: Vector2<f64>) -> LonLat {
    let dlon = offset.x.atan2(EARTH_RADIUS_M).to_degrees();
    let dlat = offset.y.atan2(EARTH_RADIUS_M).to_degrees();
    LonLat::new(center.lon + dlon, center.lat + dlat)
}

/// Counterclockwise rotation about the origin by `angle` radians.
#[inline]
pub fn rotate2d(p: Vector2<f64>, angle: f64) -> Vector2<f64> {
    Rotation2::new(angle) * p
}
