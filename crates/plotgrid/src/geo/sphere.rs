//! Spherical embedding: lon/lat degrees ↔ cartesian meters.

use nalgebra::Vector3;

use super::cfg::EARTH_RADIUS_M;
use super::types::LonLat;

/// Embed a lon/lat point on the sphere of radius `EARTH_RADIUS_M`.
#[inline]
pub fn to_cartesian(p: LonLat) -> Vector3<f64> {
    let lat = p.lat.to_radians();
    let lon = p.lon.to_radians();
    Vector3::new(
        EARTH_RADIUS_M * lat.cos() * lon.cos(),
        EARTH_RADIUS_M * lat.cos() * lon.sin(),
        EARTH_RADIUS_M * lat.sin(),
    )
}

/// Inverse of `to_cartesian`. Points off the sphere (e.g. chord feet) map to
/// the surface point in the same direction.
#[inline]
pub fn from_cartesian(v: Vector3<f64>) -> LonLat {
    let r = v.norm();
    let lat = (v.z / r).clamp(-1.0, 1.0).asin().to_degrees();
    let lon = v.y.atan2(v.x).to_degrees();
    LonLat::new(lon, lat)
}

#[inline]
pub fn euclidean_distance(p1: Vector3<f64>, p2: Vector3<f64>) -> f64 {
    (p1 - p2).norm()
}

/// Chord length between two lon/lat points. Adequate as a local proximity
/// metric; not a great-circle distance.
#[inline]
pub fn lonlat_distance(a: LonLat, b: LonLat) -> f64 {
    euclidean_distance(to_cartesian(a), to_cartesian(b))
}
