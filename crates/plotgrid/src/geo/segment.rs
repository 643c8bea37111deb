//! Point/segment queries in the cartesian embedding.

use nalgebra::Vector3;

use super::cfg::{DEGENERATE_LEN2, ENDPOINT_MARGIN};
use super::sphere::{from_cartesian, to_cartesian};
use super::types::{GeoError, LonLat, Segment};

fn embed(seg: &Segment) -> Result<(Vector3<f64>, Vector3<f64>), GeoError> {
    let a = to_cartesian(seg.a);
    let b = to_cartesian(seg.b);
    if (b - a).norm_squared() <= DEGENERATE_LEN2 {
        return Err(GeoError::DegenerateSegment { a: seg.a, b: seg.b });
    }
    Ok((a, b))
}

/// Distance (m) from `point` to the closed segment.
///
/// Signed parallel components are clamped to the segment span and combined
/// with the perpendicular component via `hypot`.
pub fn point_to_segment_distance(seg: &Segment, point: LonLat) -> Result<f64, GeoError> {
    let (a, b) = embed(seg)?;
    let p = to_cartesian(point);
    let d = (b - a).normalize();
    let s = (a - p).dot(&d);
    let t = (p - b).dot(&d);
    let h = s.max(t).max(0.0);
    let c = (p - a).cross(&d).norm();
    Ok(h.hypot(c))
}

/// Foot of the perpendicular from `point` onto the infinite line through the
/// segment, back in lon/lat.
///
/// If the foot lands within `ENDPOINT_MARGIN` of either endpoint (or beyond
/// it) the point is returned unchanged: it is an endpoint or duplicate.
pub fn project_onto_line(seg: &Segment, point: LonLat) -> Result<LonLat, GeoError> {
    let (x1, x2) = embed(seg)?;
    let x0 = to_cartesian(point);
    let dir = x2 - x1;
    let t = -(x1 - x0).dot(&dir) / dir.norm_squared();
    if !(ENDPOINT_MARGIN..=1.0 - ENDPOINT_MARGIN).contains(&t) {
        return Ok(point);
    }
    Ok(from_cartesian(x1 + dir * t))
}
