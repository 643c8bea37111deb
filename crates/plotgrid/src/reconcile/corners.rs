//! Raw corner construction: square footprint around a center, rotated by the
//! global grid angle, projected with the flat-plane approximation.

use nalgebra::{vector, Vector2};

use crate::geo::{planar_offset, rotate2d, LonLat};

use super::types::PlotRecord;

/// Corner offsets in meters (NE, NW, SW, SE), rotated by `angle`.
///
/// Consecutive entries are adjacent corners, so the array walks the boundary.
pub fn corner_offsets(half_side: f64, angle: f64) -> [Vector2<f64>; 4] {
    let h = half_side;
    [
        vector![h, h],
        vector![-h, h],
        vector![-h, -h],
        vector![h, -h],
    ]
    .map(|p| rotate2d(p, angle))
}

/// The four raw corners of a record in lon/lat.
pub fn raw_corners(record: &PlotRecord, angle: f64) -> [LonLat; 4] {
    corner_offsets(record.half_side(), angle).map(|off| planar_offset(record.center, off))
}
