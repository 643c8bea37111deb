//! Global grid-orientation estimate from two laterally adjacent plot centers.
//!
//! The two centers and an auxiliary point (lon of the first, lat of the
//! second) form a right triangle in the cartesian embedding. The returned
//! rotation is `-asin(opposite / hypotenuse)`.
//!
//! Known limitation: `asin` of a length ratio is never negative, so the sign
//! of the result does not depend on which way the grid is skewed. Datasets
//! skewed the other way get the wrong-signed angle.

use crate::geo::{euclidean_distance, to_cartesian, GeoError, LonLat};

/// Rotation (radians) to apply to every plot's corner offsets.
pub fn angle_between_centers(first: LonLat, second: LonLat) -> Result<f64, GeoError> {
    let p1 = to_cartesian(first);
    let p2 = to_cartesian(second);
    let aux = to_cartesian(LonLat::new(first.lon, second.lat));
    let hypotenuse = euclidean_distance(p1, p2);
    if hypotenuse <= 0.0 {
        return Err(GeoError::DegenerateReference { center: first });
    }
    let opposite = euclidean_distance(p1, aux);
    let angle = (opposite / hypotenuse).clamp(0.0, 1.0).asin();
    Ok(-angle)
}
