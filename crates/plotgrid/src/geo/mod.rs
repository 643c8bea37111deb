//! Geometric primitives on a spherical Earth with a local flat-plane approximation.
//!
//! Purpose
//! - Convert between lon/lat degrees and a cartesian embedding of a perfect
//!   sphere; the embedding is the common metric space for every distance and
//!   projection below (chord distances, not great-circle distances).
//! - Project small planar offsets (meters) around a center into lon/lat.
//!
//! Limits
//! - The planar projection treats each axis independently and is only valid
//!   for offsets much smaller than the Earth's radius. Error is not reported.
//! - East offsets are not scaled by `cos(lat)` before conversion, so a
//!   plot's east and west corners sit `side * cos(lat)` apart on the ground.
//!   Once that drops below the merge tolerance `sqrt(min_area) / 3` (above
//!   about 70.5° for a single plot) they share a bucket, the plot's edge has
//!   zero length, and snapping fails with `GeoError::DegenerateSegment`.
//!
//! Code cross-refs: `reconcile::{corners,snap}`, `orientation`.

pub mod cfg;
mod planar;
mod segment;
mod sphere;
mod types;

pub use planar::{planar_offset, rotate2d};
pub use segment::{point_to_segment_distance, project_onto_line};
pub use sphere::{euclidean_distance, from_cartesian, lonlat_distance, to_cartesian};
pub use types::{GeoError, LonLat, Segment};
