//! Ring assembly from bucket handles.

use super::buckets::Vertices;
use super::types::{Plot, Ring};

/// Resolve each plot's corners to their final canonical points, in `order`.
pub fn assemble_rings(plots: &[Plot], order: &[usize], vertices: &Vertices) -> Vec<Ring> {
    order
        .iter()
        .map(|&i| {
            let plot = &plots[i];
            Ring::from_corners(plot.fid, plot.corners.map(|id| vertices.get(id)))
        })
        .collect()
}
