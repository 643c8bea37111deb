//! Edge snapping: pull canonical vertices lying near a plot's edge onto it.
//!
//! Plots are visited by descending area so that large plots' edges are fixed
//! first and absorb the corners of smaller neighbors. Each visit reads the
//! current canonical points, so earlier snaps are seen by later plots.

use crate::geo::{point_to_segment_distance, project_onto_line, GeoError, Segment};

use super::buckets::Vertices;
use super::types::{BucketId, Plot};

/// Counters for one snapping pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnapStats {
    /// Vertex/edge pairs within tolerance.
    pub tested: usize,
    /// Pairs where the vertex actually moved.
    pub moved: usize,
}

/// Indices of `plots` ordered by descending area. Ties keep input order.
pub fn snapping_order(plots: &[Plot]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..plots.len()).collect();
    order.sort_by(|&a, &b| plots[b].area.total_cmp(&plots[a].area));
    order
}

/// The four boundary edges of `plot` from the current canonical points.
pub fn plot_edges(plot: &Plot, vertices: &Vertices) -> [Segment; 4] {
    let c = plot.corners.map(|id| vertices.get(id));
    [
        Segment::new(c[0], c[1]),
        Segment::new(c[1], c[2]),
        Segment::new(c[2], c[3]),
        Segment::new(c[3], c[0]),
    ]
}

/// Run one snapping pass over `plots` in `order`, mutating `vertices`.
pub fn snap_to_edges(
    plots: &[Plot],
    order: &[usize],
    vertices: &mut Vertices,
    tolerance: f64,
) -> Result<SnapStats, GeoError> {
    let mut stats = SnapStats::default();
    for &idx in order {
        // Edges are fixed for the whole plot, even if its own corners move.
        let edges = plot_edges(&plots[idx], vertices);
        for edge in &edges {
            for i in 0..vertices.len() {
                let id = BucketId(i);
                let p = vertices.get(id);
                if point_to_segment_distance(edge, p)? < tolerance {
                    stats.tested += 1;
                    let q = project_onto_line(edge, p)?;
                    if q != p {
                        stats.moved += 1;
                        vertices.set(id, q);
                    }
                }
            }
        }
    }
    Ok(stats)
}
