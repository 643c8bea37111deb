//! Corner reconciliation, edge snapping, and ring assembly.
//!
//! Stage flow (each stage owns what it produces):
//! 1. `collect_plots`: raw corners per record → `BucketSet` + `Plot`s.
//! 2. `BucketSet::into_vertices`: one mean per bucket → `Vertices`.
//! 3. `snap_to_edges`: mutate `Vertices` in descending-area order.
//! 4. `assemble_rings`: closed rings from bucket handles.
//!
//! Code cross-refs: `pipeline::reconcile` drives the stages.

mod assemble;
mod buckets;
mod corners;
mod snap;
mod types;

pub use assemble::assemble_rings;
pub use buckets::{BucketSet, PointBucket, Vertices};
pub use corners::{corner_offsets, raw_corners};
pub use snap::{plot_edges, snap_to_edges, snapping_order, SnapStats};
pub use types::{BucketId, MergeRule, Plot, PlotRecord, Ring};

/// Build raw corners for every record in input order and merge them into
/// buckets. Returns the arena and one `Plot` per record.
pub fn collect_plots(
    records: &[PlotRecord],
    angle: f64,
    tolerance: f64,
    rule: MergeRule,
) -> (BucketSet, Vec<Plot>) {
    let mut buckets = BucketSet::new(tolerance, rule);
    let plots = records
        .iter()
        .map(|r| Plot {
            fid: r.fid,
            area: r.area,
            center: r.center,
            corners: raw_corners(r, angle).map(|c| buckets.insert(c)),
        })
        .collect();
    (buckets, plots)
}
