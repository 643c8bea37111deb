//! Land-plot boundary reconciliation.
//!
//! Turns plot records (FID, planar area, center lon/lat) into closed
//! rectangular rings whose shared corners coincide exactly:
//! - corners are projected from each center under a flat-plane approximation,
//!   optionally rotated by a grid angle estimated from two reference plots;
//! - near-duplicate corners from neighbors are merged into shared vertices;
//! - vertices near a larger plot's edge are snapped onto it.
//!
//! The library is synchronous and pure; I/O lives in the CLI crate.

pub mod geo;
pub mod orientation;
pub mod pipeline;
pub mod reconcile;
pub mod synth;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geo::{GeoError, LonLat};
pub use pipeline::{raw_rings, reconcile, ReconcileCfg, ReconcileError, Reconciled};
pub use reconcile::{MergeRule, PlotRecord, Ring};

/// Common exports for callers.
pub mod prelude {
    pub use crate::geo::{
        lonlat_distance, planar_offset, point_to_segment_distance, project_onto_line, rotate2d,
        GeoError, LonLat, Segment,
    };
    pub use crate::orientation::angle_between_centers;
    pub use crate::pipeline::{raw_rings, reconcile, ReconcileCfg, ReconcileError, Reconciled};
    pub use crate::reconcile::{MergeRule, PlotRecord, Ring, SnapStats};
    pub use crate::synth::{synthetic_grid, GridSpec};
}
