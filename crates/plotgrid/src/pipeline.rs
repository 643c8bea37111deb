//! End-to-end reconciliation run over an in-memory set of records.
//!
//! Stages: validate → tolerance from the smallest plot → orientation →
//! corner buckets → averaging → edge snapping → ring assembly.

use std::fmt;

use crate::geo::GeoError;
use crate::orientation::angle_between_centers;
use crate::reconcile::{
    assemble_rings, collect_plots, raw_corners, snap_to_edges, snapping_order, MergeRule,
    PlotRecord, Ring, SnapStats,
};

/// Run configuration.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileCfg {
    /// Two laterally adjacent plots (left, right) used to estimate the grid
    /// angle. `None` keeps rectangles axis-aligned.
    pub reference_pair: Option<(i64, i64)>,
    pub merge_rule: MergeRule,
    /// `distance_error = sqrt(min_area) / tolerance_divisor`.
    pub tolerance_divisor: f64,
    pub snap: bool,
}

impl Default for ReconcileCfg {
    fn default() -> Self {
        Self {
            reference_pair: None,
            merge_rule: MergeRule::FirstSample,
            tolerance_divisor: 3.0,
            snap: true,
        }
    }
}

/// Errors surfaced by a reconciliation run.
#[derive(Debug)]
pub enum ReconcileError {
    /// No records to process.
    EmptyInput,
    /// Area is zero, negative, or not finite.
    InvalidArea { fid: i64, area: f64 },
    /// Center longitude or latitude is not finite.
    InvalidCoordinate { fid: i64 },
    /// The tolerance divisor must be finite and positive.
    InvalidTolerance { divisor: f64 },
    /// Fewer than two records matched the orientation reference pair.
    ReferenceNotFound { fids: (i64, i64), found: usize },
    Geometry(GeoError),
}

impl fmt::Display for ReconcileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileError::EmptyInput => write!(f, "no plot records to reconcile"),
            ReconcileError::InvalidArea { fid, area } => {
                write!(f, "plot {fid} has invalid area {area} (must be finite and > 0)")
            }
            ReconcileError::InvalidCoordinate { fid } => {
                write!(f, "plot {fid} has a non-finite center coordinate")
            }
            ReconcileError::InvalidTolerance { divisor } => {
                write!(f, "tolerance divisor {divisor} must be finite and > 0")
            }
            ReconcileError::ReferenceNotFound { fids, found } => write!(
                f,
                "orientation references {} and {} matched {} record(s), need 2",
                fids.0, fids.1, found
            ),
            ReconcileError::Geometry(e) => write!(f, "geometry error: {e}"),
        }
    }
}

impl std::error::Error for ReconcileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReconcileError::Geometry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeoError> for ReconcileError {
    fn from(e: GeoError) -> Self {
        ReconcileError::Geometry(e)
    }
}

/// Output of a run plus the numbers worth logging.
#[derive(Clone, Debug)]
pub struct Reconciled {
    /// Rings in snapping order (descending area).
    pub rings: Vec<Ring>,
    pub distance_error: f64,
    /// Global rotation applied to corner offsets (radians).
    pub rotation: f64,
    pub buckets: usize,
    pub shared_buckets: usize,
    pub snap: SnapStats,
}

/// Check every record; return the smallest area.
pub fn validate(records: &[PlotRecord]) -> Result<f64, ReconcileError> {
    if records.is_empty() {
        return Err(ReconcileError::EmptyInput);
    }
    let mut min_area = f64::INFINITY;
    for r in records {
        if !(r.area.is_finite() && r.area > 0.0) {
            return Err(ReconcileError::InvalidArea {
                fid: r.fid,
                area: r.area,
            });
        }
        if !r.center.is_finite() {
            return Err(ReconcileError::InvalidCoordinate { fid: r.fid });
        }
        min_area = min_area.min(r.area);
    }
    Ok(min_area)
}

/// Merge/snap tolerance in meters, from the smallest plot's side length.
pub fn distance_error(min_area: f64, divisor: f64) -> Result<f64, ReconcileError> {
    if !(divisor.is_finite() && divisor > 0.0) {
        return Err(ReconcileError::InvalidTolerance { divisor });
    }
    Ok(min_area.sqrt() / divisor)
}

/// Grid rotation from the reference pair, or 0 without one.
///
/// Each FID resolves to its first record in input order; the first FID of the
/// pair is the first triangle vertex.
pub fn estimate_rotation(
    records: &[PlotRecord],
    pair: Option<(i64, i64)>,
) -> Result<f64, ReconcileError> {
    let Some((left, right)) = pair else {
        return Ok(0.0);
    };
    let find = |fid: i64| records.iter().find(|r| r.fid == fid);
    match (find(left), find(right)) {
        (Some(a), Some(b)) if left != right => Ok(angle_between_centers(a.center, b.center)?),
        (a, b) => {
            let found = if left == right {
                usize::from(a.is_some())
            } else {
                usize::from(a.is_some()) + usize::from(b.is_some())
            };
            Err(ReconcileError::ReferenceNotFound {
                fids: (left, right),
                found,
            })
        }
    }
}

/// Full reconciliation run.
pub fn reconcile(records: &[PlotRecord], cfg: &ReconcileCfg) -> Result<Reconciled, ReconcileError> {
    let min_area = validate(records)?;
    let tolerance = distance_error(min_area, cfg.tolerance_divisor)?;
    let rotation = estimate_rotation(records, cfg.reference_pair)?;

    let (buckets, plots) = collect_plots(records, rotation, tolerance, cfg.merge_rule);
    let mut vertices = buckets.into_vertices();

    let order = snapping_order(&plots);
    let snap = if cfg.snap {
        snap_to_edges(&plots, &order, &mut vertices, tolerance)?
    } else {
        SnapStats::default()
    };
    let rings = assemble_rings(&plots, &order, &vertices);

    Ok(Reconciled {
        rings,
        distance_error: tolerance,
        rotation,
        buckets: vertices.len(),
        shared_buckets: vertices.shared_count(),
        snap,
    })
}

/// Independent rectangles per record, in input order: no merging, no snapping.
pub fn raw_rings(records: &[PlotRecord], rotation: f64) -> Result<Vec<Ring>, ReconcileError> {
    validate(records)?;
    Ok(records
        .iter()
        .map(|r| Ring::from_corners(r.fid, raw_corners(r, rotation)))
        .collect())
}
