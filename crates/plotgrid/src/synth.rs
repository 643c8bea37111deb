//! Seeded synthetic plot grids for demos, tests, and benchmarks.
//!
//! Squares of equal area laid out row-major on a (possibly rotated) grid.
//! Optional jitter displaces every center independently, which is what makes
//! corner reconciliation necessary in the first place.

use nalgebra::vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo::{planar_offset, rotate2d, LonLat};
use crate::reconcile::PlotRecord;

/// Grid layout parameters.
#[derive(Clone, Copy, Debug)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    /// Area of every plot in m².
    pub area: f64,
    /// Center of the plot at row 0, column 0.
    pub origin: LonLat,
    /// Grid rotation in radians (counterclockwise).
    pub rotation: f64,
    /// Max center displacement per axis in meters.
    pub jitter: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            area: 400.0,
            origin: LonLat::new(-96.7, 40.8),
            rotation: 0.0,
            jitter: 0.0,
        }
    }
}

/// Records for `spec`, FIDs starting at 1 in row-major order.
pub fn synthetic_grid(spec: &GridSpec, seed: u64) -> Vec<PlotRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = spec.area.sqrt();
    let mut out = Vec::with_capacity(spec.rows * spec.cols);
    for row in 0..spec.rows {
        for col in 0..spec.cols {
            let mut offset = rotate2d(vector![col as f64 * side, row as f64 * side], spec.rotation);
            if spec.jitter > 0.0 {
                offset.x += rng.gen_range(-spec.jitter..=spec.jitter);
                offset.y += rng.gen_range(-spec.jitter..=spec.jitter);
            }
            let fid = (out.len() + 1) as i64;
            out.push(PlotRecord::new(fid, spec.area, planar_offset(spec.origin, offset)));
        }
    }
    out
}
