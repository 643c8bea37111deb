//! Records, plots, rings, and the handles that link them to shared vertices.

use crate::geo::LonLat;

/// One input row. Immutable once read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRecord {
    pub fid: i64,
    /// Planar area in m², consistent with meter offsets.
    pub area: f64,
    pub center: LonLat,
}

impl PlotRecord {
    #[inline]
    pub fn new(fid: i64, area: f64, center: LonLat) -> Self {
        Self { fid, area, center }
    }

    /// Half the side length of the square footprint.
    #[inline]
    pub fn half_side(&self) -> f64 {
        self.area.sqrt() / 2.0
    }
}

/// Stable handle into the bucket arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId(pub usize);

/// A plot as seen by the later stages: corners are handles, never coordinates,
/// so snapping a shared vertex is visible to every plot that references it.
#[derive(Clone, Copy, Debug)]
pub struct Plot {
    pub fid: i64,
    pub area: f64,
    pub center: LonLat,
    /// NE, NW, SW, SE in the plot's rotated frame.
    pub corners: [BucketId; 4],
}

/// Closed output ring: four corners plus the first repeated.
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub fid: i64,
    pub points: [LonLat; 5],
}

impl Ring {
    pub fn from_corners(fid: i64, c: [LonLat; 4]) -> Self {
        Self {
            fid,
            points: [c[0], c[1], c[2], c[3], c[0]],
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.points[0] == self.points[4]
    }

    /// The four distinct corners (without the closing repeat).
    #[inline]
    pub fn corners(&self) -> &[LonLat] {
        &self.points[..4]
    }
}

/// Which representative a new corner is compared against when looking for a
/// bucket to join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergeRule {
    /// The bucket's first-ever sample. Members may drift away from it; a corner
    /// close to a later member but not the first one starts a new bucket.
    #[default]
    FirstSample,
    /// The mean of the bucket's current samples.
    Centroid,
}
