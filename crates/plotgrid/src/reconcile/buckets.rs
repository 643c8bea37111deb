//! Corner reconciliation: group near-duplicate corners into buckets, then
//! collapse each bucket to one canonical vertex.
//!
//! Two stages, two types:
//! - `BucketSet` accumulates samples (creation order is significant).
//! - `Vertices` holds the canonical points after averaging; it is the only
//!   state the snapping pass mutates.

use crate::geo::{lonlat_distance, LonLat};

use super::types::{BucketId, MergeRule};

/// Raw samples believed to be one physical vertex. Never empty.
#[derive(Clone, Debug)]
pub struct PointBucket {
    samples: Vec<LonLat>,
}

impl PointBucket {
    fn new(first: LonLat) -> Self {
        Self {
            samples: vec![first],
        }
    }

    #[inline]
    pub fn first(&self) -> LonLat {
        self.samples[0]
    }

    #[inline]
    pub fn samples(&self) -> &[LonLat] {
        &self.samples
    }

    /// Unweighted mean of lon and lat over all samples.
    pub fn mean(&self) -> LonLat {
        let n = self.samples.len() as f64;
        let (lon, lat) = self
            .samples
            .iter()
            .fold((0.0, 0.0), |(lon, lat), p| (lon + p.lon, lat + p.lat));
        LonLat::new(lon / n, lat / n)
    }

    fn representative(&self, rule: MergeRule) -> LonLat {
        match rule {
            MergeRule::FirstSample => self.first(),
            MergeRule::Centroid => self.mean(),
        }
    }
}

/// Bucket arena under construction.
#[derive(Clone, Debug)]
pub struct BucketSet {
    buckets: Vec<PointBucket>,
    tolerance: f64,
    rule: MergeRule,
}

impl BucketSet {
    pub fn new(tolerance: f64, rule: MergeRule) -> Self {
        Self {
            buckets: Vec::new(),
            tolerance,
            rule,
        }
    }

    /// Add `corner` to the first bucket (in creation order) whose representative
    /// is closer than the tolerance, or open a new bucket.
    pub fn insert(&mut self, corner: LonLat) -> BucketId {
        let rule = self.rule;
        let tol = self.tolerance;
        if let Some((i, bucket)) = self
            .buckets
            .iter_mut()
            .enumerate()
            .find(|(_, b)| lonlat_distance(corner, b.representative(rule)) < tol)
        {
            bucket.samples.push(corner);
            return BucketId(i);
        }
        self.buckets.push(PointBucket::new(corner));
        BucketId(self.buckets.len() - 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    #[inline]
    pub fn bucket(&self, id: BucketId) -> &PointBucket {
        &self.buckets[id.0]
    }

    /// Average every bucket into its canonical point.
    pub fn into_vertices(self) -> Vertices {
        let canonical = self.buckets.iter().map(PointBucket::mean).collect();
        let sample_counts = self.buckets.iter().map(|b| b.samples.len()).collect();
        Vertices {
            canonical,
            sample_counts,
        }
    }
}

/// Canonical points indexed by `BucketId`.
#[derive(Clone, Debug)]
pub struct Vertices {
    canonical: Vec<LonLat>,
    sample_counts: Vec<usize>,
}

impl Vertices {
    #[inline]
    pub fn get(&self, id: BucketId) -> LonLat {
        self.canonical[id.0]
    }

    #[inline]
    pub(crate) fn set(&mut self, id: BucketId, p: LonLat) {
        self.canonical[id.0] = p;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = BucketId> {
        (0..self.canonical.len()).map(BucketId)
    }

    #[inline]
    pub fn sample_count(&self, id: BucketId) -> usize {
        self.sample_counts[id.0]
    }

    /// Buckets that merged corners from more than one sample.
    pub fn shared_count(&self) -> usize {
        self.sample_counts.iter().filter(|&&n| n > 1).count()
    }
}
