//! Fret clustering and the hover regions derived from it.
//!
//! A shape's notes occur in contiguous fret regions that repeat an octave
//! apart. Clustering splits a fret list wherever the gap exceeds a threshold:
//! no single shape legitimately spans more than about five frets, while the
//! octave repeat sits at least seven away, so half an octave separates the
//! two cleanly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shapes::Shape;

/// Maximum gap (in frets) between members of one cluster.
pub const GAP_THRESHOLD: i8 = 6;

/// A cluster's span must reach this fraction of the shape's canonical span
/// to count as a full occurrence; anything smaller was sliced off by the
/// neck boundary during transposition.
pub const PARTIAL_RATIO: f64 = 0.7;

/// An inclusive contiguous fret range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretCluster {
    pub lo: i8,
    pub hi: i8,
}

impl FretCluster {
    pub fn span(&self) -> i8 {
        self.hi - self.lo
    }

    pub fn center(&self) -> f64 {
        (self.lo + self.hi) as f64 / 2.0
    }

    pub fn contains(&self, fret: i8) -> bool {
        fret >= self.lo && fret <= self.hi
    }
}

/// A cluster classified against its shape's canonical span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeRange {
    pub lo: i8,
    pub hi: i8,
    pub partial: bool,
}

impl ShapeRange {
    pub fn span(&self) -> i8 {
        self.hi - self.lo
    }

    pub fn center(&self) -> f64 {
        (self.lo + self.hi) as f64 / 2.0
    }
}

/// One hover segment of the neck, owned by a single full shape cluster.
/// Boundaries sit at the midpoints between neighboring cluster centers, so
/// the regions tile the covered span with no gaps and no overlaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverRegion {
    pub shape: Shape,
    /// Index of the owning cluster within its shape's range list.
    pub cluster_index: usize,
    pub lo: i8,
    pub hi: i8,
    pub center: f64,
    pub hover_lo: f64,
    pub hover_hi: f64,
}

/// Group frets into contiguous clusters with the default gap threshold.
///
/// ```
/// use caged::cluster::{cluster_frets, FretCluster};
///
/// assert_eq!(cluster_frets(&[1, 3, 5, 7]), vec![FretCluster { lo: 1, hi: 7 }]);
/// assert_eq!(
///     cluster_frets(&[1, 3, 15, 17]),
///     vec![FretCluster { lo: 1, hi: 3 }, FretCluster { lo: 15, hi: 17 }]
/// );
/// assert_eq!(cluster_frets(&[]), vec![]);
/// ```
pub fn cluster_frets(frets: &[i8]) -> Vec<FretCluster> {
    cluster_frets_with(frets, GAP_THRESHOLD)
}

/// `cluster_frets` with an explicit gap threshold. Input order is irrelevant
/// and duplicates are harmless; output clusters are disjoint and ascending.
pub fn cluster_frets_with(frets: &[i8], gap_threshold: i8) -> Vec<FretCluster> {
    let mut sorted = frets.to_vec();
    sorted.sort_unstable();

    let Some((&first, rest)) = sorted.split_first() else {
        return Vec::new();
    };

    let mut clusters = Vec::new();
    let mut current = FretCluster {
        lo: first,
        hi: first,
    };
    for &fret in rest {
        if fret - current.hi > gap_threshold {
            clusters.push(current);
            current = FretCluster { lo: fret, hi: fret };
        } else {
            current.hi = fret;
        }
    }
    clusters.push(current);
    clusters
}

/// Cluster a shape's frets and flag clusters materially narrower than the
/// shape's canonical (reference-key) span as partial.
pub fn classify_clusters(frets: &[i8], canonical_span: i8) -> Vec<ShapeRange> {
    cluster_frets(frets)
        .into_iter()
        .map(|c| ShapeRange {
            lo: c.lo,
            hi: c.hi,
            partial: (c.span() as f64) < canonical_span as f64 * PARTIAL_RATIO,
        })
        .collect()
}

/// Tile the full (non-partial) clusters of all shapes into hover regions.
///
/// Regions are sorted by cluster center; interior boundaries are the
/// midpoints between adjacent centers, while the first region starts at its
/// own cluster's `lo` and the last ends at its own `hi`.
pub fn compute_hover_ranges(
    shape_ranges: &BTreeMap<Shape, Vec<ShapeRange>>,
    shape_order: &[Shape],
) -> Vec<HoverRegion> {
    let mut regions = Vec::new();
    for &shape in shape_order {
        let Some(ranges) = shape_ranges.get(&shape) else {
            continue;
        };
        for (cluster_index, range) in ranges.iter().enumerate() {
            if range.partial {
                continue;
            }
            regions.push(HoverRegion {
                shape,
                cluster_index,
                lo: range.lo,
                hi: range.hi,
                center: range.center(),
                hover_lo: range.lo as f64,
                hover_hi: range.hi as f64,
            });
        }
    }
    regions.sort_by(|a, b| a.center.total_cmp(&b.center));

    let centers: Vec<f64> = regions.iter().map(|r| r.center).collect();
    for (i, region) in regions.iter_mut().enumerate() {
        if i > 0 {
            region.hover_lo = (centers[i - 1] + centers[i]) / 2.0;
        }
        if i + 1 < centers.len() {
            region.hover_hi = (centers[i] + centers[i + 1]) / 2.0;
        }
    }
    regions
}
