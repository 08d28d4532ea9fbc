//! Reference-key table pipeline.
//!
//! The pentatonic boxes, triad voicings, blues bounds, and shape fret ranges
//! are all derived at the reference key (C / A minor) over two octaves, then
//! transposed with `shift_notes` at display time. Nothing here is required
//! state: every table is recomputed on demand from the chord forms and the
//! scale generator, and serialized only by the table-generation binary.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::cluster::{cluster_frets, FretCluster};
use crate::fretboard::{generate_scale_to, shift_notes, Note};
use crate::shapes::{Shape, SHAPE_ORDER};
use crate::theory::{Interval, Quality};

/// Fret ceiling for the reference tables: two octaves of coverage, so a
/// shifted table reaches any position of the 15-fret window.
pub const TABLE_MAX_FRET: i8 = 27;

/// An open chord voicing: fret per string 6..1 (`None` = muted) and the
/// interval each fretted string sounds relative to the chord root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChordForm {
    pub frets: [Option<i8>; 6],
    pub intervals: [Option<Interval>; 6],
}

impl ChordForm {
    /// Midpoint of the voicing's fretted span.
    pub fn center(&self) -> f64 {
        let frets: Vec<i8> = self.frets.iter().flatten().copied().collect();
        match (frets.iter().min(), frets.iter().max()) {
            (Some(&lo), Some(&hi)) => (lo + hi) as f64 / 2.0,
            _ => 0.0,
        }
    }
}

/// The open chord voicing behind a shape, for either quality.
pub fn chord_form(quality: Quality, shape: Shape) -> ChordForm {
    use Interval::{FlatThird, Fifth, Root, Third};
    let (frets, intervals) = match (quality, shape) {
        (Quality::Major, Shape::C) => (
            [None, Some(3), Some(2), Some(0), Some(1), Some(0)],
            [None, Some(Root), Some(Third), Some(Fifth), Some(Root), Some(Third)],
        ),
        (Quality::Major, Shape::A) => (
            [None, Some(0), Some(2), Some(2), Some(2), Some(0)],
            [None, Some(Root), Some(Fifth), Some(Root), Some(Third), Some(Fifth)],
        ),
        (Quality::Major, Shape::G) => (
            [Some(3), Some(2), Some(0), Some(0), Some(0), Some(3)],
            [
                Some(Root),
                Some(Third),
                Some(Fifth),
                Some(Root),
                Some(Third),
                Some(Root),
            ],
        ),
        (Quality::Major, Shape::E) => (
            [Some(0), Some(2), Some(2), Some(1), Some(0), Some(0)],
            [
                Some(Root),
                Some(Fifth),
                Some(Root),
                Some(Third),
                Some(Fifth),
                Some(Root),
            ],
        ),
        (Quality::Major, Shape::D) => (
            [None, None, Some(0), Some(2), Some(3), Some(2)],
            [None, None, Some(Root), Some(Fifth), Some(Root), Some(Third)],
        ),
        (Quality::Minor, Shape::C) => (
            [None, Some(3), Some(1), Some(0), Some(1), Some(3)],
            [None, Some(Root), Some(FlatThird), Some(Fifth), Some(Root), Some(Fifth)],
        ),
        (Quality::Minor, Shape::A) => (
            [None, Some(0), Some(2), Some(2), Some(1), Some(0)],
            [None, Some(Root), Some(Fifth), Some(Root), Some(FlatThird), Some(Fifth)],
        ),
        (Quality::Minor, Shape::G) => (
            [Some(3), Some(1), Some(0), Some(0), Some(3), Some(3)],
            [
                Some(Root),
                Some(FlatThird),
                Some(Fifth),
                Some(Root),
                Some(Fifth),
                Some(Root),
            ],
        ),
        (Quality::Minor, Shape::E) => (
            [Some(0), Some(2), Some(2), Some(0), Some(0), Some(0)],
            [
                Some(Root),
                Some(Fifth),
                Some(Root),
                Some(FlatThird),
                Some(Fifth),
                Some(Root),
            ],
        ),
        (Quality::Minor, Shape::D) => (
            [None, None, Some(0), Some(2), Some(3), Some(1)],
            [None, None, Some(Root), Some(Fifth), Some(Root), Some(FlatThird)],
        ),
    };
    ChordForm { frets, intervals }
}

/// Semitones to shift a shape's open voicing so it sounds the reference key.
fn reference_shift(shape: Shape) -> i8 {
    (12 - shape.root_semitone()) % 12
}

fn sort_notes(notes: &mut [Note]) {
    // string 6 first, then ascending frets, matching the published tables
    notes.sort_by(|a, b| b.string.cmp(&a.string).then(a.fret.cmp(&b.fret)));
}

fn dedup_notes(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = HashSet::new();
    notes
        .into_iter()
        .filter(|n| seen.insert(n.position()))
        .collect()
}

/// The pentatonic box for a shape: on each string, the two consecutive scale
/// notes whose midpoint lies nearest the shape's chord center, taken at both
/// octaves of the reference tables.
pub fn penta_box(quality: Quality, shape: Shape) -> Vec<Note> {
    let scale = generate_scale_to(0, quality.pentatonic(), TABLE_MAX_FRET);
    let center = chord_form(quality, shape).center() + reference_shift(shape) as f64;

    let mut by_string: BTreeMap<u8, Vec<Note>> = BTreeMap::new();
    for n in &scale {
        by_string.entry(n.string).or_default().push(*n);
    }
    for notes in by_string.values_mut() {
        notes.sort_by_key(|n| n.fret);
    }

    let mut tuples = Vec::new();
    for target in [center, center + 12.0] {
        for notes in by_string.values() {
            let mut best: Option<(f64, usize)> = None;
            for i in 0..notes.len().saturating_sub(1) {
                let mid = (notes[i].fret + notes[i + 1].fret) as f64 / 2.0;
                let dist = (mid - target).abs();
                if best.map_or(true, |(d, _)| dist < d) {
                    best = Some((dist, i));
                }
            }
            if let Some((_, i)) = best {
                tuples.push(notes[i]);
                tuples.push(notes[i + 1]);
            }
        }
    }

    let mut deduped = dedup_notes(tuples);
    sort_notes(&mut deduped);
    deduped
}

/// A shape's triad notes: the chord voicing transposed to the reference key,
/// plus its octave copy. One note per string per octave by construction.
pub fn triad_shape(quality: Quality, shape: Shape) -> Vec<Note> {
    let form = chord_form(quality, shape);
    let shift = reference_shift(shape);
    let mut notes = Vec::new();
    for idx in 0..6 {
        let (Some(f), Some(interval)) = (form.frets[idx], form.intervals[idx]) else {
            continue;
        };
        let string = 6 - idx as u8;
        let fret = f + shift;
        notes.push(Note::new(string, fret, interval));
        if fret + 12 <= TABLE_MAX_FRET {
            notes.push(Note::new(string, fret + 12, interval));
        }
    }
    sort_notes(&mut notes);
    notes
}

/// Blue notes falling inside a shape's pentatonic box span. The span runs
/// across both octaves, so entries between the two box occurrences are
/// included here and removed later by cluster bounding.
pub fn blues_shape(quality: Quality, shape: Shape) -> Vec<Note> {
    let box_notes = penta_box(quality, shape);
    let frets: Vec<i8> = box_notes.iter().map(|n| n.fret).collect();
    let (Some(&lo), Some(&hi)) = (frets.iter().min(), frets.iter().max()) else {
        return Vec::new();
    };

    let mut notes: Vec<Note> = generate_scale_to(0, quality.blues_addition(), TABLE_MAX_FRET)
        .into_iter()
        .filter(|n| n.fret >= lo && n.fret <= hi)
        .collect();
    sort_notes(&mut notes);
    notes
}

/// Clustered triad + pentatonic frets for a shape at the reference key:
/// exactly one cluster per octave. The first cluster's span is the shape's
/// canonical span for partial detection.
pub fn shape_fret_ranges(quality: Quality, shape: Shape) -> Vec<FretCluster> {
    let mut frets: Vec<i8> = triad_shape(quality, shape)
        .iter()
        .map(|n| n.fret)
        .collect();
    frets.extend(penta_box(quality, shape).iter().map(|n| n.fret));
    cluster_frets(&frets)
}

/// Span of a shape's canonical (reference-key, untransposed) cluster.
pub fn canonical_span(quality: Quality, shape: Shape) -> i8 {
    shape_fret_ranges(quality, shape)
        .first()
        .map_or(0, FretCluster::span)
}

/// All reference-key tables for one quality, keyed by shape.
#[derive(Debug, Clone, Serialize)]
pub struct QualityTables {
    pub penta: BTreeMap<Shape, Vec<Note>>,
    pub triads: BTreeMap<Shape, Vec<Note>>,
    pub blues: BTreeMap<Shape, Vec<Note>>,
    pub ranges: BTreeMap<Shape, Vec<FretCluster>>,
}

impl QualityTables {
    fn build(quality: Quality) -> QualityTables {
        let mut penta = BTreeMap::new();
        let mut triads = BTreeMap::new();
        let mut blues = BTreeMap::new();
        let mut ranges = BTreeMap::new();
        for shape in SHAPE_ORDER {
            penta.insert(shape, penta_box(quality, shape));
            triads.insert(shape, triad_shape(quality, shape));
            blues.insert(shape, blues_shape(quality, shape));
            ranges.insert(shape, shape_fret_ranges(quality, shape));
        }
        QualityTables {
            penta,
            triads,
            blues,
            ranges,
        }
    }

    fn shifted(&self, effective_key: i8) -> QualityTables {
        let shift_map = |m: &BTreeMap<Shape, Vec<Note>>| {
            m.iter()
                .map(|(&shape, notes)| (shape, shift_notes(notes, effective_key)))
                .collect::<BTreeMap<_, _>>()
        };
        let penta = shift_map(&self.penta);
        let triads = shift_map(&self.triads);
        let blues = shift_map(&self.blues);

        let mut ranges = BTreeMap::new();
        for shape in SHAPE_ORDER {
            let mut frets = Vec::new();
            if let Some(notes) = triads.get(&shape) {
                frets.extend(notes.iter().map(|n| n.fret));
            }
            if let Some(notes) = penta.get(&shape) {
                frets.extend(notes.iter().map(|n| n.fret));
            }
            ranges.insert(shape, cluster_frets(&frets));
        }

        QualityTables {
            penta,
            triads,
            blues,
            ranges,
        }
    }
}

/// The full set of reference-key tables for both qualities.
#[derive(Debug, Clone, Serialize)]
pub struct StaticTables {
    pub major: QualityTables,
    pub minor: QualityTables,
}

impl StaticTables {
    /// Run the whole pipeline at the reference key.
    pub fn build() -> StaticTables {
        StaticTables {
            major: QualityTables::build(Quality::Major),
            minor: QualityTables::build(Quality::Minor),
        }
    }

    pub fn quality(&self, quality: Quality) -> &QualityTables {
        match quality {
            Quality::Major => &self.major,
            Quality::Minor => &self.minor,
        }
    }

    /// Tables transposed to a key and clipped to the visible neck, with
    /// ranges reclustered. For inspection; display code shifts on the fly.
    pub fn shifted(&self, effective_key: i8) -> StaticTables {
        StaticTables {
            major: self.major.shifted(effective_key),
            minor: self.minor.shifted(effective_key),
        }
    }
}
