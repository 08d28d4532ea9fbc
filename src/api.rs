//! High-level view-model assembly.
//!
//! These are the entry points the rendering layer consumes: per-shape fret
//! ranges with partial flags, the hover regions tiled from them, and the
//! merged dot lists for the scale display. Everything is a pure transform of
//! the reference tables plus the current key and selection, cheap enough to
//! recompute on every interaction.

use std::collections::{BTreeMap, HashSet};

use crate::boxes::StaticTables;
use crate::cluster::{
    classify_clusters, cluster_frets, compute_hover_ranges, FretCluster, HoverRegion, ShapeRange,
};
use crate::fretboard::{generate_scale, shift_notes, Note};
use crate::pan::{filter_pans_by_notes, visible_pans, PanInstance};
use crate::shapes::{assign_shapes, Shape, ShapeMap, SHAPE_ORDER};
use crate::theory::Quality;

/// Pentatonic shape assignment computed directly from the generator, without
/// going through the reference tables.
///
/// # Example
/// ```rust
/// use caged::api::shape_map_for;
/// use caged::shapes::Shape;
/// use caged::theory::Quality;
///
/// // in C, the open-position notes start the C shape
/// let map = shape_map_for(0, Quality::Major);
/// let shapes = map.get(6, 0).unwrap();
/// assert!(shapes.contains(&Shape::C));
/// ```
pub fn shape_map_for(effective_key: i8, quality: Quality) -> ShapeMap {
    let notes = generate_scale(effective_key, quality.pentatonic());
    assign_shapes(&notes, effective_key, &quality.penta_semitones())
}

/// Per-shape clustered fret ranges at a key, with partial flags.
///
/// Ranges bound only the note types actually shown, so background highlights
/// stay tight around visible dots. When triad and pentatonic qualities
/// differ, both qualities contribute notes; the canonical span for partial
/// detection comes from the first quality. Blues notes are excluded: their
/// ♭5 entries bridge the octave gap and would fuse the two occurrences.
pub fn shape_ranges(
    tables: &StaticTables,
    effective_key: i8,
    qualities: &[Quality],
    show_triads: bool,
    show_penta: bool,
) -> BTreeMap<Shape, Vec<ShapeRange>> {
    let mut ranges = BTreeMap::new();
    let Some(&first_quality) = qualities.first() else {
        return ranges;
    };

    for shape in SHAPE_ORDER {
        let note_set = |quality: Quality| -> Vec<Note> {
            let qt = tables.quality(quality);
            let mut notes = Vec::new();
            if show_triads {
                if let Some(t) = qt.triads.get(&shape) {
                    notes.extend_from_slice(t);
                }
            }
            if show_penta {
                if let Some(p) = qt.penta.get(&shape) {
                    notes.extend_from_slice(p);
                }
            }
            notes
        };

        let all: Vec<Note> = qualities.iter().flat_map(|&q| note_set(q)).collect();
        let shifted = shift_notes(&all, effective_key);
        let frets: Vec<i8> = shifted.iter().map(|n| n.fret).collect();

        let canonical_frets: Vec<i8> = note_set(first_quality).iter().map(|n| n.fret).collect();
        let canonical_span = cluster_frets(&canonical_frets)
            .first()
            .map_or(0, FretCluster::span);

        ranges.insert(shape, classify_clusters(&frets, canonical_span));
    }
    ranges
}

/// Hover regions over the full clusters of the given ranges.
pub fn hover_regions(shape_ranges: &BTreeMap<Shape, Vec<ShapeRange>>) -> Vec<HoverRegion> {
    compute_hover_ranges(shape_ranges, &SHAPE_ORDER)
}

/// Positions occupied by triad dots, which suppress scale dots underneath.
pub fn triad_positions(
    tables: &StaticTables,
    shapes: &[Shape],
    quality: Quality,
    effective_key: i8,
) -> HashSet<(u8, i8)> {
    let qt = tables.quality(quality);
    let mut positions = HashSet::new();
    for shape in shapes {
        if let Some(notes) = qt.triads.get(shape) {
            for n in shift_notes(notes, effective_key) {
                positions.insert(n.position());
            }
        }
    }
    positions
}

/// Merged pentatonic (and optionally blues) dots for the visible shapes.
///
/// Dots are deduplicated across shapes and dropped where a triad dot already
/// occupies the position. Blues notes are kept only within one fret of their
/// own shape's pentatonic clusters, which pins each ♭5 (or major-blues ♭3)
/// to the correct octave occurrence of the shape.
pub fn scale_dots(
    tables: &StaticTables,
    shapes: &[Shape],
    effective_key: i8,
    quality: Quality,
    include_blues: bool,
    triad_positions: &HashSet<(u8, i8)>,
) -> Vec<Note> {
    let qt = tables.quality(quality);
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for shape in shapes {
        let penta = match qt.penta.get(shape) {
            Some(notes) => shift_notes(notes, effective_key),
            None => Vec::new(),
        };
        for n in &penta {
            let pos = n.position();
            if !seen.contains(&pos) && !triad_positions.contains(&pos) {
                seen.insert(pos);
                out.push(*n);
            }
        }

        if include_blues {
            let penta_frets: Vec<i8> = penta.iter().map(|n| n.fret).collect();
            let clusters = cluster_frets(&penta_frets);
            if let Some(blues) = qt.blues.get(shape) {
                for n in shift_notes(blues, effective_key) {
                    let pos = n.position();
                    let in_range = clusters
                        .iter()
                        .any(|c| n.fret >= c.lo - 1 && n.fret <= c.hi + 1);
                    if in_range && !seen.contains(&pos) && !triad_positions.contains(&pos) {
                        seen.insert(pos);
                        out.push(n);
                    }
                }
            }
        }
    }
    out
}

/// Visible pans restricted to one shape: only pans holding at least one of
/// the shape's pentatonic notes (either quality) on their string pair
/// survive, so no pan is drawn over a region the shape doesn't reach. The
/// shape's orientation says which handle direction it aligns with.
///
/// Pans shift by the nominal key index while notes shift by the effective
/// key; the two differ by the relative-minor offset.
pub fn pans_for_shape(
    tables: &StaticTables,
    shape: Shape,
    key_index: i8,
    effective_key: i8,
) -> Vec<PanInstance> {
    let mut notes = Vec::new();
    for qt in [&tables.major, &tables.minor] {
        if let Some(p) = qt.penta.get(&shape) {
            notes.extend(shift_notes(p, effective_key));
        }
    }
    filter_pans_by_notes(&visible_pans(key_index), &notes)
}
