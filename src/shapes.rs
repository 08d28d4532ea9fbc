//! CAGED shape assignment.
//!
//! On each string, pentatonic notes cycle through the five shapes C, A, G,
//! E, D in fret order. The shape at cycle index `i` owns the notes at sorted
//! positions `i` and `i + 1`, so every note except a string's first is shared
//! by two cycle-adjacent shapes. Which shape starts the cycle depends only on
//! the key: transposing wraps some canonical scale tones past the octave
//! boundary, and each wrapped tone rotates the cycle back by one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CagedError;
use crate::fretboard::Note;
use crate::pan::HandleDirection;
use crate::theory::TUNING;

/// One of the five CAGED shapes. Declaration order is the cycle order, which
/// also makes ordered maps iterate shapes in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    C,
    A,
    G,
    E,
    D,
}

/// The fixed cycle the shapes repeat in along the neck.
pub const SHAPE_ORDER: [Shape; 5] = [Shape::C, Shape::A, Shape::G, Shape::E, Shape::D];

impl Shape {
    /// Index in the cycle order.
    pub fn index(self) -> usize {
        match self {
            Shape::C => 0,
            Shape::A => 1,
            Shape::G => 2,
            Shape::E => 3,
            Shape::D => 4,
        }
    }

    /// Open-chord root pitch class (C form roots on C, A form on A, ...).
    pub fn root_semitone(self) -> i8 {
        match self {
            Shape::C => 0,
            Shape::A => 9,
            Shape::G => 7,
            Shape::E => 4,
            Shape::D => 2,
        }
    }

    /// Which frying-pan orientation this shape aligns with.
    pub fn orientation(self) -> HandleDirection {
        match self {
            Shape::C | Shape::A | Shape::G => HandleDirection::Right,
            Shape::E | Shape::D => HandleDirection::Left,
        }
    }

    /// True when the two shapes are neighbors in the cycle (wrapping).
    pub fn is_adjacent(self, other: Shape) -> bool {
        let diff = self.index().abs_diff(other.index());
        diff == 1 || diff == 4
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Shape::C => "C",
            Shape::A => "A",
            Shape::G => "G",
            Shape::E => "E",
            Shape::D => "D",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for Shape {
    type Err = CagedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C" => Ok(Shape::C),
            "A" => Ok(Shape::A),
            "G" => Ok(Shape::G),
            "E" => Ok(Shape::E),
            "D" => Ok(Shape::D),
            other => Err(CagedError::UnknownShape(other.to_string())),
        }
    }
}

/// Maps note positions to the shapes that own them (one shape, or two at a
/// boundary between cycle-adjacent shapes). Built per (key, scale) pair and
/// never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ShapeMap {
    entries: HashMap<(u8, i8), Vec<Shape>>,
}

impl ShapeMap {
    /// Shapes at an exact position.
    pub fn get(&self, string: u8, fret: i8) -> Option<&[Shape]> {
        self.entries.get(&(string, fret)).map(Vec::as_slice)
    }

    /// Shapes for a position, falling back to the nearest pentatonic note on
    /// the same string. Handles notes like a ♭3 or ♭5 that sit off the
    /// pentatonic grid but belong with their nearest neighbor's shape.
    /// Equidistant neighbors resolve to the lower fret.
    ///
    /// Returns `None` only when the string has no entries at all, which
    /// indicates incomplete input data rather than a runtime condition.
    pub fn find_shapes(&self, string: u8, fret: i8) -> Option<&[Shape]> {
        if let Some(shapes) = self.get(string, fret) {
            return Some(shapes);
        }
        let mut best: Option<(i8, i8, &Vec<Shape>)> = None;
        for (&(s, f), shapes) in &self.entries {
            if s != string {
                continue;
            }
            let dist = (f - fret).abs();
            let closer = match best {
                None => true,
                Some((best_dist, best_fret, _)) => {
                    dist < best_dist || (dist == best_dist && f < best_fret)
                }
            };
            if closer {
                best = Some((dist, f, shapes));
            }
        }
        best.map(|(_, _, shapes)| shapes.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(u8, i8), &Vec<Shape>)> + '_ {
        self.entries.iter()
    }

    fn add(&mut self, string: u8, fret: i8, shape: Shape) {
        let shapes = self.entries.entry((string, fret)).or_default();
        if !shapes.contains(&shape) {
            shapes.push(shape);
        }
    }
}

/// Assign CAGED shapes to pentatonic note positions.
///
/// A single rotation offset applies to every string: CAGED shapes span
/// consistent fret regions across the whole neck, so the offset depends only
/// on the key, not on per-string tuning. It is derived from the low E string:
/// canonicalize the scale's pitch classes against that string's open pitch
/// and count how many would wrap past the octave when shifted by the key.
pub fn assign_shapes(penta_notes: &[Note], effective_key: i8, scale_semitones: &[i8]) -> ShapeMap {
    let key = effective_key.rem_euclid(12);

    let mut by_string: HashMap<u8, Vec<i8>> = HashMap::new();
    for n in penta_notes {
        by_string.entry(n.string).or_default().push(n.fret);
    }

    let mut canonical: Vec<i8> = scale_semitones
        .iter()
        .map(|&semi| (semi - TUNING[0]).rem_euclid(12))
        .collect();
    canonical.sort_unstable();
    let wrap_count = canonical.iter().filter(|&&f| f >= 12 - key).count();
    let offset = (5 - wrap_count % 5) % 5;

    let mut map = ShapeMap::default();
    for (&string, frets) in by_string.iter_mut() {
        frets.sort_unstable();
        frets.dedup();
        for (i, &fret) in frets.iter().enumerate() {
            map.add(string, fret, SHAPE_ORDER[(i + offset) % 5]);
            if i > 0 {
                map.add(string, fret, SHAPE_ORDER[(i + offset + 4) % 5]);
            }
        }
    }
    map
}
