//! Note placement on the fretboard.
//!
//! `generate_scale` places a degree set directly at its correct frets for a
//! root key. `shift_notes` instead transposes a precomputed reference-key
//! table: every note is shifted by the key and by the key minus an octave,
//! then clipped to the visible neck and deduplicated by position. The dual
//! shift is what keeps a two-octave table covering the window for any key.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::theory::{Degree, Interval, NUM_FRETS, TUNING};

/// A note position: string (1 = highest pitch, 6 = lowest), fret, and the
/// scale degree it sounds relative to the current key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    pub string: u8,
    pub fret: i8,
    pub interval: Interval,
}

impl Note {
    pub fn new(string: u8, fret: i8, interval: Interval) -> Self {
        Note {
            string,
            fret,
            interval,
        }
    }

    /// Position key, ignoring the interval label.
    pub fn position(&self) -> (u8, i8) {
        (self.string, self.fret)
    }
}

/// Generate scale notes on all six strings for a root key, up to `NUM_FRETS`.
pub fn generate_scale(root_key: i8, degrees: &[Degree]) -> Vec<Note> {
    generate_scale_to(root_key, degrees, NUM_FRETS)
}

/// Generate scale notes up to an explicit fret ceiling. The two-octave
/// reference tables are built with a ceiling past the visible neck.
pub fn generate_scale_to(root_key: i8, degrees: &[Degree], max_fret: i8) -> Vec<Note> {
    let root = root_key.rem_euclid(12);
    let mut notes = Vec::new();
    for (idx, &open_semi) in TUNING.iter().enumerate() {
        let string = 6 - idx as u8;
        for d in degrees {
            let note_semi = (root + d.semi).rem_euclid(12);
            let base_fret = (note_semi - open_semi).rem_euclid(12);
            let mut fret = base_fret;
            while fret <= max_fret {
                notes.push(Note::new(string, fret, d.interval));
                fret += 12;
            }
        }
    }
    notes
}

/// Transpose a reference-key note table to `effective_key`, keeping only
/// notes on the visible neck.
pub fn shift_notes(notes: &[Note], effective_key: i8) -> Vec<Note> {
    shift_notes_to(notes, effective_key, NUM_FRETS)
}

/// `shift_notes` with an explicit fret ceiling.
///
/// Each note is tried at `key` and `key - 12`; results outside `[0, max_fret]`
/// are dropped and duplicate positions keep their first occurrence.
pub fn shift_notes_to(notes: &[Note], effective_key: i8, max_fret: i8) -> Vec<Note> {
    let key = effective_key.rem_euclid(12);
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for shift in [key, key - 12] {
        for n in notes {
            let fret = n.fret + shift;
            if (0..=max_fret).contains(&fret) && seen.insert((n.string, fret)) {
                out.push(Note::new(n.string, fret, n.interval));
            }
        }
    }
    out
}
