//! Frying-pan / 3:2 overlay geometry.
//!
//! A second decomposition of the pentatonic scale, independent of the CAGED
//! partition: two-string "pan" regions with a one-string "handle", six
//! left-handed (handle toward the nut) and six right-handed (handle toward
//! the bridge). The templates are defined at the reference key over two
//! octaves, so shifting by the key and by the key minus an octave always
//! leaves the 15-fret window covered.
//!
//! The physical geometry is identical for major and minor pentatonic; pans
//! are shifted by the nominal key index, not the effective key, because the
//! relative-minor offset does not move the note positions.

use serde::{Deserialize, Serialize};

use crate::fretboard::Note;
use crate::theory::NUM_FRETS;

/// Which way a pan's handle points: left toward the nut, right toward the
/// bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleDirection {
    Left,
    Right,
}

/// A reference-key pan definition. `pair` holds (lower-pitched string,
/// higher-pitched string); the handle sits on one of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanTemplate {
    pub pair: (u8, u8),
    pub pan_min: i8,
    pub pan_max: i8,
    pub handle_string: u8,
    pub handle_fret: i8,
    pub direction: HandleDirection,
}

const fn pan(
    pair: (u8, u8),
    pan_min: i8,
    pan_max: i8,
    handle_string: u8,
    handle_fret: i8,
    direction: HandleDirection,
) -> PanTemplate {
    PanTemplate {
        pair,
        pan_min,
        pan_max,
        handle_string,
        handle_fret,
        direction,
    }
}

/// Left-handed templates, reference key, two octaves.
pub const FRYING_PAN_LEFT: [PanTemplate; 6] = [
    pan((6, 5), 10, 12, 6, 8, HandleDirection::Left),
    pan((4, 3), 12, 14, 4, 10, HandleDirection::Left),
    pan((2, 1), 3, 5, 2, 1, HandleDirection::Left),
    pan((6, 5), 22, 24, 6, 20, HandleDirection::Left),
    pan((4, 3), 24, 26, 4, 22, HandleDirection::Left),
    pan((2, 1), 15, 17, 2, 13, HandleDirection::Left),
];

/// Right-handed templates, reference key, two octaves.
pub const FRYING_PAN_RIGHT: [PanTemplate; 6] = [
    pan((6, 5), 3, 5, 5, 7, HandleDirection::Right),
    pan((4, 3), 5, 7, 3, 9, HandleDirection::Right),
    pan((2, 1), 8, 10, 1, 12, HandleDirection::Right),
    pan((6, 5), 15, 17, 5, 19, HandleDirection::Right),
    pan((4, 3), 17, 19, 3, 21, HandleDirection::Right),
    pan((2, 1), 20, 22, 1, 24, HandleDirection::Right),
];

/// A bar of the 3:2 decomposition: a run of frets on one string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub string: u8,
    pub lo: i8,
    pub hi: i8,
}

/// A template shifted to a key and kept because part of it is on the neck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanInstance {
    pub lower_string: u8,
    pub upper_string: u8,
    pub pan_min: i8,
    pub pan_max: i8,
    pub handle_string: u8,
    pub handle_fret: i8,
    pub direction: HandleDirection,
}

impl PanInstance {
    fn from_template(t: &PanTemplate, shift: i8) -> PanInstance {
        PanInstance {
            lower_string: t.pair.0,
            upper_string: t.pair.1,
            pan_min: t.pan_min + shift,
            pan_max: t.pan_max + shift,
            handle_string: t.handle_string,
            handle_fret: t.handle_fret + shift,
            direction: t.direction,
        }
    }

    /// True when any of the three defining frets lands on the neck.
    fn partly_visible(&self) -> bool {
        [self.pan_min, self.pan_max, self.handle_fret]
            .iter()
            .any(|&f| (0..=NUM_FRETS).contains(&f))
    }

    /// True when the pan body itself overlaps the neck.
    pub fn body_on_neck(&self) -> bool {
        self.pan_max >= 0 && self.pan_min <= NUM_FRETS
    }

    /// True when `note` sits on the pan's string pair within its fret range.
    pub fn contains_note(&self, note: &Note) -> bool {
        (note.string == self.lower_string || note.string == self.upper_string)
            && note.fret >= self.pan_min
            && note.fret <= self.pan_max
    }

    /// The three-note bar on the handle string: from the handle fret to the
    /// far edge of the pan. Discarded when either endpoint leaves the neck.
    pub fn three_note_bar(&self) -> Option<Bar> {
        let (lo, hi) = match self.direction {
            HandleDirection::Left => (self.handle_fret, self.pan_max),
            HandleDirection::Right => (self.pan_min, self.handle_fret),
        };
        bar_on_neck(self.handle_string, lo, hi)
    }

    /// The two-note bar on the pan's other string, spanning the pan range.
    /// Discarded when either endpoint leaves the neck.
    pub fn two_note_bar(&self) -> Option<Bar> {
        let string = if self.handle_string == self.lower_string {
            self.upper_string
        } else {
            self.lower_string
        };
        bar_on_neck(string, self.pan_min, self.pan_max)
    }
}

fn bar_on_neck(string: u8, lo: i8, hi: i8) -> Option<Bar> {
    if (0..=NUM_FRETS).contains(&lo) && (0..=NUM_FRETS).contains(&hi) {
        Some(Bar { string, lo, hi })
    } else {
        None
    }
}

/// All pan instances visible for a key. Each template is evaluated at the
/// key's shift and an octave below it; a template defined near the nut may
/// only reach the window through the negative shift when the key is large,
/// and vice versa for upper-octave templates.
pub fn visible_pans(key: i8) -> Vec<PanInstance> {
    let key = key.rem_euclid(12);
    let mut pans = Vec::new();
    for shift in [key, key - 12] {
        for t in FRYING_PAN_LEFT.iter().chain(FRYING_PAN_RIGHT.iter()) {
            let instance = PanInstance::from_template(t, shift);
            if instance.partly_visible() {
                pans.push(instance);
            }
        }
    }
    pans
}

/// Keep only pans containing at least one of the given notes on their string
/// pair. Used when a single shape is highlighted, so that no pan is drawn
/// over a region the shape doesn't reach.
pub fn filter_pans_by_notes(pans: &[PanInstance], notes: &[Note]) -> Vec<PanInstance> {
    pans.iter()
        .filter(|p| notes.iter().any(|n| p.contains_note(n)))
        .copied()
        .collect()
}
