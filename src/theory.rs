//! Interval and scale tables for the fretboard engine.
//!
//! Everything here is key-independent: degree sets are semitone offsets from
//! an abstract root, and the tuning is semitones from C for each open string.

use serde::{Deserialize, Serialize};

use crate::error::CagedError;

/// Highest displayed fret. Frets beyond this exist only in the two-octave
/// reference tables and are clipped before display.
pub const NUM_FRETS: i8 = 15;

/// Standard guitar tuning: semitones from C for strings 6 (low E) through 1.
pub const TUNING: [i8; 6] = [4, 9, 2, 7, 11, 4];

/// Pitch-class names, sharps convention.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Scale degree relative to the current key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "R")]
    Root,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "♭3")]
    FlatThird,
    #[serde(rename = "3")]
    Third,
    #[serde(rename = "4")]
    Fourth,
    #[serde(rename = "♭5")]
    FlatFifth,
    #[serde(rename = "5")]
    Fifth,
    #[serde(rename = "6")]
    Sixth,
    #[serde(rename = "♭7")]
    FlatSeventh,
}

impl Interval {
    /// Semitones above the root.
    pub fn semitones(self) -> i8 {
        match self {
            Interval::Root => 0,
            Interval::Second => 2,
            Interval::FlatThird => 3,
            Interval::Third => 4,
            Interval::Fourth => 5,
            Interval::FlatFifth => 6,
            Interval::Fifth => 7,
            Interval::Sixth => 9,
            Interval::FlatSeventh => 10,
        }
    }

    /// Display label as drawn on fretboard dots.
    pub fn label(self) -> &'static str {
        match self {
            Interval::Root => "R",
            Interval::Second => "2",
            Interval::FlatThird => "♭3",
            Interval::Third => "3",
            Interval::Fourth => "4",
            Interval::FlatFifth => "♭5",
            Interval::Fifth => "5",
            Interval::Sixth => "6",
            Interval::FlatSeventh => "♭7",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a scale's degree set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Degree {
    pub semi: i8,
    pub interval: Interval,
}

const fn deg(semi: i8, interval: Interval) -> Degree {
    Degree { semi, interval }
}

pub const TRIAD_MAJ: [Degree; 3] = [
    deg(0, Interval::Root),
    deg(4, Interval::Third),
    deg(7, Interval::Fifth),
];

pub const TRIAD_MIN: [Degree; 3] = [
    deg(0, Interval::Root),
    deg(3, Interval::FlatThird),
    deg(7, Interval::Fifth),
];

pub const PENTA_MAJ: [Degree; 5] = [
    deg(0, Interval::Root),
    deg(2, Interval::Second),
    deg(4, Interval::Third),
    deg(7, Interval::Fifth),
    deg(9, Interval::Sixth),
];

pub const PENTA_MIN: [Degree; 5] = [
    deg(0, Interval::Root),
    deg(3, Interval::FlatThird),
    deg(5, Interval::Fourth),
    deg(7, Interval::Fifth),
    deg(10, Interval::FlatSeventh),
];

/// Blue note added to the minor pentatonic: the ♭5.
pub const BLUES_ADD_MIN: [Degree; 1] = [deg(6, Interval::FlatFifth)];

/// Blue note added to the major pentatonic: the ♭3.
pub const BLUES_ADD_MAJ: [Degree; 1] = [deg(3, Interval::FlatThird)];

/// Triad / scale quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Major,
    Minor,
}

impl Quality {
    pub const BOTH: [Quality; 2] = [Quality::Major, Quality::Minor];

    pub fn triad(self) -> &'static [Degree] {
        match self {
            Quality::Major => &TRIAD_MAJ,
            Quality::Minor => &TRIAD_MIN,
        }
    }

    pub fn pentatonic(self) -> &'static [Degree] {
        match self {
            Quality::Major => &PENTA_MAJ,
            Quality::Minor => &PENTA_MIN,
        }
    }

    pub fn blues_addition(self) -> &'static [Degree] {
        match self {
            Quality::Major => &BLUES_ADD_MAJ,
            Quality::Minor => &BLUES_ADD_MIN,
        }
    }

    /// Semitone set of the pentatonic scale, used for shape-cycle rotation.
    pub fn penta_semitones(self) -> [i8; 5] {
        let degrees = self.pentatonic();
        [
            degrees[0].semi,
            degrees[1].semi,
            degrees[2].semi,
            degrees[3].semi,
            degrees[4].semi,
        ]
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quality::Major => f.write_str("major"),
            Quality::Minor => f.write_str("minor"),
        }
    }
}

/// The key used for note placement. A relative-minor selection places notes
/// 9 semitones above the nominal major key (A minor shares C major's notes).
pub fn effective_key(key_index: i8, minor: bool) -> i8 {
    let offset = if minor { 9 } else { 0 };
    (key_index + offset).rem_euclid(12)
}

/// Note name for an interval in a given key (sharps convention).
pub fn note_name(interval: Interval, key: i8) -> &'static str {
    let semi = (key + interval.semitones()).rem_euclid(12);
    NOTE_NAMES[semi as usize]
}

/// Parse a key name ("C", "F#", "Bb") to its pitch-class index.
/// Accepts both sharp and flat spellings.
pub fn parse_key(name: &str) -> Result<i8, CagedError> {
    let key = match name.trim() {
        "C" => 0,
        "C#" | "Db" => 1,
        "D" => 2,
        "D#" | "Eb" => 3,
        "E" => 4,
        "F" => 5,
        "F#" | "Gb" => 6,
        "G" => 7,
        "G#" | "Ab" => 8,
        "A" => 9,
        "A#" | "Bb" => 10,
        "B" => 11,
        other => return Err(CagedError::UnknownKey(other.to_string())),
    };
    Ok(key)
}
