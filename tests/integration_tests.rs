//! Integration tests for the CAGED engine.
//!
//! Exercises the public API end to end: generator → shape assignment,
//! reference tables → shifting → clustering → hover regions, and the
//! frying-pan overlay, across all twelve keys and both qualities.

use std::collections::{HashMap, HashSet};

use caged::api::{hover_regions, scale_dots, shape_map_for, shape_ranges, triad_positions};
use caged::boxes::StaticTables;
use caged::cluster::cluster_frets;
use caged::fretboard::{generate_scale, shift_notes};
use caged::pan::visible_pans;
use caged::shapes::{Shape, SHAPE_ORDER};
use caged::theory::{effective_key, Interval, Quality, NUM_FRETS, PENTA_MAJ};

#[test]
fn test_generator_is_octave_equivalent_for_every_degree_set() {
    for quality in Quality::BOTH {
        for degrees in [
            quality.triad(),
            quality.pentatonic(),
            quality.blues_addition(),
        ] {
            for key in 0..12 {
                assert_eq!(
                    generate_scale(key, degrees),
                    generate_scale(key + 12, degrees)
                );
            }
        }
    }
}

#[test]
fn test_generator_touches_all_strings_for_every_key() {
    for quality in Quality::BOTH {
        for key in 0..12 {
            let strings: HashSet<u8> = generate_scale(key, quality.pentatonic())
                .iter()
                .map(|n| n.string)
                .collect();
            assert_eq!(strings.len(), 6, "{quality} key={key}");
        }
    }
}

#[test]
fn test_shape_cycle_follows_open_chord_roots() {
    // the lowest-fret note on every string belongs to the shape whose open
    // chord roots on the key
    for (key, expected) in [(0, Shape::C), (4, Shape::E), (9, Shape::A)] {
        let map = shape_map_for(key, Quality::Major);
        let notes = generate_scale(key, &PENTA_MAJ);
        for string in 1..=6u8 {
            let first = notes
                .iter()
                .filter(|n| n.string == string)
                .map(|n| n.fret)
                .min()
                .expect("string covered");
            let shapes = map.get(string, first).expect("first note assigned");
            assert!(shapes.contains(&expected), "key={key} string={string}");
        }
    }
}

#[test]
fn test_boundary_notes_are_shared_by_cyclically_adjacent_shapes() {
    for quality in Quality::BOTH {
        for key in 0..12 {
            let map = shape_map_for(key, quality);
            for (&(string, fret), shapes) in map.iter() {
                assert!(
                    shapes.len() == 1 || shapes.len() == 2,
                    "{quality} key={key} ({string},{fret})"
                );
                if let [a, b] = shapes[..] {
                    assert!(a.is_adjacent(b), "{quality} key={key} {a} vs {b}");
                }
            }
        }
    }
}

#[test]
fn test_reference_scenario_key_zero_shape_c() {
    // at key 0 the C-shape pentatonic box hugs the open position
    let tables = StaticTables::build();
    let c_box = &tables.major.penta[&Shape::C];
    let low_octave: Vec<_> = c_box.iter().filter(|n| n.fret < 12).collect();
    assert!(low_octave.iter().all(|n| (0..=3).contains(&n.fret)));
    // two notes per string in the low octave
    for s in 1..=6u8 {
        assert_eq!(low_octave.iter().filter(|n| n.string == s).count(), 2);
    }
    // and the assigner claims shape C first on every string
    let map = shape_map_for(0, Quality::Major);
    for n in &low_octave {
        let shapes = map.get(n.string, n.fret).expect("box note assigned");
        assert!(shapes.contains(&Shape::C), "({}, {})", n.string, n.fret);
    }
}

#[test]
fn test_every_shape_has_a_full_cluster_for_all_keys_and_qualities() {
    let tables = StaticTables::build();
    for quality in Quality::BOTH {
        for key in 0..12 {
            let ranges = shape_ranges(&tables, key, &[quality], true, true);
            for shape in SHAPE_ORDER {
                assert!(
                    ranges[&shape].iter().any(|r| !r.partial),
                    "{quality} {shape} key={key}"
                );
            }
        }
    }
}

#[test]
fn test_hover_regions_tile_without_gaps() {
    let tables = StaticTables::build();
    for quality in Quality::BOTH {
        for key in 0..12 {
            let ranges = shape_ranges(&tables, key, &[quality], true, true);
            let regions = hover_regions(&ranges);
            assert!(!regions.is_empty());

            let first = regions.first().expect("non-empty");
            let last = regions.last().expect("non-empty");
            assert_eq!(first.hover_lo, first.lo as f64, "{quality} key={key}");
            assert_eq!(last.hover_hi, last.hi as f64, "{quality} key={key}");
            for pair in regions.windows(2) {
                assert!(
                    (pair[0].hover_hi - pair[1].hover_lo).abs() < 1e-9,
                    "{quality} key={key}: gap between regions"
                );
            }
            for r in &regions {
                assert!(r.hover_lo <= r.center && r.center <= r.hover_hi);
            }
        }
    }
}

#[test]
fn test_major_and_relative_minor_share_positions() {
    let tables = StaticTables::build();
    for key in 0..12 {
        let minor_key = effective_key(key, true);
        let mut major_positions = HashSet::new();
        let mut minor_positions = HashSet::new();
        for shape in SHAPE_ORDER {
            for n in shift_notes(&tables.major.penta[&shape], key) {
                major_positions.insert(n.position());
            }
            for n in shift_notes(&tables.minor.penta[&shape], minor_key) {
                minor_positions.insert(n.position());
            }
        }
        assert_eq!(major_positions, minor_positions, "key={key}");
    }
}

#[test]
fn test_penta_box_boundaries_chain_through_adjacent_shapes() {
    let tables = StaticTables::build();
    for quality in Quality::BOTH {
        let mut owners: HashMap<(u8, i8), Vec<Shape>> = HashMap::new();
        for shape in SHAPE_ORDER {
            // low-octave notes only: the +12 copies repeat the same geometry
            for n in &tables.quality(quality).penta[&shape] {
                if n.fret < 12 {
                    let shapes = owners.entry(n.position()).or_default();
                    if !shapes.contains(&shape) {
                        shapes.push(shape);
                    }
                }
            }
        }
        for ((string, fret), shapes) in owners {
            assert!(shapes.len() <= 2, "{quality} ({string},{fret}): {shapes:?}");
            if let [a, b] = shapes[..] {
                assert!(a.is_adjacent(b), "{quality} ({string},{fret}): {a} vs {b}");
            }
        }
    }
}

#[test]
fn test_blues_tables_contain_entries_that_cluster_bounding_removes() {
    let tables = StaticTables::build();
    let mut total_removed = 0usize;
    for quality in Quality::BOTH {
        for shape in SHAPE_ORDER {
            for key in 0..12 {
                let penta = shift_notes(&tables.quality(quality).penta[&shape], key);
                let penta_frets: Vec<i8> = penta.iter().map(|n| n.fret).collect();
                let clusters = cluster_frets(&penta_frets);
                let blues = shift_notes(&tables.quality(quality).blues[&shape], key);
                let kept = blues
                    .iter()
                    .filter(|n| {
                        clusters
                            .iter()
                            .any(|c| n.fret >= c.lo - 1 && n.fret <= c.hi + 1)
                    })
                    .count();
                total_removed += blues.len() - kept;
            }
        }
    }
    assert!(total_removed > 0, "bounding never removed anything");
}

#[test]
fn test_blues_dots_carry_the_right_blue_note() {
    let tables = StaticTables::build();
    let no_triads = HashSet::new();
    for (quality, blue) in [
        (Quality::Minor, Interval::FlatFifth),
        (Quality::Major, Interval::FlatThird),
    ] {
        for key in 0..12 {
            let dots = scale_dots(&tables, &SHAPE_ORDER, key, quality, true, &no_triads);
            assert!(
                dots.iter().any(|n| n.interval == blue),
                "{quality} key={key} has no {blue} dot"
            );
        }
    }
}

#[test]
fn test_triad_positions_suppress_scale_dots() {
    let tables = StaticTables::build();
    for quality in Quality::BOTH {
        for key in 0..12 {
            let triads = triad_positions(&tables, &SHAPE_ORDER, quality, key);
            assert!(!triads.is_empty());
            let dots = scale_dots(&tables, &SHAPE_ORDER, key, quality, false, &triads);
            for d in &dots {
                assert!(!triads.contains(&d.position()), "{quality} key={key}");
            }
        }
    }
}

#[test]
fn test_visible_pans_exist_for_both_directions_at_every_key() {
    use caged::pan::HandleDirection;
    for key in 0..12 {
        let pans = visible_pans(key);
        for direction in [HandleDirection::Left, HandleDirection::Right] {
            assert!(
                pans.iter().any(|p| p.direction == direction),
                "key={key} direction={direction:?}"
            );
        }
        let mid = NUM_FRETS / 2;
        assert!(pans.iter().any(|p| p.pan_min <= mid), "key={key} lower half");
        assert!(pans.iter().any(|p| p.pan_max > mid), "key={key} upper half");
    }
}

#[test]
fn test_every_visible_pan_contains_a_pentatonic_note() {
    // pans are shifted by the nominal key; notes by the effective key
    let tables = StaticTables::build();
    for key in 0..12 {
        for minor in [false, true] {
            let ek = effective_key(key, minor);
            let mut notes = Vec::new();
            for shape in SHAPE_ORDER {
                notes.extend(shift_notes(&tables.major.penta[&shape], ek));
                notes.extend(shift_notes(&tables.minor.penta[&shape], ek));
            }
            for pan in visible_pans(key).iter().filter(|p| p.body_on_neck()) {
                assert!(
                    notes.iter().any(|n| pan.contains_note(n)),
                    "key={key} minor={minor} pan [{}..{}] on ({},{})",
                    pan.pan_min,
                    pan.pan_max,
                    pan.lower_string,
                    pan.upper_string
                );
            }
        }
    }
}

#[test]
fn test_pan_bars_stay_on_the_neck() {
    for key in 0..12 {
        for pan in visible_pans(key) {
            for bar in [pan.three_note_bar(), pan.two_note_bar()].into_iter().flatten() {
                assert!(bar.lo >= 0 && bar.hi <= NUM_FRETS, "key={key}");
                assert!(bar.lo <= bar.hi);
            }
        }
    }
}

#[test]
fn test_every_shape_has_an_aligned_pan_at_every_key() {
    // each shape aligns with one handle direction, and a pan of that
    // direction is always on the neck
    for key in 0..12 {
        let pans = visible_pans(key);
        for shape in SHAPE_ORDER {
            assert!(
                pans.iter().any(|p| p.direction == shape.orientation()),
                "key={key} {shape}"
            );
        }
    }
}

#[test]
fn test_tables_serialize_to_yaml() {
    let tables = caged::build_tables();
    let yaml = caged::tables_to_yaml(&tables).expect("serializes");
    assert!(yaml.contains("major:"));
    assert!(yaml.contains("minor:"));
    assert!(yaml.contains("penta:"));
    assert!(yaml.contains("ranges:"));
}

#[test]
fn test_a_minor_triads_keep_the_tight_a_g_centroid_pairing() {
    // effective key 9, minor triads: the A and G voicing clusters land almost
    // on top of each other. This is geometry, not a defect.
    let tables = StaticTables::build();
    let mean = |shape: Shape| {
        let notes = shift_notes(&tables.minor.triads[&shape], 9);
        notes.iter().map(|n| n.fret as f64).sum::<f64>() / notes.len() as f64
    };
    assert!((mean(Shape::A) - mean(Shape::G)).abs() <= 0.5);
}
