//! Music-geometry engine for the CAGED guitar fretboard system.
//!
//! Pure, deterministic transforms only: scale notes on a tuned neck, the
//! five-shape assignment cycle, contiguous fret clusters with partial-cluster
//! detection, hover-region tiling, and the frying-pan 3:2 overlay. Rendering
//! and UI state live elsewhere and consume these outputs as plain data.

pub mod api;
pub mod boxes;
pub mod cluster;
pub mod error;
pub mod fretboard;
pub mod pan;
pub mod shapes;
pub mod theory;

pub use api::{
    hover_regions, pans_for_shape, scale_dots, shape_map_for, shape_ranges, triad_positions,
};
pub use boxes::StaticTables;
pub use cluster::{cluster_frets, compute_hover_ranges, FretCluster, HoverRegion, ShapeRange};
pub use error::CagedError;
pub use fretboard::{generate_scale, shift_notes, Note};
pub use pan::{filter_pans_by_notes, visible_pans, HandleDirection, PanInstance};
pub use shapes::{assign_shapes, Shape, ShapeMap, SHAPE_ORDER};
pub use theory::{effective_key, note_name, parse_key, Interval, Quality, NUM_FRETS, TUNING};

/// Run the reference-key table pipeline.
/// This is the main entry point for consumers that shift precomputed tables
/// instead of regenerating notes per key.
pub fn build_tables() -> StaticTables {
    StaticTables::build()
}

/// Serialize tables as YAML, the format the table-generation binary emits.
pub fn tables_to_yaml(tables: &StaticTables) -> Result<String, CagedError> {
    Ok(serde_yaml::to_string(tables)?)
}
