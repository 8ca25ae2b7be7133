//! JSON import and export around the sequencing engine

pub mod json;

pub use json::{read_report, read_tracks, write_json, ExportMetadata, PlaylistReport};
