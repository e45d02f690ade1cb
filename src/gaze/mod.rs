//! Gaze snapshot ingestion
//!
//! Parses and validates snapshots of the shared gaze file written by the
//! external eye-tracking process. The producer rewrites the file at its own
//! cadence with no locking, so every read must tolerate missing files and
//! torn writes.

pub mod reader;
pub mod sample;

pub use reader::{GazeReader, ReadOutcome};
pub use sample::{parse_sample, GazeSample, ParseError};
