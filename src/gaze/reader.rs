//! Shared File Reader
//!
//! Performs the per-tick read of the shared gaze file. The producer rewrites
//! the file at arbitrary granularity with no locking, so a read can observe
//! a missing file (producer not started yet, or mid-replace) or a torn
//! write. Both are expected, recoverable states, never errors.

use super::sample::{parse_sample, GazeSample, ParseError};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Outcome of a single read attempt
#[derive(Debug, Clone)]
pub enum ReadOutcome {
    /// The file was read and parsed into a valid sample
    Fresh(GazeSample),
    /// The file does not exist or could not be opened
    Unavailable,
    /// The file exists but its contents did not parse or validate
    Invalid(ParseError),
}

impl ReadOutcome {
    /// Check if this outcome carries a fresh sample
    pub fn is_fresh(&self) -> bool {
        matches!(self, ReadOutcome::Fresh(_))
    }
}

/// Reads gaze snapshots from the shared file
///
/// Stateless between calls: every `read()` re-reads the file from scratch,
/// since the producer may have rewritten it at any time.
#[derive(Debug, Clone)]
pub struct GazeReader {
    path: PathBuf,
}

impl GazeReader {
    /// Create a reader for the given gaze file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this reader polls
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the source currently exists.
    ///
    /// Used as the `start()` precondition so the caller can prompt the user
    /// to launch the eye tracker, rather than silently polling nothing.
    pub fn source_available(&self) -> bool {
        self.path.exists()
    }

    /// Attempt to read one gaze snapshot.
    ///
    /// All I/O failures collapse into [`ReadOutcome::Unavailable`] and all
    /// parse/validation failures into [`ReadOutcome::Invalid`], so the
    /// polling loop never halts on a single bad read.
    pub fn read(&self) -> ReadOutcome {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                trace!("gaze source unavailable: {}", e);
                return ReadOutcome::Unavailable;
            }
        };

        match parse_sample(&bytes) {
            Ok(sample) => ReadOutcome::Fresh(sample),
            Err(e) => {
                trace!("gaze source invalid: {}", e);
                ReadOutcome::Invalid(e)
            }
        }
    }
}
