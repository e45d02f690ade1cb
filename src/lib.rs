//! # Gaze Bridge
//!
//! Converts gaze coordinates produced by an external eye-tracking process
//! into directional key events for a target application.
//!
//! ## Overview
//!
//! An independent eye tracker writes normalized screen coordinates to a
//! shared JSON file (`eye_gaze.json`). This library polls that file on a
//! fixed cadence, validates each snapshot, maps the coordinate into
//! per-axis directional actions with a dead zone and hysteresis, and
//! forwards the actions to a platform key-injection backend.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gaze_bridge::app::config::BridgeConfig;
//! use gaze_bridge::bridge::BridgeLoop;
//! use gaze_bridge::emit::NullEmitter;
//!
//! let config = BridgeConfig::default();
//! let mut bridge = BridgeLoop::new(&config);
//! bridge.set_follow_x(true);
//!
//! bridge.start(Box::new(NullEmitter::default())).expect("source missing");
//! // ... bridge ticks in the background ...
//! println!("{:?}", bridge.status());
//! bridge.stop();
//! ```
//!
//! ## Architecture
//!
//! - [`gaze`]: reading and validating gaze snapshots from the shared file
//! - [`mapping`]: coordinate-to-action mapping with dead zone and hysteresis
//! - [`emit`]: platform key-injection boundary
//! - [`bridge`]: the run/stop lifecycle and the fixed-cadence tick loop
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐    ┌────────────┐    ┌──────────────┐    ┌────────────┐
//! │ eye_gaze   │───▶│ GazeReader │───▶│ ActionMapper │───▶│ KeyEmitter │
//! │ .json      │    │ (validate) │    │ (hysteresis) │    │ (platform) │
//! └────────────┘    └────────────┘    └──────────────┘    └────────────┘
//!                          │                                     │
//!                          ▼                                     ▼
//!                   ┌─────────────────────────────────────────────────┐
//!                   │            BridgeLoop (status/telemetry)        │
//!                   └─────────────────────────────────────────────────┘
//! ```
//!
//! The gaze file is rewritten by its producer at arbitrary granularity;
//! every per-tick failure (missing file, torn write, bad values) is
//! absorbed and retried on the next tick.

pub mod app;
pub mod bridge;
pub mod emit;
pub mod gaze;
pub mod mapping;

// Re-export commonly used types
pub use bridge::{BridgeLoop, BridgeRunState, BridgeStatus};
pub use emit::{KeyEmitter, NullEmitter};
pub use gaze::reader::{GazeReader, ReadOutcome};
pub use gaze::sample::{GazeSample, ParseError};
pub use mapping::{ActionMapper, Axis, AxisFollowConfig, DirectionalAction, TickDecision};

/// Result type alias for the gaze bridge
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the gaze bridge
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bridge is already running")]
    AlreadyRunning,

    #[error("bridge is not running")]
    NotRunning,

    #[error("gaze source not found: {0} (start the eye tracker first)")]
    SourceNotFound(std::path::PathBuf),

    #[error("invalid gaze sample: {0}")]
    Sample(#[from] ParseError),

    #[error("key emission failed: {0}")]
    Emission(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
