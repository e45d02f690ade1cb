//! Bridge Lifecycle and Tick Loop
//!
//! Owns the run/stop state and the fixed-cadence scheduling of
//! read → map → emit. A dedicated thread performs sequential ticks; each
//! tick runs to completion before the next is scheduled, and `stop()` joins
//! the thread so a tick in flight finishes rather than being interrupted
//! between a key-down and its key-up.

use crate::app::config::BridgeConfig;
use crate::emit::KeyEmitter;
use crate::gaze::reader::{GazeReader, ReadOutcome};
use crate::gaze::sample::GazeSample;
use crate::mapping::{ActionMapper, Axis, AxisFollowConfig, TickDecision};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Run state of the bridge
///
/// Transitions only through explicit `start()`/`stop()` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeRunState {
    Stopped,
    Running,
}

/// Read-only snapshot of the bridge published to callers
#[derive(Debug, Clone)]
pub struct BridgeStatus {
    /// Current run state
    pub state: BridgeRunState,
    /// Last successfully parsed sample, if any tick has produced one.
    /// Retained across failed reads as the last-known-good value.
    pub last_sample: Option<GazeSample>,
    /// When the bridge was last started
    pub started_at: Option<DateTime<Utc>>,
    /// Total ticks executed since start
    pub ticks: u64,
    /// Ticks that produced a fresh sample
    pub fresh: u64,
    /// Ticks that found the source missing
    pub unavailable: u64,
    /// Ticks that found the source unparseable
    pub invalid: u64,
    /// Key events successfully handed to the emitter
    pub emitted: u64,
    /// Most recent emission failure, if any
    pub last_emission_error: Option<String>,
}

impl BridgeStatus {
    fn new() -> Self {
        Self {
            state: BridgeRunState::Stopped,
            last_sample: None,
            started_at: None,
            ticks: 0,
            fresh: 0,
            unavailable: 0,
            invalid: 0,
            emitted: 0,
            last_emission_error: None,
        }
    }
}

/// The bridge: owns the lifecycle and the tick thread.
///
/// Callers interact through `start`/`stop`/`status` and the axis-follow
/// setters; the tick thread owns the emitter and the per-axis decision
/// state.
pub struct BridgeLoop {
    reader: GazeReader,
    mapper: ActionMapper,
    interval: Duration,
    /// Signals the tick thread to exit; checked between ticks
    running: Arc<AtomicBool>,
    /// Axis flags, mutable by the caller while the loop runs
    axes: Arc<RwLock<AxisFollowConfig>>,
    /// Status snapshot shared with the tick thread
    shared: Arc<RwLock<BridgeStatus>>,
    thread_handle: Option<JoinHandle<()>>,
}

impl BridgeLoop {
    /// Create a stopped bridge from a validated config
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            reader: GazeReader::new(&config.source.path),
            mapper: ActionMapper::new(
                config.mapping.dead_zone_width,
                config.mapping.hysteresis_margin,
            ),
            interval: Duration::from_millis(config.tick.interval_ms),
            running: Arc::new(AtomicBool::new(false)),
            axes: Arc::new(RwLock::new(AxisFollowConfig {
                follow_x: config.mapping.follow_x,
                follow_y: config.mapping.follow_y,
            })),
            shared: Arc::new(RwLock::new(BridgeStatus::new())),
            thread_handle: None,
        }
    }

    /// Start ticking.
    ///
    /// # Errors
    /// [`crate::Error::AlreadyRunning`] if the bridge is running, and
    /// [`crate::Error::SourceNotFound`] if the gaze file does not currently
    /// exist, a distinct condition so the caller can prompt the user to
    /// launch the eye tracker. In both cases the state is unchanged.
    pub fn start(&mut self, emitter: Box<dyn KeyEmitter>) -> crate::Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(crate::Error::AlreadyRunning);
        }

        if !self.reader.source_available() {
            self.running.store(false, Ordering::SeqCst);
            return Err(crate::Error::SourceNotFound(self.reader.path().to_path_buf()));
        }

        {
            let mut status = self.shared.write();
            *status = BridgeStatus::new();
            status.state = BridgeRunState::Running;
            status.started_at = Some(Utc::now());
        }

        let mut engine = TickEngine {
            reader: self.reader.clone(),
            mapper: self.mapper,
            emitter,
            axes: Arc::clone(&self.axes),
            shared: Arc::clone(&self.shared),
            last: TickDecision::NONE,
        };

        let running = Arc::clone(&self.running);
        let interval = self.interval;

        let handle = thread::Builder::new()
            .name("bridge-tick".into())
            .spawn(move || {
                while running.load(Ordering::SeqCst) {
                    engine.tick();
                    thread::sleep(interval);
                }
                // Never leave a key logically held behind us
                engine.release_all();
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                self.shared.write().state = BridgeRunState::Stopped;
                crate::Error::Emission(format!("failed to spawn tick thread: {}", e))
            })?;

        self.thread_handle = Some(handle);
        info!("bridge started, polling {:?} every {:?}", self.reader.path(), self.interval);

        Ok(())
    }

    /// Stop ticking. Idempotent: a no-op when already stopped.
    ///
    /// Joins the tick thread, so a tick in flight completes (including its
    /// key-up emission) before this returns.
    pub fn stop(&mut self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }

        let mut status = self.shared.write();
        status.state = BridgeRunState::Stopped;
        info!("bridge stopped after {} ticks ({} fresh)", status.ticks, status.fresh);
    }

    /// Check if the bridge is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Current status snapshot. Safe to call from any thread.
    pub fn status(&self) -> BridgeStatus {
        self.shared.read().clone()
    }

    /// Enable or disable following the horizontal axis
    pub fn set_follow_x(&self, enabled: bool) {
        self.axes.write().follow_x = enabled;
    }

    /// Enable or disable following the vertical axis
    pub fn set_follow_y(&self, enabled: bool) {
        self.axes.write().follow_y = enabled;
    }

    /// Current axis-follow flags
    pub fn axis_follow(&self) -> AxisFollowConfig {
        *self.axes.read()
    }
}

impl Drop for BridgeLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Per-thread tick state: the read → map → emit sequence and the keys it
/// currently holds down.
struct TickEngine {
    reader: GazeReader,
    mapper: ActionMapper,
    emitter: Box<dyn KeyEmitter>,
    axes: Arc<RwLock<AxisFollowConfig>>,
    shared: Arc<RwLock<BridgeStatus>>,
    /// Previous decision: doubles as the set of currently held keys and the
    /// hysteresis input for the next map call
    last: TickDecision,
}

impl TickEngine {
    fn tick(&mut self) {
        match self.reader.read() {
            ReadOutcome::Fresh(sample) => {
                let axes = *self.axes.read();
                let decision = self.mapper.map(&sample, axes, self.last);
                self.reconcile(decision);

                let mut status = self.shared.write();
                status.ticks += 1;
                status.fresh += 1;
                status.last_sample = Some(sample);
            }
            ReadOutcome::Unavailable => {
                // Expected before the producer starts or mid-replace; the
                // last-known sample stays published and nothing is emitted.
                debug!("tick: source unavailable");
                let mut status = self.shared.write();
                status.ticks += 1;
                status.unavailable += 1;
            }
            ReadOutcome::Invalid(err) => {
                // Torn writes are frequent with an unsynchronized producer;
                // dropped silently rather than surfaced as a fault.
                debug!("tick: source invalid: {}", err);
                let mut status = self.shared.write();
                status.ticks += 1;
                status.invalid += 1;
            }
        }
    }

    /// Bring held keys in line with the new decision: release a superseded
    /// direction before pressing its replacement, per axis.
    fn reconcile(&mut self, decision: TickDecision) {
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let held = self.last.for_axis(axis);
            let wanted = decision.for_axis(axis);

            if held == wanted {
                continue;
            }

            if let Some(action) = held {
                if let Err(e) = self.emitter.release(axis, action) {
                    self.record_emission_error(&e.to_string());
                } else {
                    self.shared.write().emitted += 1;
                }
            }

            if let Some(action) = wanted {
                if let Err(e) = self.emitter.press(axis, action) {
                    self.record_emission_error(&e.to_string());
                } else {
                    self.shared.write().emitted += 1;
                }
            }
        }

        self.last = decision;
    }

    /// Release everything still held. Called as the tick thread exits.
    fn release_all(&mut self) {
        self.reconcile(TickDecision::NONE);
    }

    fn record_emission_error(&self, message: &str) {
        warn!("key emission failed: {}", message);
        self.shared.write().last_emission_error = Some(message.to_string());
    }
}
