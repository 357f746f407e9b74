//! In-process simulation drivers for headless testing without hardware.
//!
//! Recording stand-ins for the obstacle source, the command sink and the
//! status display. Each hands out shared handles to its journal so a test
//! can keep asserting after the driver has been boxed into the pipeline.
//!
//! # Example
//!
//! ```rust
//! use wavebridge_hal::sim::SimCommandSink;
//!
//! let sink = SimCommandSink::new();
//! let journal = sink.journal();
//! assert!(journal.lock().unwrap().is_empty());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use wavebridge_types::{BridgeError, Expression, MotionCommand, ObstacleSnapshot};

use crate::display::StatusDisplay;
use crate::obstacle::ObstacleSource;
use crate::sink::CommandSink;

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ────────────────────────────────────────────────────────────────────────────
// Sim obstacle source
// ────────────────────────────────────────────────────────────────────────────

enum SimZones {
    Fixed(ObstacleSnapshot),
    Scripted(Mutex<VecDeque<Result<ObstacleSnapshot, BridgeError>>>),
    Failing(String),
    Stalled,
}

/// A simulated obstacle source with a configurable answer per fetch.
///
/// Counts every fetch so tests can assert how often the pipeline consulted
/// the ranging side.
pub struct SimObstacleSource {
    zones: SimZones,
    fetches: Arc<AtomicUsize>,
}

impl SimObstacleSource {
    fn with_zones(zones: SimZones) -> Box<Self> {
        Box::new(Self {
            zones,
            fetches: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// A source whose zones are always all clear.
    pub fn clear() -> Box<Self> {
        Self::fixed(ObstacleSnapshot::all_clear())
    }

    /// A source that always returns `snapshot`.
    pub fn fixed(snapshot: ObstacleSnapshot) -> Box<Self> {
        Self::with_zones(SimZones::Fixed(snapshot))
    }

    /// A source that plays back `results` one fetch at a time, then keeps
    /// returning the all-clear snapshot once exhausted.
    pub fn scripted(results: Vec<Result<ObstacleSnapshot, BridgeError>>) -> Box<Self> {
        Self::with_zones(SimZones::Scripted(Mutex::new(results.into())))
    }

    /// A source whose every fetch fails with `details`.
    pub fn failing(details: impl Into<String>) -> Box<Self> {
        Self::with_zones(SimZones::Failing(details.into()))
    }

    /// A source whose fetch never completes, for exercising timeout paths.
    pub fn stalled() -> Box<Self> {
        Self::with_zones(SimZones::Stalled)
    }

    /// Shared fetch counter, incremented once per [`fetch`][ObstacleSource::fetch].
    pub fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }
}

#[async_trait]
impl ObstacleSource for SimObstacleSource {
    fn id(&self) -> &str {
        "sim"
    }

    async fn fetch(&self) -> Result<ObstacleSnapshot, BridgeError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.zones {
            SimZones::Fixed(snapshot) => Ok(*snapshot),
            SimZones::Scripted(queue) => lock_unpoisoned(queue)
                .pop_front()
                .unwrap_or(Ok(ObstacleSnapshot::all_clear())),
            SimZones::Failing(details) => Err(BridgeError::Obstacle(details.clone())),
            SimZones::Stalled => std::future::pending().await,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sim command sink
// ────────────────────────────────────────────────────────────────────────────

/// A simulated command sink that journals every delivered command.
pub struct SimCommandSink {
    journal: Arc<Mutex<Vec<MotionCommand>>>,
    failure: Option<String>,
}

impl SimCommandSink {
    /// A sink that records every command and always succeeds.
    pub fn new() -> Box<Self> {
        Box::new(Self {
            journal: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        })
    }

    /// A sink whose every send fails with `details`; nothing is recorded.
    pub fn failing(details: impl Into<String>) -> Box<Self> {
        Box::new(Self {
            journal: Arc::new(Mutex::new(Vec::new())),
            failure: Some(details.into()),
        })
    }

    /// Shared journal of the commands delivered so far, in send order.
    pub fn journal(&self) -> Arc<Mutex<Vec<MotionCommand>>> {
        Arc::clone(&self.journal)
    }
}

#[async_trait]
impl CommandSink for SimCommandSink {
    fn id(&self) -> &str {
        "sim"
    }

    fn is_ready(&self) -> bool {
        true
    }

    async fn send(&mut self, command: MotionCommand) -> Result<(), BridgeError> {
        if let Some(details) = &self.failure {
            return Err(BridgeError::Transport {
                component: "sim".to_string(),
                details: details.clone(),
            });
        }
        lock_unpoisoned(&self.journal).push(command);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sim display
// ────────────────────────────────────────────────────────────────────────────

/// A simulated status display that journals shown expressions and counts
/// neutral resets.
pub struct SimDisplay {
    shown: Arc<Mutex<Vec<Expression>>>,
    clears: Arc<AtomicUsize>,
}

impl SimDisplay {
    /// A display that records everything and always succeeds.
    pub fn new() -> Box<Self> {
        Box::new(Self {
            shown: Arc::new(Mutex::new(Vec::new())),
            clears: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Shared journal of expressions shown so far, in call order.
    pub fn shown(&self) -> Arc<Mutex<Vec<Expression>>> {
        Arc::clone(&self.shown)
    }

    /// Shared count of [`clear`][StatusDisplay::clear] calls.
    pub fn clear_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.clears)
    }
}

impl StatusDisplay for SimDisplay {
    fn id(&self) -> &str {
        "sim"
    }

    fn show(&mut self, expression: Expression) -> Result<(), BridgeError> {
        lock_unpoisoned(&self.shown).push(expression);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), BridgeError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
