//! The per-request decision pipeline.
//!
//! Each payload flows strictly one way: decode, expression update, intent
//! mapping, obstacle fetch, arbitration, dispatch. Nothing is cached across
//! requests; the obstacle snapshot is fetched fresh for every event,
//! strictly after decoding and strictly before dispatch.
//!
//! Per-stage failure policy:
//!
//! | Stage | On failure |
//! |-------|------------|
//! | decode | total, cannot fail |
//! | display update | logged, swallowed |
//! | obstacle fetch | logged, degrades to the all-clear snapshot |
//! | dispatch | logged, swallowed, never retried |
//!
//! Fail-open on the obstacle side privileges availability of motion over
//! unconditional safety. That trade-off is part of the contract here; a
//! fail-closed variant is a deployment decision, not a local fix.

use std::time::Duration;

use tracing::{debug, info, warn};
use wavebridge_hal::{CommandSink, ObstacleSource, StatusDisplay};
use wavebridge_kernel::arbitrate;
use wavebridge_perception::expression::expression_for;
use wavebridge_perception::gesture::decode_payload;
use wavebridge_perception::intent::map_direction;
use wavebridge_types::ObstacleSnapshot;

/// Bound on one obstacle fetch. Matches the default budget of the one-shot
/// ranging probe, the slowest source in use.
pub const DEFAULT_OBSTACLE_TIMEOUT: Duration = Duration::from_secs(2);

fn zone_state(blocked: bool) -> &'static str {
    if blocked { "BLOCKED" } else { "clear" }
}

/// Drives one decoded gesture payload to one dispatched motion command.
///
/// Owns the process-wide transport handles for its whole lifetime; the
/// caller never processes two payloads concurrently, so the actuator
/// transport only ever sees ordered, non-interleaved writes.
pub struct BridgePipeline {
    source: Box<dyn ObstacleSource>,
    sink: Box<dyn CommandSink>,
    display: Option<Box<dyn StatusDisplay>>,
    obstacle_timeout: Duration,
}

impl BridgePipeline {
    /// Create a pipeline over an obstacle source and a command sink, with
    /// no display attached and the
    /// [default obstacle timeout][DEFAULT_OBSTACLE_TIMEOUT].
    pub fn new(source: Box<dyn ObstacleSource>, sink: Box<dyn CommandSink>) -> Self {
        Self {
            source,
            sink,
            display: None,
            obstacle_timeout: DEFAULT_OBSTACLE_TIMEOUT,
        }
    }

    /// Attach an expression display (builder-style).
    pub fn with_display(mut self, display: Box<dyn StatusDisplay>) -> Self {
        self.display = Some(display);
        self
    }

    /// Override the obstacle fetch bound (builder-style).
    pub fn with_obstacle_timeout(mut self, timeout: Duration) -> Self {
        self.obstacle_timeout = timeout;
        self
    }

    /// Process one non-empty payload end to end.
    ///
    /// Never fails: every stage failure is handled according to the policy
    /// table in the module docs, and the event counts as processed even
    /// when the physical command was not delivered.
    pub async fn process(&mut self, payload: &str) {
        let event = decode_payload(payload);
        info!(
            hand = %event.hand,
            sign = %event.sign,
            gesture = %event.gesture,
            "gesture received"
        );

        if let Some(display) = &mut self.display {
            let expression = expression_for(&event);
            if let Err(e) = display.show(expression) {
                // Bound outside the macro: `tracing`'s expansion imports
                // `field::display`, which shadows a variable of that name.
                let display_id = display.id();
                warn!(display = display_id, error = %e, "display update failed");
            }
        }

        let direction = map_direction(&event);
        info!(%direction, "movement intent");

        let obstacles = self.fetch_obstacles().await;
        info!(
            front = zone_state(obstacles.front),
            left = zone_state(obstacles.left),
            right = zone_state(obstacles.right),
            "zone state"
        );

        let verdict = arbitrate(direction, &obstacles);
        if verdict.vetoed {
            warn!(%direction, "path blocked, forcing stop");
        } else {
            info!(command = %verdict.command, "path clear, executing");
        }

        match self.sink.send(verdict.command).await {
            Ok(()) => {
                debug!(sink = self.sink.id(), command = %verdict.command, "command dispatched");
            }
            Err(e) => {
                warn!(sink = self.sink.id(), error = %e, "command dispatch failed");
            }
        }
    }

    /// Ask the attached display, if any, to return to its neutral face.
    /// Called on server shutdown.
    pub fn reset_display(&mut self) {
        if let Some(display) = &mut self.display
            && let Err(e) = display.clear()
        {
            let display_id = display.id();
            warn!(display = display_id, error = %e, "display reset failed");
        }
    }

    /// Fetch the current snapshot, degrading any failure or timeout to
    /// all-clear.
    async fn fetch_obstacles(&self) -> ObstacleSnapshot {
        match tokio::time::timeout(self.obstacle_timeout, self.source.fetch()).await {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(e)) => {
                warn!(
                    source = self.source.id(),
                    error = %e,
                    "obstacle fetch failed, assuming clear"
                );
                ObstacleSnapshot::all_clear()
            }
            Err(_) => {
                warn!(
                    source = self.source.id(),
                    timeout_ms = self.obstacle_timeout.as_millis() as u64,
                    "obstacle fetch timed out, assuming clear"
                );
                ObstacleSnapshot::all_clear()
            }
        }
    }
}
