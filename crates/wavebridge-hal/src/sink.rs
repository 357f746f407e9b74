//! Generic `CommandSink` trait for motion command delivery.
//!
//! The robot's motion controller sits on the far side of a single serial
//! resource (an inter-chip bus or a serial line). A `CommandSink` owns that
//! resource for the lifetime of the process; the pipeline is its only
//! caller, so writes are never interleaved.

use async_trait::async_trait;
use wavebridge_types::{BridgeError, MotionCommand};

/// Delivery of one final motion command to the robot's controller.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Stable identifier for this sink, e.g. `"bus"` or `"serial"`.
    fn id(&self) -> &str;

    /// Whether the underlying transport was opened successfully. A sink
    /// that is not ready drops commands instead of failing.
    fn is_ready(&self) -> bool;

    /// Deliver `command` to the controller.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Transport`] when the transport is open but
    /// the write fails. The caller logs and swallows this; a command is
    /// never retried.
    async fn send(&mut self, command: MotionCommand) -> Result<(), BridgeError>;
}
