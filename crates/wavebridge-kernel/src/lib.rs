//! `wavebridge-kernel` – safety arbitration.
//!
//! The single interception point between perception and actuation: every
//! movement intent must pass through [`safety_gate::arbitrate`] together
//! with a fresh obstacle snapshot before a command may reach the actuator
//! transport. Nothing else in the bridge is allowed to manufacture a
//! [`MotionCommand`][wavebridge_types::MotionCommand].

pub mod safety_gate;

pub use safety_gate::{SafetyVerdict, arbitrate};
