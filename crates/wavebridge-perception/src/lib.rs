//! `wavebridge-perception` – sensor-side interpretation.
//!
//! Turns the text artifacts produced by the external classifiers and the
//! ranging process into the typed values the rest of the bridge reasons
//! about. Everything here is a pure function over its input; no I/O, no
//! state.
//!
//! # Modules
//!
//! - [`gesture`] – decodes one `Label:Value|...` wire payload into a
//!   [`GestureEvent`][wavebridge_types::GestureEvent].
//! - [`intent`] – maps a decoded event to a movement
//!   [`Direction`][wavebridge_types::Direction] with a fixed priority order.
//! - [`ranging`] – parses a ranging status line into an
//!   [`ObstacleSnapshot`][wavebridge_types::ObstacleSnapshot].
//! - [`expression`] – selects the [`Expression`][wavebridge_types::Expression]
//!   an attached status display should show for an event.

pub mod expression;
pub mod gesture;
pub mod intent;
pub mod ranging;
