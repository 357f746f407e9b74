//! Optional `StatusDisplay` collaborator trait.
//!
//! Some deployments carry a small face display that mirrors the operator's
//! gestures. Rendering belongs to the display driver; the bridge only tells
//! it which expression to show and asks for a neutral reset on shutdown.

use wavebridge_types::{BridgeError, Expression};

/// An attached expression display.
pub trait StatusDisplay: Send + Sync {
    /// Stable identifier for this display, e.g. `"oled"`.
    fn id(&self) -> &str;

    /// Show `expression`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Transport`] when the display hardware
    /// rejects the update. The caller logs and swallows this.
    fn show(&mut self, expression: Expression) -> Result<(), BridgeError>;

    /// Reset to the neutral resting face.
    ///
    /// # Errors
    ///
    /// Same contract as [`show`][Self::show].
    fn clear(&mut self) -> Result<(), BridgeError>;
}
