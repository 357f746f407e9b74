use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder value for gesture fields whose labeled segment was absent
/// from the wire payload.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One decoded hand-gesture classification sample.
///
/// Parsed from a `|`-separated `Label:Value` payload by
/// `wavebridge-perception`; every field falls back to [`UNKNOWN_LABEL`]
/// when its segment is missing. The decoder performs no validation of the
/// value domains; unrecognised signs simply map to a stop intent later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Which hand was classified (e.g. "Left", "Right").
    pub hand: String,
    /// Primary classifier output (e.g. "Open", "Close", "Peace sign").
    pub sign: String,
    /// Secondary classifier output, independently present (e.g. "Left").
    pub gesture: String,
}

impl Default for GestureEvent {
    fn default() -> Self {
        Self {
            hand: UNKNOWN_LABEL.to_string(),
            sign: UNKNOWN_LABEL.to_string(),
            gesture: UNKNOWN_LABEL.to_string(),
        }
    }
}

/// Movement intent derived from a [`GestureEvent`], before safety
/// arbitration has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "FORWARD"),
            Direction::Backward => write!(f, "BACKWARD"),
            Direction::Left => write!(f, "LEFT"),
            Direction::Right => write!(f, "RIGHT"),
            Direction::Stop => write!(f, "STOP"),
        }
    }
}

/// The single-byte command actually dispatched to the actuator transport.
///
/// A [`Direction`] is an unchecked intent; a `MotionCommand` has passed
/// the safety gate (or been forced to [`MotionCommand::Stop`] by it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionCommand {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
}

impl MotionCommand {
    /// The wire byte understood by the motor controller firmware.
    pub fn as_byte(self) -> u8 {
        match self {
            MotionCommand::Forward => b'F',
            MotionCommand::Backward => b'B',
            MotionCommand::Left => b'L',
            MotionCommand::Right => b'R',
            MotionCommand::Stop => b'S',
        }
    }
}

impl From<Direction> for MotionCommand {
    /// The command a direction maps to when no veto applies.
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Forward => MotionCommand::Forward,
            Direction::Backward => MotionCommand::Backward,
            Direction::Left => MotionCommand::Left,
            Direction::Right => MotionCommand::Right,
            Direction::Stop => MotionCommand::Stop,
        }
    }
}

impl std::fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}

/// Point-in-time obstruction state for the three sensed zones.
///
/// `true` means obstructed. Keys absent from the ranging source default to
/// `false`, so an unreported zone reads as clear. A snapshot is fetched
/// fresh for every processed gesture event and never cached across
/// requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleSnapshot {
    pub front: bool,
    pub left: bool,
    pub right: bool,
}

impl ObstacleSnapshot {
    /// The fail-open snapshot: nothing obstructed.
    ///
    /// Returned by the obstacle-fetch stage whenever the backing source is
    /// missing, unreadable, or times out.
    pub const fn all_clear() -> Self {
        Self {
            front: false,
            left: false,
            right: false,
        }
    }
}

/// Affect shown on an attached status display while a gesture is handled.
///
/// Rendering is owned by the external display collaborator; the bridge only
/// selects which expression to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Happy,
    Neutral,
    Excited,
    Spinning,
    Focused,
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Happy => write!(f, "happy"),
            Expression::Neutral => write!(f, "neutral"),
            Expression::Excited => write!(f, "excited"),
            Expression::Spinning => write!(f, "spinning"),
            Expression::Focused => write!(f, "focused"),
        }
    }
}

/// Global error type spanning transport faults, obstacle-source failures,
/// and server-side problems.
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum BridgeError {
    #[error("Transport fault on {component}: {details}")]
    Transport { component: String, details: String },

    #[error("Obstacle source error: {0}")]
    Obstacle(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
