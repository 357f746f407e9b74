//! Generic `ObstacleSource` trait for on-demand ranging reads.
//!
//! The ranging process itself is an external collaborator; an
//! `ObstacleSource` only acquires its latest published zone state. Two
//! adapters exist: [`FileObstacleSource`][crate::status_file::FileObstacleSource]
//! for a continuously-rewritten status file and
//! [`ProbeObstacleSource`][crate::probe::ProbeObstacleSource] for a one-shot
//! probe program.

use async_trait::async_trait;
use wavebridge_types::{BridgeError, ObstacleSnapshot};

/// On-demand acquisition of the current obstruction state.
///
/// Implementations report acquisition failures honestly. The fail-open
/// policy (degrading any failure or timeout to the all-clear snapshot)
/// belongs to the consumer, which also bounds every fetch with its own
/// timeout; a fetch must therefore tolerate being cancelled at any await
/// point.
///
/// A snapshot is fetched fresh for every processed gesture event and never
/// cached across requests.
#[async_trait]
pub trait ObstacleSource: Send + Sync {
    /// Stable identifier for this source, e.g. `"status-file"` or `"probe"`.
    fn id(&self) -> &str;

    /// Read the latest zone state the ranging process has published.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Obstacle`] when the backing resource cannot
    /// be read or its output cannot be interpreted.
    async fn fetch(&self) -> Result<ObstacleSnapshot, BridgeError>;
}
