//! File-polling obstacle source.
//!
//! A continuously-running ranging process rewrites a small status file
//! (about every 60 ms in the reference deployment) with one
//! `Front:V|Left:V|Right:V` line. This adapter reads that file on demand.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{trace, warn};
use wavebridge_perception::ranging::parse_status_line;
use wavebridge_types::{BridgeError, ObstacleSnapshot};

use crate::obstacle::ObstacleSource;

/// Reads the ranging status file published by an external continuous ranger.
///
/// A missing file means the ranger has not started publishing yet and yields
/// the all-clear snapshot without an error. Read failures on an existing
/// file are reported to the caller.
pub struct FileObstacleSource {
    path: PathBuf,
    stale_after: Option<Duration>,
}

impl FileObstacleSource {
    /// Create a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            stale_after: None,
        }
    }

    /// Warn when the file's last modification is older than `window`.
    ///
    /// A stale file silently yields stale zone state; the warning makes a
    /// dead ranger visible in the logs without changing any behavior.
    pub fn with_stale_after(mut self, window: Duration) -> Self {
        self.stale_after = Some(window);
        self
    }

    async fn warn_if_stale(&self) {
        let Some(window) = self.stale_after else {
            return;
        };
        let age = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta.modified().ok().and_then(|t| t.elapsed().ok()),
            Err(_) => None,
        };
        if let Some(age) = age
            && age > window
        {
            warn!(
                path = %self.path.display(),
                age_ms = age.as_millis() as u64,
                window_ms = window.as_millis() as u64,
                "ranging status file is stale, zone state may be outdated"
            );
        }
    }
}

#[async_trait]
impl ObstacleSource for FileObstacleSource {
    fn id(&self) -> &str {
        "status-file"
    }

    async fn fetch(&self) -> Result<ObstacleSnapshot, BridgeError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                self.warn_if_stale().await;
                Ok(parse_status_line(&contents))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "status file absent, assuming clear");
                Ok(ObstacleSnapshot::all_clear())
            }
            Err(e) => Err(BridgeError::Obstacle(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn reads_and_parses_the_status_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Front:0|Left:1|Right:0").unwrap();

        let source = FileObstacleSource::new(file.path());
        let snap = source.fetch().await.unwrap();
        assert!(!snap.front);
        assert!(snap.left);
        assert!(!snap.right);
    }

    #[tokio::test]
    async fn missing_file_yields_all_clear_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileObstacleSource::new(dir.path().join("never_written.txt"));
        let snap = source.fetch().await.unwrap();
        assert_eq!(snap, ObstacleSnapshot::all_clear());
    }

    #[tokio::test]
    async fn unreadable_contents_surface_as_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, 0xFD]).unwrap();

        let source = FileObstacleSource::new(file.path());
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, BridgeError::Obstacle(_)));
    }

    #[tokio::test]
    async fn empty_file_is_all_clear() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = FileObstacleSource::new(file.path());
        assert_eq!(source.fetch().await.unwrap(), ObstacleSnapshot::all_clear());
    }

    #[tokio::test]
    async fn staleness_window_does_not_change_the_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Front:1").unwrap();

        // Zero window marks any read as stale; the data must still flow.
        let source =
            FileObstacleSource::new(file.path()).with_stale_after(Duration::from_millis(0));
        let snap = source.fetch().await.unwrap();
        assert!(snap.front);
    }
}
