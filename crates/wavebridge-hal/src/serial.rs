//! Serial line command sink.
//!
//! The motion controller reads newline-terminated single-character commands
//! from a serial line. Baud rate and framing are configured on the device
//! before this process starts (`stty` or equivalent); the sink writes
//! `"<cmd>\n"` and flushes.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, trace, warn};
use wavebridge_types::{BridgeError, MotionCommand};

use crate::sink::CommandSink;

/// Writes `"<cmd>\n"` lines to an opened serial device.
///
/// A device that cannot be opened leaves the sink in degraded mode: the
/// server still runs, commands are logged and dropped.
pub struct SerialCommandSink {
    device: PathBuf,
    handle: Option<File>,
}

impl SerialCommandSink {
    /// Open `device` for writing.
    ///
    /// Never fails; an unopenable device is reported in the logs and the
    /// sink starts degraded.
    pub async fn open(device: impl Into<PathBuf>) -> Self {
        let device = device.into();
        let handle = match OpenOptions::new().write(true).open(&device).await {
            Ok(file) => {
                info!(device = %device.display(), "serial line ready");
                Some(file)
            }
            Err(e) => {
                warn!(
                    device = %device.display(),
                    error = %e,
                    "serial line unavailable, motion commands will be dropped"
                );
                None
            }
        };
        Self { device, handle }
    }
}

#[async_trait]
impl CommandSink for SerialCommandSink {
    fn id(&self) -> &str {
        "serial"
    }

    fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    async fn send(&mut self, command: MotionCommand) -> Result<(), BridgeError> {
        let Some(handle) = self.handle.as_mut() else {
            trace!(%command, "serial line not open, dropping command");
            return Ok(());
        };

        let frame = [command.as_byte(), b'\n'];
        let deliver = async {
            handle.write_all(&frame).await?;
            handle.flush().await
        };
        deliver.await.map_err(|e| BridgeError::Transport {
            component: "serial".to_string(),
            details: format!("write {}: {e}", self.device.display()),
        })
    }
}
