//! Inter-chip bus command sink.
//!
//! The motion controller listens as a bus peripheral and takes each command
//! as a register-framed two-byte write: the register address followed by
//! the command byte. Addressing and bus timing are configured on the device
//! node before this process starts; the sink only performs the framed
//! writes.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, trace, warn};
use wavebridge_types::{BridgeError, MotionCommand};

use crate::sink::CommandSink;

/// Writes `[register, command]` frames to an opened bus device node.
///
/// A device that cannot be opened leaves the sink in degraded mode: the
/// server still runs, commands are logged and dropped.
pub struct BusCommandSink {
    device: PathBuf,
    register: u8,
    handle: Option<File>,
}

impl BusCommandSink {
    /// Open `device` for writing, targeting `register` on the peripheral.
    ///
    /// Never fails; an unopenable device is reported in the logs and the
    /// sink starts degraded.
    pub async fn open(device: impl Into<PathBuf>, register: u8) -> Self {
        let device = device.into();
        let handle = match OpenOptions::new().write(true).open(&device).await {
            Ok(file) => {
                info!(device = %device.display(), register, "actuator bus ready");
                Some(file)
            }
            Err(e) => {
                warn!(
                    device = %device.display(),
                    error = %e,
                    "actuator bus unavailable, motion commands will be dropped"
                );
                None
            }
        };
        Self {
            device,
            register,
            handle,
        }
    }
}

#[async_trait]
impl CommandSink for BusCommandSink {
    fn id(&self) -> &str {
        "bus"
    }

    fn is_ready(&self) -> bool {
        self.handle.is_some()
    }

    async fn send(&mut self, command: MotionCommand) -> Result<(), BridgeError> {
        let Some(handle) = self.handle.as_mut() else {
            trace!(%command, "bus not open, dropping command");
            return Ok(());
        };

        let frame = [self.register, command.as_byte()];
        let deliver = async {
            handle.write_all(&frame).await?;
            handle.flush().await
        };
        deliver.await.map_err(|e| BridgeError::Transport {
            component: "bus".to_string(),
            details: format!("write {}: {e}", self.device.display()),
        })
    }
}
