//! Configuration vault – reads `~/.wavebridge/config.toml`.
//!
//! Every field has a deployment-ready default, so a missing file simply
//! means "run with defaults". Environment overrides are applied once by
//! `main`, after the file (or the default) has been resolved.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use wavebridge_types::BridgeError;

/// How the obstacle snapshot is acquired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ObstacleMode {
    /// Poll the status file a continuously-running ranger rewrites.
    #[default]
    StatusFile,
    /// Invoke a one-shot ranging program per fetch.
    Probe,
}

impl std::fmt::Display for ObstacleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObstacleMode::StatusFile => write!(f, "status-file"),
            ObstacleMode::Probe => write!(f, "probe"),
        }
    }
}

/// Which actuator transport carries the motion commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Register-framed writes on an inter-chip bus device node.
    #[default]
    Bus,
    /// Newline-terminated writes on a serial line.
    Serial,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Bus => write!(f, "bus"),
            TransportMode::Serial => write!(f, "serial"),
        }
    }
}

/// Persisted configuration stored in `~/.wavebridge/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// TCP port the gesture server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// How obstacle state is acquired.
    #[serde(default)]
    pub obstacle_mode: ObstacleMode,

    /// Status file rewritten by the continuous ranger.
    #[serde(default = "default_status_file")]
    pub status_file: PathBuf,

    /// Warn when the status file is older than this many milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_after_ms: Option<u64>,

    /// One-shot ranging program for probe mode.
    #[serde(default = "default_probe_program")]
    pub probe_program: PathBuf,

    /// Bound on one obstacle fetch, in milliseconds.
    #[serde(default = "default_obstacle_timeout_ms")]
    pub obstacle_timeout_ms: u64,

    /// Which transport carries motion commands.
    #[serde(default)]
    pub transport: TransportMode,

    /// Bus device node (bus transport).
    #[serde(default = "default_bus_device")]
    pub bus_device: PathBuf,

    /// Peripheral register the motion controller reads commands from.
    #[serde(default)]
    pub bus_register: u8,

    /// Serial device node (serial transport).
    #[serde(default = "default_serial_device")]
    pub serial_device: PathBuf,
}

fn default_listen_port() -> u16 {
    wavebridge_server::server::DEFAULT_PORT
}
fn default_status_file() -> PathBuf {
    PathBuf::from("/tmp/lidar_status.txt")
}
fn default_probe_program() -> PathBuf {
    PathBuf::from("/usr/local/bin/robot_lidar")
}
fn default_obstacle_timeout_ms() -> u64 {
    2000
}
fn default_bus_device() -> PathBuf {
    PathBuf::from("/dev/i2c-1")
}
fn default_serial_device() -> PathBuf {
    PathBuf::from("/dev/ttyUSB0")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            obstacle_mode: ObstacleMode::default(),
            status_file: default_status_file(),
            stale_after_ms: None,
            probe_program: default_probe_program(),
            obstacle_timeout_ms: default_obstacle_timeout_ms(),
            transport: TransportMode::default(),
            bus_device: default_bus_device(),
            bus_register: 0,
            serial_device: default_serial_device(),
        }
    }
}

/// Return the path to `~/.wavebridge/config.toml`.
pub fn config_path() -> PathBuf {
    config_path_for_home(
        &std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string()),
    )
}

/// Build the config path relative to the given home directory.
/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_for_home(home: &str) -> PathBuf {
    PathBuf::from(home).join(".wavebridge").join("config.toml")
}

/// Load the config from disk. Returns `None` if the file does not exist.
pub fn load() -> Result<Option<Config>, BridgeError> {
    load_from(&config_path())
}

/// Load the config from a specific path.
pub(crate) fn load_from(path: &PathBuf) -> Result<Option<Config>, BridgeError> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| BridgeError::Config(format!("read {}: {e}", path.display())))?;
    let cfg: Config =
        toml::from_str(&raw).map_err(|e| BridgeError::Config(format!("parse config: {e}")))?;
    Ok(Some(cfg))
}

/// Apply `WAVEBRIDGE_*` environment variable overrides to `cfg`.
///
/// Supported variables:
///
/// | Variable | Config field |
/// |---|---|
/// | `WAVEBRIDGE_PORT` | `listen_port` |
/// | `WAVEBRIDGE_OBSTACLE_MODE` | `obstacle_mode` (`status-file` / `probe`) |
/// | `WAVEBRIDGE_STATUS_FILE` | `status_file` |
/// | `WAVEBRIDGE_PROBE_PROGRAM` | `probe_program` |
/// | `WAVEBRIDGE_TRANSPORT` | `transport` (`bus` / `serial`) |
/// | `WAVEBRIDGE_BUS_DEVICE` | `bus_device` |
/// | `WAVEBRIDGE_SERIAL_DEVICE` | `serial_device` |
///
/// Unparseable values are ignored and the configured value stands.
pub fn apply_env_overrides(cfg: &mut Config) {
    if let Ok(v) = std::env::var("WAVEBRIDGE_PORT")
        && let Ok(port) = v.parse::<u16>()
    {
        cfg.listen_port = port;
    }
    if let Ok(v) = std::env::var("WAVEBRIDGE_OBSTACLE_MODE") {
        match v.as_str() {
            "status-file" => cfg.obstacle_mode = ObstacleMode::StatusFile,
            "probe" => cfg.obstacle_mode = ObstacleMode::Probe,
            _ => {}
        }
    }
    if let Ok(v) = std::env::var("WAVEBRIDGE_STATUS_FILE") {
        cfg.status_file = PathBuf::from(v);
    }
    if let Ok(v) = std::env::var("WAVEBRIDGE_PROBE_PROGRAM") {
        cfg.probe_program = PathBuf::from(v);
    }
    if let Ok(v) = std::env::var("WAVEBRIDGE_TRANSPORT") {
        match v.as_str() {
            "bus" => cfg.transport = TransportMode::Bus,
            "serial" => cfg.transport = TransportMode::Serial,
            _ => {}
        }
    }
    if let Ok(v) = std::env::var("WAVEBRIDGE_BUS_DEVICE") {
        cfg.bus_device = PathBuf::from(v);
    }
    if let Ok(v) = std::env::var("WAVEBRIDGE_SERIAL_DEVICE") {
        cfg.serial_device = PathBuf::from(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_deployment_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.listen_port, 5555);
        assert_eq!(cfg.obstacle_mode, ObstacleMode::StatusFile);
        assert_eq!(cfg.status_file, PathBuf::from("/tmp/lidar_status.txt"));
        assert_eq!(cfg.stale_after_ms, None);
        assert_eq!(cfg.obstacle_timeout_ms, 2000);
        assert_eq!(cfg.transport, TransportMode::Bus);
        assert_eq!(cfg.bus_device, PathBuf::from("/dev/i2c-1"));
        assert_eq!(cfg.bus_register, 0);
        assert_eq!(cfg.serial_device, PathBuf::from("/dev/ttyUSB0"));
    }

    #[test]
    fn config_path_points_to_wavebridge_dir() {
        let p = config_path_for_home("/home/testuser");
        assert!(p.to_string_lossy().contains(".wavebridge"));
        assert!(p.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn load_from_returns_none_when_missing() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = config_path_for_home(&dir.path().to_string_lossy());
        let result = load_from(&path).expect("no error");
        assert!(result.is_none());
    }

    #[test]
    fn partial_file_fills_the_rest_with_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "listen_port = 6000\ntransport = \"serial\"\n").expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.listen_port, 6000);
        assert_eq!(cfg.transport, TransportMode::Serial);
        assert_eq!(cfg.status_file, PathBuf::from("/tmp/lidar_status.txt"));
        assert_eq!(cfg.obstacle_mode, ObstacleMode::StatusFile);
    }

    #[test]
    fn full_file_loads_every_field() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            concat!(
                "listen_port = 7000\n",
                "obstacle_mode = \"probe\"\n",
                "probe_program = \"/opt/ranging/probe\"\n",
                "obstacle_timeout_ms = 500\n",
                "stale_after_ms = 200\n",
                "transport = \"serial\"\n",
                "serial_device = \"/dev/ttyAMA0\"\n",
                "bus_register = 16\n",
            ),
        )
        .expect("write");

        let cfg = load_from(&path).expect("load ok").expect("some");
        assert_eq!(cfg.listen_port, 7000);
        assert_eq!(cfg.obstacle_mode, ObstacleMode::Probe);
        assert_eq!(cfg.probe_program, PathBuf::from("/opt/ranging/probe"));
        assert_eq!(cfg.obstacle_timeout_ms, 500);
        assert_eq!(cfg.stale_after_ms, Some(200));
        assert_eq!(cfg.transport, TransportMode::Serial);
        assert_eq!(cfg.serial_device, PathBuf::from("/dev/ttyAMA0"));
        assert_eq!(cfg.bus_register, 16);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "listen_port = \"not a number").expect("write");

        let err = load_from(&path).expect_err("must fail");
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn env_override_sets_valid_port_and_ignores_invalid() {
        // SAFETY: no other test touches this env-var.
        unsafe { std::env::set_var("WAVEBRIDGE_PORT", "7777") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.listen_port, 7777);

        unsafe { std::env::set_var("WAVEBRIDGE_PORT", "not-a-port") };
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.listen_port, 7777);
        unsafe { std::env::remove_var("WAVEBRIDGE_PORT") };
    }

    #[test]
    fn env_override_switches_obstacle_mode() {
        // SAFETY: no other test touches this env-var.
        unsafe { std::env::set_var("WAVEBRIDGE_OBSTACLE_MODE", "probe") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.obstacle_mode, ObstacleMode::Probe);

        unsafe { std::env::set_var("WAVEBRIDGE_OBSTACLE_MODE", "telepathy") };
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.obstacle_mode, ObstacleMode::Probe);
        unsafe { std::env::remove_var("WAVEBRIDGE_OBSTACLE_MODE") };
    }

    #[test]
    fn env_override_switches_transport() {
        // SAFETY: no other test touches this env-var.
        unsafe { std::env::set_var("WAVEBRIDGE_TRANSPORT", "serial") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.transport, TransportMode::Serial);
        unsafe { std::env::remove_var("WAVEBRIDGE_TRANSPORT") };
    }

    #[test]
    fn env_override_replaces_device_paths() {
        // SAFETY: no other test touches these env-vars.
        unsafe { std::env::set_var("WAVEBRIDGE_STATUS_FILE", "/run/ranger/status") };
        unsafe { std::env::set_var("WAVEBRIDGE_SERIAL_DEVICE", "/dev/ttyS3") };
        let mut cfg = Config::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.status_file, PathBuf::from("/run/ranger/status"));
        assert_eq!(cfg.serial_device, PathBuf::from("/dev/ttyS3"));
        unsafe { std::env::remove_var("WAVEBRIDGE_STATUS_FILE") };
        unsafe { std::env::remove_var("WAVEBRIDGE_SERIAL_DEVICE") };
    }
}
