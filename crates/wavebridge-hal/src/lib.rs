//! `wavebridge-hal` – Hardware Abstraction Layer
//!
//! Trait seams over the physical collaborators the bridge talks to, plus the
//! concrete adapters for each. The pipeline only ever speaks to the traits,
//! so real devices can be swapped for in-process simulators in tests.
//!
//! # Modules
//!
//! - [`obstacle`] – [`ObstacleSource`][obstacle::ObstacleSource]: on-demand
//!   zone-state reads from the external ranging process.
//! - [`status_file`] – [`FileObstacleSource`][status_file::FileObstacleSource]:
//!   polls the status file a continuously-running ranger keeps rewriting.
//! - [`probe`] – [`ProbeObstacleSource`][probe::ProbeObstacleSource]: invokes
//!   a one-shot ranging program and parses its stdout.
//! - [`sink`] – [`CommandSink`][sink::CommandSink]: delivery of the final
//!   one-byte motion command to the robot's controller.
//! - [`bus`] – [`BusCommandSink`][bus::BusCommandSink]: register-framed
//!   writes to an inter-chip bus device node.
//! - [`serial`] – [`SerialCommandSink`][serial::SerialCommandSink]:
//!   newline-terminated writes to a serial line.
//! - [`display`] – [`StatusDisplay`][display::StatusDisplay]: optional
//!   expression feedback collaborator.
//! - [`sim`] – recording in-process drivers for headless tests.

pub mod bus;
pub mod display;
pub mod obstacle;
pub mod probe;
pub mod serial;
pub mod sim;
pub mod sink;
pub mod status_file;

pub use bus::BusCommandSink;
pub use display::StatusDisplay;
pub use obstacle::ObstacleSource;
pub use probe::ProbeObstacleSource;
pub use serial::SerialCommandSink;
pub use sink::CommandSink;
pub use status_file::FileObstacleSource;
