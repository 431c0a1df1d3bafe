//! Error taxonomy. Three tiers by how a caller is expected to react: a
//! recoverable per-tick/per-command error, a fatal kernel fault that ends
//! the simulation thread, and a startup error that prevents the process
//! from ever reaching a running kernel.

use thiserror::Error;

/// Recoverable error from a single command or a single tick's work. The
/// kernel logs these and continues ticking.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown drone id {0}")]
    UnknownDrone(u32),
    #[error("drone id {0} already registered")]
    DuplicateDrone(u32),
    #[error("coordinates ({x}, {y}) fall outside the fire grid")]
    OutOfBounds { x: f64, y: f64 },
    #[error("command rejected: {0}")]
    RejectedCommand(String),
}

/// Unrecoverable kernel error. The tick loop exits with status 2 on any
/// of these.
#[derive(Debug, Error)]
pub enum KernelFault {
    #[error("fire grid invariant violated: {0}")]
    FireGridCorrupted(String),
    #[error("snapshot channel closed, no receiver is listening")]
    SnapshotChannelClosed,
    #[error("kernel thread panicked: {0}")]
    ThreadPanic(String),
}

/// Startup error: config file missing/invalid, or a port bind failure.
/// The process exits with status 1 on any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
