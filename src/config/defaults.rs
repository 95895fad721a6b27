//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default randomness source
pub const DEFAULT_SOURCE: &str = "ibmq";

/// Default IBM Quantum backend
pub const DEFAULT_BACKEND: &str = "ibmq_lima";

/// Default number of shots per measurement job
pub const DEFAULT_SHOTS: u32 = 1024;

/// Default poll interval for job status in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default maximum wait for job completion in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "q-rand";
