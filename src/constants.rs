//! Centralized constants for the q-rand crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// External API endpoints
pub mod api {
    /// IBM Quantum REST API base URL
    pub const IBM_QUANTUM_API_URL: &str = "https://api.quantum.ibm.com";
}

/// Credential settings
pub mod credential {
    /// Hidden token file in the user's home directory
    pub const TOKEN_FILE_NAME: &str = ".ibmq-token";
}

/// Job settings
pub mod job {
    /// Simulator backend used when the requested device is unavailable
    pub const SIMULATOR_BACKEND: &str = "ibmq_qasm_simulator";

    /// Qubit count assumed for the simulator when the provider omits it
    pub const SIMULATOR_QUBITS: usize = 32;

    /// HTTP request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}
