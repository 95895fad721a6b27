//! IBM Quantum provider session
//!
//! An explicit session value owning the HTTP client, the credential, and the
//! selected backend. Provider/backend selection is per-session state held
//! here, never process-global.
//!
//! The session uses a blocking HTTP client; callers running inside an async
//! runtime must push calls onto a separate thread via [`off_runtime`].

use crate::constants::api::IBM_QUANTUM_API_URL;
use crate::constants::job::{HTTP_TIMEOUT_SECS, SIMULATOR_BACKEND, SIMULATOR_QUBITS};
use crate::error::{Error, Result};
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Run a blocking provider call on its own thread
///
/// reqwest's blocking client panics when driven from inside an async
/// runtime, so remote calls are pushed onto a dedicated thread.
pub fn off_runtime<T, F>(f: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> Result<T> + Send,
{
    std::thread::scope(|scope| {
        scope
            .spawn(f)
            .join()
            .unwrap_or_else(|_| Err(Error::Provider("provider thread panicked".to_string())))
    })
}

/// Backend status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    /// Backend is online and accepting jobs
    Online,

    /// Backend is offline for maintenance
    Offline,

    /// Backend is paused
    Paused,

    /// Backend status is unknown
    #[default]
    #[serde(other)]
    Unknown,
}

/// Backend information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name
    pub name: String,

    /// Number of qubits
    #[serde(default)]
    pub n_qubits: usize,

    /// Backend status
    #[serde(default)]
    pub status: BackendStatus,

    /// Pending jobs in queue
    #[serde(default)]
    pub pending_jobs: usize,

    /// Is simulator
    #[serde(default)]
    pub simulator: bool,
}

impl BackendInfo {
    /// Synthetic entry for the simulator fallback, used when the provider's
    /// listing does not include it
    pub fn simulator_fallback() -> Self {
        Self {
            name: SIMULATOR_BACKEND.to_string(),
            n_qubits: SIMULATOR_QUBITS,
            status: BackendStatus::Online,
            pending_jobs: 0,
            simulator: true,
        }
    }

    /// Check if the backend is online and accepting jobs
    pub fn is_available(&self) -> bool {
        self.status == BackendStatus::Online
    }
}

/// Pick the backend to use for `requested` from the provider's list
///
/// Unknown or offline backends downgrade to the QASM simulator, mirroring
/// the provider client's observed behavior. Returns the chosen backend and
/// whether a downgrade happened.
pub fn resolve_backend(requested: &str, available: &[BackendInfo]) -> (BackendInfo, bool) {
    if let Some(backend) = available
        .iter()
        .find(|b| b.name == requested && b.is_available())
    {
        return (backend.clone(), false);
    }

    let simulator = available
        .iter()
        .find(|b| b.name == SIMULATOR_BACKEND)
        .cloned()
        .unwrap_or_else(BackendInfo::simulator_fallback);

    (simulator, true)
}

/// Options for measurement jobs
#[derive(Debug, Clone)]
pub struct JobOptions {
    /// Shots per measurement job
    pub shots: u32,

    /// Poll interval for job status
    pub poll_interval: Duration,

    /// Maximum wait for job completion
    pub timeout: Duration,
}

impl Default for JobOptions {
    fn default() -> Self {
        use crate::config::defaults::*;
        Self {
            shots: DEFAULT_SHOTS,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl From<&crate::config::JobConfig> for JobOptions {
    fn from(config: &crate::config::JobConfig) -> Self {
        Self {
            shots: config.shots,
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    /// Job is queued
    Queued,

    /// Job is running
    Running,

    /// Job completed successfully
    Completed,

    /// Job failed
    Failed,

    /// Job was cancelled
    Cancelled,

    /// Unknown status
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Check if job is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Cancelled
        )
    }
}

/// Handle for a submitted measurement job
#[derive(Debug, Clone)]
pub struct Job {
    /// Job ID
    pub id: String,

    /// Backend name
    pub backend: String,

    /// Current status
    pub status: JobStatus,

    /// Submission time
    pub created_at: chrono::DateTime<chrono::Utc>,

    /// Number of shots
    pub shots: u32,
}

impl Job {
    fn new(id: String, backend: String, shots: u32) -> Self {
        Self {
            id,
            backend,
            status: JobStatus::Queued,
            created_at: chrono::Utc::now(),
            shots,
        }
    }
}

/// Job submission request
#[derive(Debug, Serialize)]
struct JobSubmitRequest {
    /// QASM circuit
    qasm: String,

    /// Number of shots
    shots: u32,

    /// Backend name
    backend: String,

    /// Request per-shot measurement bitstrings
    memory: bool,
}

/// Job status response
#[derive(Debug, Deserialize)]
struct JobStatusResponse {
    id: String,
    status: JobStatus,
}

/// Job result response
#[derive(Debug, Deserialize)]
struct JobResultResponse {
    #[serde(default)]
    results: Vec<CircuitResult>,
}

#[derive(Debug, Deserialize)]
struct CircuitResult {
    #[serde(default)]
    data: ResultData,
}

#[derive(Debug, Deserialize, Default)]
struct ResultData {
    /// Per-shot measurement bitstrings
    #[serde(default)]
    memory: Vec<String>,
}

/// Backend listing response
#[derive(Debug, Deserialize)]
struct BackendListResponse {
    backends: Vec<BackendInfo>,
}

/// Provider session
///
/// Created from a [`Token`]; the credential is sent as a Bearer header on
/// every request. Backend selection lives on the session, so dropping the
/// session drops all provider state.
pub struct Session {
    client: reqwest::blocking::Client,
    token: Token,
    backend: Option<BackendInfo>,
    options: JobOptions,
}

impl Session {
    /// Create a session for the given credential
    pub fn new(token: Token) -> Result<Self> {
        Self::with_options(token, JobOptions::default())
    }

    /// Create a session with explicit job options
    pub fn with_options(token: Token, options: JobOptions) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token,
            backend: None,
            options,
        })
    }

    /// The credential this session authenticates with
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The currently selected backend, if any
    pub fn selected_backend(&self) -> Option<&BackendInfo> {
        self.backend.as_ref()
    }

    /// List available backends
    pub fn list_backends(&self) -> Result<Vec<BackendInfo>> {
        let url = format!("{}/backends", IBM_QUANTUM_API_URL);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.token.auth_header())
            .send()?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(Error::Api { code, message });
        }

        let data: BackendListResponse = response.json()?;
        Ok(data.backends)
    }

    /// Select a backend by name
    ///
    /// An unknown or offline backend is downgraded to the QASM simulator
    /// with a warning rather than an error.
    pub fn select_backend(&mut self, name: &str) -> Result<&BackendInfo> {
        let available = self.list_backends()?;
        Ok(self.select_backend_among(name, &available))
    }

    /// Select a backend from an explicit listing
    ///
    /// Split out from [`Session::select_backend`] so selection can be
    /// exercised without touching the network.
    pub fn select_backend_among(&mut self, name: &str, available: &[BackendInfo]) -> &BackendInfo {
        let (chosen, downgraded) = resolve_backend(name, available);

        if downgraded {
            warn!(
                "{} is not available. Backend is set to {}.",
                name, chosen.name
            );
        }

        self.backend = Some(chosen);
        self.backend.as_ref().unwrap()
    }

    /// Submit a measurement job and return the per-shot bitstrings
    ///
    /// The circuit puts every qubit of the selected backend into uniform
    /// superposition and measures them all, so each shot yields one
    /// bitstring of fresh random bits.
    pub fn run_measurement(&self, shots: u32) -> Result<Vec<String>> {
        let backend = self.backend.as_ref().ok_or(Error::NoBackendSelected)?;

        let qubits = backend.n_qubits.clamp(1, SIMULATOR_QUBITS);
        let qasm = measurement_qasm(qubits);

        let mut job = self.submit(&qasm, shots, &backend.name)?;
        self.wait_for_completion(&mut job)?;
        self.result_memory(&job)
    }

    /// Submit a job
    fn submit(&self, qasm: &str, shots: u32, backend: &str) -> Result<Job> {
        let url = format!("{}/jobs", IBM_QUANTUM_API_URL);

        let request = JobSubmitRequest {
            qasm: qasm.to_string(),
            shots,
            backend: backend.to_string(),
            memory: true,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.token.auth_header())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(Error::JobSubmission(format!("HTTP {}: {}", code, message)));
        }

        let status_resp: JobStatusResponse = response.json()?;
        let job = Job::new(status_resp.id, backend.to_string(), shots);
        debug!("submitted job {} on {} at {}", job.id, backend, job.created_at);

        Ok(job)
    }

    /// Get job status
    fn get_status(&self, job_id: &str) -> Result<JobStatus> {
        let url = format!("{}/jobs/{}", IBM_QUANTUM_API_URL, job_id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.token.auth_header())
            .send()?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(Error::Api { code, message });
        }

        let status_resp: JobStatusResponse = response.json()?;
        Ok(status_resp.status)
    }

    /// Poll until the job reaches a terminal state
    fn wait_for_completion(&self, job: &mut Job) -> Result<()> {
        let start = Instant::now();

        loop {
            if start.elapsed() > self.options.timeout {
                return Err(Error::JobTimeout(
                    job.id.clone(),
                    self.options.timeout.as_secs(),
                ));
            }

            let status = self.get_status(&job.id)?;
            job.status = status;
            debug!("job {} status: {:?}", job.id, status);

            match status {
                JobStatus::Completed => return Ok(()),
                JobStatus::Failed => {
                    return Err(Error::JobFailed(
                        job.id.clone(),
                        "job execution failed".to_string(),
                    ))
                }
                JobStatus::Cancelled => {
                    return Err(Error::JobFailed(job.id.clone(), "cancelled".to_string()))
                }
                _ => {
                    std::thread::sleep(self.options.poll_interval);
                }
            }
        }
    }

    /// Fetch the per-shot measurement bitstrings of a completed job
    fn result_memory(&self, job: &Job) -> Result<Vec<String>> {
        let url = format!("{}/jobs/{}/results", IBM_QUANTUM_API_URL, job.id);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.token.auth_header())
            .send()?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let message = response.text().unwrap_or_default();
            return Err(Error::Api { code, message });
        }

        let result_resp: JobResultResponse = response.json()?;

        let circuit_result = result_resp
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider("no results in job response".to_string()))?;

        if circuit_result.data.memory.is_empty() {
            return Err(Error::Provider(
                "job result contains no measurement memory".to_string(),
            ));
        }

        Ok(circuit_result.data.memory)
    }

    /// Job options in effect for this session
    pub fn options(&self) -> &JobOptions {
        &self.options
    }
}

/// Build the measurement circuit: Hadamard on every qubit, measure all
fn measurement_qasm(n_qubits: usize) -> String {
    let mut qasm = String::from("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n");
    qasm.push_str(&format!("qreg q[{0}];\ncreg c[{0}];\n", n_qubits));
    for i in 0..n_qubits {
        qasm.push_str(&format!("h q[{}];\n", i));
    }
    qasm.push_str("measure q -> c;\n");
    qasm
}
