//! Process bridge to the external optimizer.
//!
//! The optimizer is an out-of-repo executable (historically a Java jar)
//! speaking a batch protocol: it reads one JSON request from stdin, computes,
//! and writes one JSON result to stdout before exiting. Anything on stderr is
//! advisory. This module owns that boundary:
//!
//! - spawn the child with all three stdio streams piped
//! - write the whole request, then close stdin (end-of-input)
//! - drain stdout and stderr concurrently (a sequential read can deadlock on
//!   a full pipe buffer while the child is still interleaving writes)
//! - enforce a deadline, reap the child on every exit path
//! - surface failures as distinct [`BridgeError`] variants so a caller can
//!   tell "program missing" from "ran but returned garbage" from "crashed
//!   without producing output"
//!
//! The bridge is stateless: one child process per [`OptimizerBridge::invoke`]
//! call, no pooling, no retries. Repeating a failed call is always safe.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;
use thiserror::Error;

use crate::domain::OptimizationRequest;

/// Default deadline for one optimizer run. Generous: the GA can take a while
/// on large inventories, but an unbounded wait is a hang waiting to happen.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// How often the invoking thread polls the child for exit.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Everything that can go wrong between "serialize the request" and
/// "hand back parsed JSON".
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The executable could not be launched at all (missing, not executable,
    /// permission denied).
    #[error("failed to launch optimizer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The request could not be encoded. A caller-side bug, not an optimizer
    /// problem.
    #[error("failed to serialize optimization request: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    /// The child exited but wrote nothing usable to stdout.
    #[error("optimizer produced no output on stdout (stderr: {stderr:?})")]
    NoOutput { stderr: String },

    /// stdout was non-empty but not JSON. Carries the raw capture so the
    /// operator can see what actually came back.
    #[error("optimizer output is not valid JSON: {source}\ncaptured stdout: {stdout:?}\ncaptured stderr: {stderr:?}")]
    InvalidOutput {
        #[source]
        source: serde_json::Error,
        stdout: String,
        stderr: String,
    },

    /// The child exited non-zero while the bridge is configured to treat
    /// that as failure (the default).
    #[error("optimizer exited with {status} (stdout: {stdout:?}, stderr: {stderr:?})")]
    NonZeroExit {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    /// The child did not finish within the configured deadline and was
    /// killed.
    #[error("optimizer did not finish within {limit:?}; process killed")]
    Timeout { limit: Duration },

    /// Waiting on the child failed at the OS level.
    #[error("failed while waiting for optimizer process: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },
}

/// Launch configuration for the external optimizer.
///
/// Construction is explicit (program, args, timeout, exit policy) rather than
/// ambient so tests can point the bridge at stub executables without touching
/// the environment.
#[derive(Debug, Clone)]
pub struct OptimizerBridge {
    program: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
    require_zero_exit: bool,
}

impl OptimizerBridge {
    /// Bridge to an arbitrary executable speaking the batch protocol.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Some(DEFAULT_TIMEOUT),
            require_zero_exit: true,
        }
    }

    /// Bridge to a Java jar artifact (`java -jar <path>`), the historical
    /// deployment shape of the optimizer.
    pub fn for_jar(jar: impl AsRef<Path>) -> Self {
        Self::new("java").arg("-jar").arg(jar.as_ref().display().to_string())
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Deadline for one invocation. `None` waits forever; prefer a bound.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a non-zero exit code is a failure even if stdout parsed.
    ///
    /// On by default: a crashing process can flush partial-but-valid JSON
    /// before dying, and that should not be reported as success.
    pub fn require_zero_exit(mut self, require: bool) -> Self {
        self.require_zero_exit = require;
        self
    }

    /// Run one optimization: serialize `request`, pipe it through the child,
    /// return the JSON-decoded stdout verbatim.
    ///
    /// The result is opaque to the bridge; no schema validation happens here.
    pub fn invoke(&self, request: &OptimizationRequest) -> Result<Value, BridgeError> {
        let payload =
            serde_json::to_string(request).map_err(|source| BridgeError::Serialize { source })?;
        self.invoke_raw(&payload)
    }

    /// Like [`invoke`](Self::invoke), but the caller supplies the already
    /// serialized payload (used by the `optimize` subcommand, which pipes a
    /// request file through untouched).
    pub fn invoke_raw(&self, payload: &str) -> Result<Value, BridgeError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BridgeError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        log::debug!(
            "spawned optimizer `{}` (pid {})",
            self.program.display(),
            child.id()
        );

        // Writer thread: send the whole request, then drop the handle to
        // close the pipe. A child that exits early makes the write fail with
        // a broken pipe; that is fine, the exit status tells the real story.
        let stdin = child.stdin.take();
        let bytes = payload.as_bytes().to_vec();
        let writer = thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                let _ = stdin.write_all(&bytes);
            }
        });

        // Reader threads: both output streams drained concurrently while we
        // wait, so neither pipe buffer can fill up and stall the child.
        let stdout_reader = drain(child.stdout.take());
        let stderr_reader = drain(child.stderr.take());

        let waited = self.wait_with_deadline(&mut child);

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();
        let _ = writer.join();

        let status = waited?;

        let stdout = String::from_utf8_lossy(&stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&stderr).trim().to_string();

        // stderr is advisory: the optimizer logs GA progress there while
        // still producing a valid result.
        if !stderr.is_empty() {
            log::warn!("optimizer stderr: {stderr}");
        }

        if self.require_zero_exit && !status.success() {
            return Err(BridgeError::NonZeroExit {
                status,
                stdout,
                stderr,
            });
        }

        if stdout.is_empty() {
            return Err(BridgeError::NoOutput { stderr });
        }

        serde_json::from_str(&stdout).map_err(|source| BridgeError::InvalidOutput {
            source,
            stdout,
            stderr,
        })
    }

    /// Block until the child exits or the deadline passes. On deadline the
    /// child is killed and reaped before the error returns, so no zombie is
    /// left behind.
    fn wait_with_deadline(&self, child: &mut Child) -> Result<ExitStatus, BridgeError> {
        let Some(limit) = self.timeout else {
            return child.wait().map_err(|source| BridgeError::Wait { source });
        };

        let deadline = Instant::now() + limit;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(BridgeError::Timeout { limit });
                    }
                    thread::sleep(EXIT_POLL_INTERVAL);
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(BridgeError::Wait { source });
                }
            }
        }
    }
}

/// Drain a child stream to completion on its own thread.
fn drain(stream: Option<impl Read + Send + 'static>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_end(&mut buf);
        }
        buf
    })
}
