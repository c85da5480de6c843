//! Bounded execution of short-lived external commands
//!
//! Panels and health checks shell out to tools such as `git`, `docker` or
//! `node`. Every invocation goes through [`run`], which enforces a hard
//! timeout so a hung tool can never stall a dashboard refresh.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Timeout applied to dashboard probes
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Timeout applied to `system health` checks
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Reasons a probe produced no output
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Binary is not installed or not on PATH
    #[error("{0} not found")]
    NotFound(String),

    /// Process outlived its timeout and was killed
    #[error("{program} timed out after {}ms", timeout.as_millis())]
    TimedOut { program: String, timeout: Duration },

    /// Spawning or waiting failed for another reason
    #[error("{program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// First line of stdout, trimmed
    pub fn first_line(&self) -> &str {
        self.stdout.trim().lines().next().unwrap_or("").trim()
    }
}

/// Run `program` with `args`, killing it once `timeout` elapses.
pub fn run(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<CommandOutput, ProbeError> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let mut child = command.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            ProbeError::NotFound(program.to_string())
        } else {
            ProbeError::Io {
                program: program.to_string(),
                source: e,
            }
        }
    })?;

    // Drain pipes off-thread so a chatty tool cannot block on a full pipe
    let stdout = child.stdout.take().map(Drain::start);
    let stderr = child.stderr.take().map(Drain::start);

    let started = Instant::now();
    let deadline = started + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if started.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    debug!("{} killed after {:?}", program, timeout);
                    return Err(ProbeError::TimedOut {
                        program: program.to_string(),
                        timeout,
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                return Err(ProbeError::Io {
                    program: program.to_string(),
                    source: e,
                });
            }
        }
    };

    // Pipes inherited by a lingering grandchild stay open past the exit
    Ok(CommandOutput {
        success: status.success(),
        stdout: Drain::collect(stdout, deadline, program),
        stderr: Drain::collect(stderr, deadline, program),
    })
}

/// Like [`run`], but a missing binary or a timeout yields `Ok(None)`
pub fn run_optional(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<Option<CommandOutput>, ProbeError> {
    match run(program, args, cwd, timeout) {
        Ok(output) => Ok(Some(output)),
        Err(ProbeError::NotFound(_)) | Err(ProbeError::TimedOut { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Background reader for one pipe
struct Drain {
    buf: Arc<Mutex<Vec<u8>>>,
    done: Receiver<()>,
}

impl Drain {
    fn start<R: Read + Send + 'static>(mut reader: R) -> Self {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let (tx, done) = mpsc::channel();
        let sink = Arc::clone(&buf);
        thread::spawn(move || {
            let mut chunk = [0u8; 4096];
            loop {
                match reader.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => sink
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .extend_from_slice(&chunk[..n]),
                }
            }
            let _ = tx.send(());
        });
        Self { buf, done }
    }

    /// Output read so far, waiting for EOF no later than `deadline`
    fn collect(drain: Option<Self>, deadline: Instant, program: &str) -> String {
        let Some(drain) = drain else {
            return String::new();
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        if drain.done.recv_timeout(remaining).is_err() {
            debug!("{} left its output pipe open, detaching reader", program);
        }
        let buf = drain.buf.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Truncate to at most `max` characters without splitting a code point
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
