use std::ffi::OsString;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::shared::constants::DEFAULT_SPLICE_TIMEOUT_SECS;
use crate::splicing::domain::audio_splicer::{AudioSplicer, SpliceError, SpliceRequest};
use crate::splicing::domain::cancel_token::CancelToken;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// How long to keep reading the child's pipes after it exits. A background
/// process it left behind may hold them open indefinitely.
const PIPE_GRACE: Duration = Duration::from_secs(1);

/// Runs an external splicing program as a child process.
///
/// The program is invoked as `<program> [leading args] <input> <output>
/// <starts> [<ends>]`, each argument passed separately with no shell in
/// between. The call blocks until the child exits, the timeout elapses, or
/// the cancel token fires; in the last two cases the child is killed.
pub struct ScriptSplicer {
    program: String,
    leading_args: Vec<OsString>,
    timeout: Option<Duration>,
    cancel: CancelToken,
}

impl ScriptSplicer {
    pub fn new(program: impl Into<String>, leading_args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args,
            timeout: Some(Duration::from_secs(DEFAULT_SPLICE_TIMEOUT_SECS)),
            cancel: CancelToken::new(),
        }
    }

    /// `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full argv for a request, program first.
    pub fn command_line(&self, request: &SpliceRequest) -> Vec<OsString> {
        let mut argv = vec![OsString::from(&self.program)];
        argv.extend(self.leading_args.iter().cloned());
        argv.extend(request.arguments());
        argv
    }

    fn wait(&self, child: &mut Child) -> Result<std::process::ExitStatus, SpliceError> {
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(SpliceError::Wait)? {
                return Ok(status);
            }
            if self.cancel.is_cancelled() {
                kill(child);
                return Err(SpliceError::Interrupted);
            }
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    kill(child);
                    return Err(SpliceError::Timeout { timeout });
                }
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl AudioSplicer for ScriptSplicer {
    fn splice(&self, request: &SpliceRequest) -> Result<(), SpliceError> {
        log::info!(
            "Splicing {} -> {} ({})",
            request.input.display(),
            request.output.display(),
            request.mode
        );
        log::debug!("Splicer command: {:?}", self.command_line(request));

        if self.cancel.is_cancelled() {
            return Err(SpliceError::Interrupted);
        }

        let mut child = Command::new(&self.program)
            .args(&self.leading_args)
            .args(request.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SpliceError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        // Drain both pipes while waiting so a chatty child cannot block on a
        // full pipe buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait(&mut child)?;

        let deadline = Instant::now() + PIPE_GRACE;
        let stdout = collect(stdout, deadline);
        let stderr = collect(stderr, deadline);
        for line in stdout.lines() {
            log::debug!("splicer: {line}");
        }

        if !status.success() {
            log::error!("Splicer failed with {status}");
            return Err(SpliceError::ExitStatus {
                code: status.code(),
                stderr,
            });
        }

        for line in stderr.lines() {
            log::debug!("splicer: {line}");
        }
        log::info!("Output written to {}", request.output.display());
        Ok(())
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

/// Joins a pipe reader, giving up at `deadline` if the pipe is still open.
fn collect(reader: JoinHandle<String>, deadline: Instant) -> String {
    while !reader.is_finished() {
        if Instant::now() >= deadline {
            log::warn!("Splicer output pipe still open after exit; not waiting for it");
            return String::new();
        }
        thread::sleep(Duration::from_millis(10));
    }
    reader.join().unwrap_or_default()
}

fn kill(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::warn!("Failed to kill splicer process {}: {e}", child.id());
    }
    let _ = child.wait();
}
