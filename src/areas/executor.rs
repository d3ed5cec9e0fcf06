//! Process command executor
//!
//! Launches one invocation of the external tool and hands back a live
//! [`GitProcess`] whose standard input, output and error channels are usable
//! immediately, while the process is still running.
//!
//! ## Error detection
//!
//! Standard error is scanned line by line in a background task. The first
//! line starting with `fatal: ` is kept verbatim as the error message. When
//! the process exits the [`Completion`] resolves:
//!
//! - `Ok(())` if the exit status is zero
//! - [`VcsError::Process`] with the captured fatal line (or none) otherwise
//! - [`VcsError::Transport`] if the executable could not be launched
//!
//! The completion fires exactly once; whichever of launch failure and exit
//! happens first wins.
//!
//! Launched processes always run to completion. Dropping a handle does not
//! kill the child, and no timeout is enforced here.

use crate::errors::{Result, VcsError};
use bytes::Bytes;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{ChildStderr, ChildStdin, ChildStdout};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Prefix of the line the external tool prints before dying
const FATAL_PREFIX: &str = "fatal: ";

/// How text read from standard output is decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Invalid UTF-8 is an error
    #[default]
    Utf8,
    /// Invalid sequences are replaced with U+FFFD
    Lossy,
}

impl OutputEncoding {
    fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        match self {
            OutputEncoding::Utf8 => String::from_utf8(bytes)
                .map_err(|e| VcsError::parse("command output", e.to_string())),
            OutputEncoding::Lossy => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

/// Per-invocation execution parameters
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    encoding: OutputEncoding,
}

impl ExecOptions {
    /// Run in `dir` instead of the caller's default directory
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Override one environment variable for this process only
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn envs(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.env.extend(vars);
        self
    }

    pub fn encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub(crate) fn has_cwd(&self) -> bool {
        self.cwd.is_some()
    }
}

/// Spawns invocations of one external executable
#[derive(Debug, Clone)]
pub struct Executor {
    program: PathBuf,
}

impl Executor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Executor {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Launch `<program> <command> <args...>`
    ///
    /// Must be called from within a tokio runtime. Never fails directly: a
    /// launch failure is reported through the returned process' completion.
    pub fn spawn<I, S>(&self, command: &str, args: I, options: ExecOptions) -> GitProcess
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let label = format!("git {command}");
        let (mut notifier, completion) = completion_channel(label.clone());

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.arg(command)
            .args(&args)
            // keep messages (and the fatal prefix) untranslated
            .env("LC_ALL", "C")
            .envs(options.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        debug!(command = %label, ?args, cwd = ?options.cwd, "spawning");

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(source) => {
                warn!(command = %label, error = %source, "failed to launch");
                notifier.fire(Err(VcsError::Transport {
                    command: label,
                    source,
                }));
                return GitProcess {
                    stdin: None,
                    stdout: None,
                    stderr: None,
                    encoding: options.encoding,
                    completion,
                };
            }
        };

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().map(BufReader::new);
        let stderr = child.stderr.take();
        let (line_tx, line_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let fatal = match stderr {
                Some(stderr) => scan_stderr(stderr, line_tx).await,
                None => None,
            };

            let outcome = match child.wait().await {
                Ok(status) if status.success() => Ok(()),
                Ok(status) => {
                    debug!(command = %label, code = ?status.code(), fatal = ?fatal, "exited with failure");
                    Err(VcsError::Process {
                        command: label,
                        status: status.code(),
                        message: fatal,
                    })
                }
                Err(source) => Err(VcsError::Transport {
                    command: label,
                    source,
                }),
            };

            notifier.fire(outcome);
        });

        GitProcess {
            stdin,
            stdout,
            stderr: Some(line_rx),
            encoding: options.encoding,
            completion,
        }
    }
}

/// Forward every stderr line to `lines` and return the first fatal line
async fn scan_stderr(
    stderr: ChildStderr,
    lines: mpsc::UnboundedSender<String>,
) -> Option<String> {
    let mut reader = BufReader::new(stderr).lines();
    let mut fatal = None;

    loop {
        match reader.next_line().await {
            Ok(Some(line)) => {
                if fatal.is_none() && line.starts_with(FATAL_PREFIX) {
                    warn!(line = %line, "captured fatal line");
                    fatal = Some(line.clone());
                }
                // the receiver may have been dropped; that is fine
                let _ = lines.send(line);
            }
            Ok(None) => break,
            Err(e) => {
                debug!(error = %e, "stopped reading stderr");
                break;
            }
        }
    }

    fatal
}

/// Sending side of a completion; fires at most once
struct Notifier {
    sender: Option<oneshot::Sender<Result<()>>>,
}

impl Notifier {
    /// Deliver `outcome` unless a previous call already did
    ///
    /// Returns whether this call was the one that fired.
    fn fire(&mut self, outcome: Result<()>) -> bool {
        match self.sender.take() {
            Some(sender) => {
                // nobody waiting is not an error
                let _ = sender.send(outcome);
                true
            }
            None => false,
        }
    }
}

/// Resolves once when the process has finished or failed to launch
#[derive(Debug)]
pub struct Completion {
    command: String,
    receiver: oneshot::Receiver<Result<()>>,
}

impl Completion {
    pub async fn wait(self) -> Result<()> {
        match self.receiver.await {
            Ok(outcome) => outcome,
            // the watcher task went away without reporting
            Err(_) => Err(VcsError::Process {
                command: self.command,
                status: None,
                message: None,
            }),
        }
    }
}

fn completion_channel(command: String) -> (Notifier, Completion) {
    let (sender, receiver) = oneshot::channel();
    (
        Notifier {
            sender: Some(sender),
        },
        Completion { command, receiver },
    )
}

/// A running (or failed-to-launch) invocation
#[derive(Debug)]
pub struct GitProcess {
    stdin: Option<ChildStdin>,
    stdout: Option<BufReader<ChildStdout>>,
    stderr: Option<mpsc::UnboundedReceiver<String>>,
    encoding: OutputEncoding,
    completion: Completion,
}

impl GitProcess {
    /// Take the input channel; dropping it closes the child's stdin
    pub fn take_stdin(&mut self) -> Option<ChildStdin> {
        self.stdin.take()
    }

    /// Take the raw output channel
    pub fn take_stdout(&mut self) -> Option<BufReader<ChildStdout>> {
        self.stdout.take()
    }

    /// Take the stream of standard error lines
    pub fn take_stderr(&mut self) -> Option<mpsc::UnboundedReceiver<String>> {
        self.stderr.take()
    }

    /// Read the next line of standard output, without its trailing newline
    ///
    /// Returns None at end of output (or if stdout was taken).
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };

        let mut line = Vec::new();
        if stdout.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }

        self.encoding.decode(line).map(Some)
    }

    /// Read whatever standard output remains
    pub async fn read_output(&mut self) -> Result<Bytes> {
        let mut output = Vec::new();
        if let Some(stdout) = self.stdout.as_mut() {
            stdout.read_to_end(&mut output).await?;
        }
        Ok(Bytes::from(output))
    }

    /// Close stdin and wait for the completion notification only
    pub async fn wait(mut self) -> Result<()> {
        drop(self.stdin.take());
        self.completion.wait().await
    }

    /// Close stdin, drain stdout and wait for completion
    pub async fn finish(mut self) -> Result<Bytes> {
        drop(self.stdin.take());
        let output = self.read_output().await?;
        self.completion.wait().await?;
        Ok(output)
    }

    /// Like [`GitProcess::finish`], split into lines and decoded
    pub async fn finish_lines(self) -> Result<Vec<String>> {
        let encoding = self.encoding;
        let output = self.finish().await?;
        let text = encoding.decode(output.to_vec())?;

        Ok(text.lines().map(str::to_string).collect())
    }
}
