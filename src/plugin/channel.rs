//! Plugin Process Channel
//!
//! Owns the lifecycle of at most one external helper process of a given
//! kind and streams its output as discrete lines. The channel materializes
//! the helper script to a temp file, spawns the interpreter with the
//! current parameter snapshot as startup arguments, and forwards raw
//! output chunks to the reactor over a channel; the reactor feeds them
//! back through [`PluginChannel::on_output`] for framing and parsing.
//!
//! Framing invariant: stdout and stderr are framed independently, each
//! with its own partial-line buffer, so a fragment pending on one stream
//! can never splice into a line arriving on the other. Control messages
//! decode from stdout lines only; stderr lines are logged and dropped.
//! Neither buffer contains a complete line after `on_output` returns, and
//! partial lines are never parsed.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use tempfile::TempPath;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::PluginProcess;
use crate::protocol::{self, ControlMessage};

/// Read chunk size for helper output
const READ_CHUNK_SIZE: usize = 1024;

/// Helper plugin flavors. At most one live process per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Tcl/Tk slider window
    Tk,
    /// Python/tkinter slider window
    Tkinter,
}

impl PluginKind {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginKind::Tk => "tk",
            PluginKind::Tkinter => "tkinter",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PluginKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tk" => Ok(PluginKind::Tk),
            "tkinter" => Ok(PluginKind::Tkinter),
            other => Err(Error::Other(format!(
                "unknown plugin kind '{}'; expected tk or tkinter",
                other
            ))),
        }
    }
}

/// Which output stream of the helper a chunk came from. Each stream is
/// framed against its own buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginStream {
    /// The control-protocol stream
    Stdout,
    /// Diagnostics only; never carries control messages
    Stderr,
}

/// Everything needed to start one helper: the interpreter command, the
/// script text to materialize, and the temp-file suffix the interpreter
/// expects.
#[derive(Debug, Clone)]
pub struct LaunchSpec {
    /// Interpreter command (absolute path or PATH-resolved name)
    pub command: String,
    /// Script source to write to a temp file
    pub script: String,
    /// Temp-file suffix, e.g. ".tcl" or ".py"
    pub suffix: String,
}

/// Readiness notifications a channel sends to the reactor
#[derive(Debug)]
pub enum PluginEvent {
    /// A chunk of raw output bytes is available on one of the streams
    Output {
        kind: PluginKind,
        stream: PluginStream,
        data: Vec<u8>,
    },
    /// The helper's output reached EOF or failed; tear the handle down
    Exited { kind: PluginKind },
}

/// Live state of one spawned helper
struct RunningPlugin {
    child: Child,
    process: PluginProcess,
    /// Deleted on drop, i.e. on stop and on every teardown path
    script_path: TempPath,
    /// Forwarding tasks; aborted (deregistered) before the child is reaped
    read_tasks: Vec<JoinHandle<()>>,
}

/// Channel owning at most one helper process of one kind
pub struct PluginChannel {
    kind: PluginKind,
    running: Option<RunningPlugin>,
    /// stdout bytes accumulated since the last newline
    stdout_buf: Vec<u8>,
    /// stderr bytes accumulated since the last newline
    stderr_buf: Vec<u8>,
}

impl PluginChannel {
    /// Create an idle channel for the given kind
    pub fn new(kind: PluginKind) -> Self {
        Self {
            kind,
            running: None,
            stdout_buf: Vec::new(),
            stderr_buf: Vec::new(),
        }
    }

    /// The kind this channel owns
    pub fn kind(&self) -> PluginKind {
        self.kind
    }

    /// Whether a helper process is currently registered
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Lifecycle record of the current helper, if any
    pub fn process(&self) -> Option<&PluginProcess> {
        self.running.as_ref().map(|r| &r.process)
    }

    /// Launch the helper. A no-op returning `Ok` when one is already
    /// running. On failure no handle is registered and the materialized
    /// script file is removed.
    pub fn launch(
        &mut self,
        spec: &LaunchSpec,
        args: &str,
        events: mpsc::UnboundedSender<PluginEvent>,
    ) -> Result<()> {
        if self.running.is_some() {
            debug!(kind = %self.kind, "plugin already running; launch is a no-op");
            return Ok(());
        }

        let script_path = write_script(&spec.script, &spec.suffix)?;

        let mut command = Command::new(&spec.command);
        command
            .arg(&script_path)
            .args(args.split_whitespace())
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);

        // If the spawn fails, dropping `script_path` removes the file.
        let mut child = command.spawn().map_err(|e| Error::PluginLaunchFailed {
            kind: self.kind.as_str().to_string(),
            reason: format!("{}: {}", spec.command, e),
        })?;

        let mut process = PluginProcess::new(spec.command.clone());
        process.mark_started(child.id());

        let mut read_tasks = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            read_tasks.push(spawn_reader(
                self.kind,
                PluginStream::Stdout,
                stdout,
                events.clone(),
            ));
        }
        if let Some(stderr) = child.stderr.take() {
            read_tasks.push(spawn_reader(self.kind, PluginStream::Stderr, stderr, events));
        }

        info!(kind = %self.kind, pid = ?process.pid, command = %spec.command, "plugin launched");
        self.running = Some(RunningPlugin {
            child,
            process,
            script_path,
            read_tasks,
        });
        Ok(())
    }

    /// Append raw output bytes to the given stream's partial-line buffer,
    /// extract every complete `\n`-terminated line, and decode stdout
    /// lines into control messages. Lines that decode to nothing, and all
    /// stderr lines, are dropped as noise.
    pub fn on_output(&mut self, stream: PluginStream, data: &[u8]) -> Vec<ControlMessage> {
        match stream {
            PluginStream::Stdout => {
                let mut messages = Vec::new();
                for text in drain_lines(&mut self.stdout_buf, data) {
                    match protocol::parse_line(&text) {
                        Some(message) => messages.push(message),
                        None => {
                            if !text.trim().is_empty() {
                                debug!(kind = %self.kind, line = %text, "dropped unrecognized plugin line");
                            }
                        }
                    }
                }
                messages
            }
            PluginStream::Stderr => {
                for text in drain_lines(&mut self.stderr_buf, data) {
                    if !text.trim().is_empty() {
                        debug!(kind = %self.kind, line = %text, "plugin stderr");
                    }
                }
                Vec::new()
            }
        }
    }

    /// Stop the helper: deregister the read tasks, kill and reap the
    /// process, clear the partial-line buffers, and delete the script
    /// file. Idempotent; safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(mut running) = self.running.take() {
            // Deregister before reaping so no stale readiness event can
            // fire against a torn-down handle.
            for task in running.read_tasks.drain(..) {
                task.abort();
            }

            if let Err(e) = running.child.start_kill() {
                debug!(kind = %self.kind, "kill failed (process likely already exited): {}", e);
            }
            let mut child = running.child;
            tokio::spawn(async move {
                let _ = child.wait().await;
            });

            running.process.mark_terminated();
            info!(kind = %self.kind, "plugin stopped");
            // `running.script_path` drops here, deleting the temp script.
        }
        self.stdout_buf.clear();
        self.stderr_buf.clear();
    }
}

impl Drop for PluginChannel {
    fn drop(&mut self) {
        if self.running.is_some() {
            warn!(kind = %self.kind, "plugin channel dropped while running");
        }
    }
}

/// Materialize the helper script to a temp file the interpreter can read
fn write_script(script: &str, suffix: &str) -> Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("lissacon_plugin_")
        .suffix(suffix)
        .tempfile()
        .map_err(|e| Error::ScriptWriteFailed {
            reason: e.to_string(),
        })?;
    file.write_all(script.as_bytes())
        .map_err(|e| Error::ScriptWriteFailed {
            reason: e.to_string(),
        })?;
    Ok(file.into_temp_path())
}

/// Extract every complete `\n`-terminated line from `buf` after appending
/// `data`, leaving any trailing partial line in place.
fn drain_lines(buf: &mut Vec<u8>, data: &[u8]) -> Vec<String> {
    buf.extend_from_slice(data);

    let mut lines = Vec::new();
    while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
        let line: Vec<u8> = buf.drain(..=pos).collect();
        lines.push(String::from_utf8_lossy(&line[..line.len() - 1]).into_owned());
    }
    lines
}

/// Forward raw chunks from one output stream to the reactor. The stdout
/// reader additionally reports EOF so the reactor can tear the handle down.
fn spawn_reader<R>(
    kind: PluginKind,
    stream: PluginStream,
    mut reader: R,
    events: mpsc::UnboundedSender<PluginEvent>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; READ_CHUNK_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => {
                    debug!(kind = %kind, ?stream, "plugin output EOF");
                    break;
                }
                Ok(n) => {
                    let chunk = buf[..n].to_vec();
                    let event = PluginEvent::Output {
                        kind,
                        stream,
                        data: chunk,
                    };
                    if events.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    debug!(kind = %kind, ?stream, "plugin read error: {}", e);
                    break;
                }
            }
        }
        if stream == PluginStream::Stdout {
            let _ = events.send(PluginEvent::Exited { kind });
        }
    })
}
