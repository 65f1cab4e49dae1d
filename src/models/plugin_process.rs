//! Plugin Process Model
//!
//! Lifecycle bookkeeping for an external helper process: pid, state,
//! and timestamps. The actual child handle and I/O live in
//! [`crate::plugin::PluginChannel`]; this model is what the rest of the
//! application sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a plugin process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PluginState {
    /// Process has been created but not started
    #[default]
    Created,
    /// Process is currently running
    Running,
    /// Process has terminated
    Terminated,
}

/// Lifecycle record for a plugin helper process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginProcess {
    /// OS process identifier
    pub pid: Option<u32>,

    /// Current state of the process
    pub state: PluginState,

    /// When the process was started
    pub start_time: Option<DateTime<Utc>>,

    /// When the process terminated (if applicable)
    pub end_time: Option<DateTime<Utc>>,

    /// Interpreter command that was executed
    pub command: String,
}

impl PluginProcess {
    /// Create a new record in the Created state
    pub fn new(command: String) -> Self {
        Self {
            pid: None,
            state: PluginState::Created,
            start_time: None,
            end_time: None,
            command,
        }
    }

    /// Mark the process as started with the given PID
    pub fn mark_started(&mut self, pid: Option<u32>) {
        self.pid = pid;
        self.state = PluginState::Running;
        self.start_time = Some(Utc::now());
    }

    /// Mark the process as terminated
    pub fn mark_terminated(&mut self) {
        self.state = PluginState::Terminated;
        self.end_time = Some(Utc::now());
    }

    /// Check if the process is currently running
    pub fn is_running(&self) -> bool {
        matches!(self.state, PluginState::Running)
    }
}
