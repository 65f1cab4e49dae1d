//! Plugin Manager
//!
//! Keys one [`PluginChannel`] per plugin kind so that at most one helper
//! process of each kind is ever live, and fans channel output back to the
//! owning channel for framing.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::protocol::ControlMessage;

use super::channel::{LaunchSpec, PluginChannel, PluginEvent, PluginKind, PluginStream};

/// Registry of plugin channels, one per kind
pub struct PluginManager {
    channels: HashMap<PluginKind, PluginChannel>,
    events_tx: mpsc::UnboundedSender<PluginEvent>,
}

impl PluginManager {
    /// Create a manager that reports readiness events on `events_tx`
    pub fn new(events_tx: mpsc::UnboundedSender<PluginEvent>) -> Self {
        Self {
            channels: HashMap::new(),
            events_tx,
        }
    }

    /// Launch a helper of the given kind. A no-op when one is already
    /// running for that kind.
    pub fn launch(&mut self, kind: PluginKind, spec: &LaunchSpec, args: &str) -> Result<()> {
        let channel = self
            .channels
            .entry(kind)
            .or_insert_with(|| PluginChannel::new(kind));
        channel.launch(spec, args, self.events_tx.clone())
    }

    /// Whether a helper of the given kind is currently running
    pub fn is_running(&self, kind: PluginKind) -> bool {
        self.channels
            .get(&kind)
            .map(PluginChannel::is_running)
            .unwrap_or(false)
    }

    /// Frame and decode a chunk of output from the given kind's helper
    pub fn on_output(
        &mut self,
        kind: PluginKind,
        stream: PluginStream,
        data: &[u8],
    ) -> Vec<ControlMessage> {
        match self.channels.get_mut(&kind) {
            Some(channel) => channel.on_output(stream, data),
            None => Vec::new(),
        }
    }

    /// Stop the helper of the given kind (idempotent)
    pub fn stop(&mut self, kind: PluginKind) {
        if let Some(channel) = self.channels.get_mut(&kind) {
            channel.stop();
        }
    }

    /// Stop every running helper
    pub fn stop_all(&mut self) {
        for channel in self.channels.values_mut() {
            channel.stop();
        }
    }
}
