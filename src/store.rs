//! Shared Parameter Store
//!
//! Single source of truth for the live parameter set. All three producers
//! (REPL, UI events, plugin processes) mutate through this store, and every
//! successful mutation publishes exactly one change notification — preset
//! application counts as one notification even though six fields change.
//!
//! Views subscribe with [`ParamStore::subscribe`] and hold the returned
//! receiver as their subscription token. Notification is a channel send,
//! so no view code ever runs while the store is being mutated.

use tokio::sync::broadcast;
use tracing::debug;

use crate::error::Result;
use crate::models::GraphParams;
use crate::protocol::ControlMessage;

/// Capacity of the change-notification channel. Views that fall this far
/// behind see a `Lagged` error and re-read the current snapshot.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// The shared mutable parameter set plus change fan-out
#[derive(Debug)]
pub struct ParamStore {
    params: GraphParams,
    change_tx: broadcast::Sender<GraphParams>,
}

impl ParamStore {
    /// Create a store holding the default parameter set
    pub fn new() -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            params: GraphParams::default(),
            change_tx,
        }
    }

    /// Subscribe to change notifications. Each successful mutation delivers
    /// one snapshot of the full parameter set.
    pub fn subscribe(&self) -> broadcast::Receiver<GraphParams> {
        self.change_tx.subscribe()
    }

    /// Set a single parameter. Fails without mutating or notifying if the
    /// name is unknown or the value is invalid for that field.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        self.params.set(name, value)?;
        debug!(name, value, "parameter set");
        self.notify();
        Ok(())
    }

    /// Get a single parameter by name
    pub fn get(&self, name: &str) -> Result<f64> {
        self.params.get(name)
    }

    /// Atomically overwrite all six fields from the named preset.
    /// One notification for the whole preset.
    pub fn apply_preset(&mut self, name: &str) -> Result<()> {
        self.params.apply_preset(name)?;
        debug!(preset = name, "preset applied");
        self.notify();
        Ok(())
    }

    /// Copy of the current parameter set (iteration order is fixed by
    /// [`GraphParams::entries`])
    pub fn snapshot(&self) -> GraphParams {
        self.params
    }

    /// Evaluate the curve at `t`. Pure; no notification.
    pub fn evaluate(&self, t: f64) -> (f64, f64) {
        self.params.evaluate(t)
    }

    /// Apply a decoded control-protocol message. Follows the same contract
    /// as [`ParamStore::set`] / [`ParamStore::apply_preset`]; the caller
    /// decides whether a failure is surfaced or dropped as noise.
    pub fn apply_message(&mut self, message: &ControlMessage) -> Result<()> {
        match message {
            ControlMessage::Set { name, value } => self.set(name, *value),
            ControlMessage::Preset { name } => self.apply_preset(name),
        }
    }

    fn notify(&self) {
        // Send fails only when no view is subscribed, which is fine.
        let _ = self.change_tx.send(self.params);
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}
