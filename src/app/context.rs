//! Application Context
//!
//! The explicit context object passed to every component at construction:
//! handles to the shared parameter store and the plugin manager, plus the
//! loaded configuration. There are no global singletons; multiple contexts
//! (and therefore multiple independent instances) can coexist, which is
//! what the tests do.
//!
//! The context also implements the [`GraphOps`] capability, which is how
//! the embedded evaluator reaches the store and the plugin launchers.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::warn;

use crate::config::Config;
use crate::error::Result;
use crate::models::GraphParams;
use crate::plugin::{scripts, PluginKind, PluginManager};
use crate::protocol;
use crate::repl::GraphOps;
use crate::store::ParamStore;

/// Shared handles to the application's state
#[derive(Clone)]
pub struct GraphContext {
    store: Arc<Mutex<ParamStore>>,
    plugins: Arc<Mutex<PluginManager>>,
    config: Arc<Config>,
}

impl GraphContext {
    /// Bundle store, plugin manager, and configuration into a context
    pub fn new(
        store: Arc<Mutex<ParamStore>>,
        plugins: Arc<Mutex<PluginManager>>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            store,
            plugins,
            config,
        }
    }

    /// Handle to the shared parameter store
    pub fn store(&self) -> &Arc<Mutex<ParamStore>> {
        &self.store
    }

    /// Handle to the plugin manager
    pub fn plugins(&self) -> &Arc<Mutex<PluginManager>> {
        &self.plugins
    }

    /// The loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Subscribe a view to parameter-change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<GraphParams> {
        self.store.lock().subscribe()
    }

    /// Copy of the current parameter set
    pub fn snapshot(&self) -> GraphParams {
        self.store.lock().snapshot()
    }
}

impl GraphOps for GraphContext {
    fn set_param(&self, name: &str, value: f64) -> Result<()> {
        self.store.lock().set(name, value)
    }

    fn get_param(&self, name: &str) -> Result<f64> {
        self.store.lock().get(name)
    }

    fn list_params(&self) -> [(&'static str, f64); 6] {
        self.store.lock().snapshot().entries()
    }

    fn apply_preset(&self, name: &str) -> Result<()> {
        self.store.lock().apply_preset(name)
    }

    fn evaluate(&self, t: f64) -> (f64, f64) {
        self.store.lock().evaluate(t)
    }

    fn launch_plugin(&self, kind: PluginKind) -> bool {
        let spec = scripts::spec_for(kind, &self.config.plugins);
        let args = protocol::format_args(&self.store.lock().snapshot());
        match self.plugins.lock().launch(kind, &spec, &args) {
            Ok(()) => true,
            Err(e) => {
                warn!(kind = %kind, "plugin launch failed: {}", e);
                false
            }
        }
    }
}
