//! Event Loop / Dispatcher
//!
//! The single reactor that multiplexes the three producers — UI-originated
//! parameter edits, REPL submissions, and readiness notifications from
//! zero-or-more plugin channels — and routes each event to its owning
//! component. Every successful mutation notifies views exactly once
//! (the store handles the fan-out).
//!
//! All mutation and line framing happen in this task. Handlers never
//! block: child-process reads are forwarded here by per-process tasks, so
//! the loop only ever waits for the next event. No error terminates the
//! reactor; the worst outcome of any failure is "one operation did not
//! apply" or "one helper's channel is now stopped".

pub mod context;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::plugin::{PluginEvent, PluginKind, PluginManager};
use crate::repl::{CommandEvaluator, ReplPrompts, ReplSession};
use crate::store::ParamStore;

pub use context::GraphContext;

/// Events the reactor accepts from front ends
#[derive(Debug)]
pub enum AppEvent {
    /// UI-originated single-parameter edit
    SetParam { name: String, value: f64 },
    /// UI-originated preset application
    ApplyPreset { name: String },
    /// One submitted REPL line
    ReplInput { line: String },
    /// Request to launch a helper plugin
    LaunchPlugin { kind: PluginKind },
    /// Stop the reactor, tearing down plugins and the session
    Shutdown,
}

/// Reply to a REPL submission: the transcript delta it produced and the
/// prompt to show for the next line.
#[derive(Debug, Clone)]
pub struct ReplReply {
    pub delta: String,
    pub prompt: String,
}

/// Front-end side of a running [`App`]
pub struct AppHandle {
    /// Send events into the reactor
    pub events: mpsc::UnboundedSender<AppEvent>,
    /// Receive REPL replies
    pub replies: mpsc::UnboundedReceiver<ReplReply>,
    /// Shared state handles (store subscription, snapshots)
    pub context: GraphContext,
}

/// The reactor
pub struct App {
    context: GraphContext,
    session: ReplSession,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    plugin_rx: mpsc::UnboundedReceiver<PluginEvent>,
    replies_tx: mpsc::UnboundedSender<ReplReply>,
}

impl App {
    /// Build the reactor and its front-end handle
    pub fn new(config: Config) -> (Self, AppHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (plugin_tx, plugin_rx) = mpsc::unbounded_channel();
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();

        let store = Arc::new(Mutex::new(ParamStore::new()));
        let plugins = Arc::new(Mutex::new(PluginManager::new(plugin_tx)));
        let context = GraphContext::new(store, plugins, Arc::new(config.clone()));

        let prompts = ReplPrompts {
            primary: config.repl.primary_prompt,
            continuation: config.repl.continuation_prompt,
        };
        let evaluator = CommandEvaluator::new(context.clone());
        let session = ReplSession::with_options(
            Box::new(evaluator),
            prompts,
            config.repl.history_limit,
        );

        let app = Self {
            context: context.clone(),
            session,
            events_rx,
            plugin_rx,
            replies_tx,
        };
        let handle = AppHandle {
            events: events_tx,
            replies: replies_rx,
            context,
        };
        (app, handle)
    }

    /// Run until shutdown is requested, then stop all plugins and release
    /// the session (and with it the evaluator) exactly once.
    pub async fn run(mut self) {
        info!("reactor started");
        loop {
            tokio::select! {
                Some(event) = self.events_rx.recv() => {
                    if self.handle_event(event) {
                        break;
                    }
                }
                Some(event) = self.plugin_rx.recv() => {
                    self.handle_plugin_event(event);
                }
                else => break,
            }
        }
        self.context.plugins().lock().stop_all();
        info!("reactor stopped");
        // `self.session` drops here, releasing evaluator resources.
    }

    /// Handle one front-end event. Returns true on shutdown.
    fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::SetParam { name, value } => {
                if let Err(e) = self.context.store().lock().set(&name, value) {
                    warn!("edit rejected: {}", e);
                }
            }
            AppEvent::ApplyPreset { name } => {
                if let Err(e) = self.context.store().lock().apply_preset(&name) {
                    warn!("preset rejected: {}", e);
                }
            }
            AppEvent::ReplInput { line } => {
                let delta = self.session.submit(&line);
                let reply = ReplReply {
                    delta,
                    prompt: self.session.prompt().to_string(),
                };
                // A closed reply channel just means no front end listens.
                let _ = self.replies_tx.send(reply);
            }
            AppEvent::LaunchPlugin { kind } => {
                use crate::repl::GraphOps;
                if !self.context.launch_plugin(kind) {
                    warn!(kind = %kind, "launch request failed");
                }
            }
            AppEvent::Shutdown => {
                debug!("shutdown requested");
                return true;
            }
        }
        false
    }

    /// Handle one plugin readiness notification
    fn handle_plugin_event(&mut self, event: PluginEvent) {
        match event {
            PluginEvent::Output { kind, stream, data } => {
                let messages = self.context.plugins().lock().on_output(kind, stream, &data);
                for message in messages {
                    // Unknown names in well-formed lines are noise too.
                    if let Err(e) = self.context.store().lock().apply_message(&message) {
                        debug!(kind = %kind, "dropped plugin message: {}", e);
                    }
                }
            }
            PluginEvent::Exited { kind } => {
                debug!(kind = %kind, "plugin exited");
                self.context.plugins().lock().stop(kind);
            }
        }
    }
}
