//! lissacon - a shared Lissajous parameter set with three producers
//!
//! This library provides the concurrency/IPC core of lissacon: one live
//! parameter set that can be driven concurrently from an embedded REPL
//! session, from UI-originated edits, and from external "slider" helper
//! processes that mirror the controls in their own GUI toolkit and report
//! changes over a line-oriented control protocol.
//!
//! ## Features
//!
//! - **Shared parameter store:** six named fields with fixed presets,
//!   atomic preset application, and single-fan-out change notification
//! - **REPL sessions:** generic multi-line continuation handling, captured
//!   output, transcript, and command history over any evaluator
//! - **Plugin channels:** non-blocking child-process launch, line framing
//!   of the control protocol, and clean teardown
//! - **Single reactor:** one event loop multiplexing all three producers
//!
//! ## Module Organization
//!
//! - [`store`] - the shared parameter store, single source of truth
//! - [`models`] - data structures (GraphParams, PluginProcess)
//! - [`protocol`] - control-protocol parse/format (pure, no I/O)
//! - [`plugin`] - helper process lifecycle and output framing
//! - [`repl`] - REPL session, history, and the evaluator capability
//! - [`app`] - the reactor and the dependency-injection context
//! - [`config`] - TOML configuration
//! - [`mod@error`] - error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use lissacon::app::{App, AppEvent};
//!
//! # async fn run() {
//! let config = lissacon::init().unwrap_or_default();
//! let (app, handle) = App::new(config);
//!
//! handle
//!     .events
//!     .send(AppEvent::ReplInput { line: "preset circle".to_string() })
//!     .unwrap();
//!
//! app.run().await;
//! # }
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod plugin;
pub mod protocol;
pub mod repl;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};

/// Load configuration from the default search paths
pub fn init() -> Result<Config> {
    config::ConfigLoader::load()
}

/// Load configuration from an explicit file
pub fn init_with_config(path: &std::path::Path) -> Result<Config> {
    config::ConfigLoader::load_from(path)
}
