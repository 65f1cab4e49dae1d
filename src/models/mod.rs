//! Data structures for lissacon
//!
//! This module contains the core data models used throughout
//! the application: the Lissajous parameter set and the plugin
//! process lifecycle model.

pub mod graph_params;
pub mod plugin_process;

pub use graph_params::{GraphParams, PARAM_NAMES, PRESET_NAMES};
pub use plugin_process::{PluginProcess, PluginState};
