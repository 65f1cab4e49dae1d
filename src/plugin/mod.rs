//! Plugin Process Management
//!
//! Launches external "slider" helper processes (a Tk one and a tkinter
//! one) that mirror the graph controls in their own GUI toolkit and report
//! changes back over the line-oriented control protocol. This module owns
//! process lifecycle, non-blocking output streaming, and line framing;
//! decoding the lines lives in [`crate::protocol`].

pub mod channel;
pub mod manager;
pub mod scripts;

pub use channel::{LaunchSpec, PluginChannel, PluginEvent, PluginKind, PluginStream};
pub use manager::PluginManager;
