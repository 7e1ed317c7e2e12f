//! tapbridge: a device automation bridge.
//!
//! A background process exposes device automation primitives (tap, swipe,
//! navigate, type, dump UI hierarchy, capture screen) to an embedded control
//! agent; the platform's accessibility surface performs the actual input
//! synthesis and UI inspection through the [`automation`] driver seam.

pub mod api;
pub mod automation;
pub mod config;
pub mod error;
pub mod gateway;

#[cfg(target_os = "android")]
pub mod ffi;

pub use automation::{AutomationDriver, CommandBridge, HandleRegistry};
pub use gateway::AgentGateway;
