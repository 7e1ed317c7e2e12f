//! Automation command bridge
//!
//! Translates abstract device commands (tap, swipe, navigate, type, inspect)
//! into platform gesture and action primitives through a single privileged
//! automation handle.
//!
//! ## Architecture
//!
//! - `HandleRegistry` - process-wide slot for the one live driver
//! - `AutomationDriver` - platform abstraction (FFI service, desktop pointer, fakes)
//! - `GesturePath` - timed pointer strokes for tap and swipe
//! - `NodeGuard` / `find_clickable_by_text` - scoped UI tree resolution
//! - `CommandBridge` - the dispatch surface consumed by the embedded agent
//!
//! Commands degrade to neutral failure values when no driver is registered,
//! so the embedded agent keeps running when automation permission has not
//! been granted.

pub mod bridge;
pub mod driver;
pub mod gesture;
pub mod hierarchy;
pub mod node;
pub mod registry;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub mod desktop;

pub use bridge::{CommandBridge, CommandResult};
pub use driver::{AutomationDriver, GlobalAction};
pub use gesture::{GesturePath, PathSample, DEFAULT_SWIPE_DURATION_MS, TAP_DURATION_MS};
pub use node::{find_clickable_by_text, NodeGuard, UiNode};
pub use registry::HandleRegistry;

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux"))]
pub use desktop::DesktopDriver;
