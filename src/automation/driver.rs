//! The seam between the command bridge and the platform automation layer.
//!
//! Abstracts whatever privileged surface performs input synthesis and UI
//! inspection on the host: an accessibility service reached over FFI, the
//! desktop pointer driver, or a recording fake in tests.

use async_trait::async_trait;

use super::gesture::GesturePath;
use super::node::NodeGuard;

/// Global navigation intents that bypass gesture synthesis entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Back,
    Home,
    Recents,
}

/// The privileged automation capability. At most one live implementation is
/// registered process-wide (see [`super::registry::HandleRegistry`]).
///
/// Every method is fire-and-acknowledge: the boolean reports whether the
/// platform accepted the dispatch, not whether it had any UI effect.
#[async_trait]
pub trait AutomationDriver: Send + Sync {
    /// Submit a timed pointer stroke.
    async fn dispatch_gesture(&self, path: &GesturePath) -> bool;

    /// Perform a global navigation action.
    async fn perform_global_action(&self, action: GlobalAction) -> bool;

    /// Type text into the currently focused editable target. `false` when
    /// there is no such target.
    async fn input_text(&self, text: &str) -> bool;

    /// Acquire a handle on the root of the current UI tree, `None` when no
    /// foreground window is available or the driver has no tree access.
    fn root_node(&self) -> Option<NodeGuard>;

    /// Capture the screen as compressed image bytes (PNG), `None` when
    /// unsupported.
    async fn take_screenshot(&self) -> Option<Vec<u8>>;
}
