//! The public command surface dispatched by the embedded control agent.
//!
//! Every command is synchronous from the caller's point of view and atomic:
//! it re-reads the current driver from the registry, dispatches once, and
//! degrades to its neutral failure value when no driver is registered. No
//! command ever errors out of this layer — a missing permission, a rejected
//! gesture and a failed text match all surface the same way by design.

use std::sync::Arc;

use base64::Engine;
use serde::Serialize;

use super::driver::GlobalAction;
use super::gesture::{GesturePath, DEFAULT_SWIPE_DURATION_MS};
use super::hierarchy::{dump_tree, DUMP_NO_ROOT, DUMP_UNAVAILABLE};
use super::node::find_clickable_by_text;
use super::registry::HandleRegistry;

/// Outcome envelope for one bridge command, serialized to control clients.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub ok: bool,
    /// Textual payload (hierarchy dump).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Binary payload as base64 (screenshot PNG).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl CommandResult {
    pub fn from_flag(ok: bool) -> Self {
        Self { ok, text: None, data: None }
    }

    pub fn text(ok: bool, text: String) -> Self {
        Self { ok, text: Some(text), data: None }
    }

    pub fn bytes(bytes: &[u8]) -> Self {
        Self {
            ok: !bytes.is_empty(),
            text: None,
            data: Some(base64::engine::general_purpose::STANDARD.encode(bytes)),
        }
    }
}

/// Dispatches abstract automation commands through the registry's driver.
#[derive(Clone)]
pub struct CommandBridge {
    registry: Arc<HandleRegistry>,
}

impl CommandBridge {
    pub fn new(registry: Arc<HandleRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<HandleRegistry> {
        &self.registry
    }

    /// Tap at `(x, y)`. `true` means the platform accepted the stroke, not
    /// that it had any UI effect.
    pub async fn click(&self, x: f32, y: f32) -> bool {
        let Some(driver) = self.registry.current() else {
            return false;
        };
        match GesturePath::tap(x, y) {
            Ok(path) => driver.dispatch_gesture(&path).await,
            Err(e) => {
                tracing::debug!("rejected click({x}, {y}): {e}");
                false
            }
        }
    }

    /// Linear swipe between two points. A negative `duration_ms` is rejected
    /// before any path is built; `None` uses the default duration.
    pub async fn swipe(&self, x1: f32, y1: f32, x2: f32, y2: f32, duration_ms: Option<i64>) -> bool {
        let duration = match duration_ms {
            None => DEFAULT_SWIPE_DURATION_MS,
            Some(d) if d < 0 => {
                tracing::debug!("rejected swipe with negative duration {d}");
                return false;
            }
            Some(d) => d as u64,
        };
        let Some(driver) = self.registry.current() else {
            return false;
        };
        match GesturePath::swipe(x1, y1, x2, y2, duration) {
            Ok(path) => driver.dispatch_gesture(&path).await,
            Err(e) => {
                tracing::debug!("rejected swipe: {e}");
                false
            }
        }
    }

    pub async fn back(&self) -> bool {
        self.global_action(GlobalAction::Back).await
    }

    pub async fn home(&self) -> bool {
        self.global_action(GlobalAction::Home).await
    }

    pub async fn recents(&self) -> bool {
        self.global_action(GlobalAction::Recents).await
    }

    async fn global_action(&self, action: GlobalAction) -> bool {
        match self.registry.current() {
            Some(driver) => driver.perform_global_action(action).await,
            None => false,
        }
    }

    /// Find a node whose text contains `text` (case-insensitive) and click
    /// its nearest clickable ancestor. One bounded tree traversal, no
    /// retries. Empty queries are rejected up front.
    pub async fn click_by_text(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let Some(driver) = self.registry.current() else {
            return false;
        };
        match driver.root_node() {
            Some(root) => find_clickable_by_text(root, text),
            None => false,
        }
    }

    /// Type text into the focused editable target.
    pub async fn input_text(&self, text: &str) -> bool {
        match self.registry.current() {
            Some(driver) => driver.input_text(text).await,
            None => false,
        }
    }

    /// Serialize the current UI tree. Returns an `<error>` placeholder
    /// element instead of failing when the tree is unavailable.
    pub async fn dump_hierarchy(&self) -> String {
        let Some(driver) = self.registry.current() else {
            return DUMP_UNAVAILABLE.to_string();
        };
        match driver.root_node() {
            Some(root) => dump_tree(root),
            None => DUMP_NO_ROOT.to_string(),
        }
    }

    /// Capture the screen as PNG bytes, empty buffer when unsupported.
    pub async fn screenshot(&self) -> Vec<u8> {
        match self.registry.current() {
            Some(driver) => driver.take_screenshot().await.unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_command_degrades_without_a_driver() {
        let bridge = CommandBridge::new(Arc::new(HandleRegistry::new()));

        assert!(!bridge.click(10.0, 20.0).await);
        assert!(!bridge.swipe(0.0, 0.0, 50.0, 50.0, None).await);
        assert!(!bridge.back().await);
        assert!(!bridge.home().await);
        assert!(!bridge.recents().await);
        assert!(!bridge.click_by_text("Submit").await);
        assert!(!bridge.input_text("hello").await);
        assert_eq!(bridge.dump_hierarchy().await, DUMP_UNAVAILABLE);
        assert!(bridge.screenshot().await.is_empty());
    }

    #[test]
    fn command_result_encodes_bytes_as_base64() {
        let result = CommandResult::bytes(b"png");
        assert!(result.ok);
        assert_eq!(result.data.as_deref(), Some("cG5n"));

        let empty = CommandResult::bytes(&[]);
        assert!(!empty.ok);
    }
}
