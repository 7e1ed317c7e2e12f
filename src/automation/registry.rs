//! Process-wide slot for the single live automation driver.

use std::sync::{Arc, RwLock};

use super::driver::AutomationDriver;

/// Holds the one active [`AutomationDriver`].
///
/// Connect/disconnect callbacks from the host are serialized, so the slot
/// only needs atomic replacement: writers swap the `Arc` under a short lock,
/// and a dispatch in flight that already cloned the old `Arc` completes
/// against the old driver or fails on its own. Dispatch paths re-read
/// [`current`](Self::current) per command and degrade gracefully when the
/// slot is empty.
#[derive(Default)]
pub struct HandleRegistry {
    slot: RwLock<Option<Arc<dyn AutomationDriver>>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `driver` as the active handle, replacing any prior one.
    /// Replacement is a reconnect, not an error.
    pub fn register(&self, driver: Arc<dyn AutomationDriver>) {
        let previous = self
            .slot
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .replace(driver);
        if previous.is_some() {
            tracing::info!("automation driver replaced (reconnect)");
        } else {
            tracing::info!("automation driver registered");
        }
    }

    /// Clear the slot on disconnect. Safe to call when already empty.
    pub fn unregister(&self) {
        let previous = self.slot.write().unwrap_or_else(|e| e.into_inner()).take();
        if previous.is_some() {
            tracing::info!("automation driver unregistered");
        }
    }

    /// Clone out the active driver, if any.
    pub fn current(&self) -> Option<Arc<dyn AutomationDriver>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_registered(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::driver::GlobalAction;
    use crate::automation::gesture::GesturePath;
    use crate::automation::node::NodeGuard;
    use async_trait::async_trait;

    struct TaggedDriver;

    #[async_trait]
    impl AutomationDriver for TaggedDriver {
        async fn dispatch_gesture(&self, _path: &GesturePath) -> bool {
            true
        }
        async fn perform_global_action(&self, _action: GlobalAction) -> bool {
            true
        }
        async fn input_text(&self, _text: &str) -> bool {
            true
        }
        fn root_node(&self) -> Option<NodeGuard> {
            None
        }
        async fn take_screenshot(&self) -> Option<Vec<u8>> {
            None
        }
    }

    #[test]
    fn starts_unregistered() {
        let registry = HandleRegistry::new();
        assert!(!registry.is_registered());
        assert!(registry.current().is_none());
    }

    #[test]
    fn register_then_unregister_clears_slot() {
        let registry = HandleRegistry::new();
        registry.register(Arc::new(TaggedDriver));
        assert!(registry.is_registered());
        registry.unregister();
        assert!(registry.current().is_none());
        // Idempotent on an empty slot
        registry.unregister();
        assert!(!registry.is_registered());
    }

    #[test]
    fn re_registration_replaces_the_driver() {
        let registry = HandleRegistry::new();
        let first: Arc<dyn AutomationDriver> = Arc::new(TaggedDriver);
        let second: Arc<dyn AutomationDriver> = Arc::new(TaggedDriver);

        registry.register(first.clone());
        registry.register(second.clone());

        let current = registry.current().unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert!(!Arc::ptr_eq(&current, &first));
    }
}
