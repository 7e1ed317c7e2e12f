//! UI node tree handles and the text-based click resolver.
//!
//! Node handles are transient views into a live, externally-owned UI tree.
//! The platform charges for every handle it gives out, so each one must be
//! released exactly once. [`NodeGuard`] makes that structural: the wrapped
//! handle is released on drop, covering early returns and failure paths.

use std::collections::VecDeque;
use std::ops::Deref;

/// A transient handle into the live UI tree.
///
/// Implementations are only valid for the duration of one resolution pass.
/// `release` is called by [`NodeGuard`] when the handle goes out of scope;
/// callers never invoke it directly.
pub trait UiNode: Send {
    /// Visible text label of the node, if any.
    fn text(&self) -> Option<String>;

    /// Whether the node itself accepts a click action.
    fn is_clickable(&self) -> bool;

    fn child_count(&self) -> usize;

    /// Acquire a fresh handle on the `index`-th child.
    fn child(&self, index: usize) -> Option<NodeGuard>;

    /// Acquire a fresh handle on the parent, `None` at the root.
    fn parent(&self) -> Option<NodeGuard>;

    /// Perform the click action through this node. Returns whether the
    /// platform accepted it.
    fn click(&self) -> bool;

    /// Give the underlying platform handle back. Called exactly once.
    fn release(&mut self);
}

/// Owning guard around a [`UiNode`] handle. Releases the handle on drop.
pub struct NodeGuard {
    node: Box<dyn UiNode>,
}

impl NodeGuard {
    pub fn new(node: Box<dyn UiNode>) -> Self {
        Self { node }
    }
}

impl Deref for NodeGuard {
    type Target = dyn UiNode;

    fn deref(&self) -> &Self::Target {
        self.node.as_ref()
    }
}

impl Drop for NodeGuard {
    fn drop(&mut self) {
        self.node.release();
    }
}

/// Search the tree under `root` for nodes whose text contains `query`
/// (case-insensitive substring match) and click the nearest clickable
/// ancestor of the first match that accepts the click.
///
/// The traversal is breadth-first, bounded to one pass over the tree. For
/// every matching node the parent chain is walked up to the root looking for
/// the clickable capability; the matching node itself counts as its own
/// first ancestor. The search short-circuits as soon as one click is
/// accepted. A clickable ancestor that rejects the click does not end the
/// search over the remaining matches.
pub fn find_clickable_by_text(root: NodeGuard, query: &str) -> bool {
    let needle = query.to_lowercase();

    let mut queue: VecDeque<NodeGuard> = VecDeque::new();
    queue.push_back(root);

    while let Some(node) = queue.pop_front() {
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                queue.push_back(child);
            }
        }

        let matches = node
            .text()
            .map(|t| t.to_lowercase().contains(&needle))
            .unwrap_or(false);

        if matches && click_nearest_clickable(node) {
            return true;
        }
    }

    false
}

/// Walk up from `start` to the first clickable node and click it. Consumes
/// every guard it touches so the chain is released on all paths.
fn click_nearest_clickable(start: NodeGuard) -> bool {
    let mut current = Some(start);
    while let Some(node) = current {
        if node.is_clickable() {
            return node.click();
        }
        current = node.parent();
    }
    false
}
