//! Tag-delimited serialization of the live UI tree.
//!
//! The dump format is deliberately simple so a remote caller can parse node
//! text and clickability without a schema: one `<node>` element per UI node,
//! nested to mirror the tree, with `text` and `clickable` attributes.

use super::node::NodeGuard;

/// Placeholder dump when no automation handle is registered.
pub const DUMP_UNAVAILABLE: &str = "<error>automation unavailable</error>";

/// Placeholder dump when the handle has no UI root (no foreground window).
pub const DUMP_NO_ROOT: &str = "<error>no active window</error>";

/// Serialize the tree under `root` into tag-delimited markup.
pub fn dump_tree(root: NodeGuard) -> String {
    let mut out = String::from("<hierarchy>");
    write_node(root, &mut out);
    out.push_str("</hierarchy>");
    out
}

fn write_node(node: NodeGuard, out: &mut String) {
    let text = node.text().unwrap_or_default();
    out.push_str(&format!(
        "<node text=\"{}\" clickable=\"{}\">",
        escape(&text),
        node.is_clickable()
    ));
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            write_node(child, out);
        }
    }
    out.push_str("</node>");
    // `node` drops here, releasing the handle after its subtree is written
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(escape("a & <b> \"c\""), "a &amp; &lt;b&gt; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }
}
