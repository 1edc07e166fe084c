//! Stylesheet serializer.
//!
//! Walks a (sub)tree and hands each text fragment to a builder together with
//! the node that owns it. Whitespace taken from [`Raws`](crate::Raws) is
//! reported without an owner. Block boundaries (`selector {` and `}`) are
//! flagged with an [`Edge`] so a builder can drop a container's own braces
//! while keeping its contents.

use crate::ast::{NodeId, NodeKind, Stylesheet};

/// Which boundary of a block a fragment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `selector {` / `@name params {`
    Start,
    /// `}`
    End,
}

impl Stylesheet {
    /// Serialize the subtree rooted at `id`, reporting fragments to `builder`.
    pub fn stringify_with<F>(&self, id: NodeId, builder: &mut F)
    where
        F: FnMut(&str, Option<NodeId>, Option<Edge>),
    {
        let node = self.node(id);
        let raws = &node.raws;
        let semicolon = if raws.semicolon { ";" } else { "" };

        match &node.kind {
            NodeKind::Root => {
                self.body(id, builder);
                if !raws.after.is_empty() {
                    builder(&raws.after, None, None);
                }
            }
            NodeKind::Rule { selector } => {
                let start = format!("{selector}{}{{", raws.between);
                self.block(id, &start, builder);
            }
            NodeKind::AtRule {
                name,
                params,
                has_block,
            } => {
                let head = format!("@{name}{}{params}{}", raws.after_name, raws.between);
                if *has_block {
                    self.block(id, &format!("{head}{{"), builder);
                } else {
                    builder(&format!("{head}{semicolon}"), Some(id), None);
                }
            }
            NodeKind::Decl { prop, value } => {
                let text = format!("{prop}{}{value}{}{semicolon}", raws.between, raws.after);
                builder(&text, Some(id), None);
            }
            NodeKind::Comment { text } => builder(text, Some(id), None),
        }
    }

    /// Serialize the whole sheet. Reproduces the parsed source exactly.
    pub fn to_css(&self) -> String {
        self.node_to_string(self.root())
    }

    /// Serialize a single subtree.
    pub fn node_to_string(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.stringify_with(id, &mut |text: &str, _, _| out.push_str(text));
        out
    }

    fn body<F>(&self, id: NodeId, builder: &mut F)
    where
        F: FnMut(&str, Option<NodeId>, Option<Edge>),
    {
        for &child in self.children(id) {
            let before = &self.node(child).raws.before;
            if !before.is_empty() {
                builder(before, None, None);
            }
            self.stringify_with(child, builder);
        }
    }

    fn block<F>(&self, id: NodeId, start: &str, builder: &mut F)
    where
        F: FnMut(&str, Option<NodeId>, Option<Edge>),
    {
        builder(start, Some(id), Some(Edge::Start));
        self.body(id, builder);
        let after = &self.node(id).raws.after;
        if !after.is_empty() {
            builder(after, None, None);
        }
        builder("}", Some(id), Some(Edge::End));
    }
}
