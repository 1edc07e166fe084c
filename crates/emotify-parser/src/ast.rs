//! Stylesheet tree.
//!
//! Nodes live in a single arena owned by [`Stylesheet`] and refer to each
//! other by [`NodeId`]. Every node keeps a parent link, so scope questions
//! ("is this declaration inside a `@mixin`?") are answered by walking upward
//! without touching the rest of the tree.
//!
//! Whitespace around nodes is kept in [`Raws`] so a parsed sheet serializes
//! back to its exact source text.

/// Index of a node inside its [`Stylesheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every stylesheet.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Document root.
    Root,

    /// `selector { ... }`
    Rule { selector: String },

    /// `prop: value`
    Decl { prop: String, value: String },

    /// `@name params;` or `@name params { ... }`
    AtRule {
        name: String,
        params: String,
        has_block: bool,
    },

    /// `/* text */` or `// text`, delimiters included.
    Comment { text: String },
}

impl NodeKind {
    /// Selector of a rule node.
    pub fn selector(&self) -> Option<&str> {
        match self {
            NodeKind::Rule { selector } => Some(selector),
            _ => None,
        }
    }

    /// Name of an at-rule node, without the `@`.
    pub fn at_rule_name(&self) -> Option<&str> {
        match self {
            NodeKind::AtRule { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_at_rule(&self, expected: &str) -> bool {
        self.at_rule_name() == Some(expected)
    }

    pub fn is_decl(&self) -> bool {
        matches!(self, NodeKind::Decl { .. })
    }
}

/// Raw source text surrounding a node.
///
/// - `before`: whitespace (and stray `;`) preceding the node
/// - `between`: rule/at-rule: text between selector/params and `{` or `;`;
///   declaration: text from the end of the property to the start of the value
/// - `after`: container: text before the closing `}`;
///   declaration: whitespace after the value
/// - `after_name`: at-rule: whitespace between the name and the params
/// - `semicolon`: the node was terminated by `;`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raws {
    pub before: String,
    pub between: String,
    pub after: String,
    pub after_name: String,
    pub semicolon: bool,
}

/// A node and its links.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// 1-based source line the node starts on.
    pub line: usize,
    pub raws: Raws,
}

/// A parsed stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    nodes: Vec<NodeData>,
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Stylesheet {
    /// Create a sheet holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
                line: 1,
                raws: Raws::default(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn line(&self, id: NodeId) -> usize {
        self.nodes[id.0].line
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Append a new node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind, line: usize, raws: Raws) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            line,
            raws,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Walk parent links upward from `id`, nearest first. The node itself is
    /// not yielded; the root is the last item.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            sheet: self,
            next: self.parent(id),
        }
    }

    /// All nodes below `id` in document order (pre-order), `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }
}

/// Iterator over a node's ancestors. See [`Stylesheet::ancestors`].
pub struct Ancestors<'a> {
    sheet: &'a Stylesheet,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.sheet.parent(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(selector: &str) -> NodeKind {
        NodeKind::Rule {
            selector: selector.into(),
        }
    }

    #[test]
    fn test_new_sheet_has_only_root() {
        let sheet = Stylesheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet.kind(sheet.root()), &NodeKind::Root);
        assert_eq!(sheet.parent(sheet.root()), None);
    }

    #[test]
    fn test_append_links_parent_and_child() {
        let mut sheet = Stylesheet::new();
        let card = sheet.append(NodeId::ROOT, rule(".card"), 1, Raws::default());
        assert_eq!(sheet.parent(card), Some(NodeId::ROOT));
        assert_eq!(sheet.children(NodeId::ROOT), &[card]);
        assert_eq!(sheet.len(), 2);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut sheet = Stylesheet::new();
        let a = sheet.append(NodeId::ROOT, rule(".a"), 1, Raws::default());
        let b = sheet.append(a, rule(".b"), 2, Raws::default());
        let c = sheet.append(b, rule(".c"), 3, Raws::default());
        let chain: Vec<NodeId> = sheet.ancestors(c).collect();
        assert_eq!(chain, vec![b, a, NodeId::ROOT]);
        assert_eq!(sheet.ancestors(NodeId::ROOT).count(), 0);
    }

    #[test]
    fn test_descendants_document_order() {
        let mut sheet = Stylesheet::new();
        let a = sheet.append(NodeId::ROOT, rule(".a"), 1, Raws::default());
        let a1 = sheet.append(a, rule(".a1"), 2, Raws::default());
        let b = sheet.append(NodeId::ROOT, rule(".b"), 3, Raws::default());
        let a2 = sheet.append(a, rule(".a2"), 4, Raws::default());
        assert_eq!(sheet.descendants(NodeId::ROOT), vec![a, a1, a2, b]);
        assert_eq!(sheet.descendants(a), vec![a1, a2]);
    }

    #[test]
    fn test_kind_accessors() {
        let at = NodeKind::AtRule {
            name: "mixin".into(),
            params: "foo".into(),
            has_block: true,
        };
        assert!(at.is_at_rule("mixin"));
        assert_eq!(at.selector(), None);
        assert_eq!(rule(".x").selector(), Some(".x"));
        assert!(!rule(".x").is_decl());
    }
}
