//! Arena storage for syntax trees.

use super::{Declaration, DeclarationKind};

/// Index of a node inside the [`SyntaxTree`] that created it.
///
/// Ids are only meaningful for the tree that returned them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a source unit.
    Unit,
    /// A namespace (grouping only, never checked).
    Namespace,
    /// A declaration subject to documentation rules.
    Declaration(DeclarationKind),
}

/// Kind of a leading trivia item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriviaKind {
    /// Structured documentation comment (`///` line or `/** */` block).
    DocComment,
    /// Any other comment.
    Comment,
    /// One or more empty lines.
    BlankLine,
}

/// Non-code text preceding a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    /// Raw comment text including its markers. Empty for blank lines.
    pub text: String,
    /// Line where the trivia starts (1-indexed).
    pub line: usize,
}

impl Trivia {
    pub fn doc(text: impl Into<String>, line: usize) -> Self {
        Self {
            kind: TriviaKind::DocComment,
            text: text.into(),
            line,
        }
    }

    pub fn comment(text: impl Into<String>, line: usize) -> Self {
        Self {
            kind: TriviaKind::Comment,
            text: text.into(),
            line,
        }
    }

    pub fn blank_line(line: usize) -> Self {
        Self {
            kind: TriviaKind::BlankLine,
            text: String::new(),
            line,
        }
    }
}

/// A single node of the tree.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Identifier of the construct, if it has one.
    pub name: Option<String>,
    /// Declared parameter identifiers, in order (routines only).
    pub parameters: Vec<String>,
    /// Whether the routine produces a value (`false` for `void`).
    pub returns_value: bool,
    /// Comments and blank lines between the previous code and this node,
    /// in source order.
    pub leading_trivia: Vec<Trivia>,
    /// Line where the node starts (1-indexed, 0 when unknown).
    pub line: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            name: None,
            parameters: Vec::new(),
            returns_value: false,
            leading_trivia: Vec::new(),
            line: 0,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Shorthand for a named declaration node.
    pub fn declaration(kind: DeclarationKind, name: impl Into<String>) -> Self {
        Self::new(NodeKind::Declaration(kind)).named(name)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn returning(mut self, returns_value: bool) -> Self {
        self.returns_value = returns_value;
        self
    }

    pub fn with_trivia(mut self, trivia: Vec<Trivia>) -> Self {
        self.leading_trivia = trivia;
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Syntax tree of one source unit.
///
/// Node 0 is always the [`NodeKind::Unit`] root. Nodes are appended with
/// [`SyntaxTree::add`] and never removed.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    path: String,
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Create a tree containing only the root node.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            nodes: vec![SyntaxNode::new(NodeKind::Unit)],
        }
    }

    /// Path of the source unit this tree was built from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by this tree.
    pub fn add(&mut self, parent: NodeId, mut node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes[parent.0].children.push(id);
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree holds nothing but its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Pre-order walk over every node, root first.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Every declaration of `kind`, in pre-order.
    pub fn declarations(&self, kind: DeclarationKind) -> impl Iterator<Item = Declaration<'_>> {
        self.preorder().filter_map(move |id| match self.node(id).kind {
            NodeKind::Declaration(k) if k == kind => Some(Declaration::new(self, id, kind)),
            _ => None,
        })
    }
}

/// Iterator returned by [`SyntaxTree::preorder`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
