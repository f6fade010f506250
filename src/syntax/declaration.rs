//! Borrowed views over declaration nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{NodeId, NodeKind, SyntaxTree, Trivia};

/// Kind of declaration checked for documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// Classes, structs, interfaces, records, enums.
    Type,
    Property,
    /// Methods.
    Routine,
}

impl DeclarationKind {
    /// All kinds, in the order the checker visits them.
    pub const ALL: [DeclarationKind; 3] = [
        DeclarationKind::Type,
        DeclarationKind::Property,
        DeclarationKind::Routine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Type => "type",
            DeclarationKind::Property => "property",
            DeclarationKind::Routine => "routine",
        }
    }

    /// Word used for this kind in issue messages.
    pub fn label(&self) -> &'static str {
        match self {
            DeclarationKind::Type => "Class",
            DeclarationKind::Property => "Property",
            DeclarationKind::Routine => "Method",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A declaration node, borrowed from its tree for the duration of a pass.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
    kind: DeclarationKind,
}

impl<'a> Declaration<'a> {
    pub(crate) fn new(tree: &'a SyntaxTree, id: NodeId, kind: DeclarationKind) -> Self {
        Self { tree, id, kind }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn name(&self) -> &'a str {
        self.tree.node(self.id).name.as_deref().unwrap_or("")
    }

    /// Name of the nearest enclosing type, if any.
    ///
    /// `None` is expected for top-level types. For properties and routines it
    /// means the input tree is inconsistent.
    pub fn enclosing_type(&self) -> Option<&'a str> {
        let tree = self.tree;
        let mut current = tree.parent(self.id);
        while let Some(id) = current {
            let node = tree.node(id);
            if node.kind == NodeKind::Declaration(DeclarationKind::Type) {
                return Some(node.name.as_deref().unwrap_or(""));
            }
            current = tree.parent(id);
        }
        None
    }

    pub fn parameters(&self) -> &'a [String] {
        &self.tree.node(self.id).parameters
    }

    pub fn returns_value(&self) -> bool {
        self.tree.node(self.id).returns_value
    }

    pub fn leading_trivia(&self) -> &'a [Trivia] {
        &self.tree.node(self.id).leading_trivia
    }

    pub fn line(&self) -> usize {
        self.tree.node(self.id).line
    }

    /// Path of the source unit containing this declaration.
    pub fn file(&self) -> &'a str {
        self.tree.path()
    }
}
