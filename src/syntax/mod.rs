//! Read-only syntax tree abstraction consumed by the checker.
//!
//! A front-end lowers whatever parser it uses into a [`SyntaxTree`]: an arena
//! of nodes that keeps only what documentation checking needs.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │ Source Unit │────▶│  Front-end   │────▶│   SyntaxTree    │
//! └─────────────┘     │ (tree-sitter)│     │ (arena, trivia) │
//!                     └──────────────┘     └─────────────────┘
//!                                                  │
//!                                                  ▼
//!                                          ┌─────────────────┐
//!                                          │ Declaration<'a> │
//!                                          │  (borrowed view)│
//!                                          └─────────────────┘
//! ```
//!
//! Every declaration node stores its leading trivia (comments and blank-line
//! markers between it and the preceding code), so the documentation block of
//! a declaration is recomputed from adjacency instead of being stored.

mod declaration;
mod tree;

pub use declaration::{Declaration, DeclarationKind};
pub use tree::{NodeId, NodeKind, Preorder, SyntaxNode, SyntaxTree, Trivia, TriviaKind};
