//! Front-ends: project discovery and parsing.
//!
//! A front-end knows how to find the source units of a project and how to
//! turn one unit into a [`SyntaxTree`]. The checker only depends on the
//! [`FrontEnd`] trait, so tests can feed it hand-built trees.
//!
//! # Adding a New Language
//!
//! Implement [`FrontEnd`] in a new module next to `csharp.rs`, lowering the
//! parser's tree into [`SyntaxTree`] nodes and classifying leading comments
//! as [`crate::syntax::TriviaKind`] items.

mod csharp;

use std::future::Future;
use std::path::{Path, PathBuf};

use crate::syntax::SyntaxTree;

pub use csharp::CSharpFrontEnd;

/// One source file of a project.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceUnit {
    /// Location on disk.
    pub path: PathBuf,
    /// Path relative to the project root, used in reports.
    pub name: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Failure to produce a syntax tree for one unit.
#[derive(Debug, thiserror::Error)]
pub enum FrontEndError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser produced no tree for {path}")]
    Parse { path: String },
}

/// Source of parsed units for the checker.
pub trait FrontEnd: Send + Sync {
    /// Language identifier (e.g. "csharp").
    fn language_id(&self) -> &'static str;

    /// Find the source units of the project at `project`, in a stable order.
    fn discover(&self, project: &Path) -> anyhow::Result<Vec<SourceUnit>>;

    /// Produce the syntax tree for `unit`.
    ///
    /// Failures are scoped to the unit; the checker records them and moves on.
    fn compile(
        &self,
        unit: &SourceUnit,
    ) -> impl Future<Output = Result<SyntaxTree, FrontEndError>> + Send;
}
