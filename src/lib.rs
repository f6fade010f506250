//! Doccheck - XML documentation checker for C# code.
//!
//! Doccheck walks every source file of a C# project and reports classes,
//! properties, and methods whose XML documentation comments are missing or
//! incomplete. Results are collected into an ordered [`Report`].
//!
//! # Architecture
//!
//! - `frontend`: project discovery and tree-sitter parsing into syntax trees
//! - `syntax`: language-neutral syntax tree with leading trivia
//! - `check`: documentation extraction, rules, and the check runner
//! - `config`: YAML configuration schema
//! - `report`: Output formatting (pretty, JSON, SARIF)
//!
//! # Example
//!
//! ```no_run
//! use doccheck::{CSharpFrontEnd, Checker, FrontEnd};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let front_end = CSharpFrontEnd::new();
//! let units = front_end.discover(std::path::Path::new("App.sln"))?;
//! let report = Checker::new().check(&front_end, &units).await;
//! for issue in &report.issues {
//!     println!("{}: {}", issue.file, issue.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod report;
pub mod syntax;

pub use check::{
    documentation_for, evaluate, Checker, DeclarationFilter, DocElement, DocumentationBlock,
    Issue, IssueKind, NamePatternFilter, Report, RuleOptions, Severity, Subject,
};
pub use config::Config;
pub use frontend::{CSharpFrontEnd, FrontEnd, FrontEndError, SourceUnit};
pub use syntax::{Declaration, DeclarationKind, NodeId, NodeKind, SyntaxNode, SyntaxTree};
