//! Documentation checks.
//!
//! For each declaration the checker finds the adjacent documentation block
//! ([`documentation_for`]), evaluates the rules for its kind ([`evaluate`]),
//! and folds the resulting issues into a [`Report`].

mod docs;
mod filter;
mod rules;
mod runner;
mod types;

pub use docs::{documentation_for, DocElement, DocumentationBlock};
pub use filter::{DeclarationFilter, NamePatternFilter};
pub use rules::{evaluate, RuleOptions};
pub use runner::Checker;
pub use types::{Issue, IssueKind, Report, Severity, Subject};
