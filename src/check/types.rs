//! Core types for check results.

use serde::{Deserialize, Serialize};

use crate::syntax::{Declaration, DeclarationKind};

/// Severity levels for issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// What kind of problem an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// No documentation block precedes the declaration.
    #[serde(rename = "missing_documentation")]
    MissingDocumentation,
    /// The block lacks a required element (summary, value, returns).
    #[serde(rename = "missing_element")]
    MissingElement,
    /// A declared parameter has no matching `<param>` element.
    #[serde(rename = "missing_param")]
    MissingParam,
    /// A property or method with no enclosing type.
    #[serde(rename = "orphan_declaration")]
    OrphanDeclaration,
    /// The front-end could not produce a tree for a source unit.
    #[serde(rename = "unit_failure")]
    UnitFailure,
}

impl IssueKind {
    pub const ALL: [IssueKind; 5] = [
        IssueKind::MissingDocumentation,
        IssueKind::MissingElement,
        IssueKind::MissingParam,
        IssueKind::OrphanDeclaration,
        IssueKind::UnitFailure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingDocumentation => "missing_documentation",
            IssueKind::MissingElement => "missing_element",
            IssueKind::MissingParam => "missing_param",
            IssueKind::OrphanDeclaration => "orphan_declaration",
            IssueKind::UnitFailure => "unit_failure",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            IssueKind::MissingDocumentation
            | IssueKind::MissingElement
            | IssueKind::UnitFailure => Severity::Error,
            IssueKind::MissingParam | IssueKind::OrphanDeclaration => Severity::Warning,
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What an issue is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Declaration kind; `None` for unit-level issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaration: Option<DeclarationKind>,
    /// Declaration name, or the unit path for unit-level issues.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing_type: Option<String>,
    /// The undocumented parameter, for `missing_param` issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl Subject {
    pub fn of(decl: &Declaration<'_>) -> Self {
        Self {
            declaration: Some(decl.kind()),
            name: decl.name().to_string(),
            enclosing_type: decl.enclosing_type().map(str::to_string),
            parameter: None,
        }
    }

    pub fn parameter_of(decl: &Declaration<'_>, parameter: &str) -> Self {
        Self {
            parameter: Some(parameter.to_string()),
            ..Self::of(decl)
        }
    }

    pub fn unit(path: &str) -> Self {
        Self {
            declaration: None,
            name: path.to_string(),
            enclosing_type: None,
            parameter: None,
        }
    }
}

/// A single documentation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
    pub subject: Subject,
    pub file: String,
    pub line: usize,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Issue for a unit the front-end could not compile.
    pub fn unit_failure(path: &str, error: &dyn std::error::Error) -> Self {
        Self {
            kind: IssueKind::UnitFailure,
            message: format!("Source unit {} could not be analyzed: {}", path, error),
            subject: Subject::unit(path),
            file: path.to_string(),
            line: 0,
        }
    }
}

/// Ordered result of a check run.
///
/// Issues are kept in discovery order: unit, then declaration kind, then
/// position in the tree, then rule order. Nothing is deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub issues: Vec<Issue>,
    /// Number of source units processed
    pub scanned: usize,
    /// Number of source units the front-end failed on
    pub failed: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    /// True when no issue was found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues of the given kind.
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}
