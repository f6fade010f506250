//! Documentation rules per declaration kind.

use crate::syntax::{Declaration, DeclarationKind};

use super::docs::DocumentationBlock;
use super::types::{Issue, IssueKind, Subject};

/// Toggles for the optional routine checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOptions {
    /// Report parameters without a `<param>` element.
    pub require_param_elements: bool,
    /// Report value-returning routines without a `<returns>` element.
    pub require_returns_element: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            require_param_elements: true,
            require_returns_element: true,
        }
    }
}

/// Evaluate the rules for one declaration.
///
/// A missing block short-circuits every other check. Issues come back in rule
/// order: summary, parameters in declaration order, then returns.
pub fn evaluate(
    decl: &Declaration<'_>,
    block: Option<&DocumentationBlock>,
    options: &RuleOptions,
) -> Vec<Issue> {
    match decl.kind() {
        DeclarationKind::Type => check_type(decl, block),
        DeclarationKind::Property => check_property(decl, block),
        DeclarationKind::Routine => check_routine(decl, block, options),
    }
}

fn check_type(decl: &Declaration<'_>, block: Option<&DocumentationBlock>) -> Vec<Issue> {
    let name = decl.name();
    let Some(block) = block else {
        return vec![issue(
            decl,
            IssueKind::MissingDocumentation,
            format!("Class {} does not have any XML comments", name),
        )];
    };

    if block.has("summary") {
        return Vec::new();
    }
    vec![issue(
        decl,
        IssueKind::MissingElement,
        format!(
            "Class {} does not have a <summary> element in its XML comments",
            name
        ),
    )]
}

fn check_property(decl: &Declaration<'_>, block: Option<&DocumentationBlock>) -> Vec<Issue> {
    let Some(owner) = decl.enclosing_type() else {
        return vec![orphan(decl)];
    };
    let name = decl.name();

    let Some(block) = block else {
        return vec![issue(
            decl,
            IssueKind::MissingDocumentation,
            format!("Property {} in {} does not have any XML comments", name, owner),
        )];
    };

    if block.has("summary") || block.has("value") {
        return Vec::new();
    }
    vec![issue(
        decl,
        IssueKind::MissingElement,
        format!(
            "Property {} in {} does not have a <summary> or <value> element in its XML comments",
            name, owner
        ),
    )]
}

fn check_routine(
    decl: &Declaration<'_>,
    block: Option<&DocumentationBlock>,
    options: &RuleOptions,
) -> Vec<Issue> {
    let Some(owner) = decl.enclosing_type() else {
        return vec![orphan(decl)];
    };
    let name = decl.name();

    let Some(block) = block else {
        return vec![issue(
            decl,
            IssueKind::MissingDocumentation,
            format!("Method {} in {} does not have any XML comments", name, owner),
        )];
    };

    let mut issues = Vec::new();

    if !block.has("summary") {
        issues.push(issue(
            decl,
            IssueKind::MissingElement,
            format!(
                "Method {} in {} does not have a <summary> element in its XML comments",
                name, owner
            ),
        ));
    }

    if options.require_param_elements {
        for parameter in decl.parameters() {
            if block.documents_param(parameter) {
                continue;
            }
            issues.push(Issue {
                kind: IssueKind::MissingParam,
                message: format!(
                    "Method {} in {} does not have a <param> element for parameter {} in its XML comments",
                    name, owner, parameter
                ),
                subject: Subject::parameter_of(decl, parameter),
                file: decl.file().to_string(),
                line: decl.line(),
            });
        }
    }

    if options.require_returns_element && decl.returns_value() && !block.has("returns") {
        issues.push(issue(
            decl,
            IssueKind::MissingElement,
            format!(
                "Method {} in {} does not have a <returns> element in its XML comments",
                name, owner
            ),
        ));
    }

    issues
}

fn orphan(decl: &Declaration<'_>) -> Issue {
    issue(
        decl,
        IssueKind::OrphanDeclaration,
        format!(
            "{} {} is not declared inside a type",
            decl.kind().label(),
            decl.name()
        ),
    )
}

fn issue(decl: &Declaration<'_>, kind: IssueKind, message: String) -> Issue {
    Issue {
        kind,
        message,
        subject: Subject::of(decl),
        file: decl.file().to_string(),
        line: decl.line(),
    }
}
