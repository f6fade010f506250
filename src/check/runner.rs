//! Check runner that walks every unit of a project.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::frontend::{FrontEnd, SourceUnit};
use crate::syntax::{DeclarationKind, SyntaxTree};

use super::docs::documentation_for;
use super::filter::{DeclarationFilter, NamePatternFilter};
use super::rules::{evaluate, RuleOptions};
use super::types::{Issue, Report};

/// Runs the documentation rules over source units.
#[derive(Default)]
pub struct Checker {
    options: RuleOptions,
    filter: Option<Box<dyn DeclarationFilter>>,
}

impl Checker {
    /// Create a checker with default rules and no exclusions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a checker from a loaded configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let checker = Self::new().with_options(config.rules.options());
        if config.excluded_declarations.is_empty() {
            return Ok(checker);
        }
        let filter = NamePatternFilter::new(config.excluded_declarations.as_slice())?;
        Ok(checker.with_filter(filter))
    }

    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip declarations the filter excludes.
    pub fn with_filter(mut self, filter: impl DeclarationFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Check `units` in order and return the complete report.
    pub async fn check<F: FrontEnd>(&self, front_end: &F, units: &[SourceUnit]) -> Report {
        let mut report = Report::new();
        self.check_into(front_end, units, &mut report).await;
        report
    }

    /// Check `units` in order, appending to `report` after each unit.
    ///
    /// If the future is dropped between units, `report` keeps everything found
    /// for the units already finished.
    pub async fn check_into<F: FrontEnd>(
        &self,
        front_end: &F,
        units: &[SourceUnit],
        report: &mut Report,
    ) {
        for unit in units {
            report.scanned += 1;
            match front_end.compile(unit).await {
                Ok(tree) => {
                    let issues = self.check_tree(&tree);
                    debug!(unit = %unit.name, issues = issues.len(), "checked unit");
                    report.extend(issues);
                }
                Err(err) => {
                    warn!(unit = %unit.name, error = %err, "failed to analyze unit");
                    report.failed += 1;
                    report.add_issue(Issue::unit_failure(&unit.name, &err));
                }
            }
        }

        info!(
            scanned = report.scanned,
            failed = report.failed,
            issues = report.issues.len(),
            "check finished"
        );
    }

    /// Issues for one tree: all types, then all properties, then all routines,
    /// each in pre-order.
    pub fn check_tree(&self, tree: &SyntaxTree) -> Vec<Issue> {
        let mut issues = Vec::new();

        for kind in DeclarationKind::ALL {
            for decl in tree.declarations(kind) {
                if self.filter.as_ref().map_or(false, |f| f.excludes(&decl)) {
                    debug!(declaration = decl.name(), "excluded by filter");
                    continue;
                }
                let block = documentation_for(&decl);
                issues.extend(evaluate(&decl, block.as_ref(), &self.options));
            }
        }

        issues
    }
}
