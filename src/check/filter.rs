//! Declaration exclusion hooks.

use anyhow::{Context, Result};
use regex::Regex;

use crate::syntax::Declaration;

/// Decides whether a declaration is skipped entirely.
pub trait DeclarationFilter: Send + Sync {
    fn excludes(&self, decl: &Declaration<'_>) -> bool;
}

/// Excludes declarations whose name matches any of a set of regexes.
#[derive(Debug, Clone)]
pub struct NamePatternFilter {
    patterns: Vec<Regex>,
}

impl NamePatternFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).with_context(|| format!("Invalid declaration pattern: {}", p))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }
}

impl DeclarationFilter for NamePatternFilter {
    fn excludes(&self, decl: &Declaration<'_>) -> bool {
        let name = decl.name();
        self.patterns.iter().any(|re| re.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{DeclarationKind, SyntaxNode, SyntaxTree};

    fn tree() -> SyntaxTree {
        let mut tree = SyntaxTree::new("F.cs");
        let root = tree.root();
        tree.add(root, SyntaxNode::declaration(DeclarationKind::Type, "TestHelpers"));
        tree.add(root, SyntaxNode::declaration(DeclarationKind::Type, "Widget"));
        tree
    }

    #[test]
    fn test_name_patterns() {
        let tree = tree();
        let filter = NamePatternFilter::new(&["^Test"]).unwrap();
        let excluded: Vec<_> = tree
            .declarations(DeclarationKind::Type)
            .filter(|d| filter.excludes(d))
            .map(|d| d.name())
            .collect();
        assert_eq!(excluded, vec!["TestHelpers"]);
    }

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let tree = tree();
        let filter = NamePatternFilter::new::<&str>(&[]).unwrap();
        assert!(tree.declarations(DeclarationKind::Type).all(|d| !filter.excludes(&d)));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = NamePatternFilter::new(&["(unclosed"]).unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
