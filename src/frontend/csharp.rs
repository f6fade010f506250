//! C# front-end using tree-sitter.

use std::path::{Path, PathBuf};

use tracing::debug;
use tree_sitter::{Language, Node, Parser};
use walkdir::WalkDir;

use super::{FrontEnd, FrontEndError, SourceUnit};
use crate::syntax::{DeclarationKind, NodeId, NodeKind, SyntaxNode, SyntaxTree, Trivia};

/// Directories never searched for sources.
const SKIPPED_DIRS: &[&str] = &["bin", "obj", "node_modules", "packages"];

/// Project definition files whose directory is the project root.
const PROJECT_EXTENSIONS: &[&str] = &["sln", "slnx", "csproj"];

/// Subtrees that cannot contain checked declarations.
const OPAQUE_NODES: &[&str] = &["block", "arrow_expression_clause", "accessor_list"];

pub struct CSharpFrontEnd {
    language: Language,
}

impl CSharpFrontEnd {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> Result<Parser, FrontEndError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse C# source text into a syntax tree labelled with `path`.
    ///
    /// Syntax errors do not fail the parse: tree-sitter keeps going and the
    /// declarations it recovers are still lowered.
    pub fn parse_source(&self, path: &str, source: &[u8]) -> Result<SyntaxTree, FrontEndError> {
        let mut parser = self.create_parser()?;
        let parsed = parser.parse(source, None).ok_or_else(|| FrontEndError::Parse {
            path: path.to_string(),
        })?;

        let mut tree = SyntaxTree::new(path);
        let root = tree.root();
        lower_children(parsed.root_node(), source, &mut tree, root);
        Ok(tree)
    }
}

impl Default for CSharpFrontEnd {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontEnd for CSharpFrontEnd {
    fn language_id(&self) -> &'static str {
        "csharp"
    }

    fn discover(&self, project: &Path) -> anyhow::Result<Vec<SourceUnit>> {
        let metadata = std::fs::metadata(project)
            .map_err(|e| anyhow::anyhow!("cannot access {}: {}", project.display(), e))?;

        if metadata.is_dir() {
            return collect_sources(project);
        }

        let ext = project.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext == "cs" {
            let name = project
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| project.to_string_lossy().to_string());
            return Ok(vec![SourceUnit::new(project, name)]);
        }

        if PROJECT_EXTENSIONS.contains(&ext) {
            let root = match project.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            return collect_sources(&root);
        }

        anyhow::bail!(
            "unsupported project file {} (expected a directory, .sln, .csproj or .cs)",
            project.display()
        )
    }

    async fn compile(&self, unit: &SourceUnit) -> Result<SyntaxTree, FrontEndError> {
        let source = tokio::fs::read(&unit.path)
            .await
            .map_err(|source| FrontEndError::Read {
                path: unit.name.clone(),
                source,
            })?;
        debug!(unit = %unit.name, bytes = source.len(), "parsing unit");
        self.parse_source(&unit.name, &source)
    }
}

/// Collect every `.cs` file below `root`, sorted by path.
fn collect_sources(root: &Path) -> anyhow::Result<Vec<SourceUnit>> {
    let mut units = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("cs") {
            continue;
        }
        let name = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        units.push(SourceUnit::new(path, name));
    }

    units.sort();
    debug!(root = %root.display(), units = units.len(), "discovered sources");
    Ok(units)
}

fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

fn declaration_kind(kind: &str) -> Option<DeclarationKind> {
    match kind {
        "class_declaration"
        | "struct_declaration"
        | "interface_declaration"
        | "record_declaration"
        | "record_struct_declaration"
        | "enum_declaration" => Some(DeclarationKind::Type),
        "property_declaration" => Some(DeclarationKind::Property),
        "method_declaration" => Some(DeclarationKind::Routine),
        _ => None,
    }
}

fn lower_children(node: Node, source: &[u8], tree: &mut SyntaxTree, parent: NodeId) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        lower(child, source, tree, parent);
    }
}

/// Lower one tree-sitter node. Nodes that are not namespaces or checked
/// declarations are flattened: their children attach to `parent`.
fn lower(node: Node, source: &[u8], tree: &mut SyntaxTree, parent: NodeId) {
    if OPAQUE_NODES.contains(&node.kind()) {
        return;
    }

    let lowered = match node.kind() {
        "namespace_declaration" | "file_scoped_namespace_declaration" => {
            let mut namespace = SyntaxNode::new(NodeKind::Namespace)
                .at_line(node.start_position().row + 1);
            if let Some(name) = node.child_by_field_name("name") {
                namespace = namespace.named(node_text(name, source));
            }
            Some(namespace)
        }
        kind => declaration_kind(kind).map(|k| declaration_node(node, source, k)),
    };

    match lowered {
        Some(syntax_node) => {
            let id = tree.add(parent, syntax_node);
            lower_children(node, source, tree, id);
        }
        None => lower_children(node, source, tree, parent),
    }
}

fn declaration_node(node: Node, source: &[u8], kind: DeclarationKind) -> SyntaxNode {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_default();

    let mut syntax_node = SyntaxNode::declaration(kind, name)
        .at_line(node.start_position().row + 1)
        .with_trivia(leading_trivia(node, source));

    if kind == DeclarationKind::Routine {
        syntax_node = syntax_node
            .with_parameters(parameter_names(node, source))
            .returning(returns_value(node, source));
    }

    syntax_node
}

fn parameter_names(method: Node, source: &[u8]) -> Vec<String> {
    let list = method.child_by_field_name("parameters").or_else(|| {
        let mut cursor = method.walk();
        let found = method
            .named_children(&mut cursor)
            .find(|n| n.kind() == "parameter_list");
        found
    });
    let Some(list) = list else {
        return Vec::new();
    };

    // A `params` array has no wrapper node: its `name` field sits on the
    // list itself, between the regular parameters.
    let mut names = Vec::new();
    let mut cursor = list.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if matches!(child.kind(), "parameter" | "parameter_array") {
                names.extend(parameter_name(child, source));
            } else if cursor.field_name() == Some("name") {
                names.push(node_text(child, source));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    names
}

fn parameter_name(parameter: Node, source: &[u8]) -> Option<String> {
    let name = parameter.child_by_field_name("name").or_else(|| {
        let mut cursor = parameter.walk();
        let last = parameter
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "identifier")
            .last();
        last
    })?;
    Some(node_text(name, source))
}

fn returns_value(method: Node, source: &[u8]) -> bool {
    method
        .child_by_field_name("returns")
        .or_else(|| method.child_by_field_name("type"))
        .map(|t| node_text(t, source).trim() != "void")
        .unwrap_or(false)
}

/// Last row a node occupies, ignoring a trailing newline.
fn last_row(node: Node) -> usize {
    let end = node.end_position();
    if end.column == 0 && end.row > node.start_position().row {
        end.row - 1
    } else {
        end.row
    }
}

/// Preprocessor lines such as `#region` or `#pragma` that sit between a
/// declaration and its comments. Conditional blocks hold code and do not count.
fn is_directive(node: Node) -> bool {
    let kind = node.kind();
    kind.starts_with("preproc_") && !matches!(kind, "preproc_if" | "preproc_elif" | "preproc_else")
}

/// Comments directly above `node`, with blank-line markers, in source order.
/// Preprocessor directives in between are skipped.
fn leading_trivia(node: Node, source: &[u8]) -> Vec<Trivia> {
    let mut trivia = Vec::new();
    let mut next_row = node.start_position().row;
    let mut current = node.prev_sibling();

    while let Some(sibling) = current {
        let previous = sibling.prev_sibling();

        if is_directive(sibling) {
            next_row = sibling.start_position().row;
            current = previous;
            continue;
        }
        if sibling.kind() != "comment" {
            break;
        }
        let comment = sibling;

        // `int x; // note` trails the previous member.
        if let Some(prev) = previous {
            if prev.kind() != "comment"
                && !is_directive(prev)
                && last_row(prev) == comment.start_position().row
            {
                break;
            }
        }

        let end_row = last_row(comment);
        if next_row > end_row + 1 {
            trivia.push(Trivia::blank_line(end_row + 2));
        }

        let line = comment.start_position().row + 1;
        let text = node_text(comment, source);
        trivia.push(if is_doc_comment(&text) {
            Trivia::doc(text, line)
        } else {
            Trivia::comment(text, line)
        });

        next_row = comment.start_position().row;
        current = previous;
    }

    trivia.reverse();
    trivia
}

/// `///` lines (but not `////`) and `/** */` blocks (but not `/**/`).
fn is_doc_comment(text: &str) -> bool {
    (text.starts_with("///") && !text.starts_with("////"))
        || (text.starts_with("/**") && !text.starts_with("/**/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TriviaKind;
    use std::fs;
    use tempfile::TempDir;

    fn parse(source: &str) -> SyntaxTree {
        CSharpFrontEnd::new()
            .parse_source("Test.cs", source.as_bytes())
            .unwrap()
    }

    fn names(tree: &SyntaxTree, kind: DeclarationKind) -> Vec<String> {
        tree.declarations(kind).map(|d| d.name().to_string()).collect()
    }

    #[test]
    fn test_declarations_are_lowered() {
        let tree = parse(
            r#"
namespace App
{
    public class Foo
    {
        public int Count { get; set; }

        public void Reset() { Count = 0; }

        public class Inner
        {
            public string Label { get; }
        }
    }

    public interface IShape
    {
        double Area();
    }
}
"#,
        );

        assert_eq!(names(&tree, DeclarationKind::Type), vec!["Foo", "Inner", "IShape"]);
        assert_eq!(names(&tree, DeclarationKind::Property), vec!["Count", "Label"]);
        assert_eq!(names(&tree, DeclarationKind::Routine), vec!["Reset", "Area"]);

        let label = tree.declarations(DeclarationKind::Property).nth(1).unwrap();
        assert_eq!(label.enclosing_type(), Some("Inner"));
        assert_eq!(label.file(), "Test.cs");
    }

    #[test]
    fn test_parameters_and_return_value() {
        let tree = parse(
            r#"
public class Calc
{
    public int Add(int x, int y) { return x + y; }
    public void Log(string message) { }
    public void Nothing() { }
}
"#,
        );

        let methods: Vec<_> = tree.declarations(DeclarationKind::Routine).collect();
        assert_eq!(methods.len(), 3);

        assert_eq!(methods[0].parameters().to_vec(), vec!["x", "y"]);
        assert!(methods[0].returns_value());

        assert_eq!(methods[1].parameters().to_vec(), vec!["message"]);
        assert!(!methods[1].returns_value());

        assert!(methods[2].parameters().is_empty());
        assert!(!methods[2].returns_value());
    }

    #[test]
    fn test_leading_doc_comments_are_classified() {
        let tree = parse(
            r#"
/// <summary>
/// A documented class.
/// </summary>
public class Foo
{
    // plain comment
    public int Bar { get; set; }
}
"#,
        );

        let foo = tree.declarations(DeclarationKind::Type).next().unwrap();
        let kinds: Vec<_> = foo.leading_trivia().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TriviaKind::DocComment; 3]);
        assert_eq!(foo.leading_trivia()[0].line, 2);
        assert_eq!(foo.line(), 5);

        let bar = tree.declarations(DeclarationKind::Property).next().unwrap();
        let kinds: Vec<_> = bar.leading_trivia().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TriviaKind::Comment]);
    }

    #[test]
    fn test_blank_line_is_recorded() {
        let tree = parse(
            r#"
/// <summary>Detached.</summary>

public class Foo { }
"#,
        );

        let foo = tree.declarations(DeclarationKind::Type).next().unwrap();
        let kinds: Vec<_> = foo.leading_trivia().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TriviaKind::DocComment, TriviaKind::BlankLine]);
    }

    #[test]
    fn test_trailing_comment_of_previous_member_is_not_leading() {
        let tree = parse(
            r#"
public class Foo
{
    public int A { get; set; } // trailing
    public int B { get; set; }
}
"#,
        );

        let b = tree.declarations(DeclarationKind::Property).nth(1).unwrap();
        assert_eq!(b.name(), "B");
        assert!(b.leading_trivia().is_empty());
    }

    #[test]
    fn test_grammar_loads() {
        if let Err(err) = CSharpFrontEnd::new().create_parser() {
            panic!("C# grammar failed to load: {}", err);
        }
    }

    #[test]
    fn test_params_array_keeps_declaration_order() {
        let tree = parse(
            r#"
public class R
{
    public int F(int a, params int[] rest) { return a; }
    public void G(params object[] extra) { }
}
"#,
        );

        let methods: Vec<_> = tree.declarations(DeclarationKind::Routine).collect();
        assert_eq!(methods[0].parameters().to_vec(), vec!["a", "rest"]);
        assert_eq!(methods[1].parameters().to_vec(), vec!["extra"]);
    }

    #[test]
    fn test_region_between_doc_and_member_is_skipped() {
        let tree = parse(
            r#"
public class Foo
{
    /// <summary>s</summary>
    #region Props
    public int X { get; set; }
    #endregion
}
"#,
        );

        let x = tree.declarations(DeclarationKind::Property).next().unwrap();
        let kinds: Vec<_> = x.leading_trivia().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TriviaKind::DocComment]);
    }

    #[test]
    fn test_is_doc_comment() {
        assert!(is_doc_comment("/// <summary>"));
        assert!(is_doc_comment("/** <summary>x</summary> */"));
        assert!(!is_doc_comment("//// banner"));
        assert!(!is_doc_comment("// plain"));
        assert!(!is_doc_comment("/**/"));
        assert!(!is_doc_comment("/* block */"));
    }

    #[test]
    fn test_discover_directory_skips_build_output() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/Models")).unwrap();
        fs::create_dir_all(temp.path().join("obj/Debug")).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        fs::write(temp.path().join("src/Program.cs"), "class P {}").unwrap();
        fs::write(temp.path().join("src/Models/User.cs"), "class U {}").unwrap();
        fs::write(temp.path().join("obj/Debug/Gen.cs"), "class G {}").unwrap();
        fs::write(temp.path().join(".git/Hidden.cs"), "class H {}").unwrap();
        fs::write(temp.path().join("README.md"), "# readme").unwrap();

        let units = CSharpFrontEnd::new().discover(temp.path()).unwrap();
        let names: Vec<_> = units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["src/Models/User.cs", "src/Program.cs"]);
    }

    #[test]
    fn test_discover_from_project_file() {
        let temp = TempDir::new().unwrap();
        let sln = temp.path().join("App.sln");
        fs::write(&sln, "").unwrap();
        fs::write(temp.path().join("A.cs"), "class A {}").unwrap();

        let units = CSharpFrontEnd::new().discover(&sln).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].name, "A.cs");
    }

    #[test]
    fn test_discover_rejects_unknown_file() {
        let temp = TempDir::new().unwrap();
        let txt = temp.path().join("notes.txt");
        fs::write(&txt, "").unwrap();

        assert!(CSharpFrontEnd::new().discover(&txt).is_err());
    }

    #[tokio::test]
    async fn test_compile_reads_unit_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Foo.cs");
        fs::write(&path, "public class Foo { }").unwrap();

        let front_end = CSharpFrontEnd::new();
        let tree = front_end
            .compile(&SourceUnit::new(&path, "Foo.cs"))
            .await
            .unwrap();
        assert_eq!(tree.path(), "Foo.cs");
        assert_eq!(names(&tree, DeclarationKind::Type), vec!["Foo"]);
    }

    #[tokio::test]
    async fn test_compile_missing_file_is_read_error() {
        let front_end = CSharpFrontEnd::new();
        let err = front_end
            .compile(&SourceUnit::new("/nonexistent/Missing.cs", "Missing.cs"))
            .await
            .unwrap_err();
        assert!(matches!(err, FrontEndError::Read { .. }));
        assert!(err.to_string().contains("Missing.cs"));
    }
}
