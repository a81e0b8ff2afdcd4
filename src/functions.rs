use anyhow::Result;
use serde::Serialize;
use tree_sitter::Node;

use crate::parser::SourceTree;

/// Parameter node kinds that count as function arguments. Splat patterns
/// (`*args`, `**kwargs`) and bare `*` / `/` separators do not.
const PARAM_KINDS: &[&str] = &[
    "identifier",
    "typed_parameter",
    "default_parameter",
    "typed_default_parameter",
];

/// One function argument: name, optional annotation, optional default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentInfo {
    pub name: String,
    pub annotation: Option<String>,
    pub default: Option<String>,
}

impl SourceTree {
    /// Every `function_definition` in the tree (nested and decorated
    /// included), document order.
    pub fn function_defs(&self) -> Vec<Node<'_>> {
        self.objects_of_type(&["function_definition"])
    }

    /// Parameter nodes flattened across all function defs, document order.
    pub fn function_arguments(&self) -> Vec<Node<'_>> {
        let mut out = Vec::new();
        for def in self.function_defs() {
            let Some(params) = def.child_by_field_name("parameters") else {
                continue;
            };
            for param in params.named_children(&mut params.walk()) {
                if PARAM_KINDS.contains(&param.kind()) {
                    out.push(param);
                }
            }
        }
        out
    }

    /// The default-value expressions that exist, document order. Arguments
    /// without defaults contribute nothing; since each default hangs off its
    /// own parameter node, the result is right-aligned to trailing arguments
    /// exactly as Python's default semantics require.
    pub fn function_argument_defaults(&self) -> Vec<Node<'_>> {
        self.function_arguments()
            .into_iter()
            .filter_map(|param| param.child_by_field_name("value"))
            .collect()
    }
}

/// Name of a function definition node.
pub fn def_name<'t>(tree: &'t SourceTree, def: Node) -> Option<&'t str> {
    def.child_by_field_name("name").map(|n| tree.node_text(n))
}

/// Docstring of a function definition: the first body statement, when it is
/// a bare string literal, with surrounding quotes stripped and whitespace
/// trimmed. Empty docstrings count as absent.
pub fn def_docstring(tree: &SourceTree, def: Node) -> Option<String> {
    let body = def.child_by_field_name("body")?;
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }

    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }

    let text = tree.node_text(expr);
    let inner = text
        .strip_prefix("\"\"\"")
        .and_then(|s| s.strip_suffix("\"\"\""))
        .or_else(|| text.strip_prefix("'''").and_then(|s| s.strip_suffix("'''")))
        .or_else(|| text.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .or_else(|| text.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))?;

    let trimmed = inner.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Function names in document order.
///
/// With `ignore_private` set, names with exactly one leading underscore are
/// excluded (`_helper` is private, `__init__` is not).
pub fn function_names(source: &str, ignore_private: bool) -> Result<Vec<String>> {
    let tree = SourceTree::parse(source)?;
    Ok(tree
        .function_defs()
        .into_iter()
        .filter_map(|def| {
            let name = def_name(&tree, def)?;
            if ignore_private && is_private(name) {
                return None;
            }
            Some(name.to_string())
        })
        .collect())
}

/// Docstrings of functions in document order, same privacy filter as
/// [`function_names`]. Functions without a docstring contribute nothing.
pub fn function_docstrings(source: &str, ignore_private: bool) -> Result<Vec<String>> {
    let tree = SourceTree::parse(source)?;
    Ok(tree
        .function_defs()
        .into_iter()
        .filter_map(|def| {
            let name = def_name(&tree, def)?;
            if ignore_private && is_private(name) {
                return None;
            }
            def_docstring(&tree, def)
        })
        .collect())
}

/// Argument names flattened across all functions, document order.
pub fn function_argument_names(source: &str) -> Result<Vec<String>> {
    let tree = SourceTree::parse(source)?;
    Ok(tree
        .function_arguments()
        .into_iter()
        .map(|param| argument_name(&tree, param).to_string())
        .collect())
}

/// One entry per argument in document order; `None` where unannotated.
pub fn function_argument_annotations(source: &str) -> Result<Vec<Option<String>>> {
    let tree = SourceTree::parse(source)?;
    Ok(tree
        .function_arguments()
        .into_iter()
        .map(|param| {
            param
                .child_by_field_name("type")
                .map(|t| tree.node_text(t).to_string())
        })
        .collect())
}

/// Full per-argument detail (name, annotation, default) in document order.
pub fn function_argument_details(source: &str) -> Result<Vec<ArgumentInfo>> {
    let tree = SourceTree::parse(source)?;
    Ok(tree
        .function_arguments()
        .into_iter()
        .map(|param| ArgumentInfo {
            name: argument_name(&tree, param).to_string(),
            annotation: param
                .child_by_field_name("type")
                .map(|t| tree.node_text(t).to_string()),
            default: param
                .child_by_field_name("value")
                .map(|v| tree.node_text(v).to_string()),
        })
        .collect())
}

fn argument_name<'t>(tree: &'t SourceTree, param: Node) -> &'t str {
    match param.kind() {
        "identifier" => tree.node_text(param),
        // typed_parameter has no name field; the identifier is its first child
        "typed_parameter" => param
            .named_child(0)
            .map(|n| tree.node_text(n))
            .unwrap_or(""),
        _ => param
            .child_by_field_name("name")
            .map(|n| tree.node_text(n))
            .unwrap_or(""),
    }
}

fn is_private(name: &str) -> bool {
    name.starts_with('_') && !name.starts_with("__")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_FN: &str = "def _test(a: str):\n    \"\"\"Docstring.\"\"\"\n    return a";
    const DEFAULT_FN: &str = "def test(a: str = ''):\n    \"\"\"Docstring.\"\"\"\n    return a";

    #[test]
    fn test_function_defs() {
        let tree = SourceTree::parse(DEFAULT_FN).unwrap();
        let defs = tree.function_defs();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].kind(), "function_definition");
    }

    #[test]
    fn test_function_defs_nested_and_decorated() {
        let source = "@wraps\ndef outer():\n    def inner():\n        pass\n";
        let tree = SourceTree::parse(source).unwrap();
        assert_eq!(tree.function_defs().len(), 2);
    }

    #[test]
    fn test_function_arguments() {
        let tree = SourceTree::parse(DEFAULT_FN).unwrap();
        let args = tree.function_arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].kind(), "typed_default_parameter");
    }

    #[test]
    fn test_function_argument_names() {
        assert_eq!(function_argument_names(DEFAULT_FN).unwrap(), vec!["a"]);
        assert_eq!(
            function_argument_names("def f(a, b: int, c=1, *args, **kwargs):\n    pass").unwrap(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_function_argument_defaults() {
        let tree = SourceTree::parse(DEFAULT_FN).unwrap();
        let defaults = tree.function_argument_defaults();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].kind(), "string");

        let tree = SourceTree::parse(PRIVATE_FN).unwrap();
        assert!(tree.function_argument_defaults().is_empty());
    }

    #[test]
    fn test_defaults_right_aligned() {
        let source = "def f(a, b, c=1, d=2):\n    pass";
        let tree = SourceTree::parse(source).unwrap();
        let names = function_argument_names(source).unwrap();
        let defaults = tree.function_argument_defaults();
        assert_eq!(names.len(), 4);
        assert_eq!(defaults.len(), 2);
        let texts: Vec<&str> = defaults.iter().map(|d| tree.node_text(*d)).collect();
        assert_eq!(texts, vec!["1", "2"]);
    }

    #[test]
    fn test_function_argument_annotations() {
        assert_eq!(
            function_argument_annotations(PRIVATE_FN).unwrap(),
            vec![Some("str".to_string())]
        );
        assert_eq!(
            function_argument_annotations("def _test(a):\n    \"\"\"Docstring.\"\"\"\n    return a")
                .unwrap(),
            vec![None]
        );
    }

    #[test]
    fn test_function_argument_details() {
        let details = function_argument_details(DEFAULT_FN).unwrap();
        assert_eq!(
            details,
            vec![ArgumentInfo {
                name: "a".to_string(),
                annotation: Some("str".to_string()),
                default: Some("''".to_string()),
            }]
        );
    }

    #[test]
    fn test_function_names() {
        assert_eq!(function_names(PRIVATE_FN, false).unwrap(), vec!["_test"]);
        assert!(function_names(PRIVATE_FN, true).unwrap().is_empty());
    }

    #[test]
    fn test_function_names_document_order() {
        let source = "def first():\n    pass\n\ndef _second():\n    pass\n\ndef third():\n    pass\n";
        assert_eq!(
            function_names(source, false).unwrap(),
            vec!["first", "_second", "third"]
        );
        assert_eq!(
            function_names(source, true).unwrap(),
            vec!["first", "third"]
        );
    }

    #[test]
    fn test_dunder_names_are_not_private() {
        let source = "class C:\n    def __init__(self):\n        pass\n    def _hidden(self):\n        pass\n";
        assert_eq!(function_names(source, true).unwrap(), vec!["__init__"]);
    }

    #[test]
    fn test_function_docstrings() {
        assert_eq!(
            function_docstrings(PRIVATE_FN, false).unwrap(),
            vec!["Docstring."]
        );
        assert!(function_docstrings(PRIVATE_FN, true).unwrap().is_empty());
    }

    #[test]
    fn test_missing_docstring_is_omitted() {
        let source = "def a():\n    \"\"\"Has one.\"\"\"\n    pass\n\ndef b():\n    pass\n";
        assert_eq!(function_docstrings(source, false).unwrap(), vec!["Has one."]);
    }

    #[test]
    fn test_single_quoted_docstring() {
        let source = "def f():\n    'short'\n    pass\n";
        assert_eq!(function_docstrings(source, false).unwrap(), vec!["short"]);
    }
}
