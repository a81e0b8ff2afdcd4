use std::collections::HashMap;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use tree_sitter::Node;

use crate::parser::SourceTree;

/// Exception names raised and handled in a source snippet, document order,
/// duplicates preserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionReport {
    pub raised: Vec<String>,
    pub handled: Vec<String>,
}

/// Exception names raised by the snippet.
///
/// A raise of a fresh call or dotted name reports that type's name. A raise
/// of a bare identifier reports the identifier itself (the raise references
/// the variable, not its definition), except when the identifier is the
/// enclosing handler's alias, in which case it inherits every type the
/// handler handles, exactly like a bare `raise`.
pub fn exceptions_raised(source: &str) -> Result<Vec<String>> {
    Ok(exceptions(source)?.raised)
}

/// Exception names handled by `except` clauses in the snippet.
///
/// A single type expression or a parenthesized tuple of them reports each
/// element's dotted/bare name as written; `except X as e:` reports `X`,
/// never the alias.
pub fn exceptions_handled(source: &str) -> Result<Vec<String>> {
    Ok(exceptions(source)?.handled)
}

/// Resolve both directions in one pass.
pub fn exceptions(source: &str) -> Result<ExceptionReport> {
    let tree = SourceTree::parse(source)?;
    let mut resolver = Resolver {
        tree: &tree,
        bindings: HashMap::new(),
        raised: Vec::new(),
        handled: Vec::new(),
    };
    resolver.visit(tree.root(), None);
    Ok(ExceptionReport {
        raised: resolver.raised,
        handled: resolver.handled,
    })
}

/// The innermost enclosing `except` clause: its alias, if any, and the types
/// it handles. A bare `raise` (or a raise of the alias) inherits `types`.
struct HandlerContext {
    alias: Option<String>,
    types: Vec<String>,
}

struct Resolver<'t> {
    tree: &'t SourceTree,
    /// Last-write-wins map from a bound name to the exception type expression
    /// most recently assigned to it. Built during the same forward pass that
    /// resolves raise/handle sites, so only earlier assignments are visible.
    bindings: HashMap<String, String>,
    raised: Vec<String>,
    handled: Vec<String>,
}

impl<'t> Resolver<'t> {
    fn visit(&mut self, node: Node<'t>, handler: Option<&HandlerContext>) {
        match node.kind() {
            "assignment" => self.record_binding(node),
            "raise_statement" => self.resolve_raise(node, handler),
            "except_clause" => {
                let ctx = self.resolve_handler(node);
                self.handled.extend(ctx.types.iter().cloned());
                for child in node.named_children(&mut node.walk()) {
                    if child.kind() == "block" {
                        self.visit(child, Some(&ctx));
                    }
                }
            }
            _ => {
                for child in node.named_children(&mut node.walk()) {
                    self.visit(child, handler);
                }
            }
        }
    }

    /// Record `name = ExceptionType` / `name = ExceptionType(...)` bindings.
    /// Assignments whose right-hand side is not exception-shaped are ignored.
    fn record_binding(&mut self, node: Node<'t>) {
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        let Some(right) = node.child_by_field_name("right") else {
            return;
        };
        if left.kind() != "identifier" {
            return;
        }
        if let Some(type_name) = self.exception_type_name(right) {
            self.bindings
                .insert(self.tree.node_text(left).to_string(), type_name);
        }
    }

    /// Canonical name of an exception-shaped expression: the callee of a
    /// constructor call, or a bare/dotted class reference as written.
    fn exception_type_name(&self, expr: Node<'t>) -> Option<String> {
        match expr.kind() {
            "call" => {
                let function = expr.child_by_field_name("function")?;
                matches!(function.kind(), "identifier" | "attribute")
                    .then(|| self.tree.node_text(function).to_string())
            }
            "identifier" | "attribute" => Some(self.tree.node_text(expr).to_string()),
            _ => None,
        }
    }

    fn resolve_raise(&mut self, node: Node<'t>, handler: Option<&HandlerContext>) {
        let Some(expr) = raised_expression(node) else {
            // Bare `raise` re-raises whatever the enclosing handler caught.
            // Outside a handler there is no type to report.
            if let Some(ctx) = handler {
                self.raised.extend(ctx.types.iter().cloned());
            }
            return;
        };

        match expr.kind() {
            "call" => match expr.child_by_field_name("function") {
                Some(function) => {
                    self.raised.push(self.tree.node_text(function).to_string());
                }
                None => self.raise_fallback(expr),
            },
            "identifier" => {
                let name = self.tree.node_text(expr);
                match handler {
                    Some(ctx) if ctx.alias.as_deref() == Some(name) => {
                        // Re-raise through the alias: the raised value is the
                        // caught exception, so it carries the handler's types.
                        self.raised.extend(ctx.types.iter().cloned());
                    }
                    _ if self.bindings.contains_key(name) => {
                        // The raise references the variable, not its target.
                        self.raised.push(name.to_string());
                    }
                    _ => {
                        debug!(variable = name, "raise of a name with no known binding");
                        self.raised.push(name.to_string());
                    }
                }
            }
            "attribute" => self.raised.push(self.tree.node_text(expr).to_string()),
            _ => self.raise_fallback(expr),
        }
    }

    fn raise_fallback(&mut self, expr: Node<'t>) {
        debug!(
            kind = expr.kind(),
            "unrecognized raise expression, reporting literal text"
        );
        self.raised.push(self.tree.node_text(expr).to_string());
    }

    fn resolve_handler(&mut self, node: Node<'t>) -> HandlerContext {
        let mut alias = None;
        let mut types = Vec::new();

        for child in node.named_children(&mut node.walk()) {
            match child.kind() {
                "block" | "comment" => {}
                "as_pattern" => {
                    if let Some(value) = child.named_child(0) {
                        self.handler_types(value, &mut types);
                    }
                    if let Some(target) = child.child_by_field_name("alias") {
                        alias = Some(self.tree.node_text(target).to_string());
                    }
                }
                _ => self.handler_types(child, &mut types),
            }
        }

        HandlerContext { alias, types }
    }

    /// Collect the type names a handler expression covers. Tuples flatten to
    /// their elements; everything else resolves like a raised expression,
    /// with the same literal-text fallback for shapes we cannot classify.
    fn handler_types(&mut self, expr: Node<'t>, types: &mut Vec<String>) {
        match expr.kind() {
            "identifier" | "attribute" => {
                types.push(self.tree.node_text(expr).to_string());
            }
            "tuple" | "expression_list" => {
                for element in expr.named_children(&mut expr.walk()) {
                    if element.kind() != "comment" {
                        self.handler_types(element, types);
                    }
                }
            }
            "parenthesized_expression" => {
                if let Some(inner) = expr.named_child(0) {
                    self.handler_types(inner, types);
                }
            }
            "call" => match expr.child_by_field_name("function") {
                Some(function) => types.push(self.tree.node_text(function).to_string()),
                None => types.push(self.tree.node_text(expr).to_string()),
            },
            _ => {
                debug!(
                    kind = expr.kind(),
                    "unrecognized handler expression, reporting literal text"
                );
                types.push(self.tree.node_text(expr).to_string());
            }
        }
    }
}

/// The expression a `raise` statement raises, if any. Skips the `from` cause
/// and any interleaved comments.
fn raised_expression(node: Node) -> Option<Node> {
    let cause = node.child_by_field_name("cause");
    node.named_children(&mut node.walk())
        .find(|child| child.kind() != "comment" && Some(*child) != cause)
}
