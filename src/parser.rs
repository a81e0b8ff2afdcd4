use anyhow::{bail, Result};
use tree_sitter::{Language, Node, Parser, Tree};

/// A parsed Python source snippet.
///
/// Owns both the source text and the tree-sitter tree so that node-returning
/// accessors can hand out `Node`s borrowing from it. Immutable after
/// construction; every accessor is a read-only query.
pub struct SourceTree {
    source: String,
    tree: Tree,
}

impl SourceTree {
    /// Parse Python source text.
    ///
    /// If the first parse produces syntax errors, the text is run through
    /// [`clean_source`] and parsed once more: a raw newline inside an
    /// already-quoted string terminates the statement early, and escaping it
    /// lets the embedded literal parse as a single string token. A tree that
    /// still contains errors after the retry is surfaced as a syntax error.
    pub fn parse(source: &str) -> Result<Self> {
        let mut parser = Parser::new();
        parser.set_language(&Language::new(tree_sitter_python::LANGUAGE))?;

        let tree = run_parser(&mut parser, source)?;
        if !tree.root_node().has_error() {
            return Ok(Self {
                source: source.to_string(),
                tree,
            });
        }

        let cleaned = clean_source(source);
        let tree = run_parser(&mut parser, &cleaned)?;
        if tree.root_node().has_error() {
            bail!("syntax error in Python source");
        }
        Ok(Self {
            source: cleaned,
            tree,
        })
    }

    /// The root `module` node.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The source text the tree was parsed from (post-normalization).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Extract the text of a node from the source.
    /// Returns an empty string if byte offsets fall outside the source.
    pub fn node_text(&self, node: Node) -> &str {
        self.source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }
}

fn run_parser(parser: &mut Parser, source: &str) -> Result<Tree> {
    parser
        .parse(source, None)
        .ok_or_else(|| anyhow::anyhow!("Python parser returned no tree"))
}

/// Escape every raw newline as the two-character sequence `\n`.
///
/// Used by [`SourceTree::parse`] as a retry after a failed parse, so that
/// string content containing literal newlines round-trips as one token.
pub fn clean_source(source: &str) -> String {
    source.replace('\n', "\\n")
}

/// 1-based line span of a node: its own starting line through the maximum
/// starting line among all of its named descendants.
///
/// A single-line construct yields `start == end`.
pub fn line_span(node: Node) -> (u32, u32) {
    let start = node.start_position().row as u32 + 1;
    (start, max_start_line(node).max(start))
}

fn max_start_line(node: Node) -> u32 {
    let mut max = node.start_position().row as u32 + 1;
    for child in node.named_children(&mut node.walk()) {
        max = max.max(max_start_line(child));
    }
    max
}
