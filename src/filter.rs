use tree_sitter::Node;

use crate::parser::SourceTree;

impl SourceTree {
    /// Every named node whose kind matches any of `kinds`, in depth-first
    /// pre-order document order. Descends everywhere, including into the
    /// children of matching nodes.
    pub fn objects_of_type<'t>(&'t self, kinds: &[&str]) -> Vec<Node<'t>> {
        let mut out = Vec::new();
        collect_matching(self.root(), kinds, &mut out);
        out
    }

    /// Every named node whose kind matches none of `kinds`, in depth-first
    /// pre-order document order.
    ///
    /// Unlike [`objects_of_type`](Self::objects_of_type), a matching node
    /// prunes its whole subtree: neither the node nor any of its descendants
    /// is returned. Asking for everything except `function_definition` yields
    /// top-level statements and nested non-function structure without
    /// function internals leaking through.
    pub fn objects_not_of_type<'t>(&'t self, kinds: &[&str]) -> Vec<Node<'t>> {
        let mut out = Vec::new();
        collect_non_matching(self.root(), kinds, &mut out);
        out
    }
}

fn collect_matching<'t>(node: Node<'t>, kinds: &[&str], out: &mut Vec<Node<'t>>) {
    if kinds.contains(&node.kind()) {
        out.push(node);
    }
    for child in node.named_children(&mut node.walk()) {
        collect_matching(child, kinds, out);
    }
}

fn collect_non_matching<'t>(node: Node<'t>, kinds: &[&str], out: &mut Vec<Node<'t>>) {
    if kinds.contains(&node.kind()) {
        return;
    }
    out.push(node);
    for child in node.named_children(&mut node.walk()) {
        collect_non_matching(child, kinds, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "a = 1\nb = 2\n\ndef double(x):\n    result = x * 2\n    return result\n\nc = double(b)\n";

    #[test]
    fn test_objects_of_type_single_kind() {
        let tree = SourceTree::parse(SOURCE).unwrap();
        let defs = tree.objects_of_type(&["function_definition"]);
        assert_eq!(defs.len(), 1);
        assert!(defs.iter().all(|n| n.kind() == "function_definition"));
    }

    #[test]
    fn test_objects_of_type_kind_set() {
        let tree = SourceTree::parse(SOURCE).unwrap();
        let nodes = tree.objects_of_type(&["assignment", "function_definition"]);
        // a, b, result, c assignments plus the def
        assert_eq!(nodes.len(), 5);
    }

    #[test]
    fn test_objects_of_type_descends_into_matches() {
        let tree = SourceTree::parse("def outer():\n    def inner():\n        pass\n").unwrap();
        let defs = tree.objects_of_type(&["function_definition"]);
        assert_eq!(defs.len(), 2);
    }

    #[test]
    fn test_objects_not_of_type_prunes_subtrees() {
        let tree = SourceTree::parse(SOURCE).unwrap();
        let nodes = tree.objects_not_of_type(&["function_definition"]);
        assert!(nodes.iter().all(|n| n.kind() != "function_definition"));
        // Nothing from inside the function body survives the pruning.
        for node in &nodes {
            assert_ne!(tree.node_text(*node), "result");
        }
    }

    fn subtree_size(node: Node) -> usize {
        1 + node
            .named_children(&mut node.walk())
            .map(subtree_size)
            .sum::<usize>()
    }

    #[test]
    fn test_filters_partition_the_tree() {
        let tree = SourceTree::parse(SOURCE).unwrap();
        let matched = tree.objects_of_type(&["assignment"]);
        let rest = tree.objects_not_of_type(&["assignment"]);
        // The complement plus the pruned matching subtrees account for every
        // named node exactly once (no assignment nests inside another here).
        let all = tree.objects_not_of_type(&[]);
        let pruned: usize = matched.iter().map(|n| subtree_size(*n)).sum();
        assert_eq!(all.len(), rest.len() + pruned);
        assert!(!rest.iter().any(|n| n.kind() == "assignment"));
    }
}
