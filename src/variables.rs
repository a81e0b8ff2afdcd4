use anyhow::Result;

use crate::parser::SourceTree;

/// Identifiers that are the direct target of a simple assignment, anywhere
/// in the tree, document order, duplicates preserved on reassignment.
///
/// Augmented assignments (`x += 1`) and destructuring targets (`a, b = ...`,
/// `obj.attr = ...`, `seq[i] = ...`) are not simple assignments and are
/// skipped.
pub fn variable_names(source: &str) -> Result<Vec<String>> {
    let tree = SourceTree::parse(source)?;
    Ok(tree
        .objects_of_type(&["assignment"])
        .into_iter()
        .filter_map(|node| {
            let left = node.child_by_field_name("left")?;
            // `x: int` without a value declares, it does not assign
            node.child_by_field_name("right")?;
            if left.kind() != "identifier" {
                return None;
            }
            Some(tree.node_text(left).to_string())
        })
        .collect())
}

/// The subset of [`variable_names`] written in all-uppercase, the
/// convention this library encodes for "this assignment denotes a constant".
pub fn constants(source: &str) -> Result<Vec<String>> {
    Ok(variable_names(source)?
        .into_iter()
        .filter(|name| is_constant_name(name))
        .collect())
}

fn is_constant_name(name: &str) -> bool {
    name.chars().any(|c| c.is_alphabetic()) && !name.chars().any(|c| c.is_lowercase())
}
