use anyhow::Result;

use crate::functions::function_names;

/// Render a multi-line `from <module> import (...)` statement covering every
/// function defined in `source`, one name per line.
///
/// Names appear in document order, the order `function_names` returns, not
/// alphabetical. Private functions are included and nothing is deduplicated.
pub fn functions_as_import_string(source: &str, module: &str) -> Result<String> {
    let names = function_names(source, false)?;

    let mut out = format!("from {module} import (\n");
    for name in &names {
        out.push_str("    ");
        out.push_str(name);
        out.push_str(",\n");
    }
    out.push(')');
    Ok(out)
}
