use anyhow::{Context, Result};
use serde::Serialize;

use pysift::functions::{def_docstring, def_name};
use pysift::parser::line_span;
use pysift::{
    constants, exceptions, function_argument_details, function_docstrings, function_names,
    functions_as_import_string, variable_names, SourceTree,
};

fn read_source(file: &str) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {file}"))
}

/// Print `data` as pretty JSON if `json` is true, otherwise call `human_fmt`.
fn output<T: Serialize>(data: &T, json: bool, human_fmt: impl FnOnce(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        human_fmt(data);
    }
    Ok(())
}

/// List function names defined in a file.
pub fn cmd_functions(file: &str, skip_private: bool, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let names = function_names(&source, skip_private)?;

    output(&names, json, |names| {
        if names.is_empty() {
            println!("No functions found in {file}");
            return;
        }
        for name in names {
            println!("{name}");
        }
    })
}

/// List function arguments with annotations and defaults.
pub fn cmd_args(file: &str, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let args = function_argument_details(&source)?;

    output(&args, json, |args| {
        if args.is_empty() {
            println!("No function arguments found in {file}");
            return;
        }
        for arg in args {
            let annotation = arg
                .annotation
                .as_deref()
                .map(|a| format!(": {a}"))
                .unwrap_or_default();
            let default = arg
                .default
                .as_deref()
                .map(|d| format!(" = {d}"))
                .unwrap_or_default();
            println!("{}{annotation}{default}", arg.name);
        }
    })
}

/// List function docstrings.
pub fn cmd_docstrings(file: &str, skip_private: bool, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let docstrings = function_docstrings(&source, skip_private)?;

    output(&docstrings, json, |docstrings| {
        if docstrings.is_empty() {
            println!("No docstrings found in {file}");
            return;
        }
        for doc in docstrings {
            println!("{doc}");
        }
    })
}

/// List variable assignment targets.
pub fn cmd_variables(file: &str, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let names = variable_names(&source)?;

    output(&names, json, |names| {
        if names.is_empty() {
            println!("No variables found in {file}");
            return;
        }
        for name in names {
            println!("{name}");
        }
    })
}

/// List all-uppercase assignment targets.
pub fn cmd_constants(file: &str, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let names = constants(&source)?;

    output(&names, json, |names| {
        if names.is_empty() {
            println!("No constants found in {file}");
            return;
        }
        for name in names {
            println!("{name}");
        }
    })
}

/// Exception types raised and handled.
pub fn cmd_exceptions(file: &str, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let report = exceptions(&source)?;

    output(&report, json, |report| {
        if report.raised.is_empty() && report.handled.is_empty() {
            println!("No exceptions raised or handled in {file}");
            return;
        }
        for name in &report.raised {
            println!("raises   {name}");
        }
        for name in &report.handled {
            println!("handles  {name}");
        }
    })
}

/// Render an import statement covering the file's functions.
pub fn cmd_import_string(file: &str, module: &str, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let rendered = functions_as_import_string(&source, module)?;

    output(&rendered, json, |rendered| println!("{rendered}"))
}

#[derive(Debug, Serialize)]
struct OutlineItem {
    name: String,
    start_line: u32,
    end_line: u32,
    docstring: Option<String>,
}

/// Functions with line spans and docstring summaries.
pub fn cmd_outline(file: &str, json: bool) -> Result<()> {
    let source = read_source(file)?;
    let tree = SourceTree::parse(&source)?;

    let items: Vec<OutlineItem> = tree
        .function_defs()
        .into_iter()
        .filter_map(|def| {
            let name = def_name(&tree, def)?.to_string();
            let (start_line, end_line) = line_span(def);
            Some(OutlineItem {
                name,
                start_line,
                end_line,
                docstring: def_docstring(&tree, def),
            })
        })
        .collect();

    output(&items, json, |items| {
        if items.is_empty() {
            println!("No functions found in {file}");
            return;
        }
        for item in items {
            let doc = item
                .docstring
                .as_deref()
                .and_then(|d| d.lines().next())
                .map(|line| format!("  {line}"))
                .unwrap_or_default();
            println!(
                "{name}  L{start}-{end}{doc}",
                name = item.name,
                start = item.start_line,
                end = item.end_line,
            );
        }
    })
}
