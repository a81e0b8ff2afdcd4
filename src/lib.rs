//! Inspect Python source structure: functions, variables, docstrings, and
//! exception flow.
//!
//! Every accessor is a pure function of its source-text argument. Parsing
//! goes through tree-sitter with the Python grammar; node-returning
//! accessors live on [`SourceTree`] (they borrow the parsed tree), while
//! string-returning accessors take source text directly and parse
//! internally.
//!
//! ```
//! let names = pysift::function_names("def greet(name):\n    return name\n", false).unwrap();
//! assert_eq!(names, vec!["greet"]);
//! ```

pub mod exceptions;
mod filter;
pub mod format;
pub mod functions;
pub mod parser;
pub mod variables;

pub use exceptions::{exceptions, exceptions_handled, exceptions_raised, ExceptionReport};
pub use format::functions_as_import_string;
pub use functions::{
    function_argument_annotations, function_argument_details, function_argument_names,
    function_docstrings, function_names, ArgumentInfo,
};
pub use parser::{clean_source, line_span, SourceTree};
pub use variables::{constants, variable_names};
