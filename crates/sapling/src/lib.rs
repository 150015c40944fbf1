//! # Sapling
//!
//! A tree-walking evaluator for a small, dynamically typed scripting
//! language whose programs are carried on `syn` syntax trees.
//!
//! A script is an ordinary file of Rust tokens: `use` items import host
//! packages, `fn` items declare functions, and one of them is run as the
//! entry point. Inside function bodies a deliberately small subset is
//! evaluated: `let` declarations, re-assignment, nested blocks, `return`,
//! literals, identifiers, `+` / `||` / `&&`, and calls to builtins, host
//! package exports (`fmt.Println(...)`) and other functions of the file.
//!
//! ## Architecture
//!
//! - **Frontend**: [`SourceFile`] pairs a `syn::File` with its name
//! - **Registry**: [`PackageRegistry`] maps import paths to host packages
//!   and caches per-file import tables
//! - **Evaluator**: the [`eval`] module walks statements and expressions
//!   against a [`Runtime`] (scope, registry, call history, output)
//! - **Driver**: [`Interpreter::run_file`] selects the entry point and
//!   reports failures with their source line
//!
//! ```
//! use sapling::{Interpreter, SourceFile};
//!
//! let file = SourceFile::parse("shout.rs", r#"
//!     use std::strings as s;
//!     fn main() {
//!         let msg = "hello";
//!         println(s.ToUpper(msg) + "!");
//!     }
//! "#).unwrap();
//!
//! Interpreter::new()
//!     .with_stdout(Box::new(std::io::sink()))
//!     .run_file(&file, "main")
//!     .unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod error;
pub mod eval;
pub mod frontend;
pub mod interpreter;
pub mod registry;
pub mod runtime;
pub mod scope;
pub mod stack;
pub mod value;

// Re-export main types
pub use context::EvalContext;
pub use error::{AssignSide, ErrorKind, EvalError, Result, ScopeError};
pub use eval::{eval_block, eval_expr, eval_stmt, ControlFlow, Evaluate};
pub use frontend::{ParseError, SourceFile, SourceLocation};
pub use interpreter::{Interpreter, PositionLookup, SpanLines};
pub use registry::{FileUnit, Package, PackageRegistry};
pub use runtime::{CallHistory, Runtime};
pub use scope::{Frame, Scope, ScopeGuard};
pub use value::{BuiltinFn, BuiltinFnPtr, Callable, FunctionValue, Kind, Value};

/// Sapling version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
