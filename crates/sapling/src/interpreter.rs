//! The interpreter driver: runs an entry point of a source file
//!
//! ```text
//! SourceFile ─→ find entry point ─→ register file ─→ push call history
//!                                                          │
//!            output ←─ flush ←─ statements in root scope ←─┘
//! ```

use std::io::{self, Write};

use proc_macro2::Span;

use crate::eval::{eval_sequence, first_span, ControlFlow};
use crate::{EvalContext, EvalError, PackageRegistry, Runtime, Scope, SourceFile};

/// Maps a syntax position to a 1-based source line for diagnostics.
pub trait PositionLookup {
    /// Line of the first character of `span`.
    fn line(&self, span: Span) -> usize;
}

/// Reads lines straight from the syntax tree's span locations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanLines;

impl PositionLookup for SpanLines {
    fn line(&self, span: Span) -> usize {
        span.start().line
    }
}

impl<F> PositionLookup for F
where
    F: Fn(Span) -> usize,
{
    fn line(&self, span: Span) -> usize {
        self(span)
    }
}

/// Evaluates script files against one long-lived runtime.
///
/// The package registry persists across runs, so running the same file
/// twice reuses its cached bindings. Each run starts from a fresh scope
/// holding only the prelude.
///
/// # Example
///
/// ```
/// use sapling::{Interpreter, SourceFile};
///
/// let file = SourceFile::parse("hello.rs", r#"
///     use fmt;
///     fn main() {
///         fmt.Println("hello", 42);
///     }
/// "#).unwrap();
///
/// let mut interpreter = Interpreter::new().with_stdout(Box::new(std::io::sink()));
/// interpreter.run_file(&file, "main").unwrap();
/// ```
pub struct Interpreter {
    runtime: Runtime,
    stderr: Box<dyn Write>,
    positions: Box<dyn PositionLookup>,
    ctx: EvalContext,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter writing to the process's standard streams,
    /// with the host packages registered.
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(PackageRegistry::with_std(), Box::new(io::stdout())),
            stderr: Box::new(io::stderr()),
            positions: Box::new(SpanLines),
            ctx: EvalContext::default(),
        }
    }

    /// Replace the normal output sink.
    pub fn with_stdout(mut self, stdout: Box<dyn Write>) -> Self {
        self.runtime.set_stdout(stdout);
        self
    }

    /// Replace the diagnostic output sink.
    pub fn with_stderr(mut self, stderr: Box<dyn Write>) -> Self {
        self.stderr = stderr;
        self
    }

    /// Replace the source-position lookup used for line numbers.
    pub fn with_positions(mut self, positions: impl PositionLookup + 'static) -> Self {
        self.positions = Box::new(positions);
        self
    }

    /// Replace the package registry.
    pub fn with_registry(mut self, registry: PackageRegistry) -> Self {
        self.runtime.registry = registry;
        self
    }

    /// Replace the evaluation context.
    pub fn with_context(mut self, ctx: EvalContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// The runtime state.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// The runtime state, mutably.
    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    /// The diagnostic output sink.
    pub fn diagnostics(&mut self) -> &mut dyn Write {
        &mut *self.stderr
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// Run the body of `entry_point` from `file`.
    ///
    /// The entry point is looked up before anything else happens: when it
    /// is missing, nothing is registered and nothing is printed. The scope
    /// is then reset to the prelude, and the body runs statement by
    /// statement in its root frame; a `return` ends the
    /// run normally. Normal output is flushed on every exit path.
    ///
    /// # Errors
    ///
    /// Returns `EntryPointNotFound`, a file binding error, or the first
    /// statement failure wrapped with its source line.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %file.name(), entry_point = %entry_point))]
    pub fn run_file(&mut self, file: &SourceFile, entry_point: &str) -> Result<(), EvalError> {
        let entry = file
            .function(entry_point)
            .ok_or_else(|| EvalError::EntryPointNotFound {
                name: entry_point.to_string(),
            })?;

        self.runtime.scope = Scope::with_prelude();
        let unit = self.runtime.registry.load_file(file)?;
        tracing::debug!(statements = entry.block.stmts.len(), "running entry point");

        let positions = &*self.positions;
        let result = {
            let mut active = self.runtime.enter_file(unit);
            eval_sequence(&entry.block.stmts, &mut active, &self.ctx, |_, stmt, err| {
                err.at_line(positions.line(first_span(stmt)))
            })
        };

        let flushed = self.runtime.stdout().flush();
        match result {
            Ok(()) | Err(EvalError::ControlFlow(ControlFlow::Return { .. })) => {
                flushed.map_err(EvalError::from)
            }
            Err(err) => {
                tracing::debug!(error = %err, "entry point failed");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("runtime", &self.runtime)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Value};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    fn interpreter() -> (Interpreter, Shared) {
        let out = Shared::default();
        let interp = Interpreter::new().with_stdout(Box::new(out.clone()));
        (interp, out)
    }

    #[test]
    fn test_missing_entry_point_registers_nothing() {
        let (mut interp, out) = interpreter();
        let file = SourceFile::parse("x.rs", "fn main() { println(1); }").unwrap();

        let err = interp.run_file(&file, "Start").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::EntryPointNotFound);
        assert_eq!(err.to_string(), "entrypoint func Start() is not found");
        assert_eq!(out.contents(), "");
        assert!(interp.runtime().registry.main_package().is_none());
    }

    #[test]
    fn test_failure_carries_line_number() {
        let (mut interp, _) = interpreter();
        let file = SourceFile::parse("x.rs", "fn main() {\n    let a = 1;\n    let b = a + c;\n}").unwrap();

        let err = interp.run_file(&file, "main").unwrap_err();
        assert_eq!(err.to_string(), "line:3 failed to eval stmt: undefined variable: c");
    }

    #[test]
    fn test_custom_position_lookup() {
        let (interp, _) = interpreter();
        let mut interp = interp.with_positions(|span: Span| span.start().line + 100);
        let file = SourceFile::parse("x.rs", "fn main() { nope(); }").unwrap();

        let err = interp.run_file(&file, "main").unwrap_err();
        assert!(matches!(err, EvalError::AtLine { line: 101, .. }));
    }

    #[test]
    fn test_return_in_entry_point_stops_normally() {
        let (mut interp, out) = interpreter();
        let file = SourceFile::parse("x.rs", "fn main() { println(1); return; println(2); }").unwrap();

        interp.run_file(&file, "main").unwrap();
        assert_eq!(out.contents(), "1\n");
    }

    #[test]
    fn test_history_popped_after_failure() {
        let (mut interp, _) = interpreter();
        let file = SourceFile::parse("x.rs", "fn main() { missing(); }").unwrap();

        assert!(interp.run_file(&file, "main").is_err());
        assert_eq!(interp.runtime().history.depth(), 0);
    }

    #[test]
    fn test_each_run_starts_from_prelude() {
        let (mut interp, _) = interpreter();
        let file = SourceFile::parse("x.rs", "fn main() { let n = 1; }").unwrap();

        interp.run_file(&file, "main").unwrap();
        assert_eq!(interp.runtime().scope.get("n"), Some(&Value::I64(1)));

        interp.runtime_mut().scope.set("println", Value::I64(0));
        let file = SourceFile::parse("y.rs", "fn main() { println(2); }").unwrap();
        interp.run_file(&file, "main").unwrap();

        assert!(!interp.runtime().scope.contains("n"));
        assert_eq!(interp.runtime().registry.main_package().unwrap().file_count(), 2);
    }

    #[test]
    fn test_interrupted_run() {
        let ctx = EvalContext::default();
        let (interp, out) = interpreter();
        let mut interp = interp.with_context(ctx.clone());
        ctx.interrupt();
        let file = SourceFile::parse("x.rs", "fn main() { println(1); }").unwrap();

        let err = interp.run_file(&file, "main").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Interrupted);
        assert_eq!(out.contents(), "");
    }
}
