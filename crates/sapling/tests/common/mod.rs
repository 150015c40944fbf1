//! Shared helpers for integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use sapling::{EvalContext, EvalError, Interpreter, SourceFile};

/// An output sink whose contents stay readable after it is handed to the
/// interpreter.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Path of a script under `tests/testdata`.
pub fn testdata(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join(name)
}

/// Parse a script under `tests/testdata`.
pub fn load(name: &str) -> SourceFile {
    let path = testdata(name);
    let source = std::fs::read_to_string(&path).expect("read testdata");
    SourceFile::parse(name, &source).expect("parse testdata")
}

/// The `// Output:` block of a script under `tests/testdata`.
pub fn expected_output(name: &str) -> String {
    let source = std::fs::read_to_string(testdata(name)).expect("read testdata");
    let mut lines = source.lines().skip_while(|line| line.trim() != "// Output:");
    lines.next();

    let mut expected = String::new();
    for line in lines {
        let Some(text) = line.strip_prefix("//") else {
            break;
        };
        expected.push_str(text.strip_prefix(' ').unwrap_or(text));
        expected.push('\n');
    }
    expected
}

/// An interpreter writing to a fresh capture.
pub fn interpreter() -> (Interpreter, Capture) {
    let out = Capture::default();
    let interpreter = Interpreter::new()
        .with_stdout(Box::new(out.clone()))
        .with_stderr(Box::new(io::sink()));
    (interpreter, out)
}

/// Run `entry_point` of `source` in a fresh interpreter.
pub fn run_source(source: &str, entry_point: &str) -> (Result<(), EvalError>, String) {
    run_source_with(source, entry_point, EvalContext::default())
}

/// Run `entry_point` of `source` in a fresh interpreter with `ctx`.
pub fn run_source_with(
    source: &str,
    entry_point: &str,
    ctx: EvalContext,
) -> (Result<(), EvalError>, String) {
    let file = SourceFile::parse("inline.rs", source).expect("parse source");
    let (interpreter, out) = interpreter();
    let mut interpreter = interpreter.with_context(ctx);
    let result = interpreter.run_file(&file, entry_point);
    (result, out.contents())
}
