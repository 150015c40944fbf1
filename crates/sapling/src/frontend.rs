//! Source files handed to the interpreter
//!
//! Parsing is owned by `syn`: this module only pairs a parsed tree with the
//! name it was loaded under and turns syntax errors into [`ParseError`]s
//! carrying a source location.
//!
//! ```text
//! Source Code → [syn] → SourceFile → [Interpreter] → output
//! ```

use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// ERROR TYPES
// ═══════════════════════════════════════════════════════════════════════

/// Error that occurred during parsing.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,

    /// Optional source location
    pub location: Option<SourceLocation>,
}

impl ParseError {
    /// Create a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Add location information to the error.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}:{}:{}", loc.file, loc.line, loc.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Source code location for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File name or identifier
    pub file: String,

    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SOURCE FILE
// ═══════════════════════════════════════════════════════════════════════

/// A parsed script together with the name it was loaded under.
///
/// The name identifies the file to the package registry: running two trees
/// under the same name reuses the bindings built for the first one.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    syntax: syn::File,
}

impl SourceFile {
    /// Wrap an already-parsed tree.
    pub fn new(name: impl Into<String>, syntax: syn::File) -> Self {
        Self {
            name: name.into(),
            syntax,
        }
    }

    /// Parse `source` as a whole file.
    ///
    /// # Example
    ///
    /// ```
    /// use sapling::SourceFile;
    ///
    /// let file = SourceFile::parse("hello.rs", "fn main() { println(\"hi\"); }").unwrap();
    /// assert_eq!(file.name(), "hello.rs");
    /// assert_eq!(file.syntax().items.len(), 1);
    /// ```
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, ParseError> {
        let name = name.into();
        match syn::parse_file(source) {
            Ok(syntax) => Ok(Self { name, syntax }),
            Err(err) => {
                let start = err.span().start();
                let location = SourceLocation::new(name, start.line, start.column + 1);
                Err(ParseError::new(format!("syntax error: {}", err)).with_location(location))
            }
        }
    }

    /// The name the file was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed tree.
    pub fn syntax(&self) -> &syn::File {
        &self.syntax
    }

    /// Find a top-level function declaration by name.
    pub fn function(&self, name: &str) -> Option<&syn::ItemFn> {
        self.syntax.items.iter().find_map(|item| match item {
            syn::Item::Fn(func) if func.sig.ident == name => Some(func),
            _ => None,
        })
    }
}
