//! Mutable evaluation state threaded through every statement and expression

use std::io::Write;
use std::sync::Arc;

use crate::error::EvalError;
use crate::registry::{FileUnit, PackageRegistry};
use crate::scope::{Scope, ScopeGuard};

/// Stack of files whose top-level code is executing.
///
/// Qualified calls resolve through the alias table of the innermost entry.
#[derive(Debug, Default)]
pub struct CallHistory {
    files: Vec<Arc<FileUnit>>,
}

impl CallHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `file` began executing.
    pub fn push(&mut self, file: Arc<FileUnit>) {
        self.files.push(file);
    }

    /// Drop the innermost entry.
    pub fn pop(&mut self) -> Option<Arc<FileUnit>> {
        self.files.pop()
    }

    /// The innermost executing file.
    pub fn current(&self) -> Option<&Arc<FileUnit>> {
        self.files.last()
    }

    /// Number of entries.
    pub fn depth(&self) -> usize {
        self.files.len()
    }
}

/// Everything an evaluation step may read or change.
pub struct Runtime {
    /// Variable bindings
    pub scope: Scope,

    /// Packages reachable by import path
    pub registry: PackageRegistry,

    /// Files currently executing
    pub history: CallHistory,

    stdout: Box<dyn Write>,
}

impl Runtime {
    /// Create a runtime whose root frame holds the prelude.
    pub fn new(registry: PackageRegistry, stdout: Box<dyn Write>) -> Self {
        Self {
            scope: Scope::with_prelude(),
            registry,
            history: CallHistory::new(),
            stdout,
        }
    }

    /// Normal output sink.
    pub fn stdout(&mut self) -> &mut dyn Write {
        &mut *self.stdout
    }

    /// Replace the normal output sink.
    pub fn set_stdout(&mut self, stdout: Box<dyn Write>) {
        self.stdout = stdout;
    }

    /// The innermost executing file.
    pub fn current_file(&self) -> Option<&Arc<FileUnit>> {
        self.history.current()
    }

    /// Push a block frame, popped when the guard drops.
    pub fn enter_block(&mut self) -> ScopeGuard<'_, Runtime> {
        self.scope.push();
        ScopeGuard::new(self, |rt| rt.scope.pop())
    }

    /// Push `file` on the call history, popped when the guard drops.
    pub fn enter_file(&mut self, file: Arc<FileUnit>) -> ScopeGuard<'_, Runtime> {
        self.history.push(file);
        ScopeGuard::new(self, |rt| {
            rt.history.pop();
        })
    }

    /// Open a call boundary, closed when the guard drops.
    pub fn enter_call(&mut self, max_depth: usize) -> Result<ScopeGuard<'_, Runtime>, EvalError> {
        self.scope.enter_call(max_depth)?;
        Ok(ScopeGuard::new(self, |rt| rt.scope.exit_call()))
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("scope", &self.scope)
            .field("registry", &self.registry)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}
