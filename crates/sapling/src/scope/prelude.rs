//! Root-frame prelude: boolean constants and the default print callable

use super::Scope;
use crate::registry::stdlib;
use crate::value::{BuiltinFn, Value};

impl Scope {
    /// Create a scope whose root frame holds the prelude.
    pub fn with_prelude() -> Self {
        let mut scope = Self::new();
        scope.load_prelude();
        scope
    }

    /// Bind the prelude into the current frame.
    pub fn load_prelude(&mut self) {
        self.set("true", Value::Bool(true));
        self.set("false", Value::Bool(false));

        // Printing
        self.set(
            "println",
            Value::builtin(BuiltinFn::new("println", -1, stdlib::println)),
        );
    }
}
