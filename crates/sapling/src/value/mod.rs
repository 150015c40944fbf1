//! Value representation for runtime values

mod callable;
mod display;
mod impls;

pub use callable::{BuiltinFn, BuiltinFnPtr, Callable, FunctionValue};

use std::sync::Arc;

/// Runtime value representation for the Sapling evaluator.
///
/// Every value carries exactly one concrete kind. Operations that combine
/// two values check the kinds at the point of use; nothing coerces.
#[derive(Clone)]
pub enum Value {
    /// "No value produced": the result of a void call.
    Invalid,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// 64-bit signed integer
    I64(i64),

    /// 64-bit floating point
    F64(f64),

    /// Heap-allocated string
    String(Arc<String>),

    /// Host-native or script-defined function
    Callable(Callable),
}

/// The concrete kind carried by a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// See [`Value::Invalid`]
    Invalid,
    /// See [`Value::Bool`]
    Bool,
    /// See [`Value::I64`]
    I64,
    /// See [`Value::F64`]
    F64,
    /// See [`Value::String`]
    String,
    /// See [`Value::Callable`]
    Callable,
}

impl Kind {
    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::I64 => "int",
            Kind::F64 => "float64",
            Kind::String => "string",
            Kind::Callable => "func",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
