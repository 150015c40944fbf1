//! Control flow mechanism for `return`

use crate::Value;

/// Control flow signal for non-local jumps.
///
/// When `return` is evaluated, it doesn't produce a normal
/// `Result<Value, EvalError>`. Instead, it produces an
/// `Err(EvalError::ControlFlow(...))` that propagates up until caught by the
/// enclosing function call, or by the driver when returning from the entry
/// point.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    /// Return from a function with a value.
    Return {
        /// Value to return from the function ([`Value::Invalid`] for a bare
        /// `return`)
        value: Value,
    },
}

impl ControlFlow {
    /// Create a return.
    pub fn return_value(value: Value) -> Self {
        ControlFlow::Return { value }
    }

    /// The value carried out of the function.
    pub fn into_value(self) -> Value {
        match self {
            ControlFlow::Return { value } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_return_carries_value() {
        let cf = ControlFlow::return_value(Value::I64(42));
        assert_eq!(cf.clone().into_value(), Value::I64(42));
        assert_eq!(cf, ControlFlow::Return { value: Value::I64(42) });
    }
}
