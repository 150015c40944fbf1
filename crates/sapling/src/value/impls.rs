//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create a callable value from a builtin
    pub fn builtin(builtin: BuiltinFn) -> Self {
        Value::Callable(Callable::Builtin(builtin))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Kind Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// The concrete kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Invalid => Kind::Invalid,
            Value::Bool(_) => Kind::Bool,
            Value::I64(_) => Kind::I64,
            Value::F64(_) => Kind::F64,
            Value::String(_) => Kind::String,
            Value::Callable(_) => Kind::Callable,
        }
    }

    /// Anything but the invalid marker.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Value::Invalid)
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is callable
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Callable(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors
    // ═══════════════════════════════════════════════════════════════════

    /// Extract bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract integer value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract float value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract callable reference
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Arc::new(s))
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Invalid, Value::Invalid) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.same_target(b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Value::Invalid.kind(), Kind::Invalid);
        assert_eq!(Value::from(true).kind(), Kind::Bool);
        assert_eq!(Value::from(1_i64).kind(), Kind::I64);
        assert_eq!(Value::from(1.0).kind(), Kind::F64);
        assert_eq!(Value::from("s").kind(), Kind::String);
    }

    #[test]
    fn test_no_cross_kind_equality() {
        assert_ne!(Value::I64(1), Value::F64(1.0));
        assert_ne!(Value::string("1"), Value::I64(1));
        assert_ne!(Value::Invalid, Value::Bool(false));
    }

    #[test]
    fn test_builtin_equality_is_identity() {
        let a = BuiltinFn::new("f", 0, |_, _| Ok(Value::Invalid));
        let b = BuiltinFn::new("f", 0, |_, _| Ok(Value::Invalid));

        assert_eq!(Value::builtin(a.clone()), Value::builtin(a.clone()));
        assert_ne!(Value::builtin(a), Value::builtin(b));
    }
}
