//! Display and Debug implementations for Value
//!
//! `Display` is what print-style builtins write: strings verbatim, floats in
//! shortest form without a trailing `.0`, and exponent notation outside
//! `[1e-4, 1e21)` with a signed two-digit exponent (`1e+21`, `1.5e-05`).

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::F64(n) => write!(f, "{:?}", n),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Invalid => write!(f, "<invalid Value>"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(n) => write!(f, "{}", n),
            Value::F64(n) => f.write_str(&format_float(*n)),
            Value::String(s) => f.write_str(s),
            Value::Callable(c) => write!(f, "func {}", c.name()),
        }
    }
}

/// Format a float the way print-style builtins show it.
pub(crate) fn format_float(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let abs = n.abs();
    if abs != 0.0 && !(1e-4..1e21).contains(&abs) {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) => match exp.parse::<i32>() {
                Ok(exp) => {
                    let sign = if exp < 0 { '-' } else { '+' };
                    format!("{}e{}{:02}", mantissa, sign, exp.abs())
                }
                Err(_) => formatted,
            },
            None => formatted,
        };
    }

    format!("{}", n)
}
