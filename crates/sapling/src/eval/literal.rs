//! Literal evaluation

use crate::{EvalContext, EvalError, Runtime, Value};

use super::Evaluate;

impl Evaluate for syn::ExprLit {
    fn eval(&self, _rt: &mut Runtime, _ctx: &EvalContext) -> Result<Value, EvalError> {
        eval_lit(&self.lit)
    }
}

/// Evaluate a literal to a Value.
///
/// Integers become `I64`, floats `F64`. Strings keep their exact lexical
/// text with only the delimiters removed; escapes are not interpreted.
/// Type suffixes are not part of the language.
pub fn eval_lit(lit: &syn::Lit) -> Result<Value, EvalError> {
    match lit {
        syn::Lit::Str(s) if s.suffix().is_empty() => Ok(Value::string(lexical_text(s))),

        syn::Lit::Int(i) => eval_int_literal(i),

        syn::Lit::Float(f) => eval_float_literal(f),

        syn::Lit::Bool(b) => Ok(Value::Bool(b.value())),

        _ => Err(EvalError::UnsupportedLiteral {
            kind: lit_kind_name(lit).to_string(),
        }),
    }
}

/// Source text between the quotes of `"..."` or `r#"..."#`.
fn lexical_text(lit: &syn::LitStr) -> String {
    let token = lit.token().to_string();
    let body = match token.strip_prefix('r') {
        Some(raw) => {
            let hashes = raw.len() - raw.trim_start_matches('#').len();
            raw.get(hashes..raw.len() - hashes).unwrap_or(raw)
        }
        None => token.as_str(),
    };
    body.strip_prefix('"')
        .and_then(|b| b.strip_suffix('"'))
        .unwrap_or(body)
        .to_string()
}

fn eval_int_literal(lit: &syn::LitInt) -> Result<Value, EvalError> {
    match lit.suffix() {
        "" => lit
            .base10_parse::<i64>()
            .map(Value::I64)
            .map_err(|e| EvalError::Conversion {
                kind: "int",
                text: lit.base10_digits().to_string(),
                message: e.to_string(),
            }),
        other => Err(EvalError::UnsupportedLiteral {
            kind: format!("integer with suffix `{}`", other),
        }),
    }
}

fn eval_float_literal(lit: &syn::LitFloat) -> Result<Value, EvalError> {
    match lit.suffix() {
        "" => lit
            .base10_parse::<f64>()
            .map(Value::F64)
            .map_err(|e| EvalError::Conversion {
                kind: "float",
                text: lit.base10_digits().to_string(),
                message: e.to_string(),
            }),
        other => Err(EvalError::UnsupportedLiteral {
            kind: format!("float with suffix `{}`", other),
        }),
    }
}

fn lit_kind_name(lit: &syn::Lit) -> &'static str {
    match lit {
        syn::Lit::Str(_) => "string with suffix",
        syn::Lit::ByteStr(_) => "byte string",
        syn::Lit::CStr(_) => "C string",
        syn::Lit::Byte(_) => "byte",
        syn::Lit::Char(_) => "char",
        syn::Lit::Int(_) => "integer",
        syn::Lit::Float(_) => "float",
        syn::Lit::Bool(_) => "bool",
        syn::Lit::Verbatim(_) => "verbatim",
        _ => "unknown",
    }
}
