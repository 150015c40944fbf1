//! Binary operation evaluation

use crate::error::type_name;
use crate::{EvalContext, EvalError, Runtime, Value};

use super::Evaluate;

impl Evaluate for syn::ExprBinary {
    fn eval(&self, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError> {
        // Left then right, both always evaluated: `||` and `&&` do not
        // short-circuit.
        let left = self.left.eval(rt, ctx)?;
        let right = self.right.eval(rt, ctx)?;
        let op = op_symbol(&self.op);

        if !left.is_valid() || !right.is_valid() || left.kind() != right.kind() {
            return Err(EvalError::TypeMismatch {
                op: op.to_string(),
                left: type_name(&left),
                right: type_name(&right),
            });
        }

        match &self.op {
            syn::BinOp::Add(_) => eval_add(op, left, right),
            syn::BinOp::Or(_) => eval_logical(op, left, right, |a, b| a || b),
            syn::BinOp::And(_) => eval_logical(op, left, right, |a, b| a && b),
            _ => Err(EvalError::UnsupportedOperator { op: op.to_string() }),
        }
    }
}

/// Addition in the operands' own kind. Both operands share one kind.
fn eval_add(op: &str, left: Value, right: Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::I64(a), Value::I64(b)) => Ok(Value::I64(a.wrapping_add(b))),
        (Value::F64(a), Value::F64(b)) => Ok(Value::F64(a + b)),
        (Value::String(a), Value::String(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(&a);
            joined.push_str(&b);
            Ok(Value::from(joined))
        }
        (left, _) => Err(EvalError::InvalidOperand {
            op: op.to_string(),
            kind: type_name(&left),
        }),
    }
}

fn eval_logical(
    op: &str,
    left: Value,
    right: Value,
    apply: fn(bool, bool) -> bool,
) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(apply(a, b))),
        (left, _) => Err(EvalError::InvalidOperand {
            op: op.to_string(),
            kind: type_name(&left),
        }),
    }
}

/// Source token of a binary operator.
pub fn op_symbol(op: &syn::BinOp) -> &'static str {
    match op {
        syn::BinOp::Add(_) => "+",
        syn::BinOp::Sub(_) => "-",
        syn::BinOp::Mul(_) => "*",
        syn::BinOp::Div(_) => "/",
        syn::BinOp::Rem(_) => "%",
        syn::BinOp::And(_) => "&&",
        syn::BinOp::Or(_) => "||",
        syn::BinOp::BitXor(_) => "^",
        syn::BinOp::BitAnd(_) => "&",
        syn::BinOp::BitOr(_) => "|",
        syn::BinOp::Shl(_) => "<<",
        syn::BinOp::Shr(_) => ">>",
        syn::BinOp::Eq(_) => "==",
        syn::BinOp::Lt(_) => "<",
        syn::BinOp::Le(_) => "<=",
        syn::BinOp::Ne(_) => "!=",
        syn::BinOp::Ge(_) => ">=",
        syn::BinOp::Gt(_) => ">",
        syn::BinOp::AddAssign(_) => "+=",
        syn::BinOp::SubAssign(_) => "-=",
        syn::BinOp::MulAssign(_) => "*=",
        syn::BinOp::DivAssign(_) => "/=",
        syn::BinOp::RemAssign(_) => "%=",
        syn::BinOp::BitXorAssign(_) => "^=",
        syn::BinOp::BitAndAssign(_) => "&=",
        syn::BinOp::BitOrAssign(_) => "|=",
        syn::BinOp::ShlAssign(_) => "<<=",
        syn::BinOp::ShrAssign(_) => ">>=",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, PackageRegistry};
    use pretty_assertions::assert_eq;

    fn eval(src: &str) -> Result<Value, EvalError> {
        let expr: syn::Expr = syn::parse_str(src).unwrap();
        let mut rt = Runtime::new(PackageRegistry::with_std(), Box::new(std::io::sink()));
        expr.eval(&mut rt, &EvalContext::default())
    }

    #[test]
    fn test_add_is_kind_polymorphic() {
        assert_eq!(eval("1 + 2").unwrap(), Value::I64(3));
        assert_eq!(eval("1.5 + 2.5").unwrap(), Value::F64(4.0));
        assert_eq!(eval(r#""a" + "b""#).unwrap(), Value::string("ab"));
    }

    #[test]
    fn test_integer_add_wraps() {
        assert_eq!(
            eval("9223372036854775807 + 1").unwrap(),
            Value::I64(i64::MIN)
        );
    }

    #[test]
    fn test_mixed_kinds_mismatch() {
        let err = eval(r#"1 + "a""#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.to_string(), "mismatched types for +: int and string");

        let err = eval("1 + 1.0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_logical_operators_on_bools() {
        assert_eq!(eval("true || false").unwrap(), Value::Bool(true));
        assert_eq!(eval("true && false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_logical_operator_rejects_ints() {
        let err = eval("1 || 2").unwrap_err();
        assert_eq!(err.to_string(), "operator || is not defined on int");
    }

    #[test]
    fn test_add_rejects_bools() {
        let err = eval("true + true").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_other_operators_unsupported() {
        let err = eval("3 - 1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConstruct);
        assert_eq!(err.to_string(), "unsupported operator: -");
    }

    #[test]
    fn test_no_short_circuit() {
        // The right operand is evaluated even though the left decides
        let err = eval("true || missing").unwrap_err();
        assert_eq!(err.to_string(), "undefined variable: missing");
    }

    #[test]
    fn test_void_operand_mismatch() {
        let err = eval(r#"println() + 1"#).unwrap_err();
        assert_eq!(err.to_string(), "mismatched types for +: invalid and int");
    }
}
