//! Declarations (`let x = e;`) and re-assignments (`x = e;`)
//!
//! Both forms bind exactly one identifier to exactly one value in the
//! current frame.

use crate::error::AssignSide;
use crate::{EvalContext, EvalError, Runtime, Value};

use super::{expr_kind_name, Evaluate};

/// Evaluate a `let` statement.
///
/// `mut` and a type annotation on the target are accepted and ignored.
///
/// # Errors
///
/// Returns `UnsupportedAssignment` for several targets or values,
/// `UnsupportedAssignTarget` for any other pattern, and `UnsupportedStmt`
/// for a declaration without a value.
pub fn eval_local(local: &syn::Local, rt: &mut Runtime, ctx: &EvalContext) -> Result<(), EvalError> {
    let name = pattern_target(&local.pat)?;

    let Some(init) = &local.init else {
        return Err(EvalError::UnsupportedStmt {
            kind: format!("declaration of `{}` without a value", name),
        });
    };
    if init.diverge.is_some() {
        return Err(EvalError::UnsupportedStmt {
            kind: "let-else".to_string(),
        });
    }

    let value = eval_source(&init.expr, rt, ctx)?;
    bind(rt, name, value);
    Ok(())
}

/// Evaluate `name = expr` in statement position.
///
/// # Errors
///
/// Same shape errors as [`eval_local`], plus any failure of the value.
pub fn eval_assign(assign: &syn::ExprAssign, rt: &mut Runtime, ctx: &EvalContext) -> Result<(), EvalError> {
    let name = match assign.left.as_ref() {
        syn::Expr::Path(path) if path.qself.is_none() => match path.path.get_ident() {
            Some(ident) => ident.to_string(),
            None => {
                return Err(EvalError::UnsupportedAssignTarget {
                    kind: "path".to_string(),
                })
            }
        },
        syn::Expr::Tuple(tuple) => {
            return Err(EvalError::UnsupportedAssignment {
                side: AssignSide::Lhs,
                count: tuple.elems.len(),
            })
        }
        other => {
            return Err(EvalError::UnsupportedAssignTarget {
                kind: expr_kind_name(other).to_string(),
            })
        }
    };

    let value = eval_source(&assign.right, rt, ctx)?;
    bind(rt, name, value);
    Ok(())
}

fn pattern_target(pat: &syn::Pat) -> Result<String, EvalError> {
    match pat {
        syn::Pat::Ident(ident) if ident.by_ref.is_none() && ident.subpat.is_none() => {
            Ok(ident.ident.to_string())
        }
        syn::Pat::Type(typed) => pattern_target(&typed.pat),
        syn::Pat::Tuple(tuple) => Err(EvalError::UnsupportedAssignment {
            side: AssignSide::Lhs,
            count: tuple.elems.len(),
        }),
        other => Err(EvalError::UnsupportedAssignTarget {
            kind: pat_kind_name(other).to_string(),
        }),
    }
}

/// Evaluate the single value of an assignment.
fn eval_source(expr: &syn::Expr, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError> {
    if let syn::Expr::Tuple(tuple) = expr {
        return Err(EvalError::UnsupportedAssignment {
            side: AssignSide::Rhs,
            count: tuple.elems.len(),
        });
    }
    expr.eval(rt, ctx)
}

fn bind(rt: &mut Runtime, name: String, value: Value) {
    tracing::trace!(%name, kind = %value.kind(), "bind");
    rt.scope.set(name, value);
}

fn pat_kind_name(pat: &syn::Pat) -> &'static str {
    match pat {
        syn::Pat::Ident(_) => "binding with `ref` or subpattern",
        syn::Pat::Lit(_) => "literal pattern",
        syn::Pat::Or(_) => "or-pattern",
        syn::Pat::Path(_) => "path pattern",
        syn::Pat::Range(_) => "range pattern",
        syn::Pat::Reference(_) => "reference pattern",
        syn::Pat::Slice(_) => "slice pattern",
        syn::Pat::Struct(_) => "struct pattern",
        syn::Pat::TupleStruct(_) => "tuple struct pattern",
        syn::Pat::Wild(_) => "wildcard",
        _ => "pattern",
    }
}
