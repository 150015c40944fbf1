//! Call evaluation and callee resolution
//!
//! Two callee forms are understood:
//!
//! - `name(args)`: a callable bound in scope, else a function declared in
//!   the executing file
//! - `alias.Name(args)` or `alias::Name(args)`: an export of the package
//!   the executing file imported under `alias`

use std::sync::Arc;

use crate::error::type_name;
use crate::value::Callable;
use crate::{EvalContext, EvalError, Runtime, Value};

use super::function::call_function;
use super::path::path_to_string;
use super::{expr_kind_name, Evaluate};

impl Evaluate for syn::ExprCall {
    fn eval(&self, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError> {
        let args = eval_args(self.args.iter(), rt, ctx)?;

        let callee = match self.func.as_ref() {
            syn::Expr::Path(path) if path.qself.is_none() => {
                let segments: Vec<_> = path.path.segments.iter().collect();
                match segments.as_slice() {
                    [name] if name.arguments.is_none() => {
                        resolve_bare(rt, &name.ident.to_string())?
                    }
                    [alias, name]
                        if path.path.leading_colon.is_none()
                            && alias.arguments.is_none()
                            && name.arguments.is_none() =>
                    {
                        resolve_qualified(rt, &alias.ident.to_string(), &name.ident.to_string())?
                    }
                    _ => {
                        return Err(EvalError::UnsupportedCallee {
                            callee: path_to_string(&path.path),
                        })
                    }
                }
            }
            other => {
                return Err(EvalError::UnsupportedCallee {
                    callee: expr_kind_name(other).to_string(),
                })
            }
        };

        call_value(&callee, args, rt, ctx)
    }
}

impl Evaluate for syn::ExprMethodCall {
    fn eval(&self, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError> {
        let args = eval_args(self.args.iter(), rt, ctx)?;

        let alias = match self.receiver.as_ref() {
            syn::Expr::Path(path) if path.qself.is_none() && self.turbofish.is_none() => {
                path.path.get_ident().map(ToString::to_string)
            }
            _ => None,
        };
        let Some(alias) = alias else {
            return Err(EvalError::UnsupportedCallee {
                callee: format!("method call .{}()", self.method),
            });
        };

        let callee = resolve_qualified(rt, &alias, &self.method.to_string())?;
        call_value(&callee, args, rt, ctx)
    }
}

/// Evaluate call arguments left to right.
///
/// A failure is wrapped with the argument's zero-based index.
fn eval_args<'a>(
    args: impl Iterator<Item = &'a syn::Expr>,
    rt: &mut Runtime,
    ctx: &EvalContext,
) -> Result<Vec<Value>, EvalError> {
    args.enumerate()
        .map(|(index, arg)| arg.eval(rt, ctx).map_err(|err| err.in_argument(index)))
        .collect()
}

/// Resolve a bare callee name.
fn resolve_bare(rt: &Runtime, name: &str) -> Result<Callable, EvalError> {
    match rt.scope.get(name) {
        Some(Value::Callable(callable)) => Ok(callable.clone()),
        Some(other) => Err(EvalError::NotCallable {
            name: name.to_string(),
            found: type_name(other),
        }),
        None => {
            let func = rt
                .current_file()
                .and_then(|file| file.function(name))
                .ok_or_else(|| EvalError::UndefinedFunction {
                    name: name.to_string(),
                })?;
            tracing::debug!(function = name, "resolved file function");
            Ok(Callable::Function(Arc::clone(func)))
        }
    }
}

/// Resolve `alias.name` through the executing file's import table.
fn resolve_qualified(rt: &Runtime, alias: &str, name: &str) -> Result<Callable, EvalError> {
    let path = rt
        .current_file()
        .and_then(|file| file.resolve_alias(alias))
        .ok_or_else(|| EvalError::UndefinedAlias {
            alias: alias.to_string(),
        })?;
    let callable = rt.registry.lookup(path, name)?;
    tracing::debug!(alias, path, export = name, "resolved qualified call");
    Ok(callable)
}

/// Invoke a callable with evaluated arguments.
///
/// Host functions with a fixed arity are checked before invocation; their
/// error strings become `BuiltinError`s.
///
/// # Errors
///
/// Returns `ArityMismatch`, `BuiltinError`, or any failure of a script
/// function body.
pub fn call_value(
    callee: &Callable,
    args: Vec<Value>,
    rt: &mut Runtime,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    match callee {
        Callable::Builtin(builtin) => {
            if let Ok(expected) = usize::try_from(builtin.arity) {
                if expected != args.len() {
                    return Err(EvalError::ArityMismatch {
                        name: builtin.name.clone(),
                        expected,
                        got: args.len(),
                    });
                }
            }
            (builtin.func)(rt.stdout(), &args).map_err(|message| EvalError::BuiltinError {
                name: builtin.name.clone(),
                message,
            })
        }
        Callable::Function(func) => call_function(func, args, rt, ctx),
    }
}
