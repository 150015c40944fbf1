//! Script function invocation and `return`

use crate::eval::control::ControlFlow;
use crate::stack::ensure_sufficient_stack;
use crate::value::FunctionValue;
use crate::{EvalContext, EvalError, Runtime, Value};

use super::stmt::eval_stmts;
use super::Evaluate;

/// Call a script-defined function.
///
/// Parameters are bound in a fresh call frame that sees only itself and the
/// root frame. The body's statements run in that frame; falling off the end
/// yields [`Value::Invalid`]. The entry point's body runs in the root frame,
/// so its locals are visible here.
///
/// # Errors
///
/// Returns `ArityMismatch`, a stack overflow when the context's call depth
/// is exhausted, or the body's failure wrapped with the function name.
pub fn call_function(
    func: &FunctionValue,
    args: Vec<Value>,
    rt: &mut Runtime,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    if args.len() != func.params.len() {
        return Err(EvalError::ArityMismatch {
            name: func.name.clone(),
            expected: func.params.len(),
            got: args.len(),
        });
    }

    ensure_sufficient_stack(|| {
        let mut frame = rt.enter_call(ctx.max_call_depth)?;
        tracing::trace!(
            function = %func.name,
            depth = frame.scope.call_depth(),
            "enter function"
        );

        for (param, arg) in func.params.iter().zip(args) {
            frame.scope.set(param.clone(), arg);
        }

        match eval_stmts(&func.body.stmts, &mut frame, ctx) {
            Ok(()) => Ok(Value::Invalid),
            Err(EvalError::ControlFlow(flow)) => Ok(flow.into_value()),
            Err(err) => Err(err.in_function(func.name.as_str())),
        }
    })
}

/// Evaluate `return` / `return expr` in statement position.
///
/// Always yields `Err(EvalError::ControlFlow(...))`; the enclosing call
/// turns it back into a value.
///
/// # Errors
///
/// Returns `UnsupportedReturn` for a tuple of values, or the failure of the
/// returned expression.
pub fn eval_return(ret: &syn::ExprReturn, rt: &mut Runtime, ctx: &EvalContext) -> Result<(), EvalError> {
    let value = match ret.expr.as_deref() {
        None => Value::Invalid,
        Some(syn::Expr::Tuple(tuple)) if tuple.elems.is_empty() => Value::Invalid,
        Some(syn::Expr::Tuple(tuple)) => {
            return Err(EvalError::UnsupportedReturn {
                count: tuple.elems.len(),
            })
        }
        Some(expr) => expr.eval(rt, ctx)?,
    };

    Err(EvalError::ControlFlow(ControlFlow::Return { value }))
}
