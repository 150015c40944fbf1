//! Statement evaluation

use crate::stack::ensure_sufficient_stack;
use crate::{EvalContext, EvalError, Runtime};

use super::assign::{eval_assign, eval_local};
use super::function::eval_return;
use super::{first_span, Evaluate};

/// Evaluate a statement.
///
/// Blocks, assignments and `return` are only accepted in statement
/// position; every other expression is evaluated for its side effects and
/// its value discarded.
///
/// # Errors
///
/// Returns errors from statement evaluation, or `UnsupportedStmt` for items
/// and macro invocations.
pub fn eval_stmt(stmt: &syn::Stmt, rt: &mut Runtime, ctx: &EvalContext) -> Result<(), EvalError> {
    match stmt {
        // Short declaration
        syn::Stmt::Local(local) => eval_local(local, rt, ctx),

        syn::Stmt::Expr(expr, _) => match expr {
            syn::Expr::Block(block) if block.label.is_none() => eval_block(&block.block, rt, ctx),
            syn::Expr::Assign(assign) => eval_assign(assign, rt, ctx),
            syn::Expr::Return(ret) => eval_return(ret, rt, ctx),
            _ => {
                expr.eval(rt, ctx)?;
                Ok(())
            }
        },

        syn::Stmt::Item(item) => Err(EvalError::UnsupportedStmt {
            kind: format!("{} item", item_kind_name(item)),
        }),

        syn::Stmt::Macro(stmt_macro) => Err(EvalError::UnsupportedStmt {
            kind: format!(
                "macro statement: {}",
                stmt_macro
                    .mac
                    .path
                    .segments
                    .last()
                    .map(|s| s.ident.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            ),
        }),
    }
}

/// Evaluate a block, managing scope.
///
/// Creates a new frame, evaluates statements, then pops the frame on every
/// exit path. A failure is wrapped with the index of the failing statement.
///
/// # Errors
///
/// Returns errors from statement evaluation.
pub fn eval_block(block: &syn::Block, rt: &mut Runtime, ctx: &EvalContext) -> Result<(), EvalError> {
    ensure_sufficient_stack(|| {
        let mut frame = rt.enter_block();
        eval_sequence(&block.stmts, &mut frame, ctx, |index, _, err| err.in_block(index))
    })
}

/// Evaluate statements in the current frame, without extra context.
///
/// # Errors
///
/// Returns the first statement failure unchanged.
pub fn eval_stmts(stmts: &[syn::Stmt], rt: &mut Runtime, ctx: &EvalContext) -> Result<(), EvalError> {
    eval_sequence(stmts, rt, ctx, |_, _, err| err)
}

/// Evaluate statements strictly in order, stopping at the first failure.
///
/// The interrupt flag is polled before each statement. `wrap` adds context
/// to a failure; a `return` in flight passes through untouched.
///
/// # Errors
///
/// Returns `Interrupted` or the first statement failure, as wrapped.
pub fn eval_sequence<F>(
    stmts: &[syn::Stmt],
    rt: &mut Runtime,
    ctx: &EvalContext,
    mut wrap: F,
) -> Result<(), EvalError>
where
    F: FnMut(usize, &syn::Stmt, EvalError) -> EvalError,
{
    for (index, stmt) in stmts.iter().enumerate() {
        let result = if ctx.is_interrupted() {
            Err(EvalError::Interrupted)
        } else {
            tracing::trace!(
                index,
                line = first_span(stmt).start().line,
                depth = rt.scope.depth(),
                "eval stmt"
            );
            eval_stmt(stmt, rt, ctx)
        };

        if let Err(err) = result {
            if err.is_control_flow() {
                return Err(err);
            }
            return Err(wrap(index, stmt, err));
        }
    }

    Ok(())
}

fn item_kind_name(item: &syn::Item) -> &'static str {
    match item {
        syn::Item::Const(_) => "const",
        syn::Item::Enum(_) => "enum",
        syn::Item::Fn(_) => "fn",
        syn::Item::Impl(_) => "impl",
        syn::Item::Mod(_) => "mod",
        syn::Item::Static(_) => "static",
        syn::Item::Struct(_) => "struct",
        syn::Item::Trait(_) => "trait",
        syn::Item::Type(_) => "type",
        syn::Item::Use(_) => "use",
        _ => "other",
    }
}
