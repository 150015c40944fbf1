//! Statement and expression evaluation

pub mod assign;
pub mod binary;
pub mod call;
pub mod control;
pub mod function;
pub mod literal;
pub mod path;
pub mod stmt;

use quote::ToTokens;

use crate::stack::ensure_sufficient_stack;
use crate::{EvalContext, EvalError, Runtime, Value};

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking evaluator.
/// Each supported `syn` expression type implements this trait.
pub trait Evaluate {
    /// Evaluate this AST node against the runtime state.
    fn eval(&self, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for syn::Expr {
    fn eval(&self, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| dispatch(self, rt, ctx))
    }
}

fn dispatch(expr: &syn::Expr, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError> {
    match expr {
        syn::Expr::Lit(expr) => expr.eval(rt, ctx),
        syn::Expr::Path(expr) => expr.eval(rt, ctx),
        syn::Expr::Binary(expr) => expr.eval(rt, ctx),
        syn::Expr::Call(expr) => expr.eval(rt, ctx),
        syn::Expr::MethodCall(expr) => expr.eval(rt, ctx),

        // Parenthesized expressions - just unwrap
        syn::Expr::Paren(expr) => expr.expr.eval(rt, ctx),

        // Invisible groups from macro expansion - just unwrap
        syn::Expr::Group(expr) => expr.expr.eval(rt, ctx),

        // Everything else, including blocks, assignments and `return`
        // outside statement position
        _ => Err(EvalError::UnsupportedExpr {
            kind: expr_kind_name(expr).to_string(),
        }),
    }
}

/// Get a human-readable name for an expression kind.
pub(crate) fn expr_kind_name(expr: &syn::Expr) -> &'static str {
    match expr {
        syn::Expr::Array(_) => "array",
        syn::Expr::Assign(_) => "assignment",
        syn::Expr::Async(_) => "async block",
        syn::Expr::Await(_) => "await",
        syn::Expr::Binary(_) => "binary operation",
        syn::Expr::Block(_) => "block",
        syn::Expr::Break(_) => "break",
        syn::Expr::Call(_) => "function call",
        syn::Expr::Cast(_) => "cast",
        syn::Expr::Closure(_) => "closure",
        syn::Expr::Const(_) => "const block",
        syn::Expr::Continue(_) => "continue",
        syn::Expr::Field(_) => "field access",
        syn::Expr::ForLoop(_) => "for loop",
        syn::Expr::Group(_) => "group",
        syn::Expr::If(_) => "if",
        syn::Expr::Index(_) => "index",
        syn::Expr::Infer(_) => "infer",
        syn::Expr::Let(_) => "let guard",
        syn::Expr::Lit(_) => "literal",
        syn::Expr::Loop(_) => "loop",
        syn::Expr::Macro(_) => "macro invocation",
        syn::Expr::Match(_) => "match",
        syn::Expr::MethodCall(_) => "method call",
        syn::Expr::Paren(_) => "parenthesized",
        syn::Expr::Path(_) => "path",
        syn::Expr::Range(_) => "range",
        syn::Expr::Reference(_) => "reference",
        syn::Expr::Repeat(_) => "repeat",
        syn::Expr::Return(_) => "return",
        syn::Expr::Struct(_) => "struct literal",
        syn::Expr::Try(_) => "try",
        syn::Expr::TryBlock(_) => "try block",
        syn::Expr::Tuple(_) => "tuple",
        syn::Expr::Unary(_) => "unary operation",
        syn::Expr::Unsafe(_) => "unsafe block",
        syn::Expr::Verbatim(_) => "verbatim",
        syn::Expr::While(_) => "while",
        syn::Expr::Yield(_) => "yield",
        _ => "unknown",
    }
}

/// Span of the first token of a node.
pub(crate) fn first_span<T: ToTokens>(node: &T) -> proc_macro2::Span {
    node.to_token_stream()
        .into_iter()
        .next()
        .map(|t| t.span())
        .unwrap_or_else(proc_macro2::Span::call_site)
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression (convenience wrapper).
pub fn eval_expr(expr: &syn::Expr, rt: &mut Runtime, ctx: &EvalContext) -> Result<Value, EvalError> {
    expr.eval(rt, ctx)
}

// Re-export for use by other modules
pub use control::ControlFlow;
pub use stmt::{eval_block, eval_sequence, eval_stmt, eval_stmts};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PackageRegistry;

    #[test]
    fn test_unsupported_expression_names_kind() {
        let expr: syn::Expr = syn::parse_str("if true { 1 } else { 2 }").unwrap();
        let mut rt = Runtime::new(PackageRegistry::new(), Box::new(std::io::sink()));
        let ctx = EvalContext::default();

        let err = expr.eval(&mut rt, &ctx).unwrap_err();
        assert_eq!(err.to_string(), "unsupported expression: if");
    }

    #[test]
    fn test_parenthesized_expression_unwraps() {
        let expr: syn::Expr = syn::parse_str("(((7)))").unwrap();
        let mut rt = Runtime::new(PackageRegistry::new(), Box::new(std::io::sink()));
        let ctx = EvalContext::default();

        assert_eq!(eval_expr(&expr, &mut rt, &ctx).unwrap(), Value::I64(7));
    }
}
