//! Identifier evaluation

use crate::{EvalContext, EvalError, Runtime, Value};

use super::Evaluate;

impl Evaluate for syn::ExprPath {
    fn eval(&self, rt: &mut Runtime, _ctx: &EvalContext) -> Result<Value, EvalError> {
        let name = match (&self.qself, self.path.get_ident()) {
            (None, Some(ident)) => ident.to_string(),
            _ => {
                return Err(EvalError::UnsupportedExpr {
                    kind: format!("path `{}`", path_to_string(&self.path)),
                })
            }
        };

        rt.scope
            .get(&name)
            .cloned()
            .ok_or(EvalError::UndefinedVariable { name })
    }
}

/// Convert a path to a string for error messages.
pub fn path_to_string(path: &syn::Path) -> String {
    let segments = path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        format!("::{}", segments)
    } else {
        segments
    }
}
