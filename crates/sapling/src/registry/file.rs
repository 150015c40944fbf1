//! Per-file bindings: the import alias table and declared functions

use indexmap::IndexMap;
use std::sync::Arc;

use crate::error::EvalError;
use crate::frontend::SourceFile;
use crate::value::FunctionValue;

/// Immutable snapshot of what a source file binds.
///
/// Built the first time a file name runs, then cached by the registry.
#[derive(Debug)]
pub struct FileUnit {
    name: String,
    imports: IndexMap<String, String>,
    functions: IndexMap<String, Arc<FunctionValue>>,
}

impl FileUnit {
    /// Build the alias table and function table of `file`.
    ///
    /// `use a::b;` binds alias `b` to path `a::b`; `use a::b as c;` binds
    /// `c`. Groups are flattened. Glob imports and a second import under an
    /// alias already taken are rejected.
    pub fn from_source(file: &SourceFile) -> Result<Self, EvalError> {
        let mut unit = FileUnit {
            name: file.name().to_string(),
            imports: IndexMap::new(),
            functions: IndexMap::new(),
        };

        for item in &file.syntax().items {
            match item {
                syn::Item::Use(item_use) => unit.bind_use(&mut Vec::new(), &item_use.tree)?,
                syn::Item::Fn(item_fn) => {
                    let func = function_from_item(item_fn)?;
                    // ALLOW: see FunctionValue::new
                    #[allow(clippy::arc_with_non_send_sync)]
                    let func = Arc::new(func);
                    unit.functions.insert(func.name.clone(), func);
                }
                _ => {}
            }
        }

        Ok(unit)
    }

    /// The file name this unit was built for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Import path bound to `alias`, if any.
    pub fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.imports.get(alias).map(String::as_str)
    }

    /// The alias table, in declaration order.
    pub fn imports(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports
            .iter()
            .map(|(alias, path)| (alias.as_str(), path.as_str()))
    }

    /// A top-level function declared in this file.
    pub fn function(&self, name: &str) -> Option<&Arc<FunctionValue>> {
        self.functions.get(name)
    }

    fn bind_use(&mut self, prefix: &mut Vec<String>, tree: &syn::UseTree) -> Result<(), EvalError> {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                let result = self.bind_use(prefix, &path.tree);
                prefix.pop();
                result
            }
            syn::UseTree::Name(name) => {
                let alias = name.ident.to_string();
                let path = join_path(prefix, &alias);
                self.bind_alias(alias, path)
            }
            syn::UseTree::Rename(rename) => {
                let path = join_path(prefix, &rename.ident.to_string());
                self.bind_alias(rename.rename.to_string(), path)
            }
            syn::UseTree::Group(group) => group
                .items
                .iter()
                .try_for_each(|item| self.bind_use(prefix, item)),
            syn::UseTree::Glob(_) => Err(EvalError::UnsupportedImport {
                file: self.name.clone(),
                detail: format!("glob import of `{}::*`", prefix.join("::")),
            }),
        }
    }

    fn bind_alias(&mut self, alias: String, path: String) -> Result<(), EvalError> {
        if let Some(existing) = self.imports.get(&alias) {
            return Err(EvalError::UnsupportedImport {
                file: self.name.clone(),
                detail: format!("`{}` redeclared (already imports `{}`)", alias, existing),
            });
        }
        tracing::trace!(file = %self.name, %alias, %path, "bind import");
        self.imports.insert(alias, path);
        Ok(())
    }
}

fn join_path(prefix: &[String], last: &str) -> String {
    if prefix.is_empty() {
        last.to_string()
    } else {
        format!("{}::{}", prefix.join("::"), last)
    }
}

/// Convert a top-level `fn` item into a script function.
///
/// Parameter and return types are erased; only plain identifier
/// parameters are accepted.
pub fn function_from_item(item: &syn::ItemFn) -> Result<FunctionValue, EvalError> {
    let name = item.sig.ident.to_string();
    let unsupported = |detail: &str| EvalError::UnsupportedDecl {
        name: name.clone(),
        detail: detail.to_string(),
    };

    if !item.sig.generics.params.is_empty() {
        return Err(unsupported("generic parameters"));
    }

    let mut params = Vec::with_capacity(item.sig.inputs.len());
    for input in &item.sig.inputs {
        match input {
            syn::FnArg::Receiver(_) => return Err(unsupported("self parameter")),
            syn::FnArg::Typed(pat_type) => match pat_type.pat.as_ref() {
                syn::Pat::Ident(ident) if ident.by_ref.is_none() && ident.subpat.is_none() => {
                    params.push(ident.ident.to_string());
                }
                _ => return Err(unsupported("non-identifier parameter")),
            },
        }
    }

    Ok(FunctionValue::new(name, params, (*item.block).clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit(source: &str) -> Result<FileUnit, EvalError> {
        FileUnit::from_source(&SourceFile::parse("test.rs", source).unwrap())
    }

    #[test]
    fn test_default_alias_is_last_segment() {
        let unit = unit("use fmt;\nuse std::strings;\nfn main() {}").unwrap();

        assert_eq!(unit.resolve_alias("fmt"), Some("fmt"));
        assert_eq!(unit.resolve_alias("strings"), Some("std::strings"));
        assert_eq!(unit.resolve_alias("std"), None);
    }

    #[test]
    fn test_explicit_alias_and_groups() {
        let unit = unit("use std::{fmt, strings as s};").unwrap();

        assert_eq!(
            unit.imports().collect::<Vec<_>>(),
            vec![("fmt", "std::fmt"), ("s", "std::strings")]
        );
        assert_eq!(unit.resolve_alias("strings"), None);
    }

    #[test]
    fn test_glob_import_rejected() {
        let err = unit("use std::*;").unwrap_err();
        assert!(matches!(err, EvalError::UnsupportedImport { .. }));
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let err = unit("use fmt;\nuse std::fmt;").unwrap_err();
        assert!(err.to_string().contains("`fmt` redeclared"));
    }

    #[test]
    fn test_functions_collected_with_params() {
        let unit = unit("fn add(a: i64, b: i64) -> i64 { return a + b; }").unwrap();
        let func = unit.function("add").unwrap();

        assert_eq!(func.params, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_generic_function_rejected() {
        let err = unit("fn id<T>(x: T) -> T { return x; }").unwrap_err();
        assert!(matches!(err, EvalError::UnsupportedDecl { name, .. } if name == "id"));
    }
}
