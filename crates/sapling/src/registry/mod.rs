//! Package registry and per-file bindings
//!
//! The registry maps import paths to packages of exported callables. Host
//! packages are registered once, at construction, under a short and a fully
//! qualified path. The `main` package is created the first time a file runs
//! and collects one [`FileUnit`] per distinct file name.

mod file;
pub mod stdlib;

pub use file::{function_from_item, FileUnit};

use indexmap::IndexMap;
use std::sync::Arc;

use crate::error::EvalError;
use crate::frontend::SourceFile;
use crate::value::Callable;

/// Path of the package that script files are loaded into.
pub const MAIN_PACKAGE: &str = "main";

/// A namespace of exported callables and the files loaded into it.
#[derive(Debug, Clone)]
pub struct Package {
    path: String,
    members: IndexMap<String, Callable>,
    files: IndexMap<String, Arc<FileUnit>>,
}

impl Package {
    /// Create an empty package.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            members: IndexMap::new(),
            files: IndexMap::new(),
        }
    }

    /// The package's canonical import path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Export a callable under its own name.
    pub fn define(&mut self, callable: impl Into<Callable>) {
        let callable = callable.into();
        self.members.insert(callable.name().to_string(), callable);
    }

    /// Look up an export.
    pub fn member(&self, name: &str) -> Option<&Callable> {
        self.members.get(name)
    }

    /// Exported names, in definition order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// A loaded file, by name.
    pub fn file(&self, name: &str) -> Option<&Arc<FileUnit>> {
        self.files.get(name)
    }

    /// Number of files loaded into this package.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// All packages reachable by import path.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    packages: IndexMap<String, Arc<Package>>,
    main: Option<Package>,
}

impl PackageRegistry {
    /// Create a registry with no packages at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the host packages:
    /// `fmt` / `std::fmt` and `strings` / `std::strings`.
    pub fn with_std() -> Self {
        let mut registry = Self::new();
        registry.register(&["fmt", stdlib::FMT], stdlib::fmt_package());
        registry.register(&["strings", stdlib::STRINGS], stdlib::strings_package());
        registry
    }

    /// Register `package` under every path in `paths`.
    ///
    /// All paths share one package, so they resolve to the same callables.
    pub fn register(&mut self, paths: &[&str], package: Package) {
        let package = Arc::new(package);
        for path in paths {
            self.packages.insert((*path).to_string(), Arc::clone(&package));
        }
    }

    /// Look up a package by import path.
    pub fn package(&self, path: &str) -> Option<&Package> {
        if path == MAIN_PACKAGE {
            return self.main.as_ref();
        }
        self.packages.get(path).map(AsRef::as_ref)
    }

    /// The `main` package, once a file has run.
    pub fn main_package(&self) -> Option<&Package> {
        self.main.as_ref()
    }

    /// Resolve `path.name` to an exported callable.
    pub fn lookup(&self, path: &str, name: &str) -> Result<Callable, EvalError> {
        let package = self
            .package(path)
            .ok_or_else(|| EvalError::UndefinedPackage {
                path: path.to_string(),
            })?;
        package
            .member(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedExport {
                package: path.to_string(),
                name: name.to_string(),
            })
    }

    /// Bind `file` into the `main` package, building its unit on first use.
    ///
    /// A file name seen before returns the cached unit unchanged.
    pub fn load_file(&mut self, file: &SourceFile) -> Result<Arc<FileUnit>, EvalError> {
        let main = self
            .main
            .get_or_insert_with(|| Package::new(MAIN_PACKAGE));

        if let Some(unit) = main.files.get(file.name()) {
            tracing::debug!(file = file.name(), "reusing file bindings");
            return Ok(Arc::clone(unit));
        }

        let unit = Arc::new(FileUnit::from_source(file)?);
        tracing::debug!(
            file = file.name(),
            imports = unit.imports().count(),
            "registered file in main package"
        );
        main.files
            .insert(file.name().to_string(), Arc::clone(&unit));
        Ok(unit)
    }
}
