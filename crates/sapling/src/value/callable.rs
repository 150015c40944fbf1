//! Callable value types: host builtins and script-defined functions

use std::io::Write;
use std::sync::Arc;

use super::Value;

/// Type alias for builtin function pointers to reduce complexity.
///
/// A builtin receives the interpreter's normal output sink and the
/// evaluated arguments in call order, and returns a single value
/// ([`Value::Invalid`] when it produces none).
pub type BuiltinFnPtr = Arc<dyn Fn(&mut dyn Write, &[Value]) -> Result<Value, String> + Send + Sync>;

/// A built-in native function.
///
/// These are Rust functions exposed to evaluated scripts, either in the
/// root frame (`println`) or as package exports (`fmt.Println`).
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Create a builtin from a name, an arity (-1 for variadic) and a function.
    pub fn new<F>(name: impl Into<String>, arity: i32, func: F) -> Self
    where
        F: Fn(&mut dyn Write, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }
}

impl std::fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}

/// A function declared at the top level of a script file.
///
/// Stores the AST directly for interpretation.
#[derive(Debug, Clone)]
pub struct FunctionValue {
    /// Function name
    pub name: String,

    /// Parameter names (types are erased at runtime)
    pub params: Vec<String>,

    /// The function body (stored as syn AST)
    pub body: Arc<syn::Block>,
}

impl FunctionValue {
    /// Create a new function value
    pub fn new(name: String, params: Vec<String>, body: syn::Block) -> Self {
        Self {
            name,
            params,
            // ALLOW: the body is only ever touched from the evaluating thread
            #[allow(clippy::arc_with_non_send_sync)]
            body: Arc::new(body),
        }
    }
}

/// Anything that can be invoked by a call expression.
///
/// Both variants share one calling convention: ordered values in, at most
/// one value out, or an error.
#[derive(Debug, Clone)]
pub enum Callable {
    /// Host-native function
    Builtin(BuiltinFn),

    /// Script-defined function
    Function(Arc<FunctionValue>),
}

impl Callable {
    /// The callable's name.
    pub fn name(&self) -> &str {
        match self {
            Callable::Builtin(b) => &b.name,
            Callable::Function(f) => &f.name,
        }
    }

    /// Whether both handles point at the same underlying function.
    pub fn same_target(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Builtin(a), Callable::Builtin(b)) => Arc::ptr_eq(&a.func, &b.func),
            (Callable::Function(a), Callable::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<BuiltinFn> for Callable {
    fn from(builtin: BuiltinFn) -> Self {
        Callable::Builtin(builtin)
    }
}

impl From<FunctionValue> for Callable {
    fn from(func: FunctionValue) -> Self {
        // ALLOW: see FunctionValue::new
        #[allow(clippy::arc_with_non_send_sync)]
        let func = Arc::new(func);
        Callable::Function(func)
    }
}
