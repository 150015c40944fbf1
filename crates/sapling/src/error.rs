//! Error types for Sapling evaluation

use thiserror::Error;

use crate::eval::ControlFlow;
use crate::value::Value;

/// Coarse classification of an [`EvalError`].
///
/// Context wrappers (line, block index, argument index, function) are
/// transparent: the kind is always that of the innermost failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A statement, expression, operator, literal or assignment shape the
    /// evaluator does not implement.
    UnsupportedConstruct,
    /// Unknown identifier, function, import alias, package or export.
    UndefinedReference,
    /// Operands of different (or unsupported) kinds.
    TypeMismatch,
    /// A numeric literal that could not be converted.
    ConversionError,
    /// The requested entry point is not declared in the file.
    EntryPointNotFound,
    /// A call failed (wrong arity, host error, call depth exceeded) or
    /// output could not be written.
    Invocation,
    /// Evaluation was interrupted through the context flag.
    Interrupted,
}

/// Which side of an assignment had an unsupported number of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignSide {
    /// The assignment targets.
    Lhs,
    /// The assigned values.
    Rhs,
}

impl std::fmt::Display for AssignSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignSide::Lhs => write!(f, "lhs"),
            AssignSide::Rhs => write!(f, "rhs"),
        }
    }
}

/// Errors from frame and call bookkeeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Script function calls nested deeper than the configured limit.
    #[error("stack overflow: call depth {depth} exceeds maximum {max}")]
    StackOverflow {
        /// Depth at the time of the failed call
        depth: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Main error type for evaluation.
#[derive(Error, Debug)]
pub enum EvalError {
    // ═══════════════════════════════════════════════════════════════════
    // Unsupported constructs
    // ═══════════════════════════════════════════════════════════════════
    /// Statement kind outside the supported subset
    #[error("unsupported statement: {kind}")]
    UnsupportedStmt {
        /// Human-readable statement kind
        kind: String,
    },

    /// Expression kind outside the supported subset
    #[error("unsupported expression: {kind}")]
    UnsupportedExpr {
        /// Human-readable expression kind
        kind: String,
    },

    /// Literal kind outside the supported subset
    #[error("unsupported literal: {kind}")]
    UnsupportedLiteral {
        /// Human-readable literal kind
        kind: String,
    },

    /// Binary operator outside `+`, `||` and `&&`
    #[error("unsupported operator: {op}")]
    UnsupportedOperator {
        /// Operator token
        op: String,
    },

    /// More than one target or value in an assignment
    #[error("unsupported assignment shape: {count} operands on the {side}")]
    UnsupportedAssignment {
        /// Offending side
        side: AssignSide,
        /// Number of operands found
        count: usize,
    },

    /// Assignment target that is not a plain identifier
    #[error("unsupported assignment target: {kind}")]
    UnsupportedAssignTarget {
        /// Human-readable target kind
        kind: String,
    },

    /// Callee form that is neither an identifier nor `alias.Name`
    #[error("unsupported function: {callee}")]
    UnsupportedCallee {
        /// Description of the callee expression
        callee: String,
    },

    /// Identifier bound to something that cannot be called
    #[error("unsupported function: {name} is a {found}, not a function")]
    NotCallable {
        /// The identifier
        name: String,
        /// Kind of the bound value
        found: &'static str,
    },

    /// `return` with more than one value
    #[error("unsupported return of {count} values")]
    UnsupportedReturn {
        /// Number of returned values
        count: usize,
    },

    /// Import form the file binding does not understand
    #[error("unsupported import in {file}: {detail}")]
    UnsupportedImport {
        /// File being bound
        file: String,
        /// What was wrong
        detail: String,
    },

    /// Function declaration the evaluator cannot represent
    #[error("unsupported declaration of {name}: {detail}")]
    UnsupportedDecl {
        /// Function name
        name: String,
        /// What was wrong
        detail: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Undefined references
    // ═══════════════════════════════════════════════════════════════════
    /// Identifier not bound in any visible frame
    #[error("undefined variable: {name}")]
    UndefinedVariable {
        /// The identifier
        name: String,
    },

    /// Bare call to a name that is neither bound nor declared in the file
    #[error("unsupported function: {name} is not defined")]
    UndefinedFunction {
        /// The identifier
        name: String,
    },

    /// Qualifier missing from the current file's import table
    #[error("undefined import alias: {alias}")]
    UndefinedAlias {
        /// The alias used at the call site
        alias: String,
    },

    /// Import path with no registered package
    #[error("undefined package: {path}")]
    UndefinedPackage {
        /// The import path
        path: String,
    },

    /// Package that does not export the requested name
    #[error("undefined: {package}.{name}")]
    UndefinedExport {
        /// Import path of the package
        package: String,
        /// Requested export
        name: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Type and conversion errors
    // ═══════════════════════════════════════════════════════════════════
    /// Binary operands of different kinds (or an invalid operand)
    #[error("mismatched types for {op}: {left} and {right}")]
    TypeMismatch {
        /// Operator token
        op: String,
        /// Left operand kind
        left: &'static str,
        /// Right operand kind
        right: &'static str,
    },

    /// Operator applied to a kind it does not support
    #[error("operator {op} is not defined on {kind}")]
    InvalidOperand {
        /// Operator token
        op: String,
        /// Operand kind
        kind: &'static str,
    },

    /// Numeric literal that failed to convert
    #[error("failed to convert {kind} literal {text}: {message}")]
    Conversion {
        /// `int` or `float`
        kind: &'static str,
        /// Literal text
        text: String,
        /// Parser message
        message: String,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Driver and invocation errors
    // ═══════════════════════════════════════════════════════════════════
    /// Requested entry point not declared in the file
    #[error("entrypoint func {name}() is not found")]
    EntryPointNotFound {
        /// Requested function name
        name: String,
    },

    /// Call with the wrong number of arguments
    #[error("{name} expects {expected} arguments, got {got}")]
    ArityMismatch {
        /// Callee name
        name: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Host callable reported a failure
    #[error("{name}: {message}")]
    BuiltinError {
        /// Callee name
        name: String,
        /// Message from the host function
        message: String,
    },

    /// Frame or call bookkeeping failure
    #[error(transparent)]
    Scope(#[from] ScopeError),

    /// Interrupt flag observed
    #[error("evaluation interrupted")]
    Interrupted,

    /// Normal output could not be written or flushed
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Non-local exit in flight; never escapes a function call or the driver.
    #[error("unexpected control flow outside of a function")]
    ControlFlow(ControlFlow),

    // ═══════════════════════════════════════════════════════════════════
    // Context wrappers
    // ═══════════════════════════════════════════════════════════════════
    /// Failure of the statement on a given source line
    #[error("line:{line} failed to eval stmt: {error}")]
    AtLine {
        /// 1-based source line
        line: usize,
        /// Wrapped failure
        error: Box<EvalError>,
    },

    /// Failure of the statement at an index inside a block
    #[error("in block {index}: {error}")]
    InBlock {
        /// 0-based statement index
        index: usize,
        /// Wrapped failure
        error: Box<EvalError>,
    },

    /// Failure evaluating a call argument
    #[error("failed to eval argument[{index}]: {error}")]
    InArgument {
        /// 0-based argument index
        index: usize,
        /// Wrapped failure
        error: Box<EvalError>,
    },

    /// Failure inside a script-defined function
    #[error("in func {name}(): {error}")]
    InFunction {
        /// Function name
        name: String,
        /// Wrapped failure
        error: Box<EvalError>,
    },
}

impl EvalError {
    /// Wrap with the source line of the failing statement.
    pub fn at_line(self, line: usize) -> Self {
        EvalError::AtLine {
            line,
            error: Box::new(self),
        }
    }

    /// Wrap with the index of the failing statement in its block.
    pub fn in_block(self, index: usize) -> Self {
        EvalError::InBlock {
            index,
            error: Box::new(self),
        }
    }

    /// Wrap with the index of the failing call argument.
    pub fn in_argument(self, index: usize) -> Self {
        EvalError::InArgument {
            index,
            error: Box::new(self),
        }
    }

    /// Wrap with the name of the script function that failed.
    pub fn in_function(self, name: impl Into<String>) -> Self {
        EvalError::InFunction {
            name: name.into(),
            error: Box::new(self),
        }
    }

    /// The innermost error beneath any context wrappers.
    pub fn root_cause(&self) -> &EvalError {
        let mut current = self;
        while let EvalError::AtLine { error, .. }
        | EvalError::InBlock { error, .. }
        | EvalError::InArgument { error, .. }
        | EvalError::InFunction { error, .. } = current
        {
            current = &**error;
        }
        current
    }

    /// Whether this is a `return` in flight rather than a failure.
    pub fn is_control_flow(&self) -> bool {
        matches!(self, EvalError::ControlFlow(_))
    }

    /// Classify the error, looking through context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self.root_cause() {
            EvalError::UnsupportedStmt { .. }
            | EvalError::UnsupportedExpr { .. }
            | EvalError::UnsupportedLiteral { .. }
            | EvalError::UnsupportedOperator { .. }
            | EvalError::UnsupportedAssignment { .. }
            | EvalError::UnsupportedAssignTarget { .. }
            | EvalError::UnsupportedCallee { .. }
            | EvalError::NotCallable { .. }
            | EvalError::UnsupportedReturn { .. }
            | EvalError::UnsupportedImport { .. }
            | EvalError::UnsupportedDecl { .. }
            | EvalError::ControlFlow(_) => ErrorKind::UnsupportedConstruct,

            EvalError::UndefinedVariable { .. }
            | EvalError::UndefinedFunction { .. }
            | EvalError::UndefinedAlias { .. }
            | EvalError::UndefinedPackage { .. }
            | EvalError::UndefinedExport { .. } => ErrorKind::UndefinedReference,

            EvalError::TypeMismatch { .. } | EvalError::InvalidOperand { .. } => {
                ErrorKind::TypeMismatch
            }

            EvalError::Conversion { .. } => ErrorKind::ConversionError,

            EvalError::EntryPointNotFound { .. } => ErrorKind::EntryPointNotFound,

            EvalError::ArityMismatch { .. }
            | EvalError::BuiltinError { .. }
            | EvalError::Scope(_)
            | EvalError::Output(_) => ErrorKind::Invocation,

            EvalError::Interrupted => ErrorKind::Interrupted,

            // root_cause never returns a wrapper
            EvalError::AtLine { .. }
            | EvalError::InBlock { .. }
            | EvalError::InArgument { .. }
            | EvalError::InFunction { .. } => ErrorKind::UnsupportedConstruct,
        }
    }
}

/// Get the runtime kind name of a value for error messages.
pub fn type_name(value: &Value) -> &'static str {
    value.kind().name()
}

/// Result type alias for evaluation
pub type Result<T> = std::result::Result<T, EvalError>;
