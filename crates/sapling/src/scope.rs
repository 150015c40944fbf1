//! Lexical scope: a stack of frames mapping names to values

mod guard;
mod prelude;

pub use guard::ScopeGuard;

use indexmap::IndexMap;

use crate::error::ScopeError;
use crate::value::Value;

/// One lexical scope's bindings. Keys are unique within a frame.
pub type Frame = IndexMap<String, Value>;

/// The runtime scope managing variable bindings.
///
/// The stack always holds the root frame, which is never popped. Script
/// function calls open a call boundary: while a call is active, lookups see
/// the call's own frames and the root frame, but not the caller's blocks.
///
/// # Example
///
/// ```
/// use sapling::{Scope, Value};
///
/// let mut scope = Scope::new();
///
/// // Root frame
/// scope.set("x", Value::I64(1));
///
/// // Enter a new frame
/// scope.push();
/// scope.set("y", Value::I64(2));
/// scope.set("x", Value::I64(10)); // Shadows outer x
///
/// assert_eq!(scope.get("x"), Some(&Value::I64(10)));
/// assert_eq!(scope.get("y"), Some(&Value::I64(2)));
///
/// // Exit the frame
/// scope.pop();
///
/// assert_eq!(scope.get("x"), Some(&Value::I64(1))); // Back to outer x
/// assert_eq!(scope.get("y"), None); // y is gone
/// ```
#[derive(Debug, Clone)]
pub struct Scope {
    /// Frames, root first
    frames: Vec<Frame>,

    /// Index of the first frame of each active call
    call_bases: Vec<usize>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Create a scope holding only an empty root frame.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
            call_bases: Vec::new(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a new frame.
    pub fn push(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Discard the top frame.
    ///
    /// Never pops the root frame or below the base of the active call.
    /// Debug builds panic on such an unbalanced pop; release builds ignore
    /// it.
    pub fn pop(&mut self) {
        let floor = self.call_bases.last().map_or(1, |base| base + 1);
        debug_assert!(
            self.frames.len() > floor,
            "unbalanced pop: no frame above depth {}",
            floor
        );
        if self.frames.len() > floor {
            self.frames.pop();
        }
    }

    /// Number of frames, root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Check if only the root frame remains.
    pub fn is_root(&self) -> bool {
        self.frames.len() == 1
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call Boundaries
    // ═══════════════════════════════════════════════════════════════════

    /// Open a call boundary and the callee's first frame.
    ///
    /// Fails without touching the stack when `max_depth` calls are
    /// already active.
    pub fn enter_call(&mut self, max_depth: usize) -> Result<(), ScopeError> {
        if self.call_bases.len() >= max_depth {
            return Err(ScopeError::StackOverflow {
                depth: self.call_bases.len(),
                max: max_depth,
            });
        }
        self.call_bases.push(self.frames.len());
        self.frames.push(Frame::new());
        Ok(())
    }

    /// Close the innermost call boundary, dropping every frame it opened.
    pub fn exit_call(&mut self) {
        if let Some(base) = self.call_bases.pop() {
            self.frames.truncate(base);
        }
    }

    /// Number of active calls.
    pub fn call_depth(&self) -> usize {
        self.call_bases.len()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Bindings
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name` in the current frame, replacing a binding of the same
    /// name in that frame and shadowing any in outer frames.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.into(), value);
        }
    }

    /// Look up a binding, innermost frame first.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.visible_frames().find_map(|frame| frame.get(name))
    }

    /// Check if a binding is visible.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Check if a binding exists in the current frame only.
    pub fn contains_in_current_frame(&self, name: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.contains_key(name))
    }

    /// Names bound in the current frame, in binding order.
    pub fn names_in_current_frame(&self) -> Vec<&str> {
        self.frames
            .last()
            .map(|frame| frame.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Frames a lookup may see, innermost first.
    fn visible_frames(&self) -> impl Iterator<Item = &Frame> {
        let base = self.call_bases.last().copied().unwrap_or(0);
        let root = (base > 0).then(|| &self.frames[0]);
        self.frames[base..].iter().rev().chain(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_root_frame_is_never_popped() {
        let mut scope = Scope::new();
        scope.set("x", Value::I64(1));
        scope.pop();
        scope.pop();

        assert_eq!(scope.depth(), 1);
        assert_eq!(scope.get("x"), Some(&Value::I64(1)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unbalanced pop")]
    fn test_popping_root_frame_panics_in_debug() {
        let mut scope = Scope::new();
        scope.pop();
    }

    #[test]
    fn test_push_pop_balanced_returns_to_root() {
        let mut scope = Scope::new();
        scope.set("x", Value::I64(1));
        scope.push();
        scope.pop();

        assert_eq!(scope.depth(), 1);
        assert_eq!(scope.get("x"), Some(&Value::I64(1)));
    }

    #[test]
    fn test_set_replaces_in_same_frame() {
        let mut scope = Scope::new();
        scope.set("x", Value::I64(1));
        scope.set("x", Value::string("two"));

        assert_eq!(scope.get("x"), Some(&Value::string("two")));
        assert_eq!(scope.names_in_current_frame(), vec!["x"]);
    }

    #[test]
    fn test_call_hides_caller_frames_but_not_root() {
        let mut scope = Scope::new();
        scope.set("global", Value::I64(0));
        scope.push();
        scope.set("local", Value::I64(1));

        scope.enter_call(10).unwrap();
        scope.set("param", Value::I64(2));
        assert!(scope.contains("global"));
        assert!(scope.contains("param"));
        assert!(!scope.contains("local"));

        scope.push();
        scope.exit_call();

        assert_eq!(scope.depth(), 2);
        assert!(scope.contains("local"));
        assert!(!scope.contains("param"));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_pop_stops_at_call_base() {
        let mut scope = Scope::new();
        scope.enter_call(10).unwrap();
        scope.set("param", Value::I64(2));
        scope.pop();

        assert!(scope.contains("param"));
        scope.exit_call();
        assert!(scope.is_root());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unbalanced pop")]
    fn test_popping_call_base_panics_in_debug() {
        let mut scope = Scope::new();
        scope.enter_call(10).unwrap();
        scope.pop();
    }

    #[test]
    fn test_call_depth_limit() {
        let mut scope = Scope::new();
        scope.enter_call(2).unwrap();
        scope.enter_call(2).unwrap();

        let err = scope.enter_call(2).unwrap_err();
        assert_eq!(err, ScopeError::StackOverflow { depth: 2, max: 2 });
        assert_eq!(scope.call_depth(), 2);
    }
}
