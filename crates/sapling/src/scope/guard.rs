//! RAII guard for automatic release of frames and call-history entries

use super::Scope;

/// RAII guard that runs a release action when dropped.
///
/// Acquisition happens when the guard is created; the paired release runs
/// on every exit path, including early returns through `?`. The guard
/// dereferences to whatever it guards, so evaluation continues through it.
///
/// # Example
///
/// ```
/// use sapling::{Scope, Value};
///
/// let mut scope = Scope::new();
/// scope.set("x", Value::I64(1));
///
/// {
///     let mut guard = scope.scope_guard();
///     guard.set("y", Value::I64(2));
///     // y is visible here
/// }
/// // guard dropped, frame popped, y is gone
/// assert!(!scope.contains("y"));
/// assert!(scope.contains("x"));
/// ```
pub struct ScopeGuard<'a, T = Scope> {
    target: &'a mut T,
    release: fn(&mut T),
}

impl<'a, T> ScopeGuard<'a, T> {
    /// Guard `target`, running `release` on it when the guard drops.
    ///
    /// The caller performs the matching acquisition before calling this.
    pub fn new(target: &'a mut T, release: fn(&mut T)) -> Self {
        Self { target, release }
    }
}

impl Scope {
    /// Create a scope guard that pushes a frame now and pops it on drop.
    pub fn scope_guard(&mut self) -> ScopeGuard<'_> {
        self.push();
        ScopeGuard::new(self, Scope::pop)
    }
}

impl<'a, T> std::fmt::Debug for ScopeGuard<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeGuard").finish_non_exhaustive()
    }
}

impl<'a, T> Drop for ScopeGuard<'a, T> {
    fn drop(&mut self) {
        (self.release)(&mut *self.target);
    }
}

impl<'a, T> std::ops::Deref for ScopeGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.target
    }
}

impl<'a, T> std::ops::DerefMut for ScopeGuard<'a, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_scope_guard_drops_frame() {
        let mut scope = Scope::new();
        let initial_depth = scope.depth();

        {
            let guard = scope.scope_guard();
            assert_eq!(guard.depth(), initial_depth + 1);
        }
        assert_eq!(scope.depth(), initial_depth);
    }

    #[test]
    fn test_scope_guard_nested_scopes() {
        let mut scope = Scope::new();
        scope.set("a", Value::I64(1));

        {
            let mut guard1 = scope.scope_guard();
            guard1.set("b", Value::I64(2));

            {
                let mut guard2 = guard1.scope_guard();
                guard2.set("c", Value::I64(3));

                assert!(guard2.contains("a"));
                assert!(guard2.contains("b"));
                assert!(guard2.contains("c"));
            }

            assert!(guard1.contains("b"));
            assert!(!guard1.contains("c"));
        }

        assert!(scope.contains("a"));
        assert!(!scope.contains("b"));
    }

    #[test]
    fn test_scope_guard_releases_on_early_return() {
        fn fails(scope: &mut Scope) -> Result<(), String> {
            let mut guard = scope.scope_guard();
            guard.set("temp", Value::I64(1));
            let parsed: Result<i64, String> = "boom".parse().map_err(|_| "boom".to_string());
            guard.set("parsed", Value::I64(parsed?));
            Ok(())
        }

        let mut scope = Scope::new();
        assert!(fails(&mut scope).is_err());
        assert!(scope.is_root());
        assert!(!scope.contains("temp"));
    }

    #[test]
    fn test_shadow_restored_after_guard() {
        let mut scope = Scope::new();
        scope.set("x", Value::I64(1));

        {
            let mut guard = scope.scope_guard();
            guard.set("x", Value::I64(2));
            assert_eq!(guard.get("x"), Some(&Value::I64(2)));
        }

        assert_eq!(scope.get("x"), Some(&Value::I64(1)));
    }
}
