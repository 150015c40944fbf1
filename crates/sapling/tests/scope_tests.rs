//! Scope tests

use pretty_assertions::assert_eq;
use sapling::*;

// ═══════════════════════════════════════════════════════════════════════
// Basic Operations
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scope_new_has_root_frame_only() {
    let scope = Scope::new();
    assert_eq!(scope.depth(), 1);
    assert!(scope.is_root());
    assert!(scope.names_in_current_frame().is_empty());
}

#[test]
fn test_scope_set_and_get() {
    let mut scope = Scope::new();
    scope.set("x", Value::I64(42));

    assert_eq!(scope.get("x"), Some(&Value::I64(42)));
    assert_eq!(scope.get("y"), None);
    assert!(scope.contains("x"));
    assert!(!scope.contains("y"));
}

#[test]
fn test_scope_set_only_touches_current_frame() {
    let mut scope = Scope::new();
    scope.set("x", Value::I64(1));
    scope.push();
    scope.set("x", Value::I64(2));

    assert!(scope.contains_in_current_frame("x"));
    scope.pop();
    assert_eq!(scope.get("x"), Some(&Value::I64(1)));
}

#[test]
fn test_scope_binding_order_preserved() {
    let mut scope = Scope::new();
    scope.set("c", Value::I64(3));
    scope.set("a", Value::I64(1));
    scope.set("b", Value::I64(2));

    assert_eq!(scope.names_in_current_frame(), vec!["c", "a", "b"]);
}

// ═══════════════════════════════════════════════════════════════════════
// Shadowing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_scope_shadow_and_restore() {
    let mut scope = Scope::new();
    scope.set("msg", Value::string("before"));

    {
        let mut block = scope.scope_guard();
        block.set("msg", Value::string("shadow"));
        assert_eq!(block.get("msg"), Some(&Value::string("shadow")));
    }

    assert_eq!(scope.get("msg"), Some(&Value::string("before")));
    scope.set("msg", Value::string("after"));
    assert_eq!(scope.get("msg"), Some(&Value::string("after")));
}

#[test]
fn test_scope_deep_nesting() {
    let mut scope = Scope::new();
    for i in 0..10 {
        scope.push();
        scope.set(format!("v{}", i), Value::I64(i));
    }

    assert_eq!(scope.depth(), 11);
    assert_eq!(scope.get("v0"), Some(&Value::I64(0)));

    for _ in 0..10 {
        scope.pop();
    }
    assert!(scope.is_root());
    assert!(!scope.contains("v0"));
}

// ═══════════════════════════════════════════════════════════════════════
// Call Boundaries
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_call_sees_root_but_not_caller_blocks() {
    let mut scope = Scope::with_prelude();
    scope.set("global", Value::I64(1));
    scope.push();
    scope.set("caller_local", Value::I64(2));

    scope.enter_call(8).unwrap();
    assert!(scope.contains("println"));
    assert!(scope.contains("global"));
    assert!(!scope.contains("caller_local"));

    scope.exit_call();
    assert!(scope.contains("caller_local"));
}

#[test]
fn test_nested_calls_isolated_from_each_other() {
    let mut scope = Scope::new();
    scope.enter_call(8).unwrap();
    scope.set("outer_param", Value::I64(1));

    scope.enter_call(8).unwrap();
    assert!(!scope.contains("outer_param"));
    assert_eq!(scope.call_depth(), 2);

    scope.exit_call();
    assert!(scope.contains("outer_param"));
    scope.exit_call();
    assert!(scope.is_root());
}

#[test]
fn test_stack_overflow_error_message() {
    let mut scope = Scope::new();
    scope.enter_call(1).unwrap();

    let err = scope.enter_call(1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "stack overflow: call depth 1 exceeds maximum 1"
    );
}
