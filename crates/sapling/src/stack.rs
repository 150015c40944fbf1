//! Native stack growth for deep script recursion.
//!
//! Script calls, nested blocks and nested expressions each recurse on the
//! host stack. The call-depth limit in [`EvalContext`](crate::EvalContext)
//! must be what stops runaway recursion, not the thread's stack size, so the
//! recursive entry points run through [`ensure_sufficient_stack`].

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment when less than the red
/// zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_host_recursion() {
        fn nest(n: u64) -> u64 {
            ensure_sufficient_stack(|| {
                let pad = [0u8; 512];
                if n == 0 {
                    u64::from(pad[0])
                } else {
                    nest(n - 1) + 1
                }
            })
        }

        let depth = std::thread::spawn(|| nest(50_000)).join().unwrap();
        assert_eq!(depth, 50_000);
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }
}
