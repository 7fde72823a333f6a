use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = Cell::new(true);
}

/// Returns true if operations currently record the computation graph.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(|flag| flag.get())
}

/// Restores the previous grad mode when dropped, including on unwind.
struct GradModeGuard {
    previous: bool,
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|flag| flag.set(self.previous));
    }
}

/// Runs `f` with graph recording disabled on the current thread.
///
/// Results produced inside the closure never require gradients. Used for
/// parameter updates and for the backward pass itself.
pub fn no_grad<R, F: FnOnce() -> R>(f: F) -> R {
    let previous = GRAD_ENABLED.with(|flag| flag.replace(false));
    let _guard = GradModeGuard { previous };
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_grad_restores_previous_mode() {
        assert!(is_grad_enabled());
        let inside = no_grad(|| {
            let nested = no_grad(is_grad_enabled);
            assert!(!nested);
            is_grad_enabled()
        });
        assert!(!inside);
        assert!(is_grad_enabled());
    }
}
