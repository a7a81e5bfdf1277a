//! Runtime invariant checks with contract-test support
//!
//! Production code asserts its invariants through [`assert_invariant!`]; every
//! check is recorded per thread so a test can prove that the checks it relies
//! on actually ran.
//!
//! ```rust,ignore
//! use bcc950::invariants::assert_contract;
//!
//! let mut position = bcc950::PositionEstimator::new();
//! position.update_pan(1, 100.0);
//! assert_contract("pan clamp", &["pan within estimate bounds"]);
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;

thread_local! {
    static CHECKED: RefCell<BTreeSet<&'static str>> = RefCell::new(BTreeSet::new());
}

/// Assert an invariant and record that it was checked.
///
/// Panics with the invariant message (and optional context) when the
/// condition is false.
#[macro_export]
macro_rules! assert_invariant {
    ($condition:expr, $message:expr) => {
        $crate::invariants::check($condition, $message, None)
    };
    ($condition:expr, $message:expr, $context:expr) => {
        $crate::invariants::check($condition, $message, Some($context))
    };
}

#[doc(hidden)]
pub fn check(condition: bool, message: &'static str, context: Option<&str>) {
    CHECKED.with(|checked| {
        checked.borrow_mut().insert(message);
    });

    if !condition {
        panic!(
            "invariant violated [{}]: {}",
            context.unwrap_or("unknown"),
            message
        );
    }
}

/// Invariants checked on the current thread so far, in name order.
pub fn checked_invariants() -> Vec<&'static str> {
    CHECKED.with(|checked| checked.borrow().iter().copied().collect())
}

/// Panic unless every invariant in `required` was checked on this thread.
pub fn assert_contract(name: &str, required: &[&str]) {
    let missing: Vec<&str> = CHECKED.with(|checked| {
        let checked = checked.borrow();
        required
            .iter()
            .copied()
            .filter(|inv| !checked.contains(inv))
            .collect()
    });

    if !missing.is_empty() {
        panic!(
            "contract [{}] not exercised:\n  - {}",
            name,
            missing.join("\n  - ")
        );
    }
}

/// Forget everything recorded on this thread.
pub fn clear_checked() {
    CHECKED.with(|checked| checked.borrow_mut().clear());
}
