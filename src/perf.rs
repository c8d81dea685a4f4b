//! Timing instrumentation for the pointer and render paths.
//!
//! Built with the `profiling` feature, every `profile_scope!` site measures
//! its enclosing block and reports it through `tracing`. Without the feature
//! the macro expands to nothing.
//!
//! ```ignore
//! use boxboard::profile_scope;
//!
//! fn handle_mouse_move(&mut self, event: &MouseMoveEvent) {
//!     profile_scope!("handle_mouse_move");
//!     // ...
//! }
//! ```

use std::time::{Duration, Instant};
use tracing::{trace, warn};

/// Budget for one event handler or scene build. A 120 Hz host has ~8ms per
/// frame, and input handling should only take a fraction of it.
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(1);

/// Time the rest of the enclosing block.
///
/// The optional second argument overrides the budget, in milliseconds.
#[macro_export]
macro_rules! profile_scope {
    ($label:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_guard = $crate::perf::ScopeGuard::start($label, $crate::perf::DEFAULT_BUDGET);
        #[cfg(not(feature = "profiling"))]
        let _ = $label;
    };
    ($label:expr, $budget_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_guard =
            $crate::perf::ScopeGuard::start($label, ::std::time::Duration::from_secs_f64($budget_ms / 1000.0));
        #[cfg(not(feature = "profiling"))]
        let _ = ($label, $budget_ms);
    };
}

pub use profile_scope;

/// Reports how long it lived when dropped.
///
/// Over-budget scopes are logged at `warn`, the rest at `trace`.
#[derive(Debug)]
pub struct ScopeGuard {
    label: &'static str,
    started: Instant,
    budget: Duration,
}

impl ScopeGuard {
    pub fn start(label: &'static str, budget: Duration) -> Self {
        Self {
            label,
            started: Instant::now(),
            budget,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn over_budget(&self) -> bool {
        self.elapsed() > self.budget
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        let elapsed_us = elapsed.as_micros() as u64;
        if elapsed > self.budget {
            warn!(
                scope = self.label,
                elapsed_us,
                budget_us = self.budget.as_micros() as u64,
                "canvas scope over budget"
            );
        } else {
            trace!(scope = self.label, elapsed_us, "canvas scope");
        }
    }
}
