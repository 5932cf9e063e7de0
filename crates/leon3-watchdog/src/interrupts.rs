//! Interrupt masking used by the system reset path.

use portable_atomic::{AtomicU32, Ordering};

/// Board hook that masks interrupts on the current processor.
///
/// On LEON3 this is the `ta 9` software trap (or raising `PSR.PIL` to 15).
/// The watchdog code never re-enables interrupts itself.
pub trait InterruptControl {
    /// Mask all maskable interrupts.
    fn disable(&self);
}

impl<F: Fn()> InterruptControl for F {
    fn disable(&self) {
        self();
    }
}

/// `InterruptControl` for single-context environments with nothing to mask.
///
/// It counts calls so hosted code can check that the reset path masked
/// interrupts before arming the watchdog.
#[derive(Debug, Default)]
pub struct NoInterrupts {
    disables: AtomicU32,
}

impl NoInterrupts {
    /// Create a new instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            disables: AtomicU32::new(0),
        }
    }

    /// Number of times `disable` was called.
    #[must_use]
    pub fn disable_count(&self) -> u32 {
        self.disables.load(Ordering::Acquire)
    }
}

impl InterruptControl for NoInterrupts {
    fn disable(&self) {
        self.disables.fetch_add(1, Ordering::AcqRel);
    }
}
