//! Hardware watchdog trait definition.

use crate::interrupts::InterruptControl;
use crate::state::{WatchdogMetrics, WatchdogStatus};

/// Reload value armed by [`HardwareWatchdog::system_reset`]: the shortest
/// countdown the hardware accepts.
pub const SYSTEM_RESET_TICKS: u32 = 1;

/// A watchdog that resets the system unless reloaded in time.
///
/// Holding a value of this trait means the hardware exists; boards without
/// a watchdog simply have no instance to call.
///
/// # Real-Time Safety
///
/// `reload()` and `stop()` are a handful of register accesses with no
/// allocation, locking or logging, and may be called from interrupt context.
/// A nested call from a higher priority interrupt can interleave with the
/// control register update.
pub trait HardwareWatchdog: Send + Sync {
    /// Index of the timer channel acting as the watchdog.
    fn channel(&self) -> usize;

    /// Restart the countdown from `ticks` timer ticks.
    ///
    /// The system resets if this is not called again within `ticks` ticks.
    fn reload(&self, ticks: u32);

    /// Stop the countdown. The reload value is retained.
    fn stop(&self);

    /// Current channel status.
    fn status(&self) -> WatchdogStatus;

    /// Ticks left before the watchdog fires.
    fn remaining_ticks(&self) -> u32;

    /// Value the countdown restarts from.
    fn reload_value(&self) -> u32;

    /// Activity metrics.
    fn metrics(&self) -> WatchdogMetrics;

    /// Whether the countdown is active.
    fn is_running(&self) -> bool {
        self.status() == WatchdogStatus::Running
    }

    /// Reset the system as fast as the watchdog allows.
    ///
    /// Interrupts are masked first so no handler can delay the final
    /// reload. On hardware this does not return in any meaningful sense:
    /// the reset follows within one tick.
    fn system_reset(&self, interrupts: &dyn InterruptControl) {
        interrupts.disable();
        self.reload(SYSTEM_RESET_TICKS);
    }
}
