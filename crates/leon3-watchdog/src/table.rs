//! Process-wide watchdog table with index-based access.
//!
//! This is the board-support entry point for code that cannot carry a
//! [`GptimerWatchdog`](crate::GptimerWatchdog) handle around. The table
//! discovers the watchdog lazily on first use and answers every call on a
//! board without one with [`WatchdogError::NotPresent`], which callers are
//! free to ignore.
//!
//! ```rust
//! use leon3_watchdog::prelude::*;
//!
//! // Board initialization never configured a timer block.
//! let table = WatchdogTable::new();
//!
//! assert_eq!(table.discover(), 0);
//! assert_eq!(table.reload(0, 1000), Err(WatchdogError::NotPresent { id: 0 }));
//! ```

use grlib_gptimer::Gptimer;
use portable_atomic::{AtomicUsize, Ordering};

use crate::discovery::{WatchdogDescriptor, discover};
use crate::error::{WatchdogError, WatchdogResult};
use crate::interrupts::InterruptControl;
use crate::watchdog::SYSTEM_RESET_TICKS;

/// Watchdog instances a single GPTIMER block can provide.
pub const MAX_WATCHDOGS: usize = 1;

/// Lazily populated table of discovered watchdogs.
///
/// Every field is atomic so racing first-use discovery is free of data
/// races; both racers compute and store the same values. A discovery is
/// tied to the base it ran on: once the base changes, the next use
/// discovers again on the new block.
#[derive(Debug)]
pub struct WatchdogTable {
    base: AtomicUsize,
    discovered_base: AtomicUsize,
    channel: AtomicUsize,
}

impl WatchdogTable {
    /// An empty table with no timer block configured.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base: AtomicUsize::new(0),
            discovered_base: AtomicUsize::new(0),
            channel: AtomicUsize::new(0),
        }
    }

    /// Record the timer block base address programmed by board
    /// initialization. Zero means the board has no timer block.
    ///
    /// A watchdog discovered on a previous base is forgotten.
    ///
    /// # Safety
    ///
    /// A non-zero `base` must point at a GPTIMER register block that stays
    /// valid for every later use of this table.
    pub unsafe fn set_timer_base(&self, base: usize) {
        self.base.store(base, Ordering::Release);
    }

    /// Configured base address, zero if none.
    #[must_use]
    pub fn timer_base(&self) -> usize {
        self.base.load(Ordering::Acquire)
    }

    /// Number of watchdogs discovered on the current base, zero before
    /// discovery.
    #[must_use]
    pub fn count(&self) -> usize {
        let base = self.timer_base();
        if base != 0 && self.discovered_base.load(Ordering::Acquire) == base {
            MAX_WATCHDOGS
        } else {
            0
        }
    }

    /// Discover the watchdog and return how many exist (0 or 1).
    ///
    /// Absence is not an error here: a missing block or a block without a
    /// spare channel both yield 0.
    pub fn discover(&self) -> usize {
        let count = self.count();
        if count != 0 {
            return count;
        }
        let base = self.timer_base();
        match discover(Self::block_at(base)) {
            Ok(descriptor) => {
                self.channel.store(descriptor.channel(), Ordering::Relaxed);
                self.discovered_base.store(base, Ordering::Release);
                MAX_WATCHDOGS
            }
            Err(err) => {
                tracing::trace!(%err, "No watchdog available");
                0
            }
        }
    }

    /// Descriptor of watchdog `id`, discovering first if needed.
    ///
    /// After discovery this reads no register; the channel found on the
    /// current base is reused as is.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::NotPresent`] if no watchdog exists at `id`.
    pub fn descriptor(&self, id: usize) -> WatchdogResult<WatchdogDescriptor<'static>> {
        if id >= self.discover() {
            return Err(WatchdogError::NotPresent { id });
        }
        let block = Self::block_at(self.discovered_base.load(Ordering::Acquire))
            .ok_or(WatchdogError::NotPresent { id })?;
        WatchdogDescriptor::at(block, self.channel.load(Ordering::Relaxed))
            .ok_or(WatchdogError::NotPresent { id })
    }

    /// Restart watchdog `id` from `reload_value` ticks.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::NotPresent`] without touching any register
    /// if no watchdog exists at `id`.
    pub fn reload(&self, id: usize, reload_value: u32) -> WatchdogResult<()> {
        self.descriptor(id)?.reload(reload_value);
        Ok(())
    }

    /// Stop watchdog `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::NotPresent`] without touching any register
    /// if no watchdog exists at `id`.
    pub fn stop(&self, id: usize) -> WatchdogResult<()> {
        let descriptor = self.descriptor(id)?;
        descriptor.stop();
        tracing::info!(id, channel = descriptor.channel(), "Watchdog stopped");
        Ok(())
    }

    /// Mask interrupts and arm watchdog 0 with the shortest reload value.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::NotPresent`] if the board has no watchdog,
    /// in which case execution simply continues.
    pub fn system_reset(&self, interrupts: &dyn InterruptControl) -> WatchdogResult<()> {
        tracing::warn!("System reset requested through watchdog");
        interrupts.disable();
        self.reload(0, SYSTEM_RESET_TICKS)
    }

    fn block_at(base: usize) -> Option<Gptimer<'static>> {
        // SAFETY: `base` was loaded from this table, and `set_timer_base`
        // obliges the caller to store only zero or the address of a register
        // block that outlives the table.
        unsafe { Gptimer::from_base(base) }
    }
}

impl Default for WatchdogTable {
    fn default() -> Self {
        Self::new()
    }
}

static WATCHDOGS: WatchdogTable = WatchdogTable::new();

/// The process-wide table used by the free functions in this module.
#[must_use]
pub fn watchdogs() -> &'static WatchdogTable {
    &WATCHDOGS
}

/// Configure the timer block base of the process-wide table.
///
/// # Safety
///
/// A non-zero `base` must point at a GPTIMER register block mapped for the
/// rest of the program.
pub unsafe fn set_timer_base(base: usize) {
    // SAFETY: forwarded caller contract; the table is 'static.
    unsafe { WATCHDOGS.set_timer_base(base) }
}

/// Discover the process-wide watchdog. See [`WatchdogTable::discover`].
pub fn discover_watchdogs() -> usize {
    WATCHDOGS.discover()
}

/// Reload a process-wide watchdog. See [`WatchdogTable::reload`].
///
/// # Errors
///
/// Returns [`WatchdogError::NotPresent`] if no watchdog exists at `id`.
pub fn reload(id: usize, reload_value: u32) -> WatchdogResult<()> {
    WATCHDOGS.reload(id, reload_value)
}

/// Stop a process-wide watchdog. See [`WatchdogTable::stop`].
///
/// # Errors
///
/// Returns [`WatchdogError::NotPresent`] if no watchdog exists at `id`.
pub fn stop(id: usize) -> WatchdogResult<()> {
    WATCHDOGS.stop(id)
}

/// Reset the system through the process-wide watchdog.
/// See [`WatchdogTable::system_reset`].
///
/// # Errors
///
/// Returns [`WatchdogError::NotPresent`] if the board has no watchdog.
pub fn system_reset(interrupts: &dyn InterruptControl) -> WatchdogResult<()> {
    WATCHDOGS.system_reset(interrupts)
}
