//! Watchdog channel status and metrics.

use grlib_gptimer::CTRL;
use portable_atomic::{AtomicU32, AtomicU64, Ordering};
use tock_registers::LocalRegisterCopy;

/// Watchdog channel status as read back from its control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum WatchdogStatus {
    /// Not counting.
    #[default]
    Stopped = 0,
    /// Counting down towards a reset.
    Running = 1,
    /// Underflowed and stopped with the interrupt still pending.
    Expired = 2,
}

impl WatchdogStatus {
    /// Decode a raw control register value.
    #[must_use]
    pub fn from_ctrl(ctrl: u32) -> Self {
        let ctrl: LocalRegisterCopy<u32, CTRL::Register> = LocalRegisterCopy::new(ctrl);
        if ctrl.is_set(CTRL::EN) {
            Self::Running
        } else if ctrl.is_set(CTRL::IP) {
            Self::Expired
        } else {
            Self::Stopped
        }
    }

    /// Get the status as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Running => "Running",
            Self::Expired => "Expired",
        }
    }
}

impl core::fmt::Display for WatchdogStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of watchdog activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchdogMetrics {
    /// Number of reloads issued.
    pub reload_count: u64,
    /// Number of stops issued.
    pub stop_count: u32,
    /// Reload value of the most recent reload, zero before the first one.
    pub last_reload_ticks: u32,
}

/// Lock-free activity counters, safe to update from interrupt context.
#[derive(Debug, Default)]
pub struct WatchdogCounters {
    reloads: AtomicU64,
    stops: AtomicU32,
    last_reload_ticks: AtomicU32,
}

impl WatchdogCounters {
    /// Create zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reloads: AtomicU64::new(0),
            stops: AtomicU32::new(0),
            last_reload_ticks: AtomicU32::new(0),
        }
    }

    /// Record a reload.
    pub fn record_reload(&self, ticks: u32) {
        self.reloads.fetch_add(1, Ordering::Relaxed);
        self.last_reload_ticks.store(ticks, Ordering::Relaxed);
    }

    /// Record a stop.
    pub fn record_stop(&self) {
        self.stops.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> WatchdogMetrics {
        WatchdogMetrics {
            reload_count: self.reloads.load(Ordering::Relaxed),
            stop_count: self.stops.load(Ordering::Relaxed),
            last_reload_ticks: self.last_reload_ticks.load(Ordering::Relaxed),
        }
    }
}
