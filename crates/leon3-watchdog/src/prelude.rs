//! Prelude for leon3-watchdog.
//!
//! This module re-exports the most commonly used types for convenient importing.

pub use crate::config::{WatchdogConfig, WatchdogConfigBuilder};
pub use crate::discovery::{WatchdogDescriptor, discover};
pub use crate::error::{WatchdogError, WatchdogResult};
pub use crate::gptimer_impl::GptimerWatchdog;
pub use crate::interrupts::{InterruptControl, NoInterrupts};
pub use crate::state::{WatchdogMetrics, WatchdogStatus};
pub use crate::table::WatchdogTable;
pub use crate::watchdog::{HardwareWatchdog, SYSTEM_RESET_TICKS};
