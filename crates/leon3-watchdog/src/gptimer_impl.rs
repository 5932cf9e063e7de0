//! GPTIMER-backed watchdog.
//!
//! This module provides `GptimerWatchdog`, the owned handle over the last
//! channel of a GPTIMER block.

use grlib_gptimer::Gptimer;

use crate::config::WatchdogConfig;
use crate::discovery::{WatchdogDescriptor, discover};
use crate::error::WatchdogResult;
use crate::interrupts::InterruptControl;
use crate::state::{WatchdogCounters, WatchdogMetrics, WatchdogStatus};
use crate::watchdog::{HardwareWatchdog, SYSTEM_RESET_TICKS};

/// Watchdog on the last channel of a GPTIMER block.
///
/// Obtain one with [`GptimerWatchdog::initialize`]; getting `None` back is
/// how a board without watchdog hardware shows up.
///
/// # Example
///
/// ```rust
/// use grlib_gptimer::SimulatedGptimer;
/// use leon3_watchdog::prelude::*;
///
/// let sim = SimulatedGptimer::new(3);
/// let Some(watchdog) = GptimerWatchdog::initialize(Some(sim.block())) else {
///     return;
/// };
///
/// watchdog.reload(1_000_000);
/// assert_eq!(watchdog.channel(), 2);
/// assert!(watchdog.is_running());
/// ```
#[derive(Debug)]
pub struct GptimerWatchdog<'a> {
    descriptor: WatchdogDescriptor<'a>,
    counters: WatchdogCounters,
}

impl<'a> GptimerWatchdog<'a> {
    /// Discover the watchdog channel of `block`.
    ///
    /// Returns `None` when there is no block or it has no spare channel.
    #[must_use]
    pub fn initialize(block: Option<Gptimer<'a>>) -> Option<Self> {
        Self::try_initialize(block).ok()
    }

    /// Discover the watchdog channel of `block`, reporting why none exists.
    ///
    /// # Errors
    ///
    /// Returns the discovery error when the block is absent or too small.
    pub fn try_initialize(block: Option<Gptimer<'a>>) -> WatchdogResult<Self> {
        discover(block).map(Self::from_descriptor)
    }

    /// Wrap an already discovered channel.
    #[must_use]
    pub const fn from_descriptor(descriptor: WatchdogDescriptor<'a>) -> Self {
        Self {
            descriptor,
            counters: WatchdogCounters::new(),
        }
    }

    /// The underlying descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &WatchdogDescriptor<'a> {
        &self.descriptor
    }

    /// Arm the watchdog with the reload value derived from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid. Nothing is written
    /// in that case.
    pub fn start(&self, config: &WatchdogConfig) -> WatchdogResult<()> {
        let ticks = config.reload_value()?;
        tracing::info!(
            channel = self.descriptor.channel(),
            timeout_ms = config.timeout_ms,
            ticks,
            "Watchdog started"
        );
        self.reload(ticks);
        Ok(())
    }
}

impl HardwareWatchdog for GptimerWatchdog<'_> {
    fn channel(&self) -> usize {
        self.descriptor.channel()
    }

    fn reload(&self, ticks: u32) {
        self.descriptor.reload(ticks);
        self.counters.record_reload(ticks);
    }

    fn stop(&self) {
        self.descriptor.stop();
        self.counters.record_stop();
        tracing::info!(channel = self.descriptor.channel(), "Watchdog stopped");
    }

    fn status(&self) -> WatchdogStatus {
        self.descriptor.status()
    }

    fn remaining_ticks(&self) -> u32 {
        self.descriptor.remaining_ticks()
    }

    fn reload_value(&self) -> u32 {
        self.descriptor.reload_value()
    }

    fn metrics(&self) -> WatchdogMetrics {
        self.counters.snapshot()
    }

    fn system_reset(&self, interrupts: &dyn InterruptControl) {
        tracing::warn!(
            channel = self.descriptor.channel(),
            "System reset requested through watchdog"
        );
        interrupts.disable();
        self.reload(SYSTEM_RESET_TICKS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchdogError;
    use crate::interrupts::NoInterrupts;
    use grlib_gptimer::SimulatedGptimer;

    #[test]
    fn test_initialize_without_block() {
        assert!(GptimerWatchdog::initialize(None).is_none());
    }

    #[test]
    fn test_try_initialize_reports_reason() {
        let sim = SimulatedGptimer::new(1);
        let result = GptimerWatchdog::try_initialize(Some(sim.block()));
        assert!(matches!(
            result,
            Err(WatchdogError::NoSpareChannel { implemented: 1 })
        ));
    }

    #[test]
    fn test_start_uses_config() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(2);
        let watchdog = GptimerWatchdog::try_initialize(Some(sim.block()))?;
        let config = WatchdogConfig::new(250)?;

        watchdog.start(&config)?;
        assert_eq!(sim.reload(1), 250_000);
        assert!(watchdog.is_running());
        Ok(())
    }

    #[test]
    fn test_invalid_config_writes_nothing() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(2);
        let watchdog = GptimerWatchdog::try_initialize(Some(sim.block()))?;
        let config = WatchdogConfig {
            timeout_ms: 0,
            tick_hz: 1_000_000,
        };

        assert!(watchdog.start(&config).is_err());
        assert_eq!(sim.ctrl(1), 0);
        assert_eq!(watchdog.metrics().reload_count, 0);
        Ok(())
    }

    #[test]
    fn test_system_reset_masks_interrupts_first() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(2);
        let watchdog = GptimerWatchdog::try_initialize(Some(sim.block()))?;
        let irq = NoInterrupts::new();

        watchdog.system_reset(&irq);
        assert_eq!(irq.disable_count(), 1);
        assert_eq!(sim.reload(1), SYSTEM_RESET_TICKS);
        assert!(watchdog.is_running());
        Ok(())
    }

    #[test]
    fn test_metrics_track_activity() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(2);
        let watchdog = GptimerWatchdog::try_initialize(Some(sim.block()))?;

        watchdog.reload(10);
        watchdog.reload(20);
        watchdog.stop();

        let metrics = watchdog.metrics();
        assert_eq!(metrics.reload_count, 2);
        assert_eq!(metrics.stop_count, 1);
        assert_eq!(metrics.last_reload_ticks, 20);
        Ok(())
    }
}
