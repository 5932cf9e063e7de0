//! Watchdog channel discovery and the per-channel reload/stop protocol.
//!
//! A GPTIMER block always dedicates its first channel to the system tick.
//! When at least one more channel is implemented, the last one is the
//! channel wired to the watchdog output on LEON3 boards.

use grlib_gptimer::{CTRL, Gptimer, TimerRegisters};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};

use crate::error::{WatchdogError, WatchdogResult};
use crate::state::WatchdogStatus;

/// Fewest channels a block needs before one can serve as the watchdog.
pub const MIN_CHANNELS: usize = 2;

/// One discovered watchdog: a timer block and its last channel.
///
/// The descriptor borrows the hardware, it never owns it. Copies address the
/// same registers.
#[derive(Clone, Copy)]
pub struct WatchdogDescriptor<'a> {
    block: Gptimer<'a>,
    channel: usize,
    timer: &'a TimerRegisters,
}

impl core::fmt::Debug for WatchdogDescriptor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WatchdogDescriptor")
            .field("block", &self.block)
            .field("channel", &self.channel)
            .finish()
    }
}

// SAFETY: the descriptor only adds a reference into the block that
// `Gptimer` already declares shareable; accesses are word-sized volatile
// operations.
unsafe impl Send for WatchdogDescriptor<'_> {}
// SAFETY: see the `Send` impl above.
unsafe impl Sync for WatchdogDescriptor<'_> {}

/// Locate the watchdog channel of `block`.
///
/// Discovery only reads the configuration register. It never starts,
/// stops, or otherwise perturbs a channel.
///
/// # Errors
///
/// - [`WatchdogError::NoTimerBlock`] if `block` is `None`.
/// - [`WatchdogError::NoSpareChannel`] if fewer than two channels exist.
pub fn discover(block: Option<Gptimer<'_>>) -> WatchdogResult<WatchdogDescriptor<'_>> {
    let block = block.ok_or(WatchdogError::NoTimerBlock)?;
    let implemented = block.channel_count();
    if implemented < MIN_CHANNELS {
        tracing::trace!(implemented, "GPTIMER has no spare channel for a watchdog");
        return Err(WatchdogError::NoSpareChannel { implemented });
    }

    let channel = implemented.saturating_sub(1);
    let timer = block
        .channel(channel)
        .ok_or(WatchdogError::NoSpareChannel { implemented })?;

    tracing::debug!(
        base = block.base_address(),
        implemented,
        channel,
        "GPTIMER watchdog channel discovered"
    );
    Ok(WatchdogDescriptor {
        block,
        channel,
        timer,
    })
}

impl<'a> WatchdogDescriptor<'a> {
    /// Rebuild a descriptor for a channel found by an earlier discovery.
    ///
    /// Only the register layout bounds `channel`; the configuration
    /// register is not read again.
    pub(crate) fn at(block: Gptimer<'a>, channel: usize) -> Option<Self> {
        let timer = block.registers().timers.get(channel)?;
        Some(Self {
            block,
            channel,
            timer,
        })
    }

    /// The owning timer block.
    #[must_use]
    pub fn block(&self) -> Gptimer<'a> {
        self.block
    }

    /// Index of the watchdog channel within its block.
    #[must_use]
    pub fn channel(&self) -> usize {
        self.channel
    }

    /// Registers of the watchdog channel.
    #[must_use]
    pub fn timer(&self) -> &'a TimerRegisters {
        self.timer
    }

    /// Re-arm the countdown with `ticks`.
    ///
    /// The reload register is written first, then one control write sets
    /// `LD` and `EN` and clears `IP`, so the channel never sits with only
    /// some of the bits changed.
    pub fn reload(&self, ticks: u32) {
        self.timer.reload.set(ticks);
        self.timer
            .ctrl
            .modify(CTRL::LD::SET + CTRL::EN::SET + CTRL::IP::CLEAR);
    }

    /// Stop counting. The reload register keeps its value.
    pub fn stop(&self) {
        self.timer.ctrl.set(0);
    }

    /// Current status decoded from the control register.
    #[must_use]
    pub fn status(&self) -> WatchdogStatus {
        WatchdogStatus::from_ctrl(self.timer.ctrl.get())
    }

    /// Ticks left before underflow.
    #[must_use]
    pub fn remaining_ticks(&self) -> u32 {
        self.timer.counter.get()
    }

    /// Value the channel reloads from.
    #[must_use]
    pub fn reload_value(&self) -> u32 {
        self.timer.reload.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grlib_gptimer::SimulatedGptimer;

    const EN: u32 = 1 << 0;
    const LD: u32 = 1 << 2;
    const IE: u32 = 1 << 3;
    const IP: u32 = 1 << 4;

    #[test]
    fn test_absent_block() {
        assert!(matches!(discover(None), Err(WatchdogError::NoTimerBlock)));
    }

    #[test]
    fn test_single_channel_block_has_no_watchdog() {
        let sim = SimulatedGptimer::new(1);
        assert!(matches!(
            discover(Some(sim.block())),
            Err(WatchdogError::NoSpareChannel { implemented: 1 })
        ));
    }

    #[test]
    fn test_last_channel_is_selected() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(3);
        let wdog = discover(Some(sim.block()))?;
        assert_eq!(wdog.channel(), 2);
        Ok(())
    }

    #[test]
    fn test_discovery_touches_no_channel() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(4);
        sim.set_ctrl(0, EN | IE);
        let _wdog = discover(Some(sim.block()))?;
        assert_eq!(sim.ctrl(0), EN | IE);
        assert_eq!(sim.ctrl(3), 0);
        Ok(())
    }

    #[test]
    fn test_reload_sets_load_enable_and_clears_pending() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(3);
        sim.set_ctrl(2, IP | IE);
        let wdog = discover(Some(sim.block()))?;

        wdog.reload(1000);
        assert_eq!(sim.reload(2), 1000);
        assert_eq!(sim.ctrl(2), LD | EN | IE);
        Ok(())
    }

    #[test]
    fn test_stop_clears_control_keeps_reload() -> Result<(), WatchdogError> {
        let sim = SimulatedGptimer::new(2);
        let wdog = discover(Some(sim.block()))?;

        wdog.reload(42);
        wdog.stop();
        assert_eq!(sim.ctrl(1), 0);
        assert_eq!(sim.reload(1), 42);
        assert_eq!(wdog.status(), WatchdogStatus::Stopped);
        Ok(())
    }

    #[test]
    fn test_debug_shows_location_only() {
        extern crate std;
        use std::format;

        let sim = SimulatedGptimer::new(3);
        let text = format!("{:?}", discover(Some(sim.block())));
        assert!(text.starts_with("Ok(WatchdogDescriptor"));
        assert!(text.contains("channel: 2"));
        assert!(!text.contains("status"));
    }
}
