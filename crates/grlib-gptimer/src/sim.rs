//! Simulated GPTIMER block.
//!
//! `SimulatedGptimer` is a plain register file with exactly the memory
//! layout of [`GptimerRegisters`], so drivers run against it through the same
//! [`Gptimer`] view they use on hardware. [`SimulatedGptimer::advance`]
//! emulates the countdown closely enough to observe watchdog expiry in tests.
//! Channel chaining and external events are not emulated.

use core::mem::{align_of, size_of};

use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use tock_registers::LocalRegisterCopy;
use tock_registers::interfaces::{Readable, Writeable};

use crate::block::Gptimer;
use crate::registers::{CONFIG, CTRL, GptimerRegisters, MAX_CHANNELS, SCALER, TimerRegisters};

const WORDS: usize = size_of::<GptimerRegisters>() / size_of::<u32>();

const _: () = assert!(size_of::<[AtomicU32; WORDS]>() == size_of::<GptimerRegisters>());
const _: () = assert!(align_of::<AtomicU32>() >= align_of::<GptimerRegisters>());

/// In-memory GPTIMER register file.
#[derive(Debug)]
#[repr(C)]
pub struct SimulatedGptimer {
    words: [AtomicU32; WORDS],
    watchdog_output: AtomicBool,
}

impl SimulatedGptimer {
    /// Create a block reporting `channels` implemented channels.
    ///
    /// Values above 7 are truncated to the 3-bit `TIMERS` field.
    #[must_use]
    pub fn new(channels: u8) -> Self {
        let sim = Self {
            words: [const { AtomicU32::new(0) }; WORDS],
            watchdog_output: AtomicBool::new(false),
        };
        sim.registers()
            .config
            .write(CONFIG::TIMERS.val(u32::from(channels) & 0b111));
        sim
    }

    /// The register file viewed as a GPTIMER block.
    #[must_use]
    pub fn registers(&self) -> &GptimerRegisters {
        // SAFETY: `words` sits at offset zero of this `repr(C)` struct and
        // has the size and alignment of `GptimerRegisters`. Every register
        // is an interior-mutable `u32` cell, as is every `AtomicU32`.
        unsafe { &*self.words.as_ptr().cast::<GptimerRegisters>() }
    }

    /// A typed view of the simulated block.
    #[must_use]
    pub fn block(&self) -> Gptimer<'_> {
        Gptimer::new(self.registers())
    }

    /// Address of the register file, usable wherever a hardware base is.
    #[must_use]
    pub fn base_address(&self) -> usize {
        self.words.as_ptr() as usize
    }

    /// Program the prescaler reload value.
    pub fn set_scaler_reload(&self, value: u32) {
        self.registers()
            .scaler_reload
            .write(SCALER::VALUE.val(value));
    }

    /// Raw configuration register.
    #[must_use]
    pub fn config_word(&self) -> u32 {
        self.registers().config.get()
    }

    /// Raw control register of channel `index`, zero if not implemented.
    #[must_use]
    pub fn ctrl(&self, index: usize) -> u32 {
        self.timer(index).map_or(0, |t| t.ctrl.get())
    }

    /// Overwrite the control register of channel `index`.
    pub fn set_ctrl(&self, index: usize, value: u32) {
        if let Some(t) = self.timer(index) {
            t.ctrl.set(value);
        }
    }

    /// Reload register of channel `index`, zero if not implemented.
    #[must_use]
    pub fn reload(&self, index: usize) -> u32 {
        self.timer(index).map_or(0, |t| t.reload.get())
    }

    /// Overwrite the reload register of channel `index`.
    pub fn set_reload(&self, index: usize, value: u32) {
        if let Some(t) = self.timer(index) {
            t.reload.set(value);
        }
    }

    /// Counter register of channel `index`, zero if not implemented.
    #[must_use]
    pub fn counter(&self, index: usize) -> u32 {
        self.timer(index).map_or(0, |t| t.counter.get())
    }

    /// Whether the last channel has underflowed since the output was cleared.
    ///
    /// On LEON3 boards this line is wired to the system reset.
    #[must_use]
    pub fn watchdog_output(&self) -> bool {
        self.watchdog_output.load(Ordering::Acquire)
    }

    /// Deassert the latched watchdog output, as a power-on reset would.
    pub fn clear_watchdog_output(&self) {
        self.watchdog_output.store(false, Ordering::Release);
    }

    /// Advance every implemented channel by `ticks` timer ticks.
    ///
    /// A pending `LD` is applied first and self-clears. Enabled channels
    /// count down, set `IP` on each underflow, then restart from the reload
    /// register when `RS` is set or stop otherwise.
    pub fn advance(&self, ticks: u32) {
        let block = self.block();
        let channels = block.channel_count().min(MAX_CHANNELS);
        for index in 0..channels {
            let Some(timer) = block.channel(index) else {
                continue;
            };
            let underflowed = Self::step_channel(timer, ticks);
            if underflowed && index.saturating_add(1) == channels {
                self.watchdog_output.store(true, Ordering::Release);
            }
        }
    }

    fn step_channel(timer: &TimerRegisters, ticks: u32) -> bool {
        let mut ctrl: LocalRegisterCopy<u32, CTRL::Register> = timer.ctrl.extract();
        if ctrl.is_set(CTRL::LD) {
            timer.counter.set(timer.reload.get());
            ctrl.modify(CTRL::LD::CLEAR);
        }

        let mut remaining = u64::from(ticks);
        let mut counter = u64::from(timer.counter.get());
        let mut underflowed = false;
        while remaining > 0 && ctrl.is_set(CTRL::EN) {
            if remaining <= counter {
                counter = counter.saturating_sub(remaining);
                remaining = 0;
            } else {
                remaining = remaining.saturating_sub(counter.saturating_add(1));
                underflowed = true;
                ctrl.modify(CTRL::IP::SET);
                if ctrl.is_set(CTRL::RS) {
                    counter = u64::from(timer.reload.get());
                } else {
                    counter = u64::from(u32::MAX);
                    ctrl.modify(CTRL::EN::CLEAR);
                }
            }
        }

        timer.counter.set(u32::try_from(counter).unwrap_or(u32::MAX));
        timer.ctrl.set(ctrl.get());
        underflowed
    }

    fn timer(&self, index: usize) -> Option<&TimerRegisters> {
        self.registers().timers.get(index)
    }
}
