//! Typed view over one GPTIMER block.

use core::ptr::NonNull;

use tock_registers::interfaces::Readable;

use crate::registers::{CONFIG, GptimerRegisters, MAX_CHANNELS, SCALER, TimerRegisters};

/// A non-owning view onto a GPTIMER block.
///
/// The view does not own the hardware. It only gives typed access to the
/// registers and answers the questions drivers ask about the block layout.
#[derive(Clone, Copy)]
pub struct Gptimer<'a> {
    regs: &'a GptimerRegisters,
}

impl core::fmt::Debug for Gptimer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Gptimer")
            .field("base", &format_args!("{:#010x}", self.base_address()))
            .field("channels", &self.channel_count())
            .finish()
    }
}

// SAFETY: every register access through the view is a single word-sized
// volatile load or store. Read-modify-write sequences are not atomic with
// respect to another accessor; callers serialize them where that matters.
unsafe impl Send for Gptimer<'_> {}
// SAFETY: see the `Send` impl above.
unsafe impl Sync for Gptimer<'_> {}

impl<'a> Gptimer<'a> {
    /// Wrap an existing register block.
    #[must_use]
    pub const fn new(regs: &'a GptimerRegisters) -> Self {
        Self { regs }
    }

    /// Build a view from the base address programmed by board initialization.
    ///
    /// Returns `None` when `base` is zero, meaning the platform has no timer
    /// block configured, or when it is not word aligned.
    ///
    /// # Safety
    ///
    /// A non-zero `base` must point at a GPTIMER register block (or memory
    /// laid out like one) that stays mapped for the rest of the program.
    #[must_use]
    pub unsafe fn from_base(base: usize) -> Option<Gptimer<'static>> {
        if base % core::mem::align_of::<GptimerRegisters>() != 0 {
            return None;
        }
        let ptr = NonNull::new(base as *mut GptimerRegisters)?;
        // SAFETY: the caller guarantees a live, 'static register block at `base`.
        let regs = unsafe { ptr.as_ref() };
        Some(Gptimer { regs })
    }

    /// Base address of the block.
    #[must_use]
    pub fn base_address(&self) -> usize {
        core::ptr::from_ref(self.regs) as usize
    }

    /// Raw register access.
    #[must_use]
    pub const fn registers(&self) -> &'a GptimerRegisters {
        self.regs
    }

    /// Number of channels the block reports in its configuration register.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.regs.config.read(CONFIG::TIMERS) as usize
    }

    /// Registers of channel `index`, if the block implements it.
    #[must_use]
    pub fn channel(&self, index: usize) -> Option<&'a TimerRegisters> {
        if index >= self.channel_count().min(MAX_CHANNELS) {
            return None;
        }
        self.regs.timers.get(index)
    }

    /// Current prescaler reload value.
    #[must_use]
    pub fn scaler_reload(&self) -> u32 {
        self.regs.scaler_reload.read(SCALER::VALUE)
    }

    /// Channel tick rate for a given core clock.
    ///
    /// The prescaler underflows every `scaler_reload + 1` core cycles and
    /// each underflow decrements the channel counters by one.
    #[must_use]
    pub fn tick_hz(&self, core_hz: u32) -> u32 {
        let divider = self.scaler_reload().saturating_add(1);
        core_hz / divider
    }

    /// Interrupt line of the first channel.
    #[must_use]
    pub fn first_irq(&self) -> u32 {
        self.regs.config.read(CONFIG::IRQ)
    }

    /// Whether each channel drives its own interrupt line.
    #[must_use]
    pub fn separate_interrupts(&self) -> bool {
        self.regs.config.is_set(CONFIG::SI)
    }
}
