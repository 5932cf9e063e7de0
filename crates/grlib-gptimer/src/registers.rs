//! GPTIMER register map.
//!
//! Offsets and field positions follow the GRLIB IP core user's manual. The
//! block starts with four shared registers followed by one 16-byte group per
//! implemented channel.

use tock_registers::register_bitfields;
use tock_registers::register_structs;
use tock_registers::registers::ReadWrite;

/// Maximum number of channels the 3-bit `TIMERS` field can report.
pub const MAX_CHANNELS: usize = 7;

register_bitfields![u32,
    /// Scaler value and scaler reload registers.
    pub SCALER [
        /// Prescaler count (width is a synthesis option, 16 bits by default).
        VALUE OFFSET(0) NUMBITS(16) []
    ],
    /// Block configuration register.
    pub CONFIG [
        /// Number of implemented channels.
        TIMERS OFFSET(0) NUMBITS(3) [],
        /// Interrupt line of the first channel.
        IRQ OFFSET(3) NUMBITS(5) [],
        /// Each channel drives its own interrupt line.
        SI OFFSET(8) NUMBITS(1) [],
        /// Disable timer freeze while the processor is in debug mode.
        DF OFFSET(9) NUMBITS(1) [],
        /// External events enable.
        EE OFFSET(10) NUMBITS(1) [],
        /// Latch on external events.
        EL OFFSET(11) NUMBITS(1) [],
        /// Timer enable, set to zero to freeze all channels.
        EN OFFSET(12) NUMBITS(1) []
    ],
    /// Per-channel control register.
    pub CTRL [
        /// Enable counting.
        EN OFFSET(0) NUMBITS(1) [],
        /// Restart from the reload register on underflow.
        RS OFFSET(1) NUMBITS(1) [],
        /// Load the counter from the reload register. Reads as zero.
        LD OFFSET(2) NUMBITS(1) [],
        /// Interrupt enable.
        IE OFFSET(3) NUMBITS(1) [],
        /// Interrupt pending, set on underflow.
        IP OFFSET(4) NUMBITS(1) [],
        /// Chain with the preceding channel.
        CH OFFSET(5) NUMBITS(1) [],
        /// Debug halt status.
        DH OFFSET(6) NUMBITS(1) []
    ]
];

register_structs! {
    /// One channel of a GPTIMER block.
    pub TimerRegisters {
        (0x00 => pub counter: ReadWrite<u32>),
        (0x04 => pub reload: ReadWrite<u32>),
        (0x08 => pub ctrl: ReadWrite<u32, CTRL::Register>),
        (0x0C => pub latch: ReadWrite<u32>),
        (0x10 => @END),
    },

    /// A complete GPTIMER block.
    pub GptimerRegisters {
        (0x00 => pub scaler_value: ReadWrite<u32, SCALER::Register>),
        (0x04 => pub scaler_reload: ReadWrite<u32, SCALER::Register>),
        (0x08 => pub config: ReadWrite<u32, CONFIG::Register>),
        (0x0C => pub latch_config: ReadWrite<u32>),
        (0x10 => pub timers: [TimerRegisters; MAX_CHANNELS]),
        (0x80 => @END),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{offset_of, size_of};

    #[test]
    fn test_channel_group_is_sixteen_bytes() {
        assert_eq!(size_of::<TimerRegisters>(), 0x10);
        assert_eq!(offset_of!(TimerRegisters, ctrl), 0x08);
    }

    #[test]
    fn test_block_layout() {
        assert_eq!(offset_of!(GptimerRegisters, config), 0x08);
        assert_eq!(offset_of!(GptimerRegisters, timers), 0x10);
        assert_eq!(size_of::<GptimerRegisters>(), 0x80);
    }

    #[test]
    fn test_control_bit_positions() {
        assert_eq!(CTRL::EN::SET.value, 1 << 0);
        assert_eq!(CTRL::LD::SET.value, 1 << 2);
        assert_eq!(CTRL::IP::SET.value, 1 << 4);
        assert_eq!(CONFIG::TIMERS.mask, 0b111);
    }
}
