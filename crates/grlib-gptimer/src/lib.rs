//! # grlib-gptimer
//!
//! Register layer for the GRLIB GPTIMER general purpose timer unit used on
//! LEON3 systems.
//!
//! The crate is pure description plus typed access:
//! - [`registers`] - register structs and bitfields for the block and its channels
//! - [`Gptimer`] - a non-owning view over one block at a board-supplied base address
//! - [`SimulatedGptimer`] - an in-memory register file with the same layout,
//!   for hosted tests and hardware-free environments
//!
//! ## Example
//!
//! ```rust
//! use grlib_gptimer::SimulatedGptimer;
//!
//! let sim = SimulatedGptimer::new(3);
//! let block = sim.block();
//!
//! assert_eq!(block.channel_count(), 3);
//! assert!(block.channel(2).is_some());
//! ```

#![no_std]
#![expect(unsafe_code, reason = "memory-mapped register access")]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod block;
pub mod registers;
pub mod sim;

pub use block::Gptimer;
pub use registers::{CONFIG, CTRL, GptimerRegisters, MAX_CHANNELS, SCALER, TimerRegisters};
pub use sim::SimulatedGptimer;
