//! # leon3-watchdog
//!
//! Hardware watchdog for LEON3 boards, built on the last channel of the
//! GRLIB GPTIMER block.
//!
//! This crate provides a `#![no_std]` watchdog subsystem with:
//! - Discovery of the watchdog channel (the last one, when the block has
//!   at least two)
//! - `GptimerWatchdog`, an owned handle that only exists when the hardware does
//! - `WatchdogTable`, a process-wide table with lazy discovery and
//!   index-based `reload`/`stop`/`system_reset`
//! - `WatchdogConfig` for turning a timeout in milliseconds into ticks
//!
//! ## Real-Time Safety
//!
//! - **No heap allocations**
//! - **No locks**: the table and metrics are plain atomics
//! - **No logging on the reload path**
//!
//! ## Reload protocol
//!
//! ```text
//! reload(ticks):  RELOAD <- ticks
//!                 CTRL   <- CTRL | LD | EN & !IP     (one write)
//! stop():         CTRL   <- 0                         (RELOAD kept)
//! system_reset(): mask interrupts, reload(1)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use grlib_gptimer::SimulatedGptimer;
//! use leon3_watchdog::prelude::*;
//!
//! let sim = SimulatedGptimer::new(2);
//! let watchdog = GptimerWatchdog::try_initialize(Some(sim.block()))
//!     .expect("two channels leave one for the watchdog");
//!
//! let config = WatchdogConfig::new(500).expect("valid timeout");
//! watchdog.start(&config).expect("valid config");
//!
//! // Kick well inside the timeout.
//! sim.advance(400_000);
//! watchdog.reload(config.reload_value().expect("valid config"));
//! sim.advance(400_000);
//! assert!(!sim.watchdog_output());
//! ```

#![no_std]
#![expect(unsafe_code, reason = "memory-mapped register access")]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod discovery;
pub mod error;
pub mod gptimer_impl;
pub mod interrupts;
pub mod prelude;
pub mod state;
pub mod table;
pub mod watchdog;

pub use config::WatchdogConfig;
pub use discovery::{WatchdogDescriptor, discover};
pub use error::{WatchdogError, WatchdogResult};
pub use gptimer_impl::GptimerWatchdog;
pub use interrupts::{InterruptControl, NoInterrupts};
pub use state::{WatchdogMetrics, WatchdogStatus};
pub use table::WatchdogTable;
pub use watchdog::HardwareWatchdog;
