//! Property-based tests for watchdog discovery and the reload protocol.

#![cfg(test)]
#![expect(unsafe_code, reason = "tables are pointed at simulated register blocks")]

use grlib_gptimer::SimulatedGptimer;
use leon3_watchdog::prelude::*;
use proptest::prelude::*;

const EN: u32 = 1 << 0;
const LD: u32 = 1 << 2;
const IP: u32 = 1 << 4;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_discovery_picks_last_channel_or_nothing(channels in 0u8..8) {
        let sim = SimulatedGptimer::new(channels);
        match discover(Some(sim.block())) {
            Ok(descriptor) => {
                prop_assert!(channels >= 2);
                prop_assert_eq!(descriptor.channel(), usize::from(channels) - 1);
            }
            Err(err) => {
                prop_assert!(channels < 2);
                prop_assert_eq!(err, WatchdogError::NoSpareChannel { implemented: usize::from(channels) });
            }
        }
    }

    #[test]
    fn prop_reload_sets_value_and_clears_pending(
        channels in 2u8..8,
        ticks in any::<u32>(),
        prior_ctrl in 0u32..0x80,
    ) {
        let sim = SimulatedGptimer::new(channels);
        let channel = usize::from(channels) - 1;
        sim.set_ctrl(channel, prior_ctrl);
        let descriptor = discover(Some(sim.block()));
        prop_assert!(descriptor.is_ok());
        if let Ok(descriptor) = descriptor {
            descriptor.reload(ticks);
            prop_assert_eq!(sim.reload(channel), ticks);
            prop_assert_eq!(sim.ctrl(channel) & (LD | EN | IP), LD | EN);
            prop_assert_eq!(sim.ctrl(channel) & !(LD | EN | IP), prior_ctrl & !(LD | EN | IP));
        }
    }

    #[test]
    fn prop_last_reload_wins(first in any::<u32>(), second in any::<u32>()) {
        let sim = SimulatedGptimer::new(2);
        let watchdog = GptimerWatchdog::initialize(Some(sim.block()));
        prop_assert!(watchdog.is_some());
        if let Some(watchdog) = watchdog {
            watchdog.reload(first);
            watchdog.reload(second);
            prop_assert_eq!(sim.reload(1), second);
            prop_assert_eq!(sim.ctrl(1), LD | EN);
            prop_assert_eq!(watchdog.metrics().last_reload_ticks, second);
        }
    }

    #[test]
    fn prop_stop_keeps_reload_value(ticks in any::<u32>()) {
        let sim = SimulatedGptimer::new(3);
        let watchdog = GptimerWatchdog::initialize(Some(sim.block()));
        prop_assert!(watchdog.is_some());
        if let Some(watchdog) = watchdog {
            watchdog.reload(ticks);
            watchdog.stop();
            prop_assert_eq!(sim.ctrl(2) & EN, 0);
            prop_assert_eq!(sim.reload(2), ticks);
        }
    }

    #[test]
    fn prop_absent_hardware_is_untouched(channels in 0u8..2, id in 0usize..4, ticks in any::<u32>()) {
        let sim = SimulatedGptimer::new(channels);
        sim.set_ctrl(0, EN);
        sim.set_reload(0, 17);
        let table = WatchdogTable::new();
        // SAFETY: `sim` outlives `table`.
        unsafe { table.set_timer_base(sim.base_address()) };

        prop_assert_eq!(table.discover(), 0);
        prop_assert_eq!(table.reload(id, ticks), Err(WatchdogError::NotPresent { id }));
        prop_assert_eq!(table.stop(id), Err(WatchdogError::NotPresent { id }));
        prop_assert_eq!(sim.ctrl(0), EN);
        prop_assert_eq!(sim.reload(0), 17);
    }

    #[test]
    fn prop_kicking_inside_timeout_never_resets(
        timeout in 10u32..10_000,
        kicks in 1usize..20,
    ) {
        let sim = SimulatedGptimer::new(2);
        let watchdog = GptimerWatchdog::initialize(Some(sim.block()));
        prop_assert!(watchdog.is_some());
        if let Some(watchdog) = watchdog {
            for _ in 0..kicks {
                watchdog.reload(timeout);
                sim.advance(timeout - 1);
            }
            prop_assert!(!sim.watchdog_output());

            sim.advance(2);
            prop_assert!(sim.watchdog_output());
        }
    }
}
