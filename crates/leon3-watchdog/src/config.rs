//! Watchdog timeout configuration.

use crate::error::{WatchdogError, WatchdogResult};

/// Timer tick rate LEON3 board support programs the GPTIMER prescaler for.
pub const DEFAULT_TICK_HZ: u32 = 1_000_000;

/// Default watchdog timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// Watchdog timeout expressed in wall-clock terms.
///
/// The hardware only understands ticks; this type converts a timeout in
/// milliseconds into the reload value for a channel ticking at `tick_hz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchdogConfig {
    /// Watchdog timeout in milliseconds.
    pub timeout_ms: u32,

    /// Channel tick rate in Hz.
    ///
    /// Use [`grlib_gptimer::Gptimer::tick_hz`] to derive it from the
    /// prescaler when the board does not use the 1 MHz default.
    pub tick_hz: u32,
}

impl WatchdogConfig {
    /// Create a configuration for the default 1 MHz tick rate.
    ///
    /// # Errors
    ///
    /// Returns an error if `timeout_ms` is zero or too long to fit the
    /// 32-bit reload register.
    pub fn new(timeout_ms: u32) -> WatchdogResult<Self> {
        let config = Self {
            timeout_ms,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> WatchdogConfigBuilder {
        WatchdogConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is zero or the derived reload value
    /// does not fit the reload register.
    pub fn validate(&self) -> WatchdogResult<()> {
        if self.timeout_ms == 0 {
            return Err(WatchdogError::invalid_configuration(
                "timeout_ms must be greater than 0",
            ));
        }
        if self.tick_hz == 0 {
            return Err(WatchdogError::invalid_configuration(
                "tick_hz must be greater than 0",
            ));
        }
        let ticks = self.ticks();
        if ticks == 0 {
            return Err(WatchdogError::invalid_configuration(
                "timeout is shorter than one timer tick",
            ));
        }
        if ticks > u64::from(u32::MAX) {
            return Err(WatchdogError::invalid_configuration(
                "timeout exceeds the 32-bit reload register",
            ));
        }
        Ok(())
    }

    /// Reload value in timer ticks for this timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn reload_value(&self) -> WatchdogResult<u32> {
        self.validate()?;
        Ok(u32::try_from(self.ticks()).unwrap_or(u32::MAX))
    }

    fn ticks(&self) -> u64 {
        u64::from(self.tick_hz) * u64::from(self.timeout_ms) / 1000
    }
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

/// Builder for `WatchdogConfig`.
#[derive(Debug, Default)]
pub struct WatchdogConfigBuilder {
    config: WatchdogConfig,
}

impl WatchdogConfigBuilder {
    /// Set the timeout in milliseconds.
    #[must_use]
    pub fn timeout_ms(mut self, ms: u32) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set the channel tick rate in Hz.
    #[must_use]
    pub fn tick_hz(mut self, hz: u32) -> Self {
        self.config.tick_hz = hz;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<WatchdogConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WatchdogConfig::default();
        assert_eq!(config.timeout_ms, 1000);
        assert_eq!(config.tick_hz, 1_000_000);
        assert_eq!(config.reload_value(), Ok(1_000_000));
    }

    #[test]
    fn test_config_validation() {
        assert!(WatchdogConfig::new(0).is_err());
        assert!(WatchdogConfig::new(250).is_ok());

        // 1 MHz ticks overflow 32 bits after roughly 71 minutes.
        assert!(WatchdogConfig::new(5_000_000).is_err());
    }

    #[test]
    fn test_sub_tick_timeout_rejected() {
        let result = WatchdogConfig::builder().tick_hz(100).timeout_ms(5).build();
        assert!(matches!(
            result,
            Err(WatchdogError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_config_builder() {
        let result = WatchdogConfig::builder()
            .timeout_ms(2500)
            .tick_hz(40_000)
            .build();
        assert_eq!(result.map(|c| c.reload_value()), Ok(Ok(100_000)));
    }
}
