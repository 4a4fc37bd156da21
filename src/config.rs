//! Timing configuration and unit conversion.
//!
//! All timer reloads used by the ranging subsystem are derived here from
//! physical durations and a single documented tick clock, so the coupling
//! between tick counts and physical units lives in one place. The same
//! clock drives the tick-to-centimeter conversion of the echo round trip.

use fugit::MicrosDurationU32;

use crate::types::{Distance, Ticks};

/// Round-trip travel time of sound over one centimeter, in microseconds.
///
/// An echo pulse of `n` microseconds corresponds to `n / 58` centimeters
/// of obstacle distance (the division by two for the round trip is folded
/// into the constant).
pub const ROUND_TRIP_US_PER_CM: f32 = 58.0;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick clock frequency of zero.
    ZeroTickRate,

    /// A duration too short to span a single timer tick.
    DurationBelowOneTick {
        /// Name of the offending parameter, e.g. "trigger_pulse".
        parameter: &'static str,
    },

    /// A duration whose tick count does not fit the 32-bit counter.
    DurationExceedsCounterRange {
        /// Name of the offending parameter.
        parameter: &'static str,
    },

    /// The cycle period does not cover the trigger pulse plus echo window.
    CyclePeriodTooShort,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroTickRate => {
                write!(f, "tick clock frequency must be non-zero")
            }
            ConfigError::DurationBelowOneTick { parameter } => {
                write!(f, "{} is shorter than one timer tick", parameter)
            }
            ConfigError::DurationExceedsCounterRange { parameter } => {
                write!(f, "{} does not fit the 32-bit timer counter", parameter)
            }
            ConfigError::CyclePeriodTooShort => {
                write!(
                    f,
                    "cycle period must exceed trigger pulse plus echo window"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated timing configuration for one sensor/display pair.
///
/// Construct via [`RangingConfig::new`], which converts physical durations
/// into raw timer ticks against the given tick clock, or use
/// [`RangingConfig::default`] for the reference deployment: a 50 MHz tick
/// clock, 10 µs trigger pulse, 30 ms echo window, 100 ms cycle period and
/// 50 µs digit dwell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangingConfig {
    tick_hz: u32,
    trigger_pulse_ticks: Ticks,
    echo_window_ticks: Ticks,
    cycle_period_ticks: Ticks,
    digit_dwell: MicrosDurationU32,
}

impl RangingConfig {
    /// Creates a validated configuration.
    ///
    /// # Arguments
    /// * `tick_hz` - Input clock of the timer channels, in Hz
    /// * `trigger_pulse` - Width of the trigger output pulse
    /// * `echo_window` - Maximum echo round trip; doubles as the timeout
    /// * `cycle_period` - Interval between measurement cycles
    /// * `digit_dwell` - Hold time per digit position of the display
    ///
    /// # Errors
    /// * `ZeroTickRate` - `tick_hz` is zero
    /// * `DurationBelowOneTick` - a duration converts to zero ticks
    /// * `DurationExceedsCounterRange` - a duration overflows the counter
    /// * `CyclePeriodTooShort` - the cycle period would not cover a full
    ///   measurement (trigger pulse plus echo window)
    pub fn new(
        tick_hz: u32,
        trigger_pulse: MicrosDurationU32,
        echo_window: MicrosDurationU32,
        cycle_period: MicrosDurationU32,
        digit_dwell: MicrosDurationU32,
    ) -> Result<Self, ConfigError> {
        if tick_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let trigger_pulse_ticks = ticks_from(tick_hz, trigger_pulse, "trigger_pulse")?;
        let echo_window_ticks = ticks_from(tick_hz, echo_window, "echo_window")?;
        let cycle_period_ticks = ticks_from(tick_hz, cycle_period, "cycle_period")?;
        ticks_from(tick_hz, digit_dwell, "digit_dwell")?;

        if cycle_period_ticks <= trigger_pulse_ticks.saturating_add(echo_window_ticks) {
            return Err(ConfigError::CyclePeriodTooShort);
        }

        Ok(Self {
            tick_hz,
            trigger_pulse_ticks,
            echo_window_ticks,
            cycle_period_ticks,
            digit_dwell,
        })
    }

    /// Tick clock frequency in Hz.
    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Trigger timer reload, in ticks.
    pub fn trigger_pulse_ticks(&self) -> Ticks {
        self.trigger_pulse_ticks
    }

    /// Echo timer reload, in ticks. Elapsed round-trip ticks are computed
    /// against this value.
    pub fn echo_window_ticks(&self) -> Ticks {
        self.echo_window_ticks
    }

    /// Cycle timer reload, in ticks.
    pub fn cycle_period_ticks(&self) -> Ticks {
        self.cycle_period_ticks
    }

    /// Hold time per digit position of the display.
    pub fn digit_dwell(&self) -> MicrosDurationU32 {
        self.digit_dwell
    }

    /// Converts elapsed echo ticks into a distance.
    ///
    /// Pure linear conversion: `ticks × tick_period_µs / 58`. Zero ticks
    /// yield exactly zero centimeters.
    pub fn distance_from_ticks(&self, elapsed: Ticks) -> Distance {
        let tick_period_us = 1_000_000.0 / self.tick_hz as f32;
        Distance::from_centimeters(elapsed as f32 * tick_period_us / ROUND_TRIP_US_PER_CM)
    }
}

impl Default for RangingConfig {
    fn default() -> Self {
        // reference deployment: 50 MHz timer clock, 10 µs trigger pulse,
        // 30 ms echo window, 100 ms cadence, 50 µs digit dwell
        Self::new(
            50_000_000,
            MicrosDurationU32::micros(10),
            MicrosDurationU32::millis(30),
            MicrosDurationU32::millis(100),
            MicrosDurationU32::micros(50),
        )
        .unwrap()
    }
}

fn ticks_from(
    tick_hz: u32,
    duration: MicrosDurationU32,
    parameter: &'static str,
) -> Result<Ticks, ConfigError> {
    let ticks = duration.to_micros() as u64 * tick_hz as u64 / 1_000_000;
    if ticks == 0 {
        return Err(ConfigError::DurationBelowOneTick { parameter });
    }
    Ticks::try_from(ticks).map_err(|_| ConfigError::DurationExceedsCounterRange { parameter })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fugit::ExtU32;

    #[test]
    fn default_reproduces_reference_timing() {
        let config = RangingConfig::default();
        assert_eq!(config.tick_hz(), 50_000_000);
        assert_eq!(config.trigger_pulse_ticks(), 500);
        assert_eq!(config.echo_window_ticks(), 1_500_000);
        assert_eq!(config.cycle_period_ticks(), 5_000_000);
        assert_eq!(config.digit_dwell(), MicrosDurationU32::micros(50));
    }

    #[test]
    fn conversion_matches_reference_clock() {
        // at 50 MHz one tick is 0.02 µs, so 1160 ticks are 0.4 cm
        let config = RangingConfig::default();
        let distance = config.distance_from_ticks(1160);
        assert!((distance.centimeters() - 0.4).abs() < 1e-5);
    }

    #[test]
    fn conversion_of_zero_ticks_is_exactly_zero() {
        let config = RangingConfig::default();
        assert_eq!(config.distance_from_ticks(0), Distance::ZERO);
    }

    #[test]
    fn conversion_is_monotonically_increasing() {
        let config = RangingConfig::default();
        let samples = [0, 1, 58, 1160, 10_000, 250_000, 1_499_999, 1_500_000];
        for window in samples.windows(2) {
            let lower = config.distance_from_ticks(window[0]);
            let upper = config.distance_from_ticks(window[1]);
            assert!(
                lower < upper,
                "{:?} ticks -> {:?} should be below {:?} ticks -> {:?}",
                window[0],
                lower,
                window[1],
                upper
            );
        }
    }

    #[test]
    fn conversion_scales_with_tick_clock() {
        // at 1 MHz one tick is 1 µs, so 58 ticks are exactly 1 cm
        let config =
            RangingConfig::new(1_000_000, 10.micros(), 30.millis(), 100.millis(), 50.micros())
                .unwrap();
        assert!((config.distance_from_ticks(58).centimeters() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let result = RangingConfig::new(0, 10.micros(), 30.millis(), 100.millis(), 50.micros());
        assert_eq!(result, Err(ConfigError::ZeroTickRate));
    }

    #[test]
    fn rejects_sub_tick_duration() {
        // 10 µs at 50 kHz is a fifth of a tick
        let result = RangingConfig::new(50_000, 10.micros(), 30.millis(), 100.millis(), 50.micros());
        assert_eq!(
            result,
            Err(ConfigError::DurationBelowOneTick {
                parameter: "trigger_pulse"
            })
        );
    }

    #[test]
    fn rejects_duration_overflowing_counter() {
        // one hour at 50 MHz needs a 38-bit counter
        let result = RangingConfig::new(
            50_000_000,
            10.micros(),
            30.millis(),
            3_600_000.millis(),
            50.micros(),
        );
        assert_eq!(
            result,
            Err(ConfigError::DurationExceedsCounterRange {
                parameter: "cycle_period"
            })
        );
    }

    #[test]
    fn rejects_cycle_period_not_covering_measurement() {
        let result = RangingConfig::new(1_000_000, 10.micros(), 30.millis(), 25.millis(), 50.micros());
        assert_eq!(result, Err(ConfigError::CyclePeriodTooShort));

        // exactly pulse + window is still too short
        let result = RangingConfig::new(
            1_000_000,
            10.micros(),
            30.millis(),
            MicrosDurationU32::micros(30_010),
            50.micros(),
        );
        assert_eq!(result, Err(ConfigError::CyclePeriodTooShort));
    }

    #[test]
    fn error_messages_format_correctly_for_display() {
        extern crate std;
        use std::format;

        let message = format!(
            "{}",
            ConfigError::DurationBelowOneTick {
                parameter: "echo_window"
            }
        );
        assert!(message.contains("echo_window"));
        assert!(message.contains("one timer tick"));

        let message = format!("{}", ConfigError::CyclePeriodTooShort);
        assert!(message.contains("cycle period"));
    }
}
