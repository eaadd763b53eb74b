use std::time::Duration;

use crate::constants::{CPU_FREQUENCY, TIMER_FREQUENCY};

/// # Config
/// Tunables for a `Chip8` instance.
///
/// - `cpu_frequency` instructions per second the embedding loop aims for
/// - `timer_frequency` timer decrements per second
/// - `seed` makes `Cxkk` reproducible when set
///
/// Timers are advanced from the instruction count alone, so their real-time rate only holds
/// while the caller actually steps at `cpu_frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub cpu_frequency: u32,
    pub timer_frequency: u32,
    pub seed: Option<u64>,
}

impl Config {
    /// Wall-clock time budget for a single instruction
    pub fn cycle_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.cpu_frequency.max(1)))
    }

    /// Cycles between two frames at the given refresh rate, never less than one
    pub fn cycles_per_frame(&self, fps: u32) -> u32 {
        (self.cpu_frequency / fps.max(1)).max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cpu_frequency: CPU_FREQUENCY,
            timer_frequency: TIMER_FREQUENCY,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_reference_rates() {
        let config = Config::default();
        assert_eq!(config.cpu_frequency, 850);
        assert_eq!(config.timer_frequency, 60);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_cycle_duration() {
        let config = Config {
            cpu_frequency: 500,
            ..Config::default()
        };
        assert_eq!(config.cycle_duration(), Duration::from_millis(2));
    }

    #[test]
    fn test_cycle_duration_survives_zero_frequency() {
        let config = Config {
            cpu_frequency: 0,
            ..Config::default()
        };
        assert_eq!(config.cycle_duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_cycles_per_frame() {
        let config = Config::default();
        assert_eq!(config.cycles_per_frame(60), 14);
        assert_eq!(config.cycles_per_frame(1000), 1);
    }
}
