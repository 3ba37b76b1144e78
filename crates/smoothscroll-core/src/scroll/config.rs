//! L4 Atomic Layer: Derived timing values for the scroll animator

use std::time::Duration;

use crate::config::ScrollConfig;

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Delay between two ticks of the stepping loop
    fn tick_interval(&self) -> Duration;

    /// Platform scale factor (1.0 on the reference screen)
    fn scale_factor(&self) -> f64;

    /// Tick budget for a full-size request at the given speed ratio
    fn max_ticks(&self, speed_ratio: f64) -> u32;

    /// Check if the configuration can animate at all
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn tick_interval(&self) -> Duration {
        if self.tick_interval_ms == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(self.tick_interval_ms)
        }
    }

    #[inline]
    fn scale_factor(&self) -> f64 {
        if self.screen_height > 0.0 && self.reference_screen_height > 0.0 {
            self.screen_height / self.reference_screen_height
        } else {
            1.0
        }
    }

    #[inline]
    fn max_ticks(&self, speed_ratio: f64) -> u32 {
        let interval = self.tick_interval().as_millis() as f64;
        (self.base_duration_ms as f64 * speed_ratio / interval).floor() as u32
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.base_duration_ms > 0 && self.reference_distance > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget() {
        let config = ScrollConfig::default();
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
        assert_eq!(config.max_ticks(1.0), 35);
        assert_eq!(config.max_ticks(1.6), 56);
        assert_eq!(config.max_ticks(0.6), 21);
        assert!((config.scale_factor() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_interval_falls_back() {
        let config = ScrollConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_scale_factor_follows_screen_height() {
        let config = ScrollConfig {
            screen_height: 1440.0,
            ..Default::default()
        };
        assert!((config.scale_factor() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_factor_ignores_reference_distance() {
        let config = ScrollConfig {
            reference_distance: 360.0,
            ..Default::default()
        };
        assert!((config.scale_factor() - 1.0).abs() < 1e-9);

        let config = ScrollConfig {
            screen_height: 1080.0,
            reference_screen_height: 1080.0,
            ..Default::default()
        };
        assert!((config.scale_factor() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_smooth() {
        let mut config = ScrollConfig::default();
        assert!(config.is_smooth());

        config.base_duration_ms = 0;
        assert!(!config.is_smooth());
    }
}
