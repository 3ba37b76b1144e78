//! L4 Atomic Layer: Round-count and step calculations
//!
//! Pure functions behind the ease-out profile. A request of magnitude `D`
//! planned over `N` ticks emits a linearly decaying impulse: tick 0 is the
//! largest step and tick `N - 1` is close to zero.

use super::config::ScrollConfigExt;
use crate::config::ScrollConfig;

/// Number of ticks to spend on `total_distance` at the given speed ratio
///
/// Small requests get proportionally fewer ticks (sqrt-scaled against the
/// reference distance); requests at or above the reference magnitude use the
/// whole budget for the speed.
pub fn total_rounds(config: &ScrollConfig, speed_ratio: f64, total_distance: f64) -> u32 {
    if !config.is_smooth() {
        return 0;
    }

    let max_ticks = config.max_ticks(speed_ratio);

    let magnitude_ratio =
        (total_distance.abs() / config.scale_factor() / config.reference_distance).sqrt();

    (max_ticks as f64 * magnitude_ratio.min(1.0)).floor() as u32
}

/// Step emitted at tick `round` of an animation planned over `total_rounds`
///
/// Rounded to the nearest integer, ties to even. Zero once `round` reaches
/// `total_rounds`, or when there is nothing to plan.
pub fn step_amount(round: u32, total_rounds: u32, total_distance: f64) -> i32 {
    if total_rounds == 0 || round >= total_rounds {
        return 0;
    }

    let percent = round as f64 / total_rounds as f64;
    let step_length = 2.0 * total_distance / total_rounds as f64 * (1.0 - percent);

    step_length.round_ties_even() as i32
}

/// Limit `step` so it never carries the animation past `remaining`
pub fn clamp_to_remaining(step: i32, remaining: f64) -> i32 {
    let limit = remaining.round_ties_even();
    if (step as f64).abs() > limit.abs() {
        limit as i32
    } else {
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScrollConfig {
        ScrollConfig::default()
    }

    #[test]
    fn test_half_reference_distance() {
        assert_eq!(total_rounds(&config(), 1.0, 360.0), 24);
        assert_eq!(step_amount(0, 24, 360.0), 30);
        assert_eq!(step_amount(23, 24, 360.0), 1);
        assert_eq!(step_amount(24, 24, 360.0), 0);
    }

    #[test]
    fn test_large_requests_use_full_budget() {
        assert_eq!(total_rounds(&config(), 1.0, 720.0), 35);
        assert_eq!(total_rounds(&config(), 1.0, -5000.0), 35);
        assert_eq!(total_rounds(&config(), 1.6, 5000.0), 56);
        assert_eq!(total_rounds(&config(), 0.6, 5000.0), 21);
    }

    #[test]
    fn test_rounds_monotonic_and_capped() {
        let config = config();
        for ratio in [0.6, 1.0, 1.6] {
            let cap = config.max_ticks(ratio);
            let mut prev = 0;
            for d in (0..2000).step_by(7) {
                let rounds = total_rounds(&config, ratio, d as f64);
                assert!(rounds >= prev, "not monotonic at {} (ratio {})", d, ratio);
                assert!(rounds <= cap);
                assert_eq!(rounds, total_rounds(&config, ratio, -(d as f64)));
                prev = rounds;
            }
        }
    }

    #[test]
    fn test_tiny_request_collapses_to_zero_rounds() {
        assert_eq!(total_rounds(&config(), 1.0, 0.4), 0);
        assert_eq!(total_rounds(&config(), 1.0, 0.0), 0);
    }

    #[test]
    fn test_scale_factor_shrinks_rounds() {
        let hidpi = ScrollConfig {
            screen_height: 1440.0,
            ..Default::default()
        };
        // 360 units on a 2x screen count like 180 on the reference one
        assert_eq!(
            total_rounds(&hidpi, 1.0, 360.0),
            total_rounds(&config(), 1.0, 180.0)
        );
    }

    #[test]
    fn test_steps_decay() {
        for (distance, rounds) in [(360.0, 24), (-500.0, 29), (40.0, 8), (3.0, 2)] {
            let mut prev = i32::MAX;
            for round in 0..rounds {
                let step = step_amount(round, rounds, distance).abs();
                assert!(step <= prev, "step grew at round {} for {}", round, distance);
                prev = step;
            }
        }
    }

    #[test]
    fn test_negative_distance_mirrors_positive() {
        for round in 0..24 {
            assert_eq!(step_amount(round, 24, -360.0), -step_amount(round, 24, 360.0));
        }
    }

    #[test]
    fn test_ties_round_to_even() {
        // 2 * 5 / 4 = 2.5
        assert_eq!(step_amount(0, 4, 5.0), 2);
        // 2 * 7 / 4 = 3.5
        assert_eq!(step_amount(0, 4, 7.0), 4);
    }

    #[test]
    fn test_clamped_sum_stays_within_one_unit() {
        for (distance, rounds) in [(360.0, 24), (-500.0, 29), (40.0, 8), (1000.0, 35)] {
            let mut remaining: f64 = distance;
            let mut emitted = 0i64;
            for round in 0..rounds {
                let step = clamp_to_remaining(step_amount(round, rounds, distance), remaining);
                if step == 0 {
                    break;
                }
                remaining -= step as f64;
                emitted += step as i64;
                assert!((emitted.abs() as f64) <= distance.abs() + 1.0);
            }
        }
    }

    #[test]
    fn test_clamp_to_remaining() {
        assert_eq!(clamp_to_remaining(30, 100.0), 30);
        assert_eq!(clamp_to_remaining(30, 12.0), 12);
        assert_eq!(clamp_to_remaining(-30, -12.0), -12);
        assert_eq!(clamp_to_remaining(3, 0.2), 0);
    }
}
