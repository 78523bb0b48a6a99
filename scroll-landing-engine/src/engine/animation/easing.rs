use std::f32::consts::PI;
use std::time::Duration;

/// Linear progress of `elapsed` through `duration`, clamped to `[0, 1]`.
/// A zero duration is treated as already complete.
pub fn linear_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Symmetric half-cosine ease: `0.5 - 0.5 * cos(progress * PI)`.
pub fn ease_in_out_sine(progress: f32) -> f32 {
    let progress = progress.clamp(0.0, 1.0);
    // Exact endpoints so `t < 1` reliably terminates the morph loop.
    if progress >= 1.0 {
        return 1.0;
    }
    0.5 - 0.5 * (progress * PI).cos()
}

/// Frame-rate independent approach factor, capped at 1.
pub fn approach_factor(rate: f32, delta_secs: f32) -> f32 {
    (rate * delta_secs).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_at_both_ends() {
        let duration = Duration::from_millis(4000);
        assert_eq!(linear_progress(Duration::ZERO, duration), 0.0);
        assert_eq!(linear_progress(Duration::from_millis(2000), duration), 0.5);
        assert_eq!(linear_progress(Duration::from_millis(9000), duration), 1.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        assert_eq!(linear_progress(Duration::from_millis(5), Duration::ZERO), 1.0);
    }

    #[test]
    fn sine_ease_is_half_cosine_not_linear() {
        assert_eq!(ease_in_out_sine(0.0), 0.0);
        assert!((ease_in_out_sine(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(ease_in_out_sine(1.0), 1.0);

        // Slow start: a quarter of the way in is well below 0.25.
        let quarter = ease_in_out_sine(0.25);
        assert!((quarter - (0.5 - 0.5 * (0.25 * PI).cos())).abs() < 1e-6);
        assert!(quarter < 0.2);
    }

    #[test]
    fn sine_ease_never_decreases() {
        let mut last = 0.0;
        for step in 0..=100 {
            let value = ease_in_out_sine(step as f32 / 100.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn approach_factor_caps_large_frames() {
        assert_eq!(approach_factor(12.0, 1.0), 1.0);
        assert!((approach_factor(12.0, 0.01) - 0.12).abs() < 1e-6);
    }
}
