// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::{FRAC_PI_2, PI};

/// Easing curve mapping linear progress in `[0, 1]` to eased progress.
///
/// All built-in curves satisfy `f(0) == 0` and `f(1) == 1`.
#[derive(Clone, Copy, Debug, Default)]
pub enum Easing {
    /// Identity.
    Linear,
    /// `sin(k·π/2)`: fast start, gentle stop.
    SineOut,
    /// `-(cos(π·k) - 1) / 2`: symmetric acceleration and deceleration.
    #[default]
    SineInOut,
    /// `(k - 1)³ + 1`: stronger deceleration than [`Easing::SineOut`].
    CubicOut,
    /// Caller-supplied curve.
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Applies the curve to `k`.
    ///
    /// `k` is not clamped; callers pass `elapsed / duration` which is already
    /// in range while an animation is running.
    #[must_use]
    pub fn apply(self, k: f64) -> f64 {
        match self {
            Self::Linear => k,
            Self::SineOut => libm::sin(k * FRAC_PI_2),
            Self::SineInOut => -(libm::cos(PI * k) - 1.0) / 2.0,
            Self::CubicOut => {
                let k = k - 1.0;
                k * k * k + 1.0
            }
            Self::Custom(f) => f(k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    const CURVES: [Easing; 4] = [
        Easing::Linear,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::CubicOut,
    ];

    #[test]
    fn curves_hit_both_endpoints() {
        for easing in CURVES {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic_on_unit_interval() {
        for easing in CURVES {
            let mut prev = easing.apply(0.0);
            for i in 1..=100 {
                let v = easing.apply(f64::from(i) / 100.0);
                assert!(v >= prev - 1e-12, "{easing:?} decreased at step {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn out_curves_lead_linear() {
        assert!(Easing::SineOut.apply(0.25) > 0.25);
        assert!(Easing::CubicOut.apply(0.25) > Easing::SineOut.apply(0.25));
        assert!((Easing::SineInOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn custom_curve_is_called() {
        fn square(k: f64) -> f64 {
            k * k
        }
        assert!((Easing::Custom(square).apply(0.5) - 0.25).abs() < 1e-12);
    }
}
