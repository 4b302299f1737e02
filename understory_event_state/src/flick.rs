// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release velocity ("flick") estimation.

use kurbo::Vec2;

/// Travel below this many pixels over the sample window counts as no flick.
pub const MIN_FLICK_DISTANCE: f64 = 20.0;

/// Speeds below this many pixels per millisecond are treated as zero.
pub const MIN_FLICK_SPEED: f64 = 0.1;

/// Terminal motion of one axis at release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisFlick {
    /// Signed travel over the sample window, in pixels.
    pub offset: f64,
    /// `offset.abs()`.
    pub distance: f64,
    /// Signed speed in pixels per millisecond, zeroed when jittery.
    pub speed: f64,
}

impl AxisFlick {
    /// Builds a flick from signed travel over `duration_ms`.
    ///
    /// Travel of [`MIN_FLICK_DISTANCE`] or less and speeds under
    /// [`MIN_FLICK_SPEED`] yield zero speed, but the offset is kept so swipe
    /// classification can still look at it.
    #[must_use]
    pub fn from_travel(offset: f64, duration_ms: f64) -> Self {
        let distance = offset.abs();
        let mut speed = if distance > MIN_FLICK_DISTANCE && duration_ms > 0.0 {
            offset / duration_ms
        } else {
            0.0
        };
        if speed.abs() < MIN_FLICK_SPEED {
            speed = 0.0;
        }
        Self {
            offset,
            distance,
            speed,
        }
    }
}

/// Terminal motion of both axes at release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Flick {
    /// Horizontal component.
    pub x: AxisFlick,
    /// Vertical component.
    pub y: AxisFlick,
}

impl Flick {
    /// Builds a flick from signed travel over `duration_ms` on both axes.
    #[must_use]
    pub fn from_travel(offset: Vec2, duration_ms: f64) -> Self {
        Self {
            x: AxisFlick::from_travel(offset.x, duration_ms),
            y: AxisFlick::from_travel(offset.y, duration_ms),
        }
    }

    /// Per-axis speed in pixels per millisecond.
    #[must_use]
    pub fn speed(&self) -> Vec2 {
        Vec2::new(self.x.speed, self.y.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::AxisFlick;

    #[test]
    fn short_travel_has_no_speed() {
        let f = AxisFlick::from_travel(-20.0, 10.0);
        assert_eq!(f.speed, 0.0);
        assert_eq!(f.distance, 20.0);
        assert_eq!(f.offset, -20.0);
    }

    #[test]
    fn slow_travel_has_no_speed() {
        let f = AxisFlick::from_travel(30.0, 400.0);
        assert_eq!(f.speed, 0.0);
    }

    #[test]
    fn committed_travel_keeps_sign() {
        let f = AxisFlick::from_travel(-50.0, 100.0);
        assert!((f.speed + 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_is_not_infinite() {
        let f = AxisFlick::from_travel(80.0, 0.0);
        assert_eq!(f.speed, 0.0);
    }
}
