// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release momentum: per-axis deceleration and bounce-back bookkeeping.
//!
//! Each engine owns one [`MomentumState`]. It is reset when a release starts
//! and stepped from the engine's tick, so no state is shared between pages.

use kurbo::Vec2;

use crate::geometry::Axis;

/// Slow-down ratio applied while the content moves freely after release.
pub const RELEASE_SLOW_DOWN: f64 = 0.95;

/// Slow-down ratio applied once the content has left its bounds.
pub const OVER_BOUNDS_SLOW_DOWN: f64 = 0.7;

/// Speed magnitude, in pixels per millisecond, below which an axis is at
/// rest.
pub const REST_SPEED: f64 = 0.05;

/// Time step the slow-down ratios are expressed against, in milliseconds.
pub const DECELERATION_STEP_MS: f64 = 10.0;

/// Momentum of one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisMomentum {
    /// Flick speed at release, in pixels per millisecond.
    pub speed: f64,
    /// Share of the deceleration ratio kept per step.
    pub slow_down_ratio: f64,
    /// `1 - slow_down_ratio`; the share lost per [`DECELERATION_STEP_MS`].
    pub slow_down_ratio_reverse: f64,
    /// Running multiplier applied to `speed`.
    pub deceleration_ratio: f64,
    /// Magnitude of the current speed.
    pub speed_abs: f64,
    /// Edge the content is returning to, once it left its bounds.
    pub bounce_destination: Option<f64>,
    /// The bounce animation for this axis has been started.
    pub bounce_started: bool,
}

impl AxisMomentum {
    /// Starts free deceleration from `speed`.
    pub fn launch(&mut self, speed: f64) {
        self.speed = speed;
        self.set_slow_down(RELEASE_SLOW_DOWN);
        self.deceleration_ratio = 1.0;
        self.speed_abs = speed.abs();
    }

    /// Switches to a different slow-down ratio.
    pub fn set_slow_down(&mut self, ratio: f64) {
        self.slow_down_ratio = ratio;
        self.slow_down_ratio_reverse = 1.0 - ratio;
    }

    /// Decays the speed over `dt` milliseconds and returns the distance
    /// travelled in that time.
    ///
    /// The multiplier never goes negative, so the speed magnitude never
    /// grows.
    pub fn decelerate(&mut self, dt: f64) -> f64 {
        let step = (self.slow_down_ratio + self.slow_down_ratio_reverse
            - self.slow_down_ratio_reverse * dt / DECELERATION_STEP_MS)
            .max(0.0);
        self.deceleration_ratio *= step;
        let speed = self.speed * self.deceleration_ratio;
        self.speed_abs = speed.abs();
        speed * dt
    }

    /// Returns `true` once the speed magnitude is below [`REST_SPEED`].
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.speed_abs < REST_SPEED
    }

    /// Stops the axis immediately.
    pub fn halt(&mut self) {
        self.speed = 0.0;
        self.speed_abs = 0.0;
    }

    /// Clears bounce bookkeeping before a new release.
    pub fn reset_bounce(&mut self) {
        self.bounce_destination = None;
        self.bounce_started = false;
    }
}

/// Momentum of both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MomentumState {
    /// Horizontal axis.
    pub x: AxisMomentum,
    /// Vertical axis.
    pub y: AxisMomentum,
}

impl MomentumState {
    /// Momentum of `axis`.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &AxisMomentum {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// Mutable momentum of `axis`.
    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisMomentum {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Starts free deceleration on both axes.
    pub fn launch(&mut self, speed: Vec2) {
        self.x.launch(speed.x);
        self.y.launch(speed.y);
    }

    /// Clears bounce bookkeeping on both axes.
    pub fn reset_bounce(&mut self) {
        self.x.reset_bounce();
        self.y.reset_bounce();
    }

    /// Returns `true` once both axes are at rest.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}
