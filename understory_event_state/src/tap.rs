// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap and double-tap recognition with a delayed single tap.
//!
//! A release that qualifies as a tap is held back for a short window. A second
//! qualifying release inside the window and near the first turns the pair into
//! a double tap and the held single tap is dropped. Otherwise the single tap is
//! delivered once the window closes, polled by the host through
//! [`TapRecognizer::poll`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::tap::{Tap, TapEvent, TapRecognizer, TapTarget};
//!
//! let mut taps = TapRecognizer::default();
//! let first = Tap { point: Point::new(100.0, 100.0), target: TapTarget::Content };
//! assert!(taps.on_release(first, 0.0).is_empty());
//!
//! let second = Tap { point: Point::new(110.0, 105.0), target: TapTarget::Content };
//! let events = taps.on_release(second, 200.0);
//! assert_eq!(events.as_slice(), &[TapEvent::DoubleTap(Point::new(110.0, 105.0))]);
//! ```

use kurbo::Point;
use smallvec::SmallVec;
use understory_timing::Timer;

/// Default maximum per-axis distance between the two taps of a double tap.
pub const DOUBLE_TAP_RADIUS: f64 = 25.0;

/// Default window in which a second tap makes a double tap, in milliseconds.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// What the released pointer was over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TapTarget {
    /// Regular content; taps are delayed to allow for a double tap.
    #[default]
    Content,
    /// A designated interactive element (for example a button). Taps are
    /// delivered immediately.
    Interactive,
}

/// A recognized single tap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tap {
    /// Release position.
    pub point: Point,
    /// What was under the pointer.
    pub target: TapTarget,
}

/// Output of the recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapEvent {
    /// A single tap, delivered after the double-tap window or immediately on
    /// interactive targets.
    Tap(Tap),
    /// Two nearby taps within the window, reported at the second release.
    DoubleTap(Point),
}

/// Returns `true` if `a` and `b` are within `radius` of each other on both
/// axes.
#[must_use]
pub fn is_nearby(a: Point, b: Point, radius: f64) -> bool {
    (a.x - b.x).abs() < radius && (a.y - b.y).abs() < radius
}

/// Tap/double-tap state machine.
#[derive(Clone, Debug)]
pub struct TapRecognizer {
    radius: f64,
    window_ms: f64,
    pending: Timer<Tap>,
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(DOUBLE_TAP_RADIUS, DOUBLE_TAP_WINDOW_MS)
    }
}

impl TapRecognizer {
    /// Creates a recognizer with the given double-tap radius and window.
    #[must_use]
    pub fn new(radius: f64, window_ms: f64) -> Self {
        Self {
            radius,
            window_ms,
            pending: Timer::new(),
        }
    }

    /// Feeds a qualifying tap release.
    ///
    /// May return up to two events: a held tap that turned out to stand on
    /// its own, followed by an immediate tap on an interactive target, or a
    /// single double tap.
    pub fn on_release(&mut self, tap: Tap, now: f64) -> SmallVec<[TapEvent; 2]> {
        let mut out = SmallVec::new();
        if let Some(expired) = self.poll(now) {
            out.push(expired);
        }
        if let Some(held) = self.pending.cancel() {
            if is_nearby(held.point, tap.point, self.radius) {
                log::debug!("double tap at {:?}", tap.point);
                out.push(TapEvent::DoubleTap(tap.point));
                return out;
            }
            out.push(TapEvent::Tap(held));
        }
        if tap.target == TapTarget::Interactive {
            out.push(TapEvent::Tap(tap));
            return out;
        }
        self.pending.arm(now + self.window_ms, tap);
        out
    }

    /// Delivers the held tap if its window has closed.
    pub fn poll(&mut self, now: f64) -> Option<TapEvent> {
        self.pending.poll(now).map(TapEvent::Tap)
    }

    /// Drops the held tap, if any.
    pub fn cancel(&mut self) -> Option<Tap> {
        self.pending.cancel()
    }

    /// Returns `true` while a single tap is being held back.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_armed()
    }

    /// Time at which the held tap will be delivered.
    #[must_use]
    pub fn deadline(&self) -> Option<f64> {
        self.pending.deadline()
    }
}
