// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-gesture pointer state, from first pointer down to last pointer up.
//!
//! ## Usage
//!
//! 1) Create a [`GestureSession`] when the first pointer goes down.
//! 2) Feed the primary pointer through [`GestureSession::advance`] on every
//!    move to get the delta since the last rendered position, and call
//!    [`GestureSession::record`] to keep the velocity history current.
//! 3) On release, read [`GestureSession::flick`] and
//!    [`GestureSession::total_offset`] to classify the gesture.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::session::GestureSession;
//!
//! let mut session = GestureSession::new(Point::new(10.0, 20.0), 0.0);
//! let delta = session.advance(Point::new(15.0, 25.0));
//! assert_eq!((delta.x, delta.y), (5.0, 5.0));
//! assert_eq!(session.total_offset().x, 5.0);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::direction::Direction;
use crate::flick::Flick;

/// Maximum number of position samples kept for velocity estimation.
pub const HISTORY_LEN: usize = 3;

/// Minimum spacing between recorded samples, in milliseconds.
pub const SAMPLE_INTERVAL_MS: f64 = 50.0;

/// A recorded pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionSample {
    /// Host time of the sample.
    pub time: f64,
    /// Pointer position.
    pub pos: Point,
}

/// State of one user gesture.
#[derive(Clone, Debug)]
pub struct GestureSession {
    /// Reference point for total displacement. Reset when a second pointer
    /// lifts and the remaining one takes over.
    pub start_point: Point,
    /// Last position that was rendered.
    pub current_point: Point,
    /// Time the first pointer went down.
    pub start_time: f64,
    /// Axis lock, decided once per gesture.
    pub direction: Option<Direction>,
    /// `true` until the first move after the direction lock has been applied.
    pub first_move: bool,
    /// Content or main scroll moved during this gesture.
    pub moved: bool,
    /// At least two pointers were down at some point.
    pub multitouch: bool,
    /// A pinch is in progress.
    pub zooming: bool,
    /// The pinch changed the zoom level at least once.
    pub zoom_started: bool,
    history: SmallVec<[PositionSample; HISTORY_LEN]>,
}

impl GestureSession {
    /// Starts a session with the primary pointer at `start`.
    #[must_use]
    pub fn new(start: Point, now: f64) -> Self {
        let mut history = SmallVec::new();
        history.push(PositionSample {
            time: now,
            pos: start,
        });
        Self {
            start_point: start,
            current_point: start,
            start_time: now,
            direction: None,
            first_move: true,
            moved: false,
            multitouch: false,
            zooming: false,
            zoom_started: false,
            history,
        }
    }

    /// Moves the rendered position to `pos`, returning the delta since the
    /// previous rendered position.
    pub fn advance(&mut self, pos: Point) -> Vec2 {
        let delta = pos - self.current_point;
        self.current_point = pos;
        delta
    }

    /// Strips the distance consumed by direction detection from the first
    /// delta applied after the lock.
    ///
    /// Without this the content would jump by the detection threshold the
    /// moment the lock engages.
    pub fn settle_first_move(&mut self, mut delta: Vec2, threshold: f64) -> Vec2 {
        if !self.first_move {
            return delta;
        }
        self.first_move = false;
        let travel = self.current_point - self.start_point;
        if delta.x.abs() >= threshold {
            delta.x -= travel.x;
        }
        if delta.y.abs() >= threshold {
            delta.y -= travel.y;
        }
        delta
    }

    /// Records `pos` for velocity estimation if at least
    /// [`SAMPLE_INTERVAL_MS`] elapsed since the last recorded sample.
    pub fn record(&mut self, now: f64, pos: Point) {
        let last = self.history.last().map_or(self.start_time, |s| s.time);
        if now - last <= SAMPLE_INTERVAL_MS {
            return;
        }
        if self.history.len() == HISTORY_LEN {
            self.history.remove(0);
        }
        self.history.push(PositionSample { time: now, pos });
    }

    /// Recorded samples, oldest first.
    #[must_use]
    pub fn history(&self) -> &[PositionSample] {
        &self.history
    }

    /// Displacement of the rendered position from the start point.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Terminal motion at `now`.
    ///
    /// Uses the second-to-last recorded sample as reference when there are at
    /// least two, otherwise the whole gesture from its start point.
    #[must_use]
    pub fn flick(&self, now: f64) -> Flick {
        let (reference, since) = match self.history.len() {
            0 | 1 => (self.start_point, self.start_time),
            n => {
                let s = self.history[n - 2];
                (s.pos, s.time)
            }
        };
        Flick::from_travel(self.current_point - reference, now - since)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{GestureSession, HISTORY_LEN};

    #[test]
    fn new_session_is_undecided() {
        let s = GestureSession::new(Point::new(1.0, 2.0), 5.0);
        assert!(s.direction.is_none());
        assert!(s.first_move);
        assert!(!s.moved && !s.multitouch && !s.zooming);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.total_offset(), Vec2::ZERO);
    }

    #[test]
    fn advance_tracks_incremental_deltas() {
        let mut s = GestureSession::new(Point::ZERO, 0.0);
        assert_eq!(s.advance(Point::new(5.0, 3.0)), Vec2::new(5.0, 3.0));
        assert_eq!(s.advance(Point::new(8.0, 7.0)), Vec2::new(3.0, 4.0));
        assert_eq!(s.total_offset(), Vec2::new(8.0, 7.0));
    }

    #[test]
    fn first_move_drops_detection_distance_once() {
        let mut s = GestureSession::new(Point::new(100.0, 100.0), 0.0);
        let d = s.advance(Point::new(85.0, 102.0));
        let d = s.settle_first_move(d, 10.0);
        assert_eq!(d, Vec2::new(0.0, 2.0));

        let d = s.advance(Point::new(70.0, 102.0));
        assert_eq!(s.settle_first_move(d, 10.0), Vec2::new(-15.0, 0.0));
    }

    #[test]
    fn history_is_rate_limited_and_bounded() {
        let mut s = GestureSession::new(Point::ZERO, 0.0);
        s.record(30.0, Point::new(1.0, 0.0));
        assert_eq!(s.history().len(), 1);
        for i in 1..=5 {
            s.record(f64::from(i) * 60.0, Point::new(f64::from(i), 0.0));
        }
        assert_eq!(s.history().len(), HISTORY_LEN);
        assert_eq!(s.history()[0].pos.x, 3.0);
        assert_eq!(s.history()[2].pos.x, 5.0);
    }

    #[test]
    fn flick_uses_second_to_last_sample() {
        let mut s = GestureSession::new(Point::new(200.0, 0.0), 0.0);
        s.record(60.0, Point::new(180.0, 0.0));
        s.record(120.0, Point::new(150.0, 0.0));
        s.advance(Point::new(140.0, 0.0));
        let f = s.flick(140.0);
        assert_eq!(f.x.offset, -40.0);
        assert!((f.x.speed - (-40.0 / 80.0)).abs() < 1e-12);
        assert_eq!(f.y.speed, 0.0);
    }

    #[test]
    fn flick_without_samples_spans_whole_gesture() {
        let mut s = GestureSession::new(Point::new(0.0, 0.0), 0.0);
        s.advance(Point::new(30.0, 5.0));
        let f = s.flick(40.0);
        assert_eq!(f.x.offset, 30.0);
        assert!((f.x.speed - 0.75).abs() < 1e-12);
        assert_eq!(f.y.speed, 0.0);
    }
}
