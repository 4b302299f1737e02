// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The strip all slides sit on.

use understory_timing::{Animator, Easing, Frame};
use understory_zoom_pan::round_half_up;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScrollAnimation {
    Settle,
}

/// Where the carousel stands, for edge friction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScrollEdges {
    pub(crate) current: usize,
    pub(crate) len: usize,
    pub(crate) position_index: isize,
    pub(crate) slide_width: f64,
    pub(crate) end_friction: f64,
    pub(crate) looped: bool,
}

impl ScrollEdges {
    /// Position at which the current page is at rest.
    pub(crate) fn resting_position(&self) -> f64 {
        self.slide_width * self.position_index as f64
    }

    /// Damps a drag from `from` to `to` that pulls past the first or last
    /// page.
    fn damp(&self, from: f64, to: f64) -> f64 {
        if self.looped || self.slide_width <= 0.0 {
            return to;
        }
        let slide_offset =
            self.current as f64 + (self.resting_position() - to) / self.slide_width;
        let delta = round_half_up(to - from);
        let last = self.len.saturating_sub(1) as f64;
        if (slide_offset < 0.0 && delta > 0.0) || (slide_offset >= last && delta < 0.0) {
            from + delta * self.end_friction
        } else {
            to
        }
    }
}

/// Main-scroll position and its settle animation.
#[derive(Clone, Debug, Default)]
pub(crate) struct MainScroll {
    position: f64,
    animating: bool,
    animator: Animator<ScrollAnimation>,
}

/// Result of advancing the settle animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScrollStep {
    pub(crate) position: f64,
    pub(crate) completed: bool,
}

impl MainScroll {
    pub(crate) fn position(&self) -> f64 {
        self.position
    }

    /// A settle animation was started and has not completed yet. Stays set
    /// when the animation is interrupted by a new touch.
    pub(crate) fn is_animating(&self) -> bool {
        self.animating
    }

    pub(crate) fn has_running_animation(&self) -> bool {
        !self.animator.is_empty()
    }

    /// Moves to `x`, with end friction while `dragging`. Returns the new
    /// position.
    pub(crate) fn move_to(&mut self, x: f64, dragging: bool, edges: &ScrollEdges) -> f64 {
        self.position = if dragging {
            edges.damp(self.position, x)
        } else {
            x
        };
        self.position
    }

    pub(crate) fn animate_to(&mut self, to: f64, duration_ms: f64, now: f64) {
        self.animating = true;
        self.animator.start(
            ScrollAnimation::Settle,
            self.position,
            to,
            duration_ms,
            Easing::CubicOut,
            now,
        );
    }

    /// Stops the settle animation without clearing the animating flag.
    pub(crate) fn stop(&mut self) {
        self.animator.stop_all();
    }

    pub(crate) fn finish(&mut self) {
        self.animating = false;
    }

    pub(crate) fn tick(&mut self, now: f64) -> Option<ScrollStep> {
        let mut step = None;
        for frame in self.animator.tick(now) {
            match frame {
                Frame::Update { value, .. } => {
                    self.position = value;
                    step = Some(ScrollStep {
                        position: value,
                        completed: false,
                    });
                }
                Frame::Complete { value, .. } => {
                    self.position = value;
                    step = Some(ScrollStep {
                        position: value,
                        completed: true,
                    });
                }
                Frame::Drive { .. } => {}
            }
        }
        step
    }
}

#[cfg(test)]
mod tests {
    use super::{MainScroll, ScrollEdges, ScrollStep};

    fn edges(current: usize, position_index: isize) -> ScrollEdges {
        ScrollEdges {
            current,
            len: 3,
            position_index,
            slide_width: 448.0,
            end_friction: 0.35,
            looped: false,
        }
    }

    #[test]
    fn free_drag_in_the_middle() {
        let mut s = MainScroll::default();
        assert_eq!(s.move_to(-100.0, true, &edges(1, 0)), -100.0);
    }

    #[test]
    fn drag_before_first_page_is_damped() {
        let mut s = MainScroll::default();
        assert_eq!(s.move_to(100.0, true, &edges(0, 0)), 35.0);
        // Pulling back toward the page is not damped.
        assert_eq!(s.move_to(0.0, true, &edges(0, 0)), 0.0);
    }

    #[test]
    fn drag_past_last_page_is_damped() {
        let mut s = MainScroll::default();
        let e = edges(2, -2);
        s.move_to(-896.0, false, &e);
        assert_eq!(s.move_to(-996.0, true, &e), -931.0);
    }

    #[test]
    fn looping_never_damps() {
        let mut s = MainScroll::default();
        let e = ScrollEdges {
            looped: true,
            ..edges(0, 0)
        };
        assert_eq!(s.move_to(100.0, true, &e), 100.0);
    }

    #[test]
    fn settle_animation_reports_completion_once() {
        let mut s = MainScroll::default();
        s.move_to(-50.0, false, &edges(0, 0));
        s.animate_to(-448.0, 250.0, 0.0);
        assert!(s.is_animating());
        let mid = s.tick(100.0);
        assert!(matches!(mid, Some(ScrollStep { completed: false, .. })));
        assert_eq!(
            s.tick(250.0),
            Some(ScrollStep {
                position: -448.0,
                completed: true
            })
        );
        assert_eq!(s.tick(300.0), None);
        assert!(s.is_animating());
        s.finish();
        assert!(!s.is_animating());
    }
}
