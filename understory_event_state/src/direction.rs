// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-time horizontal/vertical classification of a drag.

use kurbo::Point;

/// Axis a gesture has been locked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Dominantly horizontal movement: page swipes and horizontal panning.
    Horizontal,
    /// Dominantly vertical movement: vertical panning only.
    Vertical,
}

/// Classifies the movement from `from` to `to`.
///
/// Returns `None` until one axis has accumulated at least `threshold` more
/// absolute travel than the other.
#[must_use]
pub fn detect_direction(from: Point, to: Point, threshold: f64) -> Option<Direction> {
    let diff = (to.x - from.x).abs() - (to.y - from.y).abs();
    if diff.abs() < threshold {
        return None;
    }
    Some(if diff > 0.0 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    })
}
