// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized touch input shared by the gesture state managers.

use kurbo::Point;

/// Identity of a pointer (finger) within a multi-touch stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// A normalized pointer position.
///
/// All points handed to the gesture machinery must share one coordinate space;
/// translating platform page/client coordinates is the host's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    /// Which pointer this sample belongs to.
    pub id: PointerId,
    /// Position in host coordinates.
    pub pos: Point,
}

impl TouchPoint {
    /// Creates a touch point for pointer `id` at `(x, y)`.
    #[must_use]
    pub const fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id: PointerId(id),
            pos: Point::new(x, y),
        }
    }
}

impl From<Point> for TouchPoint {
    /// Treats a bare position as the primary pointer.
    fn from(pos: Point) -> Self {
        Self {
            id: PointerId::default(),
            pos,
        }
    }
}
