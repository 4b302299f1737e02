// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small geometry helpers shared by the zoom/pan engine and the pager.

use kurbo::{Point, Size, Vec2};

/// One of the two screen axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Self; 2] = [Self::X, Self::Y];

    /// Component of `p` along this axis.
    #[must_use]
    pub fn of(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }

    /// Component of `v` along this axis.
    #[must_use]
    pub fn of_vec(self, v: Vec2) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
        }
    }

    /// Overwrites the component of `p` along this axis.
    pub fn set(self, p: &mut Point, value: f64) {
        match self {
            Self::X => p.x = value,
            Self::Y => p.y = value,
        }
    }

    /// Extent of `size` along this axis.
    #[must_use]
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Self::X => size.width,
            Self::Y => size.height,
        }
    }
}

/// Rounds half up, so `-2.5` becomes `-2.0`.
///
/// Layout offsets are always snapped with this rule so that positions stay on
/// whole pixels in the same direction regardless of sign.
#[must_use]
pub fn round_half_up(v: f64) -> f64 {
    libm::floor(v + 0.5)
}

/// [`round_half_up`] applied to both coordinates.
#[must_use]
pub fn round_point(p: Point) -> Point {
    Point::new(round_half_up(p.x), round_half_up(p.y))
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    libm::sqrt(dx * dx + dy * dy)
}

/// Midpoint between two points.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

/// Admissible range of the content offset for one zoom level.
///
/// Offsets are the position of the content's top-left corner relative to the
/// viewport. Ordering is numeric on every axis: `min <= center <= max`.
/// Content larger than the viewport gets `min = round(viewport - content)`
/// (right or bottom edge flush) and `max = 0` (left or top edge flush).
/// Content that fits is pinned: `min == center == max`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PanBounds {
    /// Offset that centers the content.
    pub center: Point,
    /// Smallest admissible offset on each axis.
    pub min: Point,
    /// Largest admissible offset on each axis.
    pub max: Point,
}

impl PanBounds {
    /// Bounds with everything at the origin.
    pub const ZERO: Self = Self {
        center: Point::ZERO,
        min: Point::ZERO,
        max: Point::ZERO,
    };

    /// Computes the bounds of content of size `content` (already scaled by the
    /// zoom level) shown inside `viewport`.
    #[must_use]
    pub fn compute(viewport: Size, content: Size) -> Self {
        let mut bounds = Self::ZERO;
        for axis in Axis::BOTH {
            let v = axis.extent(viewport);
            let c = axis.extent(content);
            let center = round_half_up((v - c) / 2.0);
            axis.set(&mut bounds.center, center);
            if c > v {
                axis.set(&mut bounds.min, round_half_up(v - c));
                axis.set(&mut bounds.max, 0.0);
            } else {
                axis.set(&mut bounds.min, center);
                axis.set(&mut bounds.max, center);
            }
        }
        bounds
    }

    /// Returns `true` if `axis` has no room to pan.
    #[must_use]
    pub fn is_pinned(&self, axis: Axis) -> bool {
        axis.of(self.min) >= axis.of(self.max)
    }

    /// Returns `true` if `p` lies within the bounds on both axes.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        Axis::BOTH.into_iter().all(|axis| {
            let v = axis.of(p);
            v >= axis.of(self.min) && v <= axis.of(self.max)
        })
    }

    /// Clamps one coordinate into `[min, max]` on `axis`.
    #[must_use]
    pub fn clamp_axis(&self, axis: Axis, v: f64) -> f64 {
        let lo = axis.of(self.min);
        let hi = axis.of(self.max);
        if v < lo {
            lo
        } else if v > hi {
            hi
        } else {
            v
        }
    }

    /// Clamps `p` into the bounds.
    #[must_use]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(self.clamp_axis(Axis::X, p.x), self.clamp_axis(Axis::Y, p.y))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::{Axis, PanBounds, distance, midpoint, round_half_up};

    #[test]
    fn rounding_goes_half_up_for_negatives() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
    }

    #[test]
    fn larger_content_can_pan_between_edges() {
        let b = PanBounds::compute(Size::new(400.0, 600.0), Size::new(1_000.0, 600.0));
        assert_eq!(b.center, Point::new(-300.0, 0.0));
        assert_eq!(b.min, Point::new(-600.0, 0.0));
        assert_eq!(b.max, Point::new(0.0, 0.0));
        assert!(!b.is_pinned(Axis::X));
        assert!(b.is_pinned(Axis::Y));
    }

    #[test]
    fn smaller_content_is_pinned_to_center() {
        let b = PanBounds::compute(Size::new(400.0, 600.0), Size::new(200.0, 100.0));
        assert_eq!(b.center, Point::new(100.0, 250.0));
        assert_eq!(b.min, b.center);
        assert_eq!(b.max, b.center);
        assert_eq!(b.clamp(Point::new(-50.0, 900.0)), b.center);
    }

    #[test]
    fn bounds_are_ordered() {
        let viewports = [
            Size::new(375.0, 667.0),
            Size::new(400.0, 800.0),
            Size::new(1_024.0, 768.0),
        ];
        let contents = [
            Size::new(200.0, 100.0),
            Size::new(400.0, 800.0),
            Size::new(1_333.0, 2_001.0),
            Size::new(2_000.0, 301.0),
            Size::new(401.0, 799.0),
        ];
        let zooms = [0.25, 0.5, 1.0, 1.33, 2.0, 3.0];
        for viewport in viewports {
            for natural in contents {
                for zoom in zooms {
                    let content = Size::new(natural.width * zoom, natural.height * zoom);
                    let b = PanBounds::compute(viewport, content);
                    for axis in Axis::BOTH {
                        let min = axis.of(b.min);
                        let center = axis.of(b.center);
                        let max = axis.of(b.max);
                        assert!(
                            min <= center && center <= max,
                            "{axis:?} out of order for {viewport:?} / {content:?}: {min} {center} {max}"
                        );
                        if axis.extent(content) <= axis.extent(viewport) {
                            assert!(
                                min == center && center == max,
                                "{axis:?} should be pinned for {viewport:?} / {content:?}"
                            );
                        }
                    }
                    assert!(b.contains(b.center), "center is admissible");
                }
            }
        }

        let exact = PanBounds::compute(Size::new(400.0, 800.0), Size::new(400.0, 800.0));
        assert_eq!(exact, PanBounds::ZERO);
    }

    #[test]
    fn distance_and_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(a, b), 5.0);
        assert_eq!(midpoint(a, b), Point::new(1.5, 2.0));
    }
}
