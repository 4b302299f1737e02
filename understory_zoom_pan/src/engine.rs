// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};
use understory_timing::{Animator, Easing, Frame};

use crate::config::ZoomPanConfig;
use crate::geometry::{Axis, PanBounds, distance, midpoint, round_point};
use crate::modes::{InitialZoom, ZoomRequest};
use crate::momentum::{MomentumState, OVER_BOUNDS_SLOW_DOWN, REST_SPEED};
use crate::scroll::{MainScrollContext, MainScrollDriver};

/// Zoom levels closer than this are considered equal.
const ZOOM_EPSILON: f64 = 1e-9;

/// Interaction phase of a [`ZoomPan`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoomPanPhase {
    /// No gesture and no animation.
    #[default]
    Idle,
    /// A one-finger drag is panning the content.
    PanDragging,
    /// A two-finger pinch is in progress.
    PinchZooming,
    /// Momentum or bounce-back after a pan release.
    Releasing,
    /// An animated zoom jump.
    AnimatedTransition,
}

/// Output of a [`ZoomPan`], drained by the host with
/// [`ZoomPan::drain_events`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomPanEvent {
    /// The content transform changed.
    Transform {
        /// Top-left of the content relative to the viewport.
        offset: Point,
        /// Zoom level relative to natural size.
        zoom: f64,
        /// Scale to apply to the currently rendered asset: `zoom` for the
        /// full-resolution asset, `zoom / fit_ratio` for the fitted one.
        scale: f64,
    },
    /// A gesture or zoom jump changed the zoom level.
    ZoomLevelChanged {
        /// New zoom level.
        level: f64,
        /// The new level equals the initial zoom level.
        is_initial: bool,
    },
    /// The host should switch the rendered asset.
    ResolutionChanged {
        /// `true` for the full-resolution asset, `false` for the fitted one.
        full: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PageAnimation {
    Momentum,
    Bounce(Axis),
    ZoomTo,
}

#[derive(Clone, Copy, Debug)]
struct ZoomJump {
    from_zoom: f64,
    to_zoom: f64,
    from_pan: Point,
    to_pan: Point,
}

#[derive(Clone, Copy, Debug)]
struct Pinch {
    second: Point,
    center: Point,
    start_distance: f64,
}

/// Zoom and pan state machine for one page.
///
/// The engine is headless: it never renders and never reads a clock. Gesture
/// operations and [`ZoomPan::tick`] take the host's time in milliseconds, and
/// every visible change is queued as a [`ZoomPanEvent`].
///
/// Until [`ZoomPan::on_content_size_known`] has been called with a non-empty
/// size, and while the viewport is empty, every gesture operation is a no-op.
#[derive(Clone, Debug)]
pub struct ZoomPan {
    config: ZoomPanConfig,
    viewport: Size,
    content: Option<Size>,
    fit_ratio: f64,
    initial_zoom: f64,
    initial_position: Point,
    zoom: f64,
    start_zoom: f64,
    bounds: PanBounds,
    pan: Point,
    start_pan: Point,
    pan_dist: Vec2,
    mid_zoom_point: Vec2,
    pinch: Option<Pinch>,
    requested_zoom: Option<f64>,
    full_resolution: bool,
    momentum: MomentumState,
    jump: Option<ZoomJump>,
    phase: ZoomPanPhase,
    animator: Animator<PageAnimation>,
    events: Vec<ZoomPanEvent>,
}

impl ZoomPan {
    /// Creates an engine for a page shown in `viewport`, with no content yet.
    #[must_use]
    pub fn new(config: ZoomPanConfig, viewport: Size) -> Self {
        Self {
            config,
            viewport,
            content: None,
            fit_ratio: 0.0,
            initial_zoom: 0.0,
            initial_position: Point::ZERO,
            zoom: 0.0,
            start_zoom: 0.0,
            bounds: PanBounds::ZERO,
            pan: Point::ZERO,
            start_pan: Point::ZERO,
            pan_dist: Vec2::ZERO,
            mid_zoom_point: Vec2::ZERO,
            pinch: None,
            requested_zoom: None,
            full_resolution: false,
            momentum: MomentumState::default(),
            jump: None,
            phase: ZoomPanPhase::Idle,
            animator: Animator::new(),
            events: Vec::new(),
        }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomPanConfig {
        &self.config
    }

    /// Returns `true` once content is known and the viewport is non-empty.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.content.is_some() && self.fit_ratio > 0.0
    }

    /// Current interaction phase.
    #[must_use]
    pub fn phase(&self) -> ZoomPanPhase {
        self.phase
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// Current offset of the content's top-left corner.
    #[must_use]
    pub fn pan_offset(&self) -> Point {
        self.pan
    }

    /// Zoom level at which the content exactly fits the viewport.
    #[must_use]
    pub fn fit_ratio(&self) -> f64 {
        self.fit_ratio
    }

    /// `min(fit_ratio, 1)`: the zoom level a page rests at by default.
    #[must_use]
    pub fn initial_zoom_level(&self) -> f64 {
        self.initial_zoom
    }

    /// Pan bounds for the current zoom level.
    #[must_use]
    pub fn pan_bounds(&self) -> PanBounds {
        self.bounds
    }

    /// Viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Natural content size, once known.
    #[must_use]
    pub fn content_size(&self) -> Option<Size> {
        self.content
    }

    /// Release momentum of the last pan gesture.
    #[must_use]
    pub fn momentum(&self) -> &MomentumState {
        &self.momentum
    }

    /// Returns `true` if the host should render the full-resolution asset.
    #[must_use]
    pub fn is_full_resolution(&self) -> bool {
        self.full_resolution
    }

    /// Returns `true` if the zoom level equals the initial zoom level.
    #[must_use]
    pub fn is_at_initial_zoom(&self) -> bool {
        (self.zoom - self.initial_zoom).abs() < ZOOM_EPSILON
    }

    /// Maps a viewport point to natural content coordinates.
    #[must_use]
    pub fn content_point_at(&self, viewport_point: Point) -> Point {
        if self.zoom <= 0.0 {
            return Point::ZERO;
        }
        Point::new(
            (viewport_point.x - self.pan.x) / self.zoom,
            (viewport_point.y - self.pan.y) / self.zoom,
        )
    }

    /// Drains queued events in emission order.
    pub fn drain_events(&mut self) -> alloc::vec::Drain<'_, ZoomPanEvent> {
        self.events.drain(..)
    }

    // --- lifecycle ---

    /// Sets the content's natural size and resets zoom and pan to the
    /// initial presentation. An empty size leaves the page unready.
    pub fn on_content_size_known(&mut self, natural: Size) {
        if natural.width <= 0.0 || natural.height <= 0.0 {
            log::debug!("ignoring empty content size {natural:?}");
            return;
        }
        self.content = Some(natural);
        self.stop_animations();
        self.phase = ZoomPanPhase::Idle;
        self.init_item_size();
    }

    /// Forgets the content. The page stays unready until the next
    /// [`ZoomPan::on_content_size_known`].
    pub fn unload(&mut self) {
        self.stop_animations();
        self.content = None;
        self.fit_ratio = 0.0;
        self.initial_zoom = 0.0;
        self.zoom = 0.0;
        self.start_zoom = 0.0;
        self.bounds = PanBounds::ZERO;
        self.pan = Point::ZERO;
        self.pinch = None;
        self.requested_zoom = None;
        self.full_resolution = false;
        self.phase = ZoomPanPhase::Idle;
    }

    /// Updates the viewport size.
    ///
    /// An idle page is laid out again from scratch; a page mid-gesture or
    /// mid-animation keeps its zoom level and only refreshes size-dependent
    /// values.
    pub fn on_viewport_resize(&mut self, viewport: Size) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        if self.content.is_none() {
            return;
        }
        if self.phase == ZoomPanPhase::Idle || !self.is_ready() {
            self.init_item_size();
        } else if self.compute_fit() {
            self.bounds = self.bounds_at(self.zoom);
        }
    }

    fn compute_fit(&mut self) -> bool {
        let Some(content) = self.content else {
            return false;
        };
        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            self.fit_ratio = 0.0;
            return false;
        }
        let h_ratio = self.viewport.width / content.width;
        let v_ratio = self.viewport.height / content.height;
        self.fit_ratio = h_ratio.min(v_ratio);
        self.initial_zoom = self.fit_ratio.min(1.0);
        self.initial_position = self.bounds_at(self.initial_zoom).center;
        true
    }

    fn init_item_size(&mut self) {
        if !self.compute_fit() {
            return;
        }
        let target = match self.config.initial_zoom {
            InitialZoom::FitWidth { margin } => self
                .content
                .map(|c| (self.viewport.width - margin) / c.width),
            InitialZoom::Fit => self.requested_zoom,
        };
        match target {
            Some(level) => {
                let z = self.clamp_zoom(level);
                self.zoom = z;
                self.bounds = self.bounds_at(z);
                self.pan = Point::new(self.bounds.center.x, 0.0);
            }
            None => {
                self.zoom = self.initial_zoom;
                self.bounds = self.bounds_at(self.zoom);
                self.pan = self.initial_position;
            }
        }
        self.start_zoom = self.zoom;
        log::debug!(
            "page sized: fit {:.4}, zoom {:.4}, offset {:?}",
            self.fit_ratio,
            self.zoom,
            self.pan
        );
        self.apply(true);
    }

    // --- pan ---

    /// Starts a one-finger drag.
    pub fn handle_pan_start(&mut self) {
        if !self.is_ready() {
            return;
        }
        if matches!(
            self.phase,
            ZoomPanPhase::Releasing | ZoomPanPhase::AnimatedTransition
        ) {
            self.stop_animations();
        }
        self.pan_dist = Vec2::ZERO;
        self.start_pan = self.pan;
        self.bounds = self.bounds_at(self.zoom);
        self.phase = ZoomPanPhase::PanDragging;
    }

    /// Pans along `axis` by `delta`, with friction once the offset would
    /// leave its bounds. Does nothing unless the content is larger than its
    /// fitted presentation.
    pub fn handle_pan_move(&mut self, axis: Axis, delta: f64) {
        if !self.check_is_possible_to_pan() {
            return;
        }
        let friction = self.pan_friction(axis, delta);
        let v = axis.of(self.pan) + delta * friction;
        axis.set(&mut self.pan, v);
        self.pan = round_point(self.pan);
        self.apply(false);
    }

    fn pan_friction(&self, axis: Axis, delta: f64) -> f64 {
        let next = axis.of(self.pan) + delta;
        if next > axis.of(self.bounds.max) || next < axis.of(self.bounds.min) {
            self.config.pan_end_friction
        } else {
            1.0
        }
    }

    /// Routes a horizontal drag delta either to this page's pan or to the
    /// carousel's main scroll.
    ///
    /// Content that has not reached its pan limit pans. Once the edge is
    /// reached at gesture start, further motion in that direction moves the
    /// main scroll through `driver`. While the main scroll is shifted, the
    /// page does not pan. Returns `true` if the main scroll was moved.
    pub fn pan_or_move_main_scroll_x(
        &mut self,
        delta: f64,
        ctx: &MainScrollContext,
        driver: &mut dyn MainScrollDriver,
    ) -> bool {
        if !self.is_ready() {
            return false;
        }
        let b = self.bounds;
        let mut friction = self.pan_friction(Axis::X, delta);
        let new_offset = self.pan.x + delta * friction;
        let new_main = ctx.position + delta;
        let main_diff = ctx.position - ctx.start_position;
        let pannable = !b.is_pinned(Axis::X);

        if self.config.allow_pan_to_next || self.is_at_initial_zoom() {
            let mut main_target = None;
            let mut pan_target = None;
            if ctx.horizontal && !ctx.zoom_started {
                let pef = self.config.pan_end_friction;
                if delta > 0.0 {
                    let mut start_over = None;
                    if new_offset > b.max.x {
                        friction = pef;
                        start_over = Some(b.max.x - self.start_pan.x);
                    }
                    if start_over.is_some_and(|d| d <= 0.0) || main_diff < 0.0 {
                        let capped = main_diff < 0.0 && new_main > ctx.start_position;
                        main_target = Some(if capped { ctx.start_position } else { new_main });
                    } else if pannable {
                        pan_target = Some(new_offset);
                    }
                } else {
                    let mut start_over = None;
                    if new_offset < b.min.x {
                        friction = pef;
                        start_over = Some(self.start_pan.x - b.min.x);
                    }
                    if start_over.is_some_and(|d| d <= 0.0) || main_diff > 0.0 {
                        let capped = main_diff > 0.0 && new_main < ctx.start_position;
                        main_target = Some(if capped { ctx.start_position } else { new_main });
                    } else if pannable {
                        pan_target = Some(new_offset);
                    }
                }
            }

            let mut shifted = ctx.shifted;
            if let Some(x) = main_target {
                shifted = driver.move_main_scroll(x);
            }
            if pannable {
                let before = self.pan.x;
                if let Some(x) = pan_target {
                    self.pan.x = x;
                } else if !shifted {
                    self.pan.x += delta * friction;
                }
                if self.pan.x != before {
                    self.apply(false);
                }
            }
            return main_target.is_some();
        }

        if !ctx.animating && !ctx.shifted && self.zoom > self.fit_ratio {
            self.pan.x += delta * friction;
            self.apply(false);
        }
        false
    }

    /// Releases a one-finger drag with `speed` (pixels per millisecond per
    /// axis) as the terminal flick.
    ///
    /// Below [`REST_SPEED`] on both axes only the bounce back into bounds
    /// runs; otherwise momentum starts immediately, with a first step of zero
    /// elapsed time.
    pub fn handle_pan_end(&mut self, speed: Vec2, now: f64) {
        if !self.is_ready() {
            return;
        }
        self.momentum.reset_bounce();
        if speed.x.abs() <= REST_SPEED && speed.y.abs() <= REST_SPEED {
            self.momentum.x.halt();
            self.momentum.y.halt();
            self.check_over_bounds(Axis::X, now);
            self.check_over_bounds(Axis::Y, now);
            self.settle_phase();
            return;
        }
        log::trace!("pan momentum from {speed:?}");
        self.momentum.launch(speed);
        self.animator.drive(PageAnimation::Momentum, now);
        self.phase = ZoomPanPhase::Releasing;
        self.momentum_step(0.0, now);
    }

    fn momentum_step(&mut self, dt: f64, now: f64) {
        for axis in Axis::BOTH {
            let m = self.momentum.axis_mut(axis);
            if !m.bounce_started {
                let travelled = m.decelerate(dt);
                let v = axis.of(self.pan) + travelled;
                axis.set(&mut self.pan, v);
            }
        }
        self.apply(false);
        self.check_over_bounds(Axis::X, now);
        self.check_over_bounds(Axis::Y, now);
        if self.momentum.is_at_rest() {
            self.pan = round_point(self.pan);
            self.apply(false);
            self.animator.stop(PageAnimation::Momentum);
            log::trace!("pan momentum at rest, offset {:?}", self.pan);
        }
    }

    fn check_over_bounds(&mut self, axis: Axis, now: f64) {
        let m = self.momentum.axis_mut(axis);
        if m.bounce_started {
            return;
        }
        let p = axis.of(self.pan);
        if p > axis.of(self.bounds.max) {
            m.bounce_destination = Some(axis.of(self.bounds.max));
        } else if p < axis.of(self.bounds.min) {
            m.bounce_destination = Some(axis.of(self.bounds.min));
        }
        let Some(dest) = m.bounce_destination else {
            return;
        };
        m.set_slow_down(OVER_BOUNDS_SLOW_DOWN);
        if m.is_at_rest() {
            m.speed = 0.0;
            m.bounce_started = true;
            self.animator.start(
                PageAnimation::Bounce(axis),
                p,
                dest,
                self.config.bounce_duration_ms,
                Easing::SineOut,
                now,
            );
            self.phase = ZoomPanPhase::Releasing;
        }
    }

    /// Returns `true` if the content is larger than its fitted presentation.
    #[must_use]
    pub fn check_is_possible_to_pan(&self) -> bool {
        self.is_ready() && self.zoom > self.fit_ratio
    }

    // --- pinch ---

    /// Starts a pinch with the two touch points.
    pub fn handle_zoom_start(&mut self, first: Point, second: Point) {
        if !self.is_ready() {
            return;
        }
        self.stop_animations();
        self.start_zoom = self.zoom;
        self.pan_dist = Vec2::ZERO;
        self.start_pan = self.pan;
        let center = midpoint(first, second);
        self.mid_zoom_point = Vec2::new(
            center.x.abs() - self.pan.x,
            center.y.abs() - self.pan.y,
        );
        self.pinch = Some(Pinch {
            second,
            center,
            start_distance: distance(first, second),
        });
        self.phase = ZoomPanPhase::PinchZooming;
    }

    /// Returns `true` if `second` equals the second pinch point last seen.
    #[must_use]
    pub fn points_unchanged(&self, second: Point) -> bool {
        self.pinch.is_some_and(|p| p.second == second)
    }

    /// Updates the pinch.
    ///
    /// The content point under the fingers' midpoint stays under the
    /// midpoint; moving the midpoint pans the content with it.
    pub fn handle_zoom_move(&mut self, first: Point, second: Point) {
        if !self.is_ready() {
            return;
        }
        let Some(mut pinch) = self.pinch else {
            return;
        };
        if pinch.start_distance <= 0.0 {
            return;
        }
        let z = self.zoom_friction(self.start_zoom * distance(first, second) / pinch.start_distance);
        let center = midpoint(first, second);
        self.pan_dist += center - pinch.center;
        pinch.center = center;
        pinch.second = second;
        self.pinch = Some(pinch);

        self.zoom = z;
        self.pan = Point::new(
            self.pinch_pan_offset(Axis::X, z),
            self.pinch_pan_offset(Axis::Y, z),
        );
        self.bounds = self.bounds_at(z);
        self.apply(false);
        self.emit_zoom_level();
    }

    fn zoom_friction(&self, z: f64) -> f64 {
        let min = self.initial_zoom;
        let max = self.config.max_spread_zoom;
        if z < min {
            let f = ((min - z) / min).min(1.0);
            min - f * min * self.config.zoom_undershoot
        } else if z > max {
            let f = ((z - max) / (min * self.config.zoom_overshoot_span)).min(1.0);
            max + f * min
        } else {
            z
        }
    }

    fn pinch_pan_offset(&self, axis: Axis, zoom: f64) -> f64 {
        let m = axis.of_vec(self.mid_zoom_point);
        axis.of(self.start_pan) + axis.of_vec(self.pan_dist) + m - m * (zoom / self.start_zoom)
    }

    /// Ends a pinch. A zoom level outside `[initial, max_spread_zoom]` or an
    /// offset outside its bounds animates back into range.
    pub fn handle_zoom_end(&mut self, now: f64) {
        if !self.is_ready() {
            return;
        }
        self.pinch = None;
        let dest = self.clamp_zoom(self.zoom);
        let in_range = (dest - self.zoom).abs() < ZOOM_EPSILON;
        if in_range && self.bounds_at(self.zoom).contains(self.pan) {
            self.phase = ZoomPanPhase::Idle;
            return;
        }
        log::debug!("settling zoom {:.4} -> {dest:.4}", self.zoom);
        self.zoom_to(
            dest,
            None,
            Some(self.config.zoom_settle_duration_ms),
            Some(Easing::CubicOut),
            now,
        );
    }

    // --- programmatic zoom ---

    /// Moves to `target` zoom level.
    ///
    /// With an `anchor`, the content point under it stays put (before
    /// clamping into the destination bounds). Going to the initial zoom level
    /// always centers the content. Without a duration the change is instant;
    /// the default easing is sine-in-out.
    pub fn zoom_to(
        &mut self,
        target: f64,
        anchor: Option<Point>,
        duration_ms: Option<f64>,
        easing: Option<Easing>,
        now: f64,
    ) {
        if !self.is_ready() || !target.is_finite() || target <= 0.0 {
            return;
        }
        self.animator.stop(PageAnimation::ZoomTo);
        if let Some(a) = anchor {
            self.start_zoom = self.zoom;
            self.mid_zoom_point = Vec2::new(a.x.abs() - self.pan.x, a.y.abs() - self.pan.y);
            self.start_pan = self.pan;
            self.pan_dist = Vec2::ZERO;
        }
        self.bounds = self.bounds_at(target);
        let to_pan = Point::new(
            self.dest_pan_offset(Axis::X, target),
            self.dest_pan_offset(Axis::Y, target),
        );
        let jump = ZoomJump {
            from_zoom: self.zoom,
            to_zoom: target,
            from_pan: self.pan,
            to_pan: round_point(to_pan),
        };
        match duration_ms {
            Some(d) if d > 0.0 => {
                self.jump = Some(jump);
                self.animator.start(
                    PageAnimation::ZoomTo,
                    0.0,
                    1.0,
                    d,
                    easing.unwrap_or_default(),
                    now,
                );
                self.phase = ZoomPanPhase::AnimatedTransition;
            }
            _ => {
                self.jump = None;
                self.apply_jump(jump, 1.0, true);
                self.settle_phase();
            }
        }
    }

    fn dest_pan_offset(&self, axis: Axis, target: f64) -> f64 {
        if (target - self.initial_zoom).abs() < ZOOM_EPSILON {
            return axis.of(self.initial_position);
        }
        self.bounds
            .clamp_axis(axis, self.pinch_pan_offset(axis, target))
    }

    fn apply_jump(&mut self, jump: ZoomJump, k: f64, done: bool) {
        if done {
            self.zoom = jump.to_zoom;
            self.pan = jump.to_pan;
        } else {
            self.zoom = jump.from_zoom + (jump.to_zoom - jump.from_zoom) * k;
            self.pan = jump.from_pan.lerp(jump.to_pan, k);
        }
        self.apply(done);
        if done {
            self.emit_zoom_level();
        }
    }

    /// Toggles between the initial zoom level and the double-tap zoom level,
    /// anchored at `point`.
    ///
    /// The double-tap level is natural size when the initial zoom is below
    /// [`ZoomPanConfig::double_tap_natural_threshold`], otherwise
    /// [`ZoomPanConfig::max_spread_zoom`].
    pub fn handle_double_tap(&mut self, point: Point, now: f64) {
        if !self.is_ready() {
            return;
        }
        let target = if self.is_at_initial_zoom() {
            if self.initial_zoom < self.config.double_tap_natural_threshold {
                1.0
            } else {
                self.config.max_spread_zoom
            }
        } else {
            self.initial_zoom
        };
        log::debug!("double tap zoom {:.4} -> {target:.4}", self.zoom);
        self.zoom_to(
            target,
            Some(point),
            Some(self.config.double_tap_duration_ms),
            None,
            now,
        );
    }

    /// Applies a host zoom request instantly.
    ///
    /// A request made before the content is known is remembered and used as
    /// the starting zoom level once it is.
    pub fn request_zoom(&mut self, request: ZoomRequest, now: f64) {
        if !self.is_ready() {
            self.requested_zoom = match request {
                ZoomRequest::Initial => None,
                ZoomRequest::Level(level) => Some(level),
            };
            return;
        }
        match request {
            ZoomRequest::Initial => {
                if !self.is_at_initial_zoom() {
                    self.zoom_to(self.initial_zoom, None, None, None, now);
                }
            }
            ZoomRequest::Level(level) => {
                let level = self.clamp_zoom(level);
                let anchor = Point::new(self.viewport.width / 2.0, 0.0);
                self.zoom_to(level, Some(anchor), None, None, now);
            }
        }
    }

    // --- animation ---

    /// Returns `true` while momentum, bounce or a zoom jump is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animator.is_empty()
    }

    /// Stops every running animation, leaving state where it is.
    pub fn stop_animations(&mut self) {
        self.animator.stop_all();
        self.jump = None;
        if matches!(
            self.phase,
            ZoomPanPhase::Releasing | ZoomPanPhase::AnimatedTransition
        ) {
            self.phase = ZoomPanPhase::Idle;
        }
    }

    /// Advances running animations to `now`.
    pub fn tick(&mut self, now: f64) {
        for frame in self.animator.tick(now) {
            match frame {
                Frame::Drive {
                    key: PageAnimation::Momentum,
                    dt,
                } => self.momentum_step(dt, now),
                Frame::Update {
                    key: PageAnimation::Bounce(axis),
                    value,
                }
                | Frame::Complete {
                    key: PageAnimation::Bounce(axis),
                    value,
                } => {
                    axis.set(&mut self.pan, value);
                    self.apply(false);
                }
                Frame::Update {
                    key: PageAnimation::ZoomTo,
                    value,
                } => {
                    if let Some(jump) = self.jump {
                        self.apply_jump(jump, value, false);
                    }
                }
                Frame::Complete {
                    key: PageAnimation::ZoomTo,
                    ..
                } => {
                    if let Some(jump) = self.jump.take() {
                        self.apply_jump(jump, 1.0, true);
                    }
                }
                _ => {}
            }
        }
        self.settle_phase();
    }

    fn settle_phase(&mut self) {
        if self.animator.is_empty()
            && matches!(
                self.phase,
                ZoomPanPhase::Releasing | ZoomPanPhase::AnimatedTransition | ZoomPanPhase::PanDragging
            )
        {
            self.phase = ZoomPanPhase::Idle;
        }
    }

    // --- helpers ---

    fn clamp_zoom(&self, level: f64) -> f64 {
        if level < self.initial_zoom {
            self.initial_zoom
        } else if level > self.config.max_spread_zoom {
            self.config.max_spread_zoom
        } else {
            level
        }
    }

    fn bounds_at(&self, zoom: f64) -> PanBounds {
        let content = self.content.unwrap_or(Size::ZERO);
        PanBounds::compute(self.viewport, content * zoom)
    }

    fn emit_zoom_level(&mut self) {
        self.events.push(ZoomPanEvent::ZoomLevelChanged {
            level: self.zoom,
            is_initial: self.is_at_initial_zoom(),
        });
    }

    fn apply(&mut self, allow_resolution_switch: bool) {
        if allow_resolution_switch {
            let full = self.zoom > self.fit_ratio;
            if full != self.full_resolution {
                self.full_resolution = full;
                self.events.push(ZoomPanEvent::ResolutionChanged { full });
            }
        }
        let scale = if self.full_resolution || self.fit_ratio <= 0.0 {
            self.zoom
        } else {
            self.zoom / self.fit_ratio
        };
        self.events.push(ZoomPanEvent::Transform {
            offset: self.pan,
            zoom: self.zoom,
            scale,
        });
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{ZoomPan, ZoomPanEvent, ZoomPanPhase};
    use crate::geometry::round_half_up;
    use crate::{Axis, ZoomPanConfig, ZoomRequest};

    fn engine(content: Size) -> ZoomPan {
        let mut e = ZoomPan::new(ZoomPanConfig::default(), Size::new(400.0, 800.0));
        e.on_content_size_known(content);
        e.drain_events().for_each(drop);
        e
    }

    #[test]
    fn sizing_centers_fitted_content() {
        let e = engine(Size::new(800.0, 800.0));
        assert_eq!(e.fit_ratio(), 0.5);
        assert_eq!(e.initial_zoom_level(), 0.5);
        assert_eq!(e.zoom_level(), 0.5);
        assert_eq!(e.pan_offset(), Point::new(0.0, 200.0));
        assert!(!e.check_is_possible_to_pan());
    }

    #[test]
    fn small_content_is_not_enlarged() {
        let e = engine(Size::new(100.0, 200.0));
        assert_eq!(e.fit_ratio(), 4.0);
        assert_eq!(e.initial_zoom_level(), 1.0);
        assert_eq!(e.pan_offset(), Point::new(150.0, 300.0));
    }

    #[test]
    fn gestures_before_content_are_ignored() {
        let mut e = ZoomPan::new(ZoomPanConfig::default(), Size::new(400.0, 800.0));
        e.handle_pan_start();
        e.handle_pan_move(Axis::Y, 50.0);
        e.handle_zoom_start(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        e.handle_zoom_move(Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        e.handle_double_tap(Point::new(10.0, 10.0), 0.0);
        e.handle_pan_end(Vec2::new(3.0, 3.0), 0.0);
        assert_eq!(e.phase(), ZoomPanPhase::Idle);
        assert_eq!(e.drain_events().count(), 0);
    }

    #[test]
    fn empty_content_size_keeps_page_unready() {
        let mut e = ZoomPan::new(ZoomPanConfig::default(), Size::new(400.0, 800.0));
        e.on_content_size_known(Size::new(0.0, 100.0));
        assert!(!e.is_ready());
    }

    #[test]
    fn pan_move_uses_friction_past_the_edge() {
        let mut e = engine(Size::new(800.0, 1_600.0));
        e.zoom_to(1.0, Some(Point::new(200.0, 400.0)), None, None, 0.0);
        let start = e.pan_offset();
        assert!(e.pan_bounds().contains(start));
        e.handle_pan_start();
        let room = e.pan_bounds().max.y - start.y;
        e.handle_pan_move(Axis::Y, room);
        assert_eq!(e.pan_offset().y, e.pan_bounds().max.y);
        e.handle_pan_move(Axis::Y, 100.0);
        assert_eq!(e.pan_offset().y, e.pan_bounds().max.y + 35.0);
    }

    #[test]
    fn zoom_to_initial_recenters() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.zoom_to(1.2, Some(Point::new(30.0, 700.0)), None, None, 0.0);
        assert!(e.check_is_possible_to_pan());
        let centered = e.pan_bounds().center;
        assert_ne!(e.pan_offset(), centered);

        let initial = e.initial_zoom_level();
        e.zoom_to(initial, Some(Point::new(380.0, 10.0)), None, None, 0.0);
        assert_eq!(e.pan_offset(), Point::new(0.0, 200.0));
        assert!(e.is_at_initial_zoom());
    }

    #[test]
    fn animated_zoom_to_snaps_to_destination() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.zoom_to(1.0, Some(Point::new(200.0, 400.0)), Some(100.0), None, 0.0);
        assert_eq!(e.phase(), ZoomPanPhase::AnimatedTransition);
        e.tick(50.0);
        assert!(e.zoom_level() > 0.5 && e.zoom_level() < 1.0);
        e.tick(100.0);
        assert_eq!(e.zoom_level(), 1.0);
        assert_eq!(e.phase(), ZoomPanPhase::Idle);
        assert!(!e.is_animating());
        let levels: usize = e
            .drain_events()
            .filter(|ev| matches!(ev, ZoomPanEvent::ZoomLevelChanged { .. }))
            .count();
        assert_eq!(levels, 1);
    }

    #[test]
    fn resolution_switches_above_fit() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.zoom_to(1.0, Some(Point::new(200.0, 400.0)), None, None, 0.0);
        let events: alloc::vec::Vec<_> = e.drain_events().collect();
        assert!(events.contains(&ZoomPanEvent::ResolutionChanged { full: true }));
        assert!(matches!(
            events.last(),
            Some(ZoomPanEvent::ZoomLevelChanged {
                level,
                is_initial: false
            }) if *level == 1.0
        ));
    }

    #[test]
    fn double_tap_toggles() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.handle_double_tap(Point::new(200.0, 400.0), 0.0);
        e.tick(333.0);
        assert_eq!(e.zoom_level(), 1.0);
        e.handle_double_tap(Point::new(200.0, 400.0), 400.0);
        e.tick(733.0);
        assert_eq!(e.zoom_level(), 0.5);
        assert_eq!(e.pan_offset(), Point::new(0.0, 200.0));
    }

    #[test]
    fn double_tap_on_large_fit_goes_to_max_spread() {
        let mut e = engine(Size::new(500.0, 1_000.0));
        assert_eq!(e.initial_zoom_level(), 0.8);
        e.handle_double_tap(Point::new(200.0, 400.0), 0.0);
        e.tick(1_000.0);
        assert_eq!(e.zoom_level(), 1.33);
    }

    #[test]
    fn request_before_load_becomes_initial_zoom() {
        let mut e = ZoomPan::new(ZoomPanConfig::default(), Size::new(400.0, 800.0));
        e.request_zoom(ZoomRequest::Level(1.0), 0.0);
        e.on_content_size_known(Size::new(800.0, 800.0));
        assert_eq!(e.zoom_level(), 1.0);
        assert_eq!(e.pan_offset(), Point::new(-200.0, 0.0));
    }

    #[test]
    fn request_level_is_clamped() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.request_zoom(ZoomRequest::Level(9.0), 0.0);
        assert_eq!(e.zoom_level(), 1.33);
        e.request_zoom(ZoomRequest::Initial, 0.0);
        assert!(e.is_at_initial_zoom());
        assert_eq!(e.pan_offset(), Point::new(0.0, 200.0));
    }

    #[test]
    fn settled_pinch_end_is_a_no_op() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.handle_zoom_start(Point::new(150.0, 400.0), Point::new(250.0, 400.0));
        e.handle_zoom_move(Point::new(120.0, 400.0), Point::new(280.0, 400.0));
        let zoom = e.zoom_level();
        e.handle_zoom_end(0.0);
        assert!(!e.is_animating());
        assert_eq!(e.zoom_level(), zoom);
        assert_eq!(e.phase(), ZoomPanPhase::Idle);
    }

    #[test]
    fn overshooting_pinch_settles_to_max() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.handle_zoom_start(Point::new(190.0, 400.0), Point::new(210.0, 400.0));
        e.handle_zoom_move(Point::new(0.0, 400.0), Point::new(400.0, 400.0));
        assert!(e.zoom_level() > 1.33);
        assert!(e.zoom_level() <= 1.33 + 0.5);
        e.handle_zoom_end(0.0);
        assert!(e.is_animating());
        e.tick(200.0);
        assert_eq!(e.zoom_level(), 1.33);
        assert!(e.pan_bounds().contains(e.pan_offset()));
    }

    #[test]
    fn undershooting_pinch_is_damped() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.handle_zoom_start(Point::new(0.0, 400.0), Point::new(400.0, 400.0));
        e.handle_zoom_move(Point::new(199.0, 400.0), Point::new(201.0, 400.0));
        let floor = 0.5 - 0.5 / 3.0;
        assert!(e.zoom_level() >= floor - 1e-12);
        assert!(e.zoom_level() < 0.5);
    }

    #[test]
    fn pan_end_without_start_is_idempotent() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.handle_pan_end(Vec2::ZERO, 0.0);
        let snapshot = (e.zoom_level(), e.pan_offset(), e.phase());
        e.handle_pan_end(Vec2::ZERO, 10.0);
        assert_eq!((e.zoom_level(), e.pan_offset(), e.phase()), snapshot);
        assert!(!e.is_animating());
    }

    #[test]
    fn released_out_of_bounds_bounces_back() {
        let mut e = engine(Size::new(800.0, 1_600.0));
        e.zoom_to(1.0, Some(Point::new(200.0, 0.0)), None, None, 0.0);
        e.handle_pan_start();
        e.handle_pan_move(Axis::Y, 200.0);
        let max_y = e.pan_bounds().max.y;
        assert!(e.pan_offset().y > max_y);
        e.handle_pan_end(Vec2::ZERO, 0.0);
        assert_eq!(e.phase(), ZoomPanPhase::Releasing);
        e.tick(150.0);
        assert!(e.pan_offset().y > max_y);
        e.tick(300.0);
        assert_eq!(e.pan_offset().y, max_y);
        assert_eq!(e.phase(), ZoomPanPhase::Idle);
    }

    #[test]
    fn momentum_comes_to_rest_on_whole_pixels() {
        let mut e = engine(Size::new(800.0, 4_000.0));
        e.zoom_to(1.0, Some(Point::new(200.0, 0.0)), None, None, 0.0);
        e.handle_pan_start();
        e.handle_pan_move(Axis::Y, -300.0);
        e.handle_pan_end(Vec2::new(0.0, -1.0), 0.0);
        assert!(e.is_animating());
        let mut now = 0.0;
        let mut last = e.momentum().y.speed_abs;
        while e.is_animating() && now < 5_000.0 {
            now += 16.0;
            e.tick(now);
            assert!(e.momentum().y.speed_abs <= last);
            last = e.momentum().y.speed_abs;
        }
        assert!(!e.is_animating());
        let y = e.pan_offset().y;
        assert_eq!(y, round_half_up(y));
        assert!(e.pan_bounds().contains(e.pan_offset()));
    }

    #[test]
    fn stop_animations_twice_is_harmless() {
        let mut e = engine(Size::new(800.0, 800.0));
        e.zoom_to(1.0, None, Some(300.0), None, 0.0);
        e.stop_animations();
        let snapshot = (e.zoom_level(), e.pan_offset());
        e.stop_animations();
        assert_eq!((e.zoom_level(), e.pan_offset()), snapshot);
        assert_eq!(e.phase(), ZoomPanPhase::Idle);
    }
}
