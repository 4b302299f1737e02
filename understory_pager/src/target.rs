// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};
use understory_zoom_pan::{
    Axis, MainScrollContext, MainScrollDriver, ZoomPan, ZoomPanEvent, ZoomRequest,
};

/// What the pager needs from a page's zoom/pan engine.
///
/// [`ZoomPan`] is the stock implementation. Hosts may substitute their own,
/// for example to record calls in tests or to wrap an engine with extra
/// bookkeeping.
pub trait ZoomPanTarget {
    /// Returns `true` once the page can take gestures.
    fn is_ready(&self) -> bool;
    /// Returns `true` if the content is larger than its fitted presentation.
    fn check_is_possible_to_pan(&self) -> bool;
    /// Returns `true` while the engine animates.
    fn is_animating(&self) -> bool;

    /// See [`ZoomPan::on_content_size_known`].
    fn on_content_size_known(&mut self, natural: Size);
    /// See [`ZoomPan::on_viewport_resize`].
    fn on_viewport_resize(&mut self, viewport: Size);
    /// See [`ZoomPan::unload`].
    fn unload(&mut self);

    /// See [`ZoomPan::handle_pan_start`].
    fn handle_pan_start(&mut self);
    /// See [`ZoomPan::handle_pan_move`].
    fn handle_pan_move(&mut self, axis: Axis, delta: f64);
    /// See [`ZoomPan::pan_or_move_main_scroll_x`].
    fn pan_or_move_main_scroll_x(
        &mut self,
        delta: f64,
        ctx: &MainScrollContext,
        driver: &mut dyn MainScrollDriver,
    ) -> bool;
    /// See [`ZoomPan::handle_pan_end`].
    fn handle_pan_end(&mut self, speed: Vec2, now: f64);

    /// See [`ZoomPan::handle_zoom_start`].
    fn handle_zoom_start(&mut self, first: Point, second: Point);
    /// See [`ZoomPan::points_unchanged`].
    fn points_unchanged(&self, second: Point) -> bool;
    /// See [`ZoomPan::handle_zoom_move`].
    fn handle_zoom_move(&mut self, first: Point, second: Point);
    /// See [`ZoomPan::handle_zoom_end`].
    fn handle_zoom_end(&mut self, now: f64);

    /// See [`ZoomPan::handle_double_tap`].
    fn handle_double_tap(&mut self, point: Point, now: f64);
    /// See [`ZoomPan::request_zoom`].
    fn request_zoom(&mut self, request: ZoomRequest, now: f64);

    /// See [`ZoomPan::tick`].
    fn tick(&mut self, now: f64);
    /// See [`ZoomPan::stop_animations`].
    fn stop_animations(&mut self);
    /// Moves queued events into `out`.
    fn drain_events_into(&mut self, out: &mut Vec<ZoomPanEvent>);
}

impl ZoomPanTarget for ZoomPan {
    fn is_ready(&self) -> bool {
        Self::is_ready(self)
    }

    fn check_is_possible_to_pan(&self) -> bool {
        Self::check_is_possible_to_pan(self)
    }

    fn is_animating(&self) -> bool {
        Self::is_animating(self)
    }

    fn on_content_size_known(&mut self, natural: Size) {
        Self::on_content_size_known(self, natural);
    }

    fn on_viewport_resize(&mut self, viewport: Size) {
        Self::on_viewport_resize(self, viewport);
    }

    fn unload(&mut self) {
        Self::unload(self);
    }

    fn handle_pan_start(&mut self) {
        Self::handle_pan_start(self);
    }

    fn handle_pan_move(&mut self, axis: Axis, delta: f64) {
        Self::handle_pan_move(self, axis, delta);
    }

    fn pan_or_move_main_scroll_x(
        &mut self,
        delta: f64,
        ctx: &MainScrollContext,
        driver: &mut dyn MainScrollDriver,
    ) -> bool {
        Self::pan_or_move_main_scroll_x(self, delta, ctx, driver)
    }

    fn handle_pan_end(&mut self, speed: Vec2, now: f64) {
        Self::handle_pan_end(self, speed, now);
    }

    fn handle_zoom_start(&mut self, first: Point, second: Point) {
        Self::handle_zoom_start(self, first, second);
    }

    fn points_unchanged(&self, second: Point) -> bool {
        Self::points_unchanged(self, second)
    }

    fn handle_zoom_move(&mut self, first: Point, second: Point) {
        Self::handle_zoom_move(self, first, second);
    }

    fn handle_zoom_end(&mut self, now: f64) {
        Self::handle_zoom_end(self, now);
    }

    fn handle_double_tap(&mut self, point: Point, now: f64) {
        Self::handle_double_tap(self, point, now);
    }

    fn request_zoom(&mut self, request: ZoomRequest, now: f64) {
        Self::request_zoom(self, request, now);
    }

    fn tick(&mut self, now: f64) {
        Self::tick(self, now);
    }

    fn stop_animations(&mut self) {
        Self::stop_animations(self);
    }

    fn drain_events_into(&mut self, out: &mut Vec<ZoomPanEvent>) {
        out.extend(self.drain_events());
    }
}
