// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};
use understory_event_state::direction::{Direction, detect_direction};
use understory_event_state::flick::Flick;
use understory_event_state::pointer::TouchPoint;
use understory_event_state::session::GestureSession;
use understory_event_state::tap::{Tap, TapEvent, TapRecognizer, TapTarget};
use understory_zoom_pan::{
    Axis, ConfigError, MainScrollContext, MainScrollDriver, ZoomPan, ZoomPanEvent, ZoomRequest,
    round_half_up,
};

use crate::config::PagerConfig;
use crate::event::PagerEvent;
use crate::holder::{CURRENT_SLOT, HolderId, HolderRing, NEXT_SLOT, PREVIOUS_SLOT, SlideHolder};
use crate::main_scroll::{MainScroll, ScrollEdges};
use crate::page::PageKind;
use crate::target::ZoomPanTarget;

/// How a release is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Release {
    /// Possibly a page change.
    Swipe,
    /// The last two fingers of a pinch lifted together.
    Zoom,
    /// One finger of a pinch lifted.
    ZoomPointerUp,
}

/// Main-scroll moves requested by a page while it routes a horizontal drag.
struct ScrollHandle<'a> {
    scroll: &'a mut MainScroll,
    edges: ScrollEdges,
    start: f64,
    events: &'a mut Vec<PagerEvent>,
    shifted: Option<bool>,
}

impl MainScrollDriver for ScrollHandle<'_> {
    fn move_main_scroll(&mut self, x: f64) -> bool {
        let pos = self.scroll.move_to(x, true, &self.edges);
        self.events.push(PagerEvent::MainScrollOffset(pos));
        let shifted = x != self.start;
        self.shifted = Some(shifted);
        shifted
    }
}

/// A horizontally paged carousel of zoomable pages.
///
/// The pager classifies a normalized pointer stream into swipes, pans,
/// pinches, taps and double taps. Page changes move a main scroll that
/// carries three slide holders (previous, current, next); everything else is
/// delegated to the current holder's [`ZoomPanTarget`].
///
/// All time is host time in milliseconds. The host calls [`Pager::tick`] on
/// every display frame while [`Pager::needs_tick`] is `true`, and applies the
/// [`PagerEvent`]s it drains with [`Pager::drain_events`].
#[derive(Debug)]
pub struct Pager<T: ZoomPanTarget = ZoomPan> {
    config: PagerConfig,
    pages: Vec<PageKind>,
    viewport: Size,
    slide_width: f64,
    current: usize,
    index_diff: isize,
    items_diff: isize,
    position_index: isize,
    holders: HolderRing<T>,
    scroll: MainScroll,
    session: Option<GestureSession>,
    dragging: bool,
    shifted: bool,
    start_scroll: f64,
    last_release_time: Option<f64>,
    last_flick: Flick,
    taps: TapRecognizer,
    shared_zoom: Option<f64>,
    scratch: Vec<ZoomPanEvent>,
    events: Vec<PagerEvent>,
}

impl Pager<ZoomPan> {
    /// Creates a pager over `pages` with stock [`ZoomPan`] engines.
    ///
    /// # Errors
    ///
    /// Returns the first invalid configuration field.
    pub fn new(config: PagerConfig, pages: Vec<PageKind>) -> Result<Self, ConfigError> {
        let engine = ZoomPan::new(config.zoom_pan, Size::ZERO);
        Self::with_targets(config, pages, [engine.clone(), engine.clone(), engine])
    }
}

impl<T: ZoomPanTarget> Pager<T> {
    /// Creates a pager over `pages` driving the given engines.
    ///
    /// # Errors
    ///
    /// Returns the first invalid configuration field.
    pub fn with_targets(
        config: PagerConfig,
        pages: Vec<PageKind>,
        targets: [T; 3],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let current = if config.initial_index < pages.len() {
            config.initial_index
        } else {
            0
        };
        let mut pager = Self {
            config,
            pages,
            viewport: Size::ZERO,
            slide_width: 0.0,
            current,
            index_diff: 0,
            items_diff: 0,
            position_index: 0,
            holders: HolderRing::new(targets),
            scroll: MainScroll::default(),
            session: None,
            dragging: false,
            shifted: false,
            start_scroll: 0.0,
            last_release_time: None,
            last_flick: Flick::default(),
            taps: TapRecognizer::new(config.double_tap_radius, config.double_tap_window_ms),
            shared_zoom: None,
            scratch: Vec::new(),
            events: Vec::new(),
        };
        pager.rebind_holders(0.0);
        Ok(pager)
    }

    // --- accessors ---

    /// The pager's configuration.
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Index of the current page.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns `true` if there are no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Kind of page `index`.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<PageKind> {
        self.pages.get(index).copied()
    }

    /// Viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Viewport width plus slide spacing.
    #[must_use]
    pub fn slide_width(&self) -> f64 {
        self.slide_width
    }

    /// Current main-scroll offset.
    #[must_use]
    pub fn main_scroll_position(&self) -> f64 {
        self.scroll.position()
    }

    /// Signed count of net page advances since creation, negated.
    #[must_use]
    pub fn position_index(&self) -> isize {
        self.position_index
    }

    /// Returns `true` between the first pointer down and the last pointer
    /// up.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Zoom level shared between neighboring image pages, if any.
    #[must_use]
    pub fn shared_zoom_level(&self) -> Option<f64> {
        self.shared_zoom
    }

    /// The holder ring, in slot order.
    #[must_use]
    pub fn holders(&self) -> &HolderRing<T> {
        &self.holders
    }

    /// Holder currently bound to page `index`.
    #[must_use]
    pub fn holder_for(&self, index: usize) -> Option<HolderId> {
        self.holders
            .iter()
            .find(|h| h.item() == Some(index))
            .map(SlideHolder::id)
    }

    /// Engine of the current page.
    #[must_use]
    pub fn current_target(&self) -> &T {
        self.holders.current().target()
    }

    /// Wraps `index` into `0..len`. Returns `0` when there are no pages.
    #[must_use]
    pub fn get_looped_index(&self, index: isize) -> usize {
        match isize::try_from(self.pages.len()) {
            Ok(len) if len > 0 => index.rem_euclid(len).unsigned_abs(),
            _ => 0,
        }
    }

    /// Returns `true` while any animation or a pending tap needs frames.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.is_animating() || self.taps.is_pending()
    }

    /// Returns `true` while the main scroll or any page animates.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scroll.has_running_animation() || self.holders.iter().any(|h| h.target().is_animating())
    }

    /// Drains queued events in emission order.
    pub fn drain_events(&mut self) -> alloc::vec::Drain<'_, PagerEvent> {
        self.events.drain(..)
    }

    // --- host lifecycle ---

    /// Sets the viewport size and lays out the holders.
    ///
    /// [`PagerEvent::ViewportSizeChanged`] is reported for every change after
    /// the first.
    pub fn set_viewport_size(&mut self, size: Size) {
        if size == self.viewport {
            return;
        }
        let had_size = self.viewport.width > 0.0;
        self.viewport = size;
        self.slide_width = size.width + round_half_up(size.width * self.config.slide_spacing);
        let rest = self.slide_width * self.position_index as f64;
        self.move_main_scroll(rest, false);
        self.shared_zoom = None;
        self.layout_holders();
        for holder in self.holders.iter_mut() {
            holder.target_mut().on_viewport_resize(size);
        }
        if had_size {
            log::debug!("viewport resized to {size:?}");
            self.events.push(PagerEvent::ViewportSizeChanged(size));
        }
        self.collect_page_events(0.0);
    }

    /// Reports the natural size of the content loaded into `holder`.
    pub fn on_content_size_known(&mut self, holder: HolderId, natural: Size) {
        let Some(slot) = self.holders.slot_of(holder) else {
            return;
        };
        self.holders
            .slot_mut(slot)
            .target_mut()
            .on_content_size_known(natural);
        self.collect_page_events(0.0);
    }

    /// Replaces the page list.
    ///
    /// If the current page falls off the end the pager jumps to the last
    /// page.
    pub fn set_pages(&mut self, pages: Vec<PageKind>, now: f64) {
        self.pages = pages;
        let len = self.pages.len();
        if len > 0 && self.current >= len {
            let last = isize::try_from(len - 1).unwrap_or(isize::MAX);
            self.go_to(last, now);
        } else {
            if len == 0 {
                self.current = 0;
            }
            self.rebind_holders(now);
            self.collect_page_events(now);
        }
    }

    // --- navigation ---

    /// Jumps to page `target` without animation.
    ///
    /// Out-of-range targets wrap when looping and are ignored otherwise.
    pub fn go_to(&mut self, target: isize, now: f64) {
        let Ok(len) = isize::try_from(self.pages.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        let index = if (0..len).contains(&target) {
            target
        } else if self.config.loop_pages {
            target.rem_euclid(len)
        } else {
            return;
        };
        let current = self.current_isize();
        if index == current {
            return;
        }
        let diff = index - current;
        self.index_diff = diff;
        self.current = index.unsigned_abs();
        self.position_index -= diff;
        let rest = self.slide_width * self.position_index as f64;
        self.move_main_scroll(rest, false);
        self.stop_all();
        self.scroll.finish();
        self.on_page_changed(diff, now);
        self.reset_last_zoom(now);
        log::debug!("jumped to page {} ({diff:+})", self.current);
        self.events.push(PagerEvent::Swiped {
            current: self.current,
            diff,
        });
        self.collect_page_events(now);
    }

    /// Jumps to the next page.
    pub fn go_next(&mut self, now: f64) {
        self.go_to(self.current_isize() + 1, now);
    }

    /// Jumps to the previous page.
    pub fn go_prev(&mut self, now: f64) {
        self.go_to(self.current_isize() - 1, now);
    }

    /// Forwards a zoom request to the current page.
    pub fn request_zoom(&mut self, request: ZoomRequest, now: f64) {
        self.holders
            .current_mut()
            .target_mut()
            .request_zoom(request, now);
        self.collect_page_events(now);
    }

    // --- pointer stream ---

    /// Handles pointers going down. `points` lists every pointer now down.
    pub fn pointer_down(&mut self, points: &[TouchPoint], now: f64) {
        let Some(first) = points.first() else {
            return;
        };
        self.stop_all();
        if points.len() > 1 {
            self.taps.cancel();
        }
        if points.len() == 1 || !self.dragging || self.session.is_none() {
            self.dragging = true;
            self.shifted = false;
            self.session = Some(GestureSession::new(first.pos, now));
            self.start_scroll = self.slide_width * self.position_index as f64;
            self.holders.current_mut().target_mut().handle_pan_start();
        }
        if let (Some(session), [a, b, ..]) = (self.session.as_mut(), points) {
            let current = self.holders.current_mut().target_mut();
            if !session.zooming && !self.scroll.is_animating() && !self.shifted && current.is_ready()
            {
                session.zoom_started = false;
                session.multitouch = true;
                session.zooming = true;
                current.handle_zoom_start(a.pos, b.pos);
            }
        }
        self.collect_page_events(now);
    }

    /// Handles pointers moving. `points` lists every pointer still down,
    /// primary first.
    pub fn pointer_move(&mut self, points: &[TouchPoint], now: f64) {
        if !self.dragging {
            return;
        }
        let Some(mut session) = self.session.take() else {
            return;
        };
        if let Some(first) = points.first() {
            let mut render = true;
            if session.direction.is_none() && !session.moved && !session.zooming {
                let rest = self.slide_width * self.position_index as f64;
                if self.scroll.position() != rest {
                    session.direction = Some(Direction::Horizontal);
                } else {
                    session.direction = detect_direction(
                        session.current_point,
                        first.pos,
                        self.config.direction_check_offset,
                    );
                    render = session.direction.is_some();
                }
                if let Some(direction) = session.direction {
                    log::trace!("gesture locked {direction:?}");
                }
            }
            if render {
                self.render_movement(&mut session, points, now);
            }
        }
        self.session = Some(session);
        self.collect_page_events(now);
    }

    fn render_movement(&mut self, session: &mut GestureSession, points: &[TouchPoint], now: f64) {
        let Some(first) = points.first() else {
            return;
        };
        let p = first.pos;
        let delta = session.advance(p);

        if session.zooming
            && self.holders.current().target().is_ready()
            && let Some(second) = points.get(1)
        {
            let current = self.holders.current_mut().target_mut();
            if delta == Vec2::ZERO && current.points_unchanged(second.pos) {
                return;
            }
            session.zoom_started = true;
            current.handle_zoom_move(p, second.pos);
            return;
        }

        let Some(direction) = session.direction else {
            return;
        };
        let delta = session.settle_first_move(delta, self.config.direction_check_offset);
        if delta == Vec2::ZERO {
            return;
        }
        session.record(now, p);
        session.moved = true;

        if self.holders.current().target().is_ready() {
            let ctx = MainScrollContext {
                position: self.scroll.position(),
                start_position: self.start_scroll,
                shifted: self.shifted,
                animating: self.scroll.is_animating(),
                horizontal: direction == Direction::Horizontal,
                zoom_started: session.zoom_started,
            };
            let edges = self.scroll_edges();
            let mut handle = ScrollHandle {
                scroll: &mut self.scroll,
                edges,
                start: self.start_scroll,
                events: &mut self.events,
                shifted: None,
            };
            let current = self.holders.current_mut().target_mut();
            let main_moved = current.pan_or_move_main_scroll_x(delta.x, &ctx, &mut handle);
            if let Some(shifted) = handle.shifted {
                self.shifted = shifted;
            }
            if !main_moved && !self.scroll.is_animating() && !self.shifted {
                current.handle_pan_move(Axis::Y, delta.y);
            }
        } else if direction == Direction::Horizontal {
            let x = self.scroll.position() + delta.x;
            self.move_main_scroll(x, true);
            self.shifted = x != self.start_scroll;
        }
    }

    /// Handles pointers going up.
    ///
    /// `remaining` lists the pointers still down, `released` is the position
    /// of the pointer that lifted and `target` what it lifted over.
    pub fn pointer_up(
        &mut self,
        remaining: &[TouchPoint],
        released: Option<Point>,
        target: TapTarget,
        now: f64,
    ) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        self.release(&mut session, remaining, released, target, now);
        if !remaining.is_empty() {
            self.session = Some(session);
        }
        self.collect_page_events(now);
    }

    fn release(
        &mut self,
        session: &mut GestureSession,
        remaining: &[TouchPoint],
        released: Option<Point>,
        target: TapTarget,
        now: f64,
    ) {
        let n = remaining.len();
        if n >= 2 {
            return;
        }
        if let Some(rest) = remaining.first() {
            session.start_point = rest.pos;
            session.current_point = rest.pos;
        }

        if n == 0
            && session.direction.is_none()
            && !self.scroll.is_animating()
            && let Some(point) = released
        {
            self.on_tap_release(session, point, target, now);
        }

        let mut release_gap = None;
        if n == 0 {
            self.dragging = false;
            if session.zooming {
                release_gap = Some(0.0);
            } else if let Some(last) = self.last_release_time {
                release_gap = Some(now - last);
            }
        }
        self.last_release_time = (n == 1).then_some(now);

        let mut kind = if release_gap.is_some_and(|gap| gap < self.config.zoom_release_window_ms) {
            Release::Zoom
        } else {
            Release::Swipe
        };
        if session.zooming {
            session.zooming = false;
            if n == 1 {
                kind = Release::ZoomPointerUp;
            }
        }

        if !session.moved && !session.zoom_started && !self.scroll.is_animating() {
            return;
        }

        self.stop_all();
        self.last_flick = session.flick(now);

        if (self.shifted || self.scroll.is_animating()) && n == 0 {
            self.finish_swipe(kind, session, now);
            return;
        }
        if self.scroll.is_animating() {
            return;
        }

        let current = self.holders.current_mut().target_mut();
        if kind != Release::Swipe && current.is_ready() {
            current.handle_zoom_end(now);
            return;
        }
        if !self.shifted && current.check_is_possible_to_pan() {
            current.handle_pan_end(self.last_flick.speed(), now);
        }
    }

    fn finish_swipe(&mut self, kind: Release, session: &GestureSession, now: f64) {
        let previous = self.current;
        let flick = self.last_flick.x;
        let mut items_diff = 0;
        let mut item_changed = false;

        if kind == Release::Swipe {
            let total = session.total_offset().x;
            let fast = flick.distance < self.config.fast_flick_distance;
            let committed = self.config.committed_flick_offset;
            let min = self.config.min_swipe_distance;
            if total > min && (fast || flick.offset > committed) {
                items_diff = -1;
            } else if total < -min && (fast || flick.offset < -committed) {
                items_diff = 1;
            }
        }

        if items_diff != 0 && !self.pages.is_empty() {
            let len = isize::try_from(self.pages.len()).unwrap_or(isize::MAX);
            let wanted = self.current_isize() + items_diff;
            let in_range = (0..len).contains(&wanted);
            if !in_range && !self.config.loop_pages {
                items_diff = 0;
            } else {
                self.current = wanted.rem_euclid(len).unsigned_abs();
                self.index_diff += items_diff;
                self.position_index -= items_diff;
                item_changed = true;
                self.on_page_changed(items_diff, now);
                log::debug!("swiped to page {} ({items_diff:+})", self.current);
                self.events.push(PagerEvent::Swiped {
                    current: self.current,
                    diff: items_diff,
                });
            }
        }

        let to = self.slide_width * self.position_index as f64;
        let from = self.scroll.position();
        let duration = if !item_changed && ((to > from) != (flick.speed > 0.0)) {
            self.config.swipe_return_duration_ms
        } else {
            let d = if flick.speed.abs() > 0.0 {
                (to - from).abs() / flick.speed.abs()
            } else {
                self.config.swipe_return_duration_ms
            };
            d.clamp(
                self.config.swipe_min_duration_ms,
                self.config.swipe_max_duration_ms,
            )
        };
        log::trace!("main scroll settling {from} -> {to} over {duration:.0}ms");
        self.items_diff = items_diff;
        self.scroll.animate_to(to, duration, now);

        self.events.push(PagerEvent::Swipe {
            current: self.current,
            index_diff: self.index_diff,
            items_diff,
            previous,
        });
    }

    fn on_tap_release(&mut self, session: &GestureSession, point: Point, target: TapTarget, now: f64) {
        if session.moved || session.multitouch || self.is_animating() {
            return;
        }
        for event in self.taps.on_release(Tap { point, target }, now) {
            match event {
                TapEvent::Tap(tap) => self.events.push(PagerEvent::Tap(tap)),
                TapEvent::DoubleTap(p) => {
                    self.holders
                        .current_mut()
                        .target_mut()
                        .handle_double_tap(p, now);
                    self.events.push(PagerEvent::DoubleTap(p));
                }
            }
        }
    }

    // --- frame driver ---

    /// Advances every animation and the pending tap to `now`.
    pub fn tick(&mut self, now: f64) {
        if let Some(TapEvent::Tap(tap)) = self.taps.poll(now) {
            self.events.push(PagerEvent::Tap(tap));
        }
        if let Some(step) = self.scroll.tick(now) {
            self.events.push(PagerEvent::MainScrollOffset(step.position));
            if step.completed {
                self.on_swipe_animation_complete(now);
            }
        }
        for holder in self.holders.iter_mut() {
            holder.target_mut().tick(now);
        }
        self.collect_page_events(now);
    }

    fn on_swipe_animation_complete(&mut self, now: f64) {
        self.stop_all();
        self.scroll.finish();
        self.events.push(PagerEvent::SwipeAnimationComplete {
            current: self.current,
            index_diff: self.index_diff,
            items_diff: self.items_diff,
        });
        self.reset_last_zoom(now);
    }

    // --- internals ---

    fn current_isize(&self) -> isize {
        isize::try_from(self.current).unwrap_or(isize::MAX)
    }

    fn stop_all(&mut self) {
        self.scroll.stop();
        for holder in self.holders.iter_mut() {
            holder.target_mut().stop_animations();
        }
    }

    fn scroll_edges(&self) -> ScrollEdges {
        ScrollEdges {
            current: self.current,
            len: self.pages.len(),
            position_index: self.position_index,
            slide_width: self.slide_width,
            end_friction: self.config.main_scroll_end_friction,
            looped: self.config.loop_pages,
        }
    }

    fn move_main_scroll(&mut self, x: f64, dragging: bool) {
        let edges = self.scroll_edges();
        let pos = self.scroll.move_to(x, dragging, &edges);
        self.events.push(PagerEvent::MainScrollOffset(pos));
    }

    fn on_page_changed(&mut self, diff: isize, now: f64) {
        self.shared_zoom = None;
        self.holders.rotate(diff);
        self.layout_holders();
        self.rebind_holders(now);
    }

    fn item_for_slot(&self, slot: usize) -> Option<usize> {
        let len = isize::try_from(self.pages.len()).ok()?;
        if len == 0 {
            return None;
        }
        let slot = isize::try_from(slot).ok()?;
        let index = self.current_isize() + slot - 1;
        if self.config.loop_pages {
            Some(index.rem_euclid(len).unsigned_abs())
        } else if (0..len).contains(&index) {
            Some(index.unsigned_abs())
        } else {
            None
        }
    }

    fn layout_holders(&mut self) {
        if self.slide_width <= 0.0 {
            return;
        }
        for slot in 0..3 {
            let offset = -self.position_index + isize::try_from(slot).unwrap_or(0) - 1;
            let x = self.slide_width * offset as f64;
            let holder = self.holders.slot_mut(slot);
            if holder.place(x) {
                self.events.push(PagerEvent::HolderPosition {
                    holder: holder.id(),
                    x,
                });
            }
        }
    }

    fn rebind_holders(&mut self, now: f64) {
        for slot in 0..3 {
            let item = self.item_for_slot(slot);
            let image = item.and_then(|i| self.page(i)).is_some_and(PageKind::is_image);
            let shared = self.shared_zoom.filter(|_| self.config.share_zoom_level);
            let holder = self.holders.slot_mut(slot);
            if !holder.bind(item) {
                continue;
            }
            holder.target_mut().unload();
            if let (true, Some(level)) = (image, shared) {
                holder.target_mut().request_zoom(ZoomRequest::Level(level), now);
            }
            log::trace!("holder {:?} bound to {item:?}", holder.id());
            self.events.push(PagerEvent::HolderBound {
                holder: holder.id(),
                index: item,
            });
        }
    }

    /// Returns the page left behind by the last completed page change to its
    /// initial zoom.
    fn reset_last_zoom(&mut self, now: f64) {
        let diff = core::mem::take(&mut self.index_diff);
        if diff == 0 || diff.abs() > 2 || self.config.share_zoom_level {
            return;
        }
        let slot = if diff > 0 {
            diff - 1
        } else {
            diff.abs() + 1
        };
        let Ok(slot) = usize::try_from(slot) else {
            return;
        };
        if slot != PREVIOUS_SLOT && slot != NEXT_SLOT {
            return;
        }
        let holder = self.holders.slot_mut(slot);
        let image = holder
            .item()
            .and_then(|i| self.pages.get(i))
            .is_some_and(|p| p.is_image());
        if image {
            holder
                .target_mut()
                .request_zoom(ZoomRequest::Initial, now);
        }
    }

    fn share_zoom_level(&mut self, level: f64, is_initial: bool, now: f64) {
        if is_initial {
            self.shared_zoom = None;
        } else {
            let prev = self.item_for_slot(PREVIOUS_SLOT);
            let next = self.item_for_slot(NEXT_SLOT);
            let neighbor_image = [prev, next]
                .into_iter()
                .flatten()
                .any(|i| self.page(i).is_some_and(PageKind::is_image));
            if !neighbor_image {
                return;
            }
            self.shared_zoom = Some(level);
        }
        let request = match self.shared_zoom {
            Some(level) => ZoomRequest::Level(level),
            None => ZoomRequest::Initial,
        };
        for slot in [PREVIOUS_SLOT, NEXT_SLOT] {
            let image = self
                .item_for_slot(slot)
                .and_then(|i| self.page(i))
                .is_some_and(PageKind::is_image);
            if image {
                self.holders
                    .slot_mut(slot)
                    .target_mut()
                    .request_zoom(request, now);
            }
        }
    }

    /// Moves page engine output into the event queue, mirroring zoom changes
    /// of the current page to its neighbors when sharing is on.
    fn collect_page_events(&mut self, now: f64) {
        let changed = self.drain_pages();
        if !self.config.share_zoom_level {
            return;
        }
        if let Some((level, is_initial)) = changed {
            self.share_zoom_level(level, is_initial, now);
            self.drain_pages();
        }
    }

    fn drain_pages(&mut self) -> Option<(f64, bool)> {
        let mut changed = None;
        for (slot, holder) in self.holders.iter_mut().enumerate() {
            self.scratch.clear();
            holder.target_mut().drain_events_into(&mut self.scratch);
            for event in self.scratch.drain(..) {
                if let (CURRENT_SLOT, ZoomPanEvent::ZoomLevelChanged { level, is_initial }) =
                    (slot, event)
                {
                    changed = Some((level, is_initial));
                }
                self.events.push(PagerEvent::Page {
                    holder: holder.id(),
                    event,
                });
            }
        }
        changed
    }
}
