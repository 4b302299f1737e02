// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole gestures through the carousel, from pointer down to settled frame.

use kurbo::{Point, Size};
use understory_event_state::pointer::TouchPoint;
use understory_event_state::tap::{Tap, TapTarget};
use understory_pager::{NEXT_SLOT, PageKind, Pager, PagerConfig, PagerEvent};

const VIEWPORT: Size = Size::new(400.0, 800.0);

fn pager_with(config: PagerConfig, pages: usize) -> Pager {
    let mut p = Pager::new(config, vec![PageKind::Image; pages]).unwrap();
    p.set_viewport_size(VIEWPORT);
    p.drain_events().for_each(drop);
    p
}

fn pager(pages: usize) -> Pager {
    pager_with(PagerConfig::default(), pages)
}

fn load(p: &mut Pager, index: usize, natural: Size) {
    let holder = p.holder_for(index).expect("page is bound to a holder");
    p.on_content_size_known(holder, natural);
}

fn touch(x: f64, y: f64) -> TouchPoint {
    TouchPoint::new(0, x, y)
}

/// Drags one finger horizontally through `xs`, one move per 16ms, and
/// releases 16ms after the last move.
fn drag(p: &mut Pager, from: f64, xs: &[f64], t0: f64) -> f64 {
    p.pointer_down(&[touch(from, 400.0)], t0);
    let mut t = t0;
    for &x in xs {
        t += 16.0;
        p.pointer_move(&[touch(x, 400.0)], t);
    }
    t += 16.0;
    p.pointer_up(&[], None, TapTarget::Content, t);
    t
}

fn tap(p: &mut Pager, at: Point, t: f64) {
    p.pointer_down(&[TouchPoint::new(0, at.x, at.y)], t);
    p.pointer_up(&[], Some(at), TapTarget::Content, t + 10.0);
}

#[test]
fn flicked_swipe_changes_page_and_settles() {
    let mut p = pager(3);
    let t = drag(&mut p, 300.0, &[285.0, 270.0, 255.0, 240.0], 0.0);

    let events: Vec<_> = p.drain_events().collect();
    assert!(events.contains(&PagerEvent::Swiped {
        current: 1,
        diff: 1
    }));
    assert!(events.contains(&PagerEvent::Swipe {
        current: 1,
        index_diff: 1,
        items_diff: 1,
        previous: 0,
    }));
    assert!(p.needs_tick(), "settle animation runs after release");

    p.tick(t + 1_000.0);
    let events: Vec<_> = p.drain_events().collect();
    assert!(events.contains(&PagerEvent::SwipeAnimationComplete {
        current: 1,
        index_diff: 1,
        items_diff: 1,
    }));
    assert!(events.contains(&PagerEvent::MainScrollOffset(-448.0)));
    assert_eq!(p.main_scroll_position(), -448.0);
    assert!(!p.needs_tick());
}

#[test]
fn slow_committed_drag_advances() {
    let mut p = pager(3);
    p.pointer_down(&[touch(300.0, 400.0)], 0.0);
    p.pointer_move(&[touch(288.0, 400.0)], 16.0);
    p.pointer_move(&[touch(275.0, 400.0)], 60.0);
    p.pointer_move(&[touch(255.0, 400.0)], 120.0);
    p.pointer_move(&[touch(250.0, 400.0)], 130.0);
    p.pointer_up(&[], None, TapTarget::Content, 140.0);

    assert_eq!(p.current_index(), 1);
    let events: Vec<_> = p.drain_events().collect();
    assert!(events.contains(&PagerEvent::Swiped {
        current: 1,
        diff: 1
    }));

    p.tick(1_000.0);
    assert!(p.drain_events().any(|e| e
        == PagerEvent::SwipeAnimationComplete {
            current: 1,
            index_diff: 1,
            items_diff: 1,
        }));
}

#[test]
fn swipe_needs_more_than_thirty_pixels() {
    let mut p = pager(3);
    let t = drag(&mut p, 300.0, &[285.0, 270.0], 0.0);
    assert_eq!(p.current_index(), 0);
    p.tick(t + 1_000.0);
    assert_eq!(p.main_scroll_position(), 0.0);

    let mut p = pager(3);
    drag(&mut p, 300.0, &[285.0, 269.0], 0.0);
    assert_eq!(p.current_index(), 1);
}

#[test]
fn first_page_resists_and_springs_back() {
    let mut p = pager(3);
    p.pointer_down(&[touch(100.0, 400.0)], 0.0);
    p.pointer_move(&[touch(115.0, 400.0)], 16.0);
    p.pointer_move(&[touch(130.0, 400.0)], 32.0);
    p.pointer_move(&[touch(145.0, 400.0)], 48.0);
    assert_eq!(p.main_scroll_position(), 10.5);

    p.pointer_up(&[], None, TapTarget::Content, 64.0);
    let events: Vec<_> = p.drain_events().collect();
    assert!(events.contains(&PagerEvent::Swipe {
        current: 0,
        index_diff: 0,
        items_diff: 0,
        previous: 0,
    }));
    assert!(!events.iter().any(|e| matches!(e, PagerEvent::Swiped { .. })));

    p.tick(1_000.0);
    assert_eq!(p.main_scroll_position(), 0.0);
    assert_eq!(p.current_index(), 0);
}

#[test]
fn looping_wraps_backwards_from_first_page() {
    let config = PagerConfig {
        loop_pages: true,
        ..PagerConfig::default()
    };
    let mut p = pager_with(config, 5);
    drag(&mut p, 100.0, &[115.0, 130.0, 145.0, 160.0], 0.0);

    assert_eq!(p.current_index(), 4);
    let events: Vec<_> = p.drain_events().collect();
    assert!(events.contains(&PagerEvent::Swiped {
        current: 4,
        diff: -1
    }));
    let items: Vec<_> = p.holders().iter().map(|h| h.item()).collect();
    assert_eq!(items, vec![Some(3), Some(4), Some(0)]);
}

#[test]
fn caught_settle_keeps_reversed_travel() {
    let mut p = pager(3);
    load(&mut p, 0, Size::new(800.0, 800.0));
    load(&mut p, 1, Size::new(800.0, 800.0));
    drag(&mut p, 300.0, &[285.0, 270.0, 255.0, 240.0], 0.0);
    assert_eq!(p.current_index(), 1);

    p.tick(150.0);
    let caught = p.main_scroll_position();
    assert!(
        caught < 0.0 && caught > -448.0,
        "settle still under way at {caught}"
    );

    // The first 15px are eaten by direction detection.
    p.pointer_down(&[touch(200.0, 400.0)], 200.0);
    p.pointer_move(&[touch(215.0, 400.0)], 216.0);
    p.pointer_move(&[touch(240.0, 400.0)], 232.0);
    assert_eq!(p.main_scroll_position(), caught + 25.0);

    let mut t = 232.0;
    for x in [190.0, 140.0, 90.0, 40.0] {
        t += 16.0;
        p.pointer_move(&[touch(x, 400.0)], t);
    }
    let expected = caught - 175.0;
    assert!(
        (p.main_scroll_position() - expected).abs() < 1e-9,
        "reversing past the catch point loses no travel: {} vs {expected}",
        p.main_scroll_position()
    );
}

#[test]
fn single_tap_is_delivered_after_the_window() {
    let mut p = pager(3);
    let at = Point::new(120.0, 200.0);
    tap(&mut p, at, 0.0);
    assert_eq!(p.drain_events().count(), 0);
    assert!(p.needs_tick());

    p.tick(200.0);
    assert_eq!(p.drain_events().count(), 0);
    p.tick(320.0);
    let events: Vec<_> = p.drain_events().collect();
    assert_eq!(
        events,
        vec![PagerEvent::Tap(Tap {
            point: at,
            target: TapTarget::Content
        })]
    );
}

#[test]
fn distant_taps_stay_single() {
    let mut p = pager(3);
    tap(&mut p, Point::new(100.0, 100.0), 0.0);
    tap(&mut p, Point::new(200.0, 100.0), 100.0);
    p.tick(1_000.0);
    let taps = p
        .drain_events()
        .filter(|e| matches!(e, PagerEvent::Tap(_)))
        .count();
    assert_eq!(taps, 2);
}

#[test]
fn double_tap_zooms_the_current_page() {
    let mut p = pager(3);
    load(&mut p, 0, Size::new(800.0, 800.0));
    assert_eq!(p.current_target().zoom_level(), 0.5);

    tap(&mut p, Point::new(200.0, 400.0), 0.0);
    tap(&mut p, Point::new(205.0, 405.0), 100.0);
    let events: Vec<_> = p.drain_events().collect();
    assert!(events.contains(&PagerEvent::DoubleTap(Point::new(205.0, 405.0))));
    assert!(p.is_animating());

    p.tick(1_000.0);
    assert_eq!(p.current_target().zoom_level(), 1.0);
    assert!(!p.drain_events().any(|e| matches!(e, PagerEvent::Tap(_))));
}

#[test]
fn pinch_through_the_pager() {
    let mut p = pager(3);
    load(&mut p, 0, Size::new(800.0, 800.0));

    let a = TouchPoint::new(0, 150.0, 400.0);
    let b = TouchPoint::new(1, 250.0, 400.0);
    p.pointer_down(&[a], 0.0);
    p.pointer_down(&[a, b], 5.0);
    let a2 = TouchPoint::new(0, 100.0, 400.0);
    let b2 = TouchPoint::new(1, 300.0, 400.0);
    p.pointer_move(&[a2, b2], 20.0);
    assert_eq!(p.current_target().zoom_level(), 1.0);

    p.pointer_up(&[a2], Some(b2.pos), TapTarget::Content, 40.0);
    p.pointer_up(&[], Some(a2.pos), TapTarget::Content, 60.0);
    p.tick(1_000.0);

    assert_eq!(p.current_target().zoom_level(), 1.0);
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.main_scroll_position(), 0.0);
    assert!(
        !p.drain_events().any(|e| matches!(e, PagerEvent::Tap(_))),
        "a pinch is never a tap"
    );
}

#[test]
fn vertical_drag_pans_a_zoomed_page() {
    let mut p = pager(3);
    load(&mut p, 0, Size::new(800.0, 1_600.0));
    tap(&mut p, Point::new(200.0, 400.0), 0.0);
    tap(&mut p, Point::new(200.0, 400.0), 100.0);
    p.tick(1_000.0);
    assert_eq!(p.current_target().zoom_level(), 1.0);
    let before = p.current_target().pan_offset();

    p.pointer_down(&[touch(200.0, 400.0)], 2_000.0);
    p.pointer_move(&[touch(202.0, 370.0)], 2_016.0);
    p.pointer_move(&[touch(202.0, 340.0)], 2_032.0);

    assert_eq!(p.main_scroll_position(), 0.0);
    assert_eq!(p.current_target().pan_offset().y, before.y - 30.0);
}

#[test]
fn shared_zoom_follows_to_the_next_page() {
    let config = PagerConfig {
        share_zoom_level: true,
        ..PagerConfig::default()
    };
    let mut p = pager_with(config, 3);
    load(&mut p, 0, Size::new(800.0, 800.0));
    load(&mut p, 1, Size::new(800.0, 800.0));

    let a = TouchPoint::new(0, 150.0, 400.0);
    let b = TouchPoint::new(1, 250.0, 400.0);
    p.pointer_down(&[a], 0.0);
    p.pointer_down(&[a, b], 5.0);
    p.pointer_move(
        &[
            TouchPoint::new(0, 100.0, 400.0),
            TouchPoint::new(1, 300.0, 400.0),
        ],
        20.0,
    );

    assert_eq!(p.shared_zoom_level(), Some(1.0));
    assert_eq!(p.holders().slot(NEXT_SLOT).target().zoom_level(), 1.0);
}

#[test]
fn leaving_a_zoomed_page_resets_it() {
    let mut p = pager(3);
    load(&mut p, 0, Size::new(800.0, 800.0));
    load(&mut p, 1, Size::new(800.0, 800.0));
    tap(&mut p, Point::new(200.0, 400.0), 0.0);
    tap(&mut p, Point::new(200.0, 400.0), 100.0);
    p.tick(1_000.0);
    let zoomed = p.holder_for(0).expect("page 0 is bound");
    assert_eq!(p.current_target().zoom_level(), 1.0);

    p.go_next(2_000.0);
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.holder_for(0), Some(zoomed));
    let left_behind = p
        .holders()
        .iter()
        .find(|h| h.id() == zoomed)
        .expect("holder still in the ring");
    assert_eq!(left_behind.target().zoom_level(), 0.5);
}

#[test]
fn replacing_pages_rebinds_holders() {
    let mut p = pager(2);
    p.set_pages(vec![PageKind::Image, PageKind::Static, PageKind::Image], 0.0);
    let items: Vec<_> = p.holders().iter().map(|h| h.item()).collect();
    assert_eq!(items, vec![None, Some(0), Some(1)]);
    assert_eq!(p.page(1), Some(PageKind::Static));

    p.set_pages(Vec::new(), 0.0);
    assert!(p.is_empty());
    let items: Vec<_> = p.holders().iter().map(|h| h.item()).collect();
    assert_eq!(items, vec![None, None, None]);
}
