// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use understory_event_state::pointer::TouchPoint;
use understory_event_state::tap::TapTarget;
use understory_pager::{PageKind, Pager, PagerConfig};
use understory_zoom_pan::{ZoomPan, ZoomPanConfig};

const VIEWPORT: Size = Size::new(400.0, 800.0);
const FRAME_MS: f64 = 16.0;

fn loaded_page() -> ZoomPan {
    let mut page = ZoomPan::new(ZoomPanConfig::default(), VIEWPORT);
    page.on_content_size_known(Size::new(1_600.0, 1_200.0));
    page.drain_events().for_each(drop);
    page
}

fn loaded_pager(pages: usize) -> Pager {
    let mut pager = Pager::new(PagerConfig::default(), vec![PageKind::Image; pages])
        .expect("default config is valid");
    pager.set_viewport_size(VIEWPORT);
    for index in 0..2 {
        if let Some(holder) = pager.holder_for(index) {
            pager.on_content_size_known(holder, Size::new(1_600.0, 1_200.0));
        }
    }
    pager.drain_events().for_each(drop);
    pager
}

fn bench_zoom_pan(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_zoom_pan");

    for moves in [16_u32, 128] {
        group.bench_function(format!("pinch(moves={moves})"), |b| {
            b.iter_batched(
                loaded_page,
                |mut page| {
                    page.handle_zoom_start(Point::new(150.0, 400.0), Point::new(250.0, 400.0));
                    for i in 1..=moves {
                        let spread = f64::from(i) * 2.0;
                        page.handle_zoom_move(
                            Point::new(150.0 - spread, 400.0),
                            Point::new(250.0 + spread, 400.0),
                        );
                    }
                    page.handle_zoom_end(0.0);
                    black_box(page.drain_events().count())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("momentum_until_rest", |b| {
        b.iter_batched(
            || {
                let mut page = loaded_page();
                page.zoom_to(1.0, Some(Point::new(200.0, 400.0)), None, None, 0.0);
                page.handle_pan_start();
                page
            },
            |mut page| {
                page.handle_pan_end(kurbo::Vec2::new(2.5, -1.5), 0.0);
                let mut now = 0.0;
                while page.is_animating() && now < 10_000.0 {
                    now += FRAME_MS;
                    page.tick(now);
                }
                black_box(page.drain_events().count())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_pager(c: &mut Criterion) {
    let mut group = c.benchmark_group("understory_pager");

    group.bench_function("swipe_and_settle", |b| {
        b.iter_batched(
            || loaded_pager(8),
            |mut pager| {
                let mut now = 0.0;
                pager.pointer_down(&[TouchPoint::new(0, 300.0, 400.0)], now);
                for i in 1..=12 {
                    now += FRAME_MS;
                    let x = 300.0 - f64::from(i) * 15.0;
                    pager.pointer_move(&[TouchPoint::new(0, x, 400.0)], now);
                }
                now += FRAME_MS;
                pager.pointer_up(&[], None, TapTarget::Content, now);
                while pager.needs_tick() && now < 10_000.0 {
                    now += FRAME_MS;
                    pager.tick(now);
                }
                black_box(pager.drain_events().count())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("go_to_sweep(pages=64)", |b| {
        b.iter_batched(
            || loaded_pager(64),
            |mut pager| {
                for index in 0..64 {
                    pager.go_to(index, 0.0);
                }
                black_box(pager.drain_events().count())
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_zoom_pan, bench_pager);
criterion_main!(benches);
