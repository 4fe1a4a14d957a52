// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use understory_headless::{Document, ElementId, LocalElement};
use understory_overlay::adapters::headless::HeadlessHost;
use understory_overlay::listbox::{DisabledPolicy, ListItem, Listbox, NavPolicy};
use understory_overlay::{Key, OverlayConfig, OverlayManager};

const WORDS: [&str; 12] = [
    "open", "save", "close", "find", "replace", "format", "toggle", "split", "merge", "rename",
    "delete", "export",
];

fn gen_items(count: usize) -> Vec<ListItem<u32>> {
    (0..count)
        .map(|i| {
            let verb = WORDS[i % WORDS.len()];
            let noun = WORDS[(i / WORDS.len()) % WORDS.len()];
            ListItem::new(i as u32, format!("{verb} {noun} {i}"))
                .with_keywords([noun])
                .with_disabled(i % 7 == 0)
        })
        .collect()
}

fn bench_listbox(c: &mut Criterion) {
    let mut group = c.benchmark_group("listbox");
    for &n in &[100_usize, 1_000, 10_000] {
        let items = gen_items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("type_filter_n{n}"), |b| {
            b.iter_batched(
                || {
                    Listbox::new(
                        items.clone(),
                        NavPolicy {
                            disabled: DisabledPolicy::Skip,
                            ..NavPolicy::default()
                        },
                    )
                },
                |mut list| {
                    for ch in "ren".chars() {
                        list.handle_key(Key::Character(ch));
                    }
                    black_box(list.filtered_len());
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("arrow_walk_n{n}"), |b| {
            let mut list = Listbox::new(items.clone(), NavPolicy::default());
            list.set_scroll_metrics(28.0, 400.0);
            b.iter(|| {
                list.handle_key(Key::Home);
                for _ in 0..64 {
                    list.handle_key(Key::ArrowDown);
                }
                black_box(list.scroll_top());
            });
        });
    }
    group.finish();
}

fn manager_with_open(count: usize) -> (OverlayManager<HeadlessHost>, ElementId) {
    let mut doc = Document::new(Rect::new(0.0, 0.0, 1280.0, 800.0));
    let body = doc.body().unwrap();
    let scroller = doc.insert(
        Some(body),
        LocalElement::with_bounds(Rect::new(0.0, 0.0, 1280.0, 4000.0)),
    );
    let mut overlays = OverlayManager::new(HeadlessHost::new(doc));
    for i in 0..count {
        let y = 20.0 + i as f64 * 36.0;
        let anchor = overlays
            .host_mut()
            .document_mut()
            .insert(
                Some(scroller),
                LocalElement::with_bounds(Rect::new(40.0, y, 140.0, y + 24.0)),
            );
        let config = OverlayConfig::popover().with_dismissal(false, true);
        let id = overlays.insert(config, Some(anchor));
        overlays.open(id, Duration::ZERO);
        let panel = overlays.panel(id).unwrap();
        overlays
            .host_mut()
            .document_mut()
            .set_bounds(panel, Rect::new(0.0, 0.0, 200.0, 120.0));
    }
    overlays.animation_frame();
    overlays.take_notifications();
    (overlays, scroller)
}

fn bench_manager(c: &mut Criterion) {
    let mut group = c.benchmark_group("manager");
    for &n in &[1_usize, 16, 64] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scroll_reposition_n{n}"), |b| {
            let (mut overlays, scroller) = manager_with_open(n);
            let mut dy = 1.0;
            b.iter(|| {
                dy = -dy;
                overlays
                    .host_mut()
                    .document_mut()
                    .scroll_by(scroller, Vec2::new(0.0, dy));
                overlays.scroll();
                black_box(overlays.take_notifications().len());
            });
        });
        group.bench_function(format!("open_close_cycle_n{n}"), |b| {
            b.iter_batched(
                || manager_with_open(n).0,
                |mut overlays| {
                    for _ in 0..n {
                        overlays.key_down(Key::Escape, Duration::from_millis(1));
                    }
                    black_box(overlays.portal().mounted_count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_listbox, bench_manager);
criterion_main!(benches);
