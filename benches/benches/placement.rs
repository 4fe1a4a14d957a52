// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use understory_placement::{Align, Collision, Placement, Side, compute_position_with};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Anchors scattered over the viewport and beyond its edges, so a share of
/// them need a flip or a clamp.
fn gen_anchors(count: usize, viewport: Rect) -> Vec<Rect> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * (viewport.width() + 100.0) - 50.0;
            let y = rng.next_f64() * (viewport.height() + 100.0) - 50.0;
            let size = (40.0 + rng.next_f64() * 80.0, 20.0 + rng.next_f64() * 20.0);
            Rect::from_origin_size((x, y), size)
        })
        .collect()
}

const PLACEMENTS: [Placement; 4] = [
    Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0),
    Placement::new(Side::Top, Align::Center).with_side_offset(4.0),
    Placement::new(Side::Right, Align::Start).with_side_offset(2.0),
    Placement::new(Side::Left, Align::End),
];

fn bench_compute(c: &mut Criterion) {
    let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
    let anchors = gen_anchors(1024, viewport);
    let panel = Size::new(240.0, 180.0);

    let mut group = c.benchmark_group("compute_position");
    group.throughput(Throughput::Elements(anchors.len() as u64));
    for (name, collision) in [
        ("none", Collision::NONE),
        ("flip_clamp", Collision::default()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut flipped = 0_usize;
                for (i, &anchor) in anchors.iter().enumerate() {
                    let placement = PLACEMENTS[i % PLACEMENTS.len()];
                    let p = compute_position_with(anchor, panel, placement, viewport, collision);
                    flipped += usize::from(p.is_flipped_from(placement.side));
                }
                black_box(flipped);
            });
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let inputs = ["bottom", "bottom-start", "top-end", "left-center", "right"];
    c.bench_function("parse_placement", |b| {
        b.iter(|| {
            for s in inputs {
                black_box(s.parse::<Placement>().ok());
            }
        });
    });
}

criterion_group!(benches, bench_compute, bench_parse);
criterion_main!(benches);
