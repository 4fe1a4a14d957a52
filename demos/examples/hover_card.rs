// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A hover card driven by a scripted pointer path and a polling clock.
//!
//! The loop only wakes at `next_deadline`, the way a host would schedule a timer.
//!
//! Run:
//! - `cargo run -p understory_examples --example hover_card`

use core::time::Duration;

use kurbo::Rect;
use understory_headless::{Document, LocalElement};
use understory_overlay::adapters::headless::HeadlessHost;
use understory_overlay::{Notification, OverlayConfig, OverlayManager};

#[derive(Copy, Clone, Debug)]
enum Over {
    Nothing,
    Trigger,
    Card,
}

fn main() {
    env_logger::init();
    let ms = Duration::from_millis;

    let mut doc = Document::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let body = doc.body().unwrap();
    let avatar = doc.insert(
        Some(body),
        LocalElement::with_bounds(Rect::new(300.0, 200.0, 340.0, 240.0)),
    );
    let mut overlays = OverlayManager::new(HeadlessHost::new(doc));
    let card = overlays.insert(OverlayConfig::hover_card(), Some(avatar));

    let script = [
        (ms(0), Over::Trigger),
        (ms(300), Over::Nothing),
        (ms(1000), Over::Trigger),
        (ms(2000), Over::Nothing),
        (ms(2100), Over::Card),
        (ms(3000), Over::Nothing),
    ];

    let mut now = Duration::ZERO;
    for (at, over) in script {
        // Fire every timer due before the next pointer move.
        while let Some(deadline) = overlays.next_deadline() {
            if deadline > at {
                break;
            }
            now = deadline;
            overlays.tick(now);
        }
        now = at;
        let target = match over {
            Over::Nothing => Some(body),
            Over::Trigger => Some(avatar),
            Over::Card => overlays.panel(card),
        };
        overlays.pointer_move(target, now);
        println!("{:>5} ms  over {over:?}: {:?}", now.as_millis(), overlays.status(card));
    }
    while let Some(deadline) = overlays.next_deadline() {
        overlays.tick(deadline);
        println!("{:>5} ms  timer: {:?}", deadline.as_millis(), overlays.status(card));
    }

    for n in overlays.take_notifications() {
        if let Notification::StatusChanged { from, to, .. } = n {
            println!("  {from:?} -> {to:?}");
        }
    }
}
