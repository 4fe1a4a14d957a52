// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open a popover, place it, flip it near the viewport edge, and dismiss it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_examples --example popover_basics`

use core::time::Duration;

use kurbo::Rect;
use understory_headless::{Document, LocalElement};
use understory_overlay::adapters::headless::HeadlessHost;
use understory_overlay::{Key, OverlayConfig, OverlayManager, Status};
use understory_placement::Side;

fn main() {
    env_logger::init();

    let mut doc = Document::new(Rect::new(0.0, 0.0, 800.0, 600.0));
    let body = doc.body().unwrap();
    let button = doc.insert(
        Some(body),
        LocalElement::with_bounds(Rect::new(100.0, 100.0, 180.0, 130.0)),
    );

    let mut overlays = OverlayManager::new(HeadlessHost::new(doc));
    let popover = overlays.insert(OverlayConfig::popover(), Some(button));

    // Click on the trigger: the document sees the pointer-down, then the trigger toggles.
    overlays.pointer_down(Some(button), Duration::ZERO);
    overlays.toggle(popover, Duration::ZERO);

    // The renderer lays out the panel; the next frame measures it.
    let panel = overlays.panel(popover).unwrap();
    overlays
        .host_mut()
        .document_mut()
        .set_bounds(panel, Rect::new(0.0, 0.0, 120.0, 60.0));
    overlays.animation_frame();
    let pos = overlays.position(popover).unwrap();
    println!("== Below the trigger ==\n  {pos:?}");
    assert_eq!((pos.left, pos.top, pos.side), (80.0, 134.0, Side::Bottom));

    // Move the trigger to the bottom edge; a resize recomputes and flips.
    overlays
        .host_mut()
        .document_mut()
        .set_bounds(button, Rect::new(100.0, 560.0, 180.0, 590.0));
    overlays.resize();
    let pos = overlays.position(popover).unwrap();
    println!("== Flipped above ==\n  {pos:?}");
    assert_eq!(pos.side, Side::Top);
    assert_eq!(pos.top, 496.0);

    overlays.key_down(Key::Escape, Duration::from_millis(500));
    assert_eq!(overlays.status(popover), Status::Closed);

    println!("== Notifications ==");
    for n in overlays.take_notifications() {
        println!("  {n:?}");
    }
    println!(
        "listeners left: {}",
        overlays.host().listener_count()
    );
}
