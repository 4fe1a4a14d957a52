// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A menu with a submenu: outside clicks close the innermost layer first.
//!
//! Pointer events are resolved to elements with the headless hit test, the
//! way a real document would target them.
//!
//! Run:
//! - `cargo run -p understory_examples --example nested_menus`

use core::time::Duration;

use kurbo::{Point, Rect, Size};
use understory_headless::{Document, LocalElement};
use understory_overlay::adapters::headless::HeadlessHost;
use understory_overlay::{OverlayConfig, OverlayManager, Status};
use understory_placement::{Align, Placement, Side};

fn main() {
    env_logger::init();
    let ms = Duration::from_millis;

    let mut doc = Document::new(Rect::new(0.0, 0.0, 1024.0, 768.0));
    let body = doc.body().unwrap();
    let file = doc.insert(
        Some(body),
        LocalElement::with_bounds(Rect::new(10.0, 10.0, 60.0, 34.0)),
    );
    let mut overlays = OverlayManager::new(HeadlessHost::new(doc));

    let menu = overlays.insert(OverlayConfig::dropdown_menu(), Some(file));
    click(&mut overlays, Point::new(20.0, 20.0), ms(0));
    overlays.open(menu, ms(0));

    // The renderer sizes the menu, then moves it where it was placed.
    let size = Size::new(160.0, 90.0);
    let panel = overlays.panel(menu).unwrap();
    overlays
        .host_mut()
        .document_mut()
        .set_bounds(panel, Rect::from_origin_size(Point::ZERO, size));
    overlays.animation_frame();
    let menu_rect = overlays.position(menu).unwrap().rect(size);
    let doc = overlays.host_mut().document_mut();
    doc.set_bounds(panel, menu_rect);
    let export = doc.insert(
        Some(panel),
        LocalElement::with_bounds(Rect::new(
            menu_rect.x0,
            menu_rect.y0,
            menu_rect.x1,
            menu_rect.y0 + 30.0,
        )),
    );

    // Clicking "Export" opens the submenu beside it and leaves the menu open.
    let submenu = overlays.insert(
        OverlayConfig::dropdown_menu()
            .with_placement(Placement::new(Side::Right, Align::Start).with_side_offset(2.0)),
        Some(export),
    );
    click(&mut overlays, Point::new(menu_rect.x0 + 5.0, menu_rect.y0 + 5.0), ms(100));
    overlays.open(submenu, ms(100));
    println!(
        "after opening submenu: menu={:?} submenu={:?}",
        overlays.status(menu),
        overlays.status(submenu)
    );

    click(&mut overlays, Point::new(900.0, 700.0), ms(200));
    println!(
        "after 1st outside click: menu={:?} submenu={:?}",
        overlays.status(menu),
        overlays.status(submenu)
    );
    assert_eq!(overlays.status(submenu), Status::Closed);
    assert_eq!(overlays.status(menu), Status::Open);

    click(&mut overlays, Point::new(900.0, 700.0), ms(300));
    println!(
        "after 2nd outside click: menu={:?} submenu={:?}",
        overlays.status(menu),
        overlays.status(submenu)
    );
    assert_eq!(overlays.status(menu), Status::Closed);
}

fn click(overlays: &mut OverlayManager<HeadlessHost>, at: Point, now: Duration) {
    let target = overlays.host().pointer_target(at);
    if let Some((id, reason)) = overlays.pointer_down(target, now) {
        println!("  click at {at:?} dismissed {id:?} ({reason:?})");
    }
}
