// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlay --heading-base-level=0

//! Understory Overlay: a headless engine for anchored floating panels.
//!
//! Popovers, dropdown menus, selects, tooltips, hover cards, context menus and
//! command palettes all share one lifecycle: a panel is shown next to an
//! anchor, portaled out of its ancestors' clipping, kept in place while the
//! page scrolls, and dismissed by outside clicks, Escape, selection, or the
//! pointer leaving. This crate implements that lifecycle once, against a small
//! [`Host`] trait instead of a real document.
//!
//! ## Pieces
//!
//! - [`machine`]: the `Closed → Opening → Open → Closing` state machine, in
//!   uncontrolled or controlled mode.
//! - [`dismiss`]: one set of document listeners shared by every open overlay,
//!   dismissing the topmost layer first.
//! - [`portal`]: a shared top-level container with one child per mounted panel.
//! - [`reposition`]: scroll/resize listeners and zero-size retries feeding
//!   [`understory_placement`].
//! - [`intent`] and [`hover`]: debounced hover and focus opening.
//! - [`listbox`]: keyboard navigation and type-to-filter for list panels.
//! - [`manager`]: [`OverlayManager`] wires all of the above to a [`Host`].
//!
//! Time is passed in by the caller as a [`Duration`](core::time::Duration)
//! since any fixed origin; nothing here reads a clock or spawns a timer.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_headless::{Document, LocalElement};
//! use understory_overlay::adapters::headless::HeadlessHost;
//! use understory_overlay::{Key, Notification, OverlayConfig, OverlayManager, Status};
//!
//! let mut doc = Document::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let body = doc.body().unwrap();
//! let trigger = doc.insert(
//!     Some(body),
//!     LocalElement::with_bounds(Rect::new(20.0, 20.0, 60.0, 40.0)),
//! );
//!
//! let mut overlays = OverlayManager::new(HeadlessHost::new(doc));
//! let tip = overlays.insert(OverlayConfig::tooltip(), Some(trigger));
//!
//! overlays.pointer_move(Some(trigger), Duration::ZERO);
//! assert_eq!(overlays.next_deadline(), Some(Duration::from_millis(700)));
//! overlays.tick(Duration::from_millis(700));
//! assert_eq!(overlays.status(tip), Status::Open);
//!
//! overlays.key_down(Key::Escape, Duration::from_millis(800));
//! let notes = overlays.take_notifications();
//! assert!(notes.iter().any(|n| matches!(n, Notification::Dismissed { .. })));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. The `headless_adapter` feature
//! (on by default) provides a [`Host`] over `understory_headless`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod config;
pub mod dismiss;
pub mod host;
pub mod hover;
pub mod intent;
pub mod listbox;
pub mod machine;
pub mod manager;
pub mod portal;
pub mod reposition;
pub mod session;
pub mod types;

pub use config::{OverlayConfig, Timing, Trigger};
pub use host::{Host, NoDocument};
pub use manager::OverlayManager;
pub use types::{
    DismissReason, Key, ListenerId, ListenerKind, ListenerPhase, Notification, OverlayId, Status,
};
