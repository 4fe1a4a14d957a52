// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_placement --heading-base-level=0

//! Understory Placement: anchored rectangle placement for floating UI.
//!
//! Given an anchor rectangle, a panel size, a [`Placement`] request, and the viewport,
//! [`compute_position`] returns where the panel's top-left corner goes.
//!
//! - The panel is placed on the requested [`Side`] and aligned by [`Align`].
//! - Overflow along the main axis flips the panel to the opposite side.
//! - Overflow along the cross axis clamps the panel inward, keeping a margin.
//! - When both axes overflow, the flip happens first and the clamp applies to
//!   whatever still overflows afterwards.
//!
//! This is not a layout engine. It places one panel against one anchor and the viewport,
//! with no state between calls.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use understory_placement::{Align, Placement, Side, compute_position};
//!
//! let anchor = Rect::from_origin_size((50.0, 100.0), (80.0, 30.0));
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let placement = Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0);
//!
//! let p = compute_position(anchor, Size::new(200.0, 120.0), placement, viewport);
//! assert_eq!((p.top, p.left), (134.0, 50.0));
//! assert_eq!(p.side, Side::Bottom);
//!
//! // A short viewport flips the panel above the anchor, then clamps it inside.
//! let short = Rect::new(0.0, 0.0, 800.0, 150.0);
//! let p = compute_position(anchor, Size::new(200.0, 120.0), placement, short);
//! assert_eq!(p.side, Side::Top);
//! assert_eq!(p.top, 8.0);
//! ```
//!
//! ## Unmeasured input
//!
//! A zero-sized anchor or panel usually means layout has not happened yet.
//! The result is then the anchor's top-left with [`Positioned::settled`] set to `false`,
//! and callers are expected to try again on the next frame.
//!
//! ## Placement strings
//!
//! [`Placement`] implements `FromStr` and `Display` for the `side[-align]` notation
//! used by component properties, such as `"bottom-start"` or `"left"`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod compute;
mod types;

pub use compute::{compute_position, compute_position_with};
pub use types::{Align, Collision, ParsePlacementError, Placement, Positioned, Side};
