// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking over an overlay's two regions: its anchor and its panel.
//!
//! Feed [`HoverTracker::update`] the region under the pointer after each
//! move. Moving from anchor to panel produces a `Leave`/`Enter` pair but the
//! overlay is never "outside", which is how crossing the gap between
//! trigger and card avoids a close.
//!
//! ```
//! use understory_overlay::hover::{HoverEvent, HoverRegion, HoverTracker};
//!
//! let mut h = HoverTracker::default();
//! assert_eq!(h.update(Some(HoverRegion::Anchor)), vec![HoverEvent::Enter(HoverRegion::Anchor)]);
//! assert_eq!(
//!     h.update(Some(HoverRegion::Panel)),
//!     vec![HoverEvent::Leave(HoverRegion::Anchor), HoverEvent::Enter(HoverRegion::Panel)]
//! );
//! assert!(h.is_inside());
//! ```

use alloc::vec::Vec;

/// Part of a hover-triggered overlay the pointer can be over.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HoverRegion {
    /// The trigger element.
    Anchor,
    /// The floating panel.
    Panel,
}

/// A hover transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HoverEvent {
    /// The pointer entered a region.
    Enter(HoverRegion),
    /// The pointer left a region.
    Leave(HoverRegion),
}

/// Tracks which region of one overlay is hovered.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct HoverTracker {
    current: Option<HoverRegion>,
}

impl HoverTracker {
    /// The hovered region, if any.
    pub fn current(&self) -> Option<HoverRegion> {
        self.current
    }

    /// True while the pointer is over the anchor or the panel.
    pub fn is_inside(&self) -> bool {
        self.current.is_some()
    }

    /// Move to `region`, returning the leave then enter transitions.
    pub fn update(&mut self, region: Option<HoverRegion>) -> Vec<HoverEvent> {
        let mut out = Vec::new();
        if region == self.current {
            return out;
        }
        if let Some(old) = self.current {
            out.push(HoverEvent::Leave(old));
        }
        if let Some(new) = region {
            out.push(HoverEvent::Enter(new));
        }
        self.current = region;
        out
    }

    /// Forget the hovered region, returning its leave event.
    pub fn clear(&mut self) -> Vec<HoverEvent> {
        self.update(None)
    }
}
