// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-overlay configuration and presets for common widgets.

use core::time::Duration;

use understory_placement::{Align, Collision, Placement, Side};

/// How an overlay is opened by the user.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Trigger {
    /// The host toggles it from a click on the anchor.
    #[default]
    Click,
    /// Pointer hover and keyboard focus on the anchor, debounced by intent timers.
    Hover,
    /// Only explicit `open`/`close` calls.
    Manual,
}

/// Entry and exit transition lengths.
///
/// A zero duration skips the matching transitional status.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Timing {
    /// How long `Opening` lasts before `Open`.
    pub enter: Duration,
    /// How long `Closing` lasts before `Closed`.
    pub exit: Duration,
}

impl Timing {
    /// No transitions.
    pub const INSTANT: Self = Self {
        enter: Duration::ZERO,
        exit: Duration::ZERO,
    };

    /// Same length for entry and exit.
    pub const fn symmetric(duration: Duration) -> Self {
        Self {
            enter: duration,
            exit: duration,
        }
    }
}

/// Configuration for one overlay instance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    /// Where the panel goes relative to the anchor.
    pub placement: Placement,
    /// Collision handling against the viewport.
    pub collision: Collision,
    /// Entry/exit transition lengths.
    pub timing: Timing,
    /// How the overlay is opened.
    pub trigger: Trigger,
    /// Hover intent delay before opening.
    pub open_delay: Duration,
    /// Hover intent delay before closing.
    pub close_delay: Duration,
    /// Delay before opening when the anchor gains focus.
    pub focus_delay: Duration,
    /// Close on pointer-down outside anchor and panel.
    pub dismiss_on_outside_click: bool,
    /// Close on Escape.
    pub dismiss_on_escape: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            collision: Collision::default(),
            timing: Timing::INSTANT,
            trigger: Trigger::Click,
            open_delay: Duration::ZERO,
            close_delay: Duration::ZERO,
            focus_delay: Duration::ZERO,
            dismiss_on_outside_click: true,
            dismiss_on_escape: true,
        }
    }
}

impl OverlayConfig {
    /// Click-triggered panel centered below its trigger.
    pub fn popover() -> Self {
        Self::default()
            .with_placement(Placement::new(Side::Bottom, Align::Center).with_side_offset(4.0))
    }

    /// Click-triggered menu aligned to the trigger's leading edge.
    pub fn dropdown_menu() -> Self {
        Self::default()
            .with_placement(Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0))
    }

    /// Listbox under a select trigger.
    pub fn select() -> Self {
        Self::dropdown_menu()
    }

    /// Menu opened at a pointer position; the anchor is a point-sized element.
    pub fn context_menu() -> Self {
        Self::default()
            .with_placement(Placement::new(Side::Right, Align::Start).with_side_offset(2.0))
            .with_trigger(Trigger::Manual)
    }

    /// Hover/focus label above its trigger.
    pub fn tooltip() -> Self {
        Self::default()
            .with_placement(Placement::new(Side::Top, Align::Center).with_side_offset(4.0))
            .with_trigger(Trigger::Hover)
            .with_delays(Duration::from_millis(700), Duration::ZERO)
    }

    /// Hover card with a grace period for moving the pointer onto the card.
    pub fn hover_card() -> Self {
        Self::default()
            .with_placement(Placement::new(Side::Bottom, Align::Center).with_side_offset(4.0))
            .with_trigger(Trigger::Hover)
            .with_delays(Duration::from_millis(700), Duration::from_millis(300))
    }

    /// Set the placement request.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Set collision handling.
    #[must_use]
    pub fn with_collision(mut self, collision: Collision) -> Self {
        self.collision = collision;
        self
    }

    /// Set transition lengths.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Set the trigger kind.
    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set hover open and close delays.
    #[must_use]
    pub fn with_delays(mut self, open: Duration, close: Duration) -> Self {
        self.open_delay = open;
        self.close_delay = close;
        self
    }

    /// Set the focus open delay.
    #[must_use]
    pub fn with_focus_delay(mut self, delay: Duration) -> Self {
        self.focus_delay = delay;
        self
    }

    /// Choose which dismissal signals close this overlay.
    #[must_use]
    pub fn with_dismissal(mut self, outside_click: bool, escape: bool) -> Self {
        self.dismiss_on_outside_click = outside_click;
        self.dismiss_on_escape = escape;
        self
    }
}
