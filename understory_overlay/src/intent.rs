// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover and focus intent: debounced open/close decisions.
//!
//! An [`IntentTimer`] holds at most one pending action. Scheduling an open
//! cancels a pending close and the reverse, which is what keeps a hover card
//! open while the pointer crosses the gap between trigger and card.
//!
//! ```
//! use core::time::Duration;
//! use understory_overlay::intent::{IntentAction, IntentTimer};
//! use understory_overlay::DismissReason;
//!
//! let ms = Duration::from_millis;
//! let mut t = IntentTimer::default();
//! t.schedule_open(ms(0), ms(700));
//! t.schedule_close(ms(100), ms(300), DismissReason::PointerLeave);
//! t.schedule_open(ms(200), ms(700));
//! assert_eq!(t.poll(ms(850)), None);
//! assert_eq!(t.poll(ms(900)), Some(IntentAction::Open));
//! ```

use core::time::Duration;

use crate::types::DismissReason;

/// What a fired intent timer asks for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IntentAction {
    /// Open the overlay.
    Open,
    /// Close it with the given reason.
    Close(DismissReason),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Pending {
    action: IntentAction,
    fire_at: Duration,
}

/// One overlay's pending hover/focus decision.
#[derive(Copy, Clone, Debug, Default)]
pub struct IntentTimer {
    pending: Option<Pending>,
}

impl IntentTimer {
    /// Schedule an open `delay` from `now`.
    ///
    /// A pending close is cancelled. A pending open keeps its original deadline.
    pub fn schedule_open(&mut self, now: Duration, delay: Duration) {
        match self.pending {
            Some(Pending {
                action: IntentAction::Open,
                ..
            }) => {}
            _ => {
                self.pending = Some(Pending {
                    action: IntentAction::Open,
                    fire_at: now + delay,
                });
            }
        }
    }

    /// Schedule a close `delay` from `now`.
    ///
    /// A pending open is cancelled. A pending close keeps its original deadline.
    pub fn schedule_close(&mut self, now: Duration, delay: Duration, reason: DismissReason) {
        match self.pending {
            Some(Pending {
                action: IntentAction::Close(_),
                ..
            }) => {}
            _ => {
                self.pending = Some(Pending {
                    action: IntentAction::Close(reason),
                    fire_at: now + delay,
                });
            }
        }
    }

    /// Drop any pending action.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Drop a pending close, leaving a pending open alone.
    pub fn cancel_close(&mut self) {
        if matches!(self.pending(), Some(IntentAction::Close(_))) {
            self.pending = None;
        }
    }

    /// Drop a pending open, leaving a pending close alone.
    pub fn cancel_open(&mut self) {
        if self.pending() == Some(IntentAction::Open) {
            self.pending = None;
        }
    }

    /// The pending action, if any.
    pub fn pending(&self) -> Option<IntentAction> {
        self.pending.map(|p| p.action)
    }

    /// When the pending action fires.
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.map(|p| p.fire_at)
    }

    /// Fire the pending action if its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<IntentAction> {
        let p = self.pending?;
        if now < p.fire_at {
            return None;
        }
        self.pending = None;
        Some(p.action)
    }
}
