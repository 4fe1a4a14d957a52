// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay state machine: `Closed → Opening → Open → Closing → Closed`.
//!
//! ## Modes
//!
//! An uncontrolled machine applies its own transitions.
//! A controlled machine never does: every operation returns
//! [`Transition::Requested`] and the owner applies the status with
//! [`StateMachine::sync`] on a later cycle. The mode is fixed at creation.
//!
//! ## Time
//!
//! The machine is headless. Callers pass `now` (time since any fixed origin) and
//! call [`StateMachine::poll`] at or after [`StateMachine::deadline`] to finish
//! entry and exit transitions.

use core::time::Duration;

use crate::config::Timing;
use crate::types::{DismissReason, Status};

/// Whether the machine owns its status.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Transitions apply immediately.
    Uncontrolled,
    /// Transitions are requests; the owner applies them with [`StateMachine::sync`].
    Controlled,
}

/// Result of a state machine operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Transition {
    /// Nothing happened.
    None,
    /// The status changed.
    Changed {
        /// Previous status.
        from: Status,
        /// New status.
        to: Status,
    },
    /// Controlled mode: the owner should apply `status`.
    Requested {
        /// Requested status.
        status: Status,
        /// Close reason, when the request is a close.
        reason: Option<DismissReason>,
    },
}

/// Status bookkeeping for one overlay instance.
#[derive(Clone, Debug)]
pub struct StateMachine {
    mode: Mode,
    status: Status,
    timing: Timing,
    deadline: Option<Duration>,
    reason: Option<DismissReason>,
    requested: Option<DismissReason>,
}

impl StateMachine {
    /// An uncontrolled machine starting `Closed`.
    pub fn new(timing: Timing) -> Self {
        Self {
            mode: Mode::Uncontrolled,
            status: Status::Closed,
            timing,
            deadline: None,
            reason: None,
            requested: None,
        }
    }

    /// A controlled machine starting `Closed`.
    ///
    /// Apply the owner's initial status with [`StateMachine::sync`].
    pub fn controlled(timing: Timing) -> Self {
        Self {
            mode: Mode::Controlled,
            ..Self::new(timing)
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Reason recorded by the last close.
    ///
    /// For controlled machines this is the reason of the last close request,
    /// recorded once the owner applies it, or `Programmatic` if the owner
    /// closed without a request.
    pub fn reason(&self) -> Option<DismissReason> {
        self.reason
    }

    /// When [`StateMachine::poll`] next has work to do.
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Request the open status.
    ///
    /// No-op while `Opening` or `Open`. From `Closing`, the pending close is
    /// cancelled outright and the machine goes straight to `Open`.
    pub fn open(&mut self, now: Duration) -> Transition {
        let target = match self.status {
            Status::Opening | Status::Open => return Transition::None,
            Status::Closing => Status::Open,
            Status::Closed if self.timing.enter.is_zero() => Status::Open,
            Status::Closed => Status::Opening,
        };
        self.go(target, None, now)
    }

    /// Request the closed status, recording `reason`.
    ///
    /// No-op while `Closing` or `Closed`.
    pub fn close(&mut self, reason: DismissReason, now: Duration) -> Transition {
        let target = match self.status {
            Status::Closing | Status::Closed => return Transition::None,
            _ if self.timing.exit.is_zero() => Status::Closed,
            _ => Status::Closing,
        };
        self.go(target, Some(reason), now)
    }

    /// `open` when closed, otherwise `close(Programmatic)`.
    pub fn toggle(&mut self, now: Duration) -> Transition {
        match self.status {
            Status::Closed => self.open(now),
            _ => self.close(DismissReason::Programmatic, now),
        }
    }

    /// Finish a transition whose deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Transition {
        match self.deadline {
            Some(at) if now >= at => {}
            _ => return Transition::None,
        }
        self.deadline = None;
        let next = match self.status {
            Status::Opening => Status::Open,
            Status::Closing => Status::Closed,
            _ => return Transition::None,
        };
        match self.mode {
            Mode::Uncontrolled => self.set(next, now),
            Mode::Controlled => Transition::Requested {
                status: next,
                reason: None,
            },
        }
    }

    /// Apply a status chosen by the owner of a controlled machine.
    ///
    /// Calling this on an uncontrolled machine is a contract violation: it
    /// panics in debug builds and is logged and ignored otherwise.
    pub fn sync(&mut self, status: Status, now: Duration) -> Transition {
        debug_assert!(
            self.mode == Mode::Controlled,
            "sync() called on an uncontrolled overlay; the mode is fixed at creation"
        );
        if self.mode != Mode::Controlled {
            log::error!("ignoring sync({status:?}) on an uncontrolled overlay");
            return Transition::None;
        }
        if status == self.status {
            return Transition::None;
        }
        if status.is_active() {
            self.reason = None;
            self.requested = None;
        } else if self.status.is_active() {
            self.reason = Some(self.requested.take().unwrap_or(DismissReason::Programmatic));
        }
        self.set(status, now)
    }

    /// Drop straight to `Closed` regardless of mode, used when the environment
    /// cannot show the overlay at all.
    pub(crate) fn force_closed(&mut self) {
        self.status = Status::Closed;
        self.deadline = None;
    }

    fn go(&mut self, target: Status, reason: Option<DismissReason>, now: Duration) -> Transition {
        match self.mode {
            Mode::Controlled => {
                self.requested = reason;
                Transition::Requested {
                    status: target,
                    reason,
                }
            }
            Mode::Uncontrolled => {
                self.reason = reason;
                self.set(target, now)
            }
        }
    }

    fn set(&mut self, to: Status, now: Duration) -> Transition {
        let from = self.status;
        self.status = to;
        self.deadline = match to {
            Status::Opening => Some(now + self.timing.enter),
            Status::Closing => Some(now + self.timing.exit),
            Status::Open | Status::Closed => None,
        };
        Transition::Changed { from, to }
    }
}
