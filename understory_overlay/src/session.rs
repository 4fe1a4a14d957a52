// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The record of one open/close cycle.

use understory_placement::Positioned;

use crate::portal::MountHandle;
use crate::types::{DismissReason, OverlayId, Status};

/// State that exists while an overlay is mounted.
///
/// Created on the first transition out of `Closed` and dropped on reaching
/// `Closed` again, so an overlay has at most one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Session<E> {
    pub(crate) id: OverlayId,
    pub(crate) status: Status,
    pub(crate) position: Option<Positioned>,
    pub(crate) dismissed: Option<DismissReason>,
    pub(crate) mount: MountHandle<E>,
}

impl<E: Copy> Session<E> {
    pub(crate) fn new(id: OverlayId, status: Status, mount: MountHandle<E>) -> Self {
        Self {
            id,
            status,
            position: None,
            dismissed: None,
            mount,
        }
    }

    /// The overlay this session belongs to.
    pub fn id(&self) -> OverlayId {
        self.id
    }

    /// Current status. Never `Closed` for a live session.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Last computed position, defined only while `Opening` or `Open`.
    pub fn position(&self) -> Option<Positioned> {
        if self.status.is_active() {
            self.position
        } else {
            None
        }
    }

    /// Reason of the close in progress, if any.
    pub fn dismissed(&self) -> Option<DismissReason> {
        self.dismissed
    }

    /// The mounted panel container.
    pub fn panel(&self) -> E {
        self.mount.container()
    }

    pub(crate) fn mount(&self) -> MountHandle<E> {
        self.mount
    }
}
