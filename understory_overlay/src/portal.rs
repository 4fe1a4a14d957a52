// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Portal mounting: panels render in a shared top-level container so ancestor
//! clipping and stacking contexts cannot hide them.
//!
//! The shared root is created lazily under the document body at
//! [`PORTAL_Z_INDEX`] and kept for reuse. Each mount appends a per-overlay
//! container to it, so mount order is stacking order.

use alloc::vec::Vec;

use crate::host::Host;

/// Stacking index of the shared portal root.
pub const PORTAL_Z_INDEX: i32 = 50;

/// Why a panel could not be mounted.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum MountError {
    /// The host has no document body.
    #[error("no document body to mount into")]
    NoDocument,
    /// The host refused to create a container.
    #[error("host refused to create a portal container")]
    ContainerRejected,
}

/// A mounted per-overlay container.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MountHandle<E> {
    key: u64,
    container: E,
}

impl<E: Copy> MountHandle<E> {
    /// The container the panel renders into.
    pub fn container(&self) -> E {
        self.container
    }
}

/// Shared portal root plus the containers mounted in it.
#[derive(Clone, Debug)]
pub struct Portal<E> {
    root: Option<E>,
    mounted: Vec<MountHandle<E>>,
    next_key: u64,
}

impl<E> Default for Portal<E> {
    fn default() -> Self {
        Self {
            root: None,
            mounted: Vec::new(),
            next_key: 0,
        }
    }
}

impl<E: Copy + Eq + core::fmt::Debug> Portal<E> {
    /// Create an empty portal. Nothing touches the host until the first mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared root, once created.
    pub fn root(&self) -> Option<E> {
        self.root
    }

    /// Number of live per-overlay containers.
    pub fn mounted_count(&self) -> usize {
        self.mounted.len()
    }

    /// Append a per-overlay container to the shared root, creating the root if needed.
    pub fn mount<H: Host<Element = E>>(
        &mut self,
        host: &mut H,
    ) -> Result<MountHandle<E>, MountError> {
        let root = self.ensure_root(host)?;
        let container = host
            .create_container(root, 0)
            .ok_or(MountError::ContainerRejected)?;
        let handle = MountHandle {
            key: self.next_key,
            container,
        };
        self.next_key += 1;
        self.mounted.push(handle);
        Ok(handle)
    }

    /// Remove a per-overlay container. Unmounting twice is a no-op.
    pub fn unmount<H: Host<Element = E>>(&mut self, host: &mut H, handle: MountHandle<E>) {
        let Some(pos) = self.mounted.iter().position(|m| m.key == handle.key) else {
            return;
        };
        self.mounted.remove(pos);
        host.remove_container(handle.container);
    }

    fn ensure_root<H: Host<Element = E>>(&mut self, host: &mut H) -> Result<E, MountError> {
        let body = host.document_body().ok_or(MountError::NoDocument)?;
        // The root may have been removed behind our back.
        if let Some(root) = self.root
            && host.contains(body, root)
        {
            return Ok(root);
        }
        let root = host
            .create_container(body, PORTAL_Z_INDEX)
            .ok_or(MountError::ContainerRejected)?;
        self.root = Some(root);
        Ok(root)
    }
}
