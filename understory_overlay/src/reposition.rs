// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener bookkeeping for the placement recomputation loop.
//!
//! While an overlay is `Open` it listens for scroll (capture phase, so inner
//! scroll containers are seen) and viewport resize. A zero-size measurement
//! queues a retry for the next animation frame instead of a listener.

use crate::host::Host;
use crate::types::{ListenerId, ListenerKind, ListenerPhase};

/// Recomputation triggers owned by one overlay.
#[derive(Copy, Clone, Debug, Default)]
pub struct Reposition {
    scroll: Option<ListenerId>,
    resize: Option<ListenerId>,
    retry: bool,
}

impl Reposition {
    /// True while scroll and resize listeners are attached.
    pub fn is_active(&self) -> bool {
        self.scroll.is_some()
    }

    /// Attach the scroll and resize listeners. No-op if already attached.
    pub fn start<H: Host>(&mut self, host: &mut H) {
        if self.is_active() {
            return;
        }
        self.scroll = Some(host.add_listener(ListenerKind::Scroll, ListenerPhase::Capture));
        self.resize = Some(host.add_listener(ListenerKind::Resize, ListenerPhase::Bubble));
    }

    /// Detach both listeners and drop any queued retry.
    pub fn stop<H: Host>(&mut self, host: &mut H) {
        if let Some(id) = self.scroll.take() {
            host.remove_listener(id);
        }
        if let Some(id) = self.resize.take() {
            host.remove_listener(id);
        }
        self.retry = false;
    }

    /// Queue a recomputation for the next animation frame.
    pub fn request_retry(&mut self) {
        self.retry = true;
    }

    /// True if a retry is queued.
    pub fn retry_pending(&self) -> bool {
        self.retry
    }

    /// Consume the queued retry.
    pub fn take_retry(&mut self) -> bool {
        core::mem::take(&mut self.retry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::headless::HeadlessHost;
    use kurbo::Rect;
    use understory_headless::Document;

    #[test]
    fn start_and_stop_pair_up() {
        let mut host = HeadlessHost::new(Document::new(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let mut r = Reposition::default();
        r.start(&mut host);
        r.start(&mut host);
        assert_eq!(host.listener_count_of(ListenerKind::Scroll), 1);
        assert_eq!(host.listener_count_of(ListenerKind::Resize), 1);

        r.request_retry();
        r.stop(&mut host);
        assert_eq!(host.listener_count(), 0);
        assert!(!r.take_retry());
    }

    #[test]
    fn retry_is_consumed_once() {
        let mut r = Reposition::default();
        r.request_retry();
        assert!(r.retry_pending());
        assert!(r.take_retry());
        assert!(!r.take_retry());
    }
}
