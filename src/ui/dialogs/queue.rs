// SPDX-License-Identifier: MPL-2.0
//! Sequential submission path.
//!
//! Queued requests are admitted to the registry one at a time. The next entry
//! is admitted only once the previous queued dialog's signal has settled,
//! whether it resolved or was rejected.
//!
//! The queue does not serialize against [`DialogRegistry::submit`]: a direct
//! submission made while a queued dialog is showing opens immediately, shares
//! the registry bound, and may evict the queued dialog.

use super::instance::DialogId;
use super::outcome::{DismissReason, Outcome};
use super::registry::DialogRegistry;
use super::request::DialogRequest;
use super::signal::{channel, CompletionSignal, Resolver};
use std::collections::VecDeque;
use std::time::Instant;

/// A request waiting for its turn.
#[derive(Debug)]
struct PendingEntry {
    request: DialogRequest,
    resolver: Resolver,
}

#[derive(Debug, Default)]
pub struct DialogQueue {
    pending: VecDeque<PendingEntry>,
    in_flight: Option<DialogId>,
}

impl DialogQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request and drains as far as possible.
    pub fn enqueue(
        &mut self,
        request: DialogRequest,
        registry: &mut DialogRegistry,
    ) -> CompletionSignal {
        let (resolver, signal) = channel();
        self.pending.push_back(PendingEntry { request, resolver });
        self.drain(registry);
        signal
    }

    /// Advances the queue: retires a settled in-flight dialog and admits the
    /// next entry. Returns the id admitted, if any.
    pub fn drain(&mut self, registry: &mut DialogRegistry) -> Option<DialogId> {
        if let Some(id) = self.in_flight {
            if !registry.is_settled(id) {
                return None;
            }
            tracing::debug!(dialog = %id, "queued dialog settled");
            self.in_flight = None;
        }

        let entry = self.pending.pop_front()?;
        let id = registry.admit(entry.request, entry.resolver, Instant::now());
        tracing::debug!(dialog = %id, remaining = self.pending.len(), "admitted queued dialog");
        self.in_flight = Some(id);
        Some(id)
    }

    /// Drops every waiting entry, settling each as closed.
    pub fn clear(&mut self) -> usize {
        let count = self.pending.len();
        for mut entry in self.pending.drain(..) {
            entry
                .resolver
                .settle(Ok(Outcome::dismissed(DismissReason::Close)));
        }
        count
    }

    /// Number of entries waiting, not counting the one in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// The queued dialog currently showing.
    #[must_use]
    pub fn in_flight(&self) -> Option<DialogId> {
        self.in_flight
    }

    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some() || !self.pending.is_empty()
    }
}
