// SPDX-License-Identifier: MPL-2.0
//! Single-resolution completion signal.
//!
//! The registry keeps the [`Resolver`] half inside the dialog instance and
//! hands the [`CompletionSignal`] half to whoever submitted the request. The
//! signal can be awaited from any task or polled without blocking from the
//! UI thread via [`CompletionSignal::try_settled`].

use super::outcome::Outcome;
use crate::error::DialogError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// How a dialog settled: an outcome, or a rejection from its confirm handler.
pub type Settlement = Result<Outcome, DialogError>;

/// Creates a connected resolver/signal pair.
pub(crate) fn channel() -> (Resolver, CompletionSignal) {
    let (sender, receiver) = oneshot::channel();
    (
        Resolver {
            sender: Some(sender),
        },
        CompletionSignal {
            receiver,
            settled: None,
        },
    )
}

/// Resolving half. Settles at most once; later calls are ignored.
#[derive(Debug)]
pub(crate) struct Resolver {
    sender: Option<oneshot::Sender<Settlement>>,
}

impl Resolver {
    /// Settles the signal. Returns `false` if it had already settled.
    pub(crate) fn settle(&mut self, settlement: Settlement) -> bool {
        match self.sender.take() {
            Some(sender) => {
                // The consumer may have dropped its half; settlement still counts.
                let _ = sender.send(settlement);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.sender.is_none()
    }
}

/// Awaitable result of a submitted dialog.
#[derive(Debug)]
#[must_use = "dropping the signal discards the dialog's outcome"]
pub struct CompletionSignal {
    receiver: oneshot::Receiver<Settlement>,
    settled: Option<Settlement>,
}

impl CompletionSignal {
    /// Returns the settlement if it is already available.
    ///
    /// Once settled, every later call returns the same value.
    pub fn try_settled(&mut self) -> Option<Settlement> {
        if self.settled.is_none() {
            match self.receiver.try_recv() {
                Ok(settlement) => self.settled = Some(settlement),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => self.settled = Some(Err(DialogError::Dropped)),
            }
        }
        self.settled.clone()
    }

    /// Whether the dialog has settled.
    pub fn is_settled(&mut self) -> bool {
        self.try_settled().is_some()
    }
}

impl Future for CompletionSignal {
    type Output = Settlement;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if let Some(settled) = &this.settled {
            return Poll::Ready(settled.clone());
        }
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(result) => {
                let settlement = result.unwrap_or(Err(DialogError::Dropped));
                this.settled = Some(settlement.clone());
                Poll::Ready(settlement)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
