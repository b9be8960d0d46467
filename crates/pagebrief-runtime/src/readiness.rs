//! Ready-signal handshake between result windows and requests.
//!
//! A result window announces `resultReady` once its listener is attached.
//! The request that opened the window may finish before or after that
//! signal, so each surface has at most one slot: either a request waiting
//! for the signal, or a signal waiting for its request.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use pagebrief_protocols::types::SurfaceId;

enum Slot {
    Waiting {
        request_id: Uuid,
        tx: oneshot::Sender<()>,
    },
    Ready {
        at: Instant,
    },
}

/// How long an unclaimed ready signal is kept.
pub const DEFAULT_READY_TTL: Duration = Duration::from_secs(10);

/// Surface identity -> pending readiness. Entries are removed when the
/// signal is consumed, when the waiter times out, when a newer request
/// claims the surface, or when the owning request is released. Ready
/// signals nobody claims expire after the registry's TTL.
pub struct ReadinessRegistry {
    slots: Mutex<HashMap<SurfaceId, Slot>>,
    ttl: Duration,
}

impl Default for ReadinessRegistry {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_READY_TTL)
    }
}

/// A request's claim on a surface's ready signal.
pub enum ReadyWait {
    /// The surface signalled before the claim was made.
    AlreadyReady,
    Pending {
        surface: SurfaceId,
        request_id: Uuid,
        rx: oneshot::Receiver<()>,
    },
}

/// How waiting for a surface ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    Ready,
    TimedOut,
    Superseded,
}

impl ReadinessRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn prune_expired(&self, slots: &mut HashMap<SurfaceId, Slot>) {
        let ttl = self.ttl;
        slots.retain(|surface, slot| match slot {
            Slot::Ready { at } if at.elapsed() >= ttl => {
                debug!(surface = %surface, "Unclaimed ready signal expired");
                false
            }
            _ => true,
        });
    }

    /// Claim the ready signal of `surface` for `request_id`.
    ///
    /// A previous waiter on the same surface is superseded: its wait ends
    /// with [`ReadyOutcome::Superseded`].
    pub fn claim(&self, surface: SurfaceId, request_id: Uuid) -> ReadyWait {
        let mut slots = self.slots.lock();
        self.prune_expired(&mut slots);
        match slots.remove(&surface) {
            Some(Slot::Ready { .. }) => {
                debug!(surface = %surface, request_id = %request_id, "Surface was already ready");
                return ReadyWait::AlreadyReady;
            }
            Some(Slot::Waiting {
                request_id: previous,
                ..
            }) => {
                warn!(
                    surface = %surface,
                    superseded = %previous,
                    request_id = %request_id,
                    "Pending result superseded by a newer request"
                );
            }
            None => {}
        }

        let (tx, rx) = oneshot::channel();
        slots.insert(surface, Slot::Waiting { request_id, tx });
        ReadyWait::Pending {
            surface,
            request_id,
            rx,
        }
    }

    /// Record the ready signal of `surface`.
    ///
    /// Returns true when a waiting request was woken.
    pub fn mark_ready(&self, surface: SurfaceId) -> bool {
        let mut slots = self.slots.lock();
        self.prune_expired(&mut slots);
        let now = Instant::now();
        match slots.remove(&surface) {
            Some(Slot::Waiting { request_id, tx }) => {
                if tx.send(()).is_ok() {
                    debug!(surface = %surface, request_id = %request_id, "Woke waiting request");
                    return true;
                }
                // Waiter gone; keep the signal for whoever claims next.
                slots.insert(surface, Slot::Ready { at: now });
                false
            }
            Some(Slot::Ready { .. }) | None => {
                debug!(surface = %surface, "Ready signal recorded before any claim");
                slots.insert(surface, Slot::Ready { at: now });
                false
            }
        }
    }

    /// Drop the claim of `request_id` on `surface`, if it still holds one.
    pub fn forget(&self, surface: SurfaceId, request_id: Uuid) {
        let mut slots = self.slots.lock();
        if let Some(Slot::Waiting { request_id: owner, .. }) = slots.get(&surface) {
            if *owner == request_id {
                slots.remove(&surface);
            }
        }
    }

    /// The request `request_id` is finished with `surface`: drop its claim
    /// and any ready signal left behind. A newer request's claim is kept.
    pub fn release(&self, surface: SurfaceId, request_id: Uuid) {
        let mut slots = self.slots.lock();
        let owned = match slots.get(&surface) {
            Some(Slot::Waiting { request_id: owner, .. }) => *owner == request_id,
            Some(Slot::Ready { .. }) => true,
            None => false,
        };
        if owned {
            slots.remove(&surface);
        }
    }

    pub fn is_waiting(&self, surface: SurfaceId) -> bool {
        matches!(self.slots.lock().get(&surface), Some(Slot::Waiting { .. }))
    }

    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl ReadyWait {
    /// Wait for the ready signal for at most `timeout`.
    ///
    /// On timeout the claim is removed from `registry`, so a late signal is
    /// never paired with this request.
    pub async fn wait(self, registry: &ReadinessRegistry, timeout: Duration) -> ReadyOutcome {
        match self {
            ReadyWait::AlreadyReady => ReadyOutcome::Ready,
            ReadyWait::Pending {
                surface,
                request_id,
                rx,
            } => match tokio::time::timeout(timeout, rx).await {
                Ok(Ok(())) => ReadyOutcome::Ready,
                Ok(Err(_)) => ReadyOutcome::Superseded,
                Err(_) => {
                    registry.forget(surface, request_id);
                    ReadyOutcome::TimedOut
                }
            },
        }
    }
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
