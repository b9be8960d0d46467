//! In-process result windows.
//!
//! Each window is a task that attaches its listener after a start-up delay,
//! announces itself with `resultReady`, and renders what it receives into a
//! [`ResultView`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info};

use pagebrief_protocols::error::PlatformError;
use pagebrief_protocols::types::{ControlMessage, MessageSender, ResultMessage, SurfaceId};
use pagebrief_surface::{ApplyOutcome, ResultView};

/// Something a window did that the host has to act on.
#[derive(Debug)]
pub enum SurfaceEvent {
    /// Inbound control message for the coordinator.
    Message {
        message: ControlMessage,
        sender: MessageSender,
    },
    /// The window rendered its first result.
    Rendered { surface: SurfaceId, view: ResultView },
}

type Listeners = Arc<Mutex<HashMap<SurfaceId, mpsc::UnboundedSender<ResultMessage>>>>;

pub struct SurfaceHost {
    next_id: AtomicU64,
    listeners: Listeners,
    attach_delay: Duration,
    events: mpsc::UnboundedSender<SurfaceEvent>,
}

impl SurfaceHost {
    pub fn new(attach_delay: Duration) -> (Self, mpsc::UnboundedReceiver<SurfaceEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let host = Self {
            next_id: AtomicU64::new(1),
            listeners: Arc::new(Mutex::new(HashMap::new())),
            attach_delay,
            events,
        };
        (host, rx)
    }

    /// Open a window. It cannot receive messages until its listener attaches.
    pub fn open(&self, width: u32, height: u32) -> SurfaceId {
        let surface = SurfaceId(self.next_id.fetch_add(1, Ordering::Relaxed));
        info!(surface = %surface, width, height, "Result window opened");

        let listeners = self.listeners.clone();
        let events = self.events.clone();
        let delay = self.attach_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let mut view = ResultView::new();
            let (tx, mut inbox) = mpsc::unbounded_channel();
            listeners.lock().insert(surface, tx);
            debug!(surface = %surface, "Listener attached");

            let _ = events.send(SurfaceEvent::Message {
                message: view.ready_message(),
                sender: MessageSender::surface(surface),
            });

            let mut rendered = false;
            while let Some(message) = inbox.recv().await {
                if view.apply(message) == ApplyOutcome::Rendered && !rendered {
                    rendered = true;
                    let _ = events.send(SurfaceEvent::Rendered {
                        surface,
                        view: view.clone(),
                    });
                }
            }
            debug!(surface = %surface, "Window closed");
        });

        surface
    }

    /// Deliver `message` to a window's listener.
    pub fn send(&self, surface: SurfaceId, message: &ResultMessage) -> Result<(), PlatformError> {
        let listeners = self.listeners.lock();
        let tx = listeners
            .get(&surface)
            .ok_or_else(|| PlatformError::NoReceiver(surface.to_string()))?;
        tx.send(message.clone())
            .map_err(|_| PlatformError::NoReceiver(surface.to_string()))
    }

    /// Close a window, dropping its listener.
    pub fn close(&self, surface: SurfaceId) {
        self.listeners.lock().remove(&surface);
    }

    pub fn is_attached(&self, surface: SurfaceId) -> bool {
        self.listeners.lock().contains_key(&surface)
    }
}
