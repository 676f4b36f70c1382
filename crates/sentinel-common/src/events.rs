use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Shell lifecycle events, published for observers (logging, tests).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// The kiosk window was created and the remote content is loading.
    WindowCreated,
    /// The display configuration became non-compliant; the blocking
    /// view is now shown. Carries the observed display count.
    BlockingEntered { displays: usize },
    /// The display configuration returned to compliant; remote content
    /// is being reloaded.
    BlockingCleared,
    /// The page client acquired a capture stream.
    CaptureStarted { tracks: Vec<String> },
    /// The page client failed to acquire a capture stream.
    CaptureFailed { reason: String },
    /// The loaded page requested immediate termination.
    TerminationRequested,
    /// The process is shutting down.
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
