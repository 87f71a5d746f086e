use core_types::RequestId;
use std::sync::mpsc::{self, Receiver, Sender};

/// Engine -> shell notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    UrlChanged(String),
    TitleChanged(String),
    /// Carries the final location, which differs from the last
    /// `UrlChanged` after a redirect.
    LoadFinished(String),
    HtmlSnapshot { request_id: RequestId, html: String },
    SnapshotFailed { request_id: RequestId, error: String },
}

pub struct Bus {
    pub evt_tx: Sender<SurfaceEvent>, // shareable for engine callbacks
    pub evt_rx: Receiver<SurfaceEvent>,
}

impl Bus {
    pub fn new() -> Self {
        let (evt_tx, evt_rx) = mpsc::channel();
        Self { evt_tx, evt_rx }
    }

    /// Everything queued so far, without blocking.
    pub fn drain(&self) -> Vec<SurfaceEvent> {
        self.evt_rx.try_iter().collect()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}
