use crate::domain::services::{EventBus, Subscription};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalEvent {
    OpenQuickSettings,
}

/// Process-wide channel for requests to open a modal.
#[derive(Clone, Debug, Default)]
pub struct ModalService {
    bus: EventBus<ModalEvent>,
}

impl ModalService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_quick_settings(&self) -> usize {
        self.bus.emit(&ModalEvent::OpenQuickSettings)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ModalEvent) + Send + Sync + 'static,
    {
        self.bus.on(listener)
    }
}
