//! In-process session event broadcast.
//!
//! When the client hits a terminal authentication failure it publishes
//! `AuthenticationLost` so unrelated parts of the application (typically the
//! top-level view-state holder) can present a logged-out state. Plain
//! broadcast channel: any number of subscribers, no payload.

use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The credential is gone for good: refresh failed, or the server kept
    /// rejecting the token after a refresh. Storage is already cleared when
    /// this fires.
    AuthenticationLost,
}

/// Handle for publishing and subscribing to session events.
#[derive(Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Subscribe; the receiver sees every event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish to all current subscribers. Emitting with no subscribers is
    /// not an error.
    pub(crate) fn emit(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_subscriber_sees_the_event() {
        let events = SessionEvents::new();
        let mut a = events.subscribe();
        let mut b = events.subscribe();

        events.emit(SessionEvent::AuthenticationLost);

        assert_eq!(a.recv().await.unwrap(), SessionEvent::AuthenticationLost);
        assert_eq!(b.recv().await.unwrap(), SessionEvent::AuthenticationLost);
    }

    #[tokio::test]
    async fn emit_without_subscribers_is_silent() {
        let events = SessionEvents::new();
        events.emit(SessionEvent::AuthenticationLost);

        // A late subscriber only sees what comes after.
        let mut rx = events.subscribe();
        events.emit(SessionEvent::AuthenticationLost);
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::AuthenticationLost);
        assert!(rx.try_recv().is_err());
    }
}
