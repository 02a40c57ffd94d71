//! In-process realtime delivery gateway
//!
//! Keeps one channel per connected user. A transport layer (WebSocket,
//! SSE) registers a user and drains the receiver; the notification
//! subscribers only see the [`RealtimeSender`] port. Messages for users
//! without a registered channel are dropped with a debug log — delivery
//! is fire-and-forget by contract.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::notifications::ports::{NotifyError, RealtimeSender};

pub struct RealtimeGateway {
    channels: DashMap<Uuid, mpsc::UnboundedSender<serde_json::Value>>,
}

impl RealtimeGateway {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Attach a user; any previous channel for the user is replaced.
    pub fn register(&self, user_id: Uuid) -> mpsc::UnboundedReceiver<serde_json::Value> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.channels.insert(user_id, tx);
        info!(%user_id, connected = self.channels.len(), "Realtime channel registered");
        rx
    }

    pub fn unregister(&self, user_id: Uuid) {
        self.channels.remove(&user_id);
        info!(%user_id, connected = self.channels.len(), "Realtime channel removed");
    }

    pub fn connected_count(&self) -> usize {
        self.channels.len()
    }
}

impl Default for RealtimeGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RealtimeSender for RealtimeGateway {
    async fn send_to_user(
        &self,
        user_id: Uuid,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError> {
        match self.channels.get(&user_id) {
            Some(tx) => tx
                .send(payload)
                .map_err(|_| NotifyError::Realtime(format!("Channel for {} closed", user_id))),
            None => {
                debug!(%user_id, "No realtime channel registered; dropping message");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn delivers_to_registered_user() {
        let gateway = RealtimeGateway::new();
        let user_id = Uuid::new_v4();
        let mut rx = gateway.register(user_id);

        gateway
            .send_to_user(user_id, json!({"type": "booking.confirmed"}))
            .await
            .expect("send");

        let received = rx.recv().await.expect("message");
        assert_eq!(received["type"], "booking.confirmed");
    }

    #[tokio::test]
    async fn unknown_user_is_dropped_silently() {
        let gateway = RealtimeGateway::new();
        gateway
            .send_to_user(Uuid::new_v4(), json!({"type": "noop"}))
            .await
            .expect("drop is not an error");
    }

    #[tokio::test]
    async fn closed_channel_reports_failure() {
        let gateway = RealtimeGateway::new();
        let user_id = Uuid::new_v4();
        let rx = gateway.register(user_id);
        drop(rx);

        let result = gateway.send_to_user(user_id, json!({})).await;
        assert!(result.is_err());
    }

    #[test]
    fn register_replaces_previous_channel() {
        let gateway = RealtimeGateway::new();
        let user_id = Uuid::new_v4();
        let _first = gateway.register(user_id);
        let _second = gateway.register(user_id);
        assert_eq!(gateway.connected_count(), 1);

        gateway.unregister(user_id);
        assert_eq!(gateway.connected_count(), 0);
    }
}
