use crate::{ControlError, ControlMessage};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Registry of named broadcast channels, shared by every window of a session.
///
/// Opening the same name twice yields two handles onto one channel, the way
/// two browser windows constructing `BroadcastChannel("spectate-control")`
/// talk to each other. A hub built with [`ControlHub::unavailable`] models an
/// environment without a broadcast mechanism: every `open` fails.
#[derive(Clone, Debug)]
pub struct ControlHub {
    channels: Option<Arc<Mutex<HashMap<String, broadcast::Sender<ControlMessage>>>>>,
    capacity: usize,
}

impl Default for ControlHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlHub {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Hub whose channels buffer `capacity` messages per slow subscriber.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Some(Arc::new(Mutex::new(HashMap::new()))),
            capacity: capacity.max(1),
        }
    }

    /// A hub for environments that lack cross-window messaging.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            channels: None,
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn is_available(&self) -> bool {
        self.channels.is_some()
    }

    /// Open (or join) the channel called `name`.
    pub fn open(&self, name: &str) -> Result<ControlChannel, ControlError> {
        let channels = self
            .channels
            .as_ref()
            .ok_or_else(|| ControlError::Unavailable(name.to_string()))?;

        let mut channels = channels.lock();
        let tx = channels
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("Creating control channel '{}'", name);
                broadcast::channel(self.capacity).0
            })
            .clone();

        Ok(ControlChannel {
            name: name.to_string(),
            tx,
        })
    }
}

/// Handle onto one named channel. Cloning shares the channel.
#[derive(Clone, Debug)]
pub struct ControlChannel {
    name: String,
    tx: broadcast::Sender<ControlMessage>,
}

impl ControlChannel {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Publish a message to every subscriber.
    ///
    /// This is a sync call. Returns how many subscribers will see the
    /// message; with no subscribers the message is dropped.
    pub fn publish(&self, message: ControlMessage) -> usize {
        self.tx.send(message).unwrap_or(0)
    }

    /// Decode a JSON message and publish it.
    pub fn publish_json(&self, text: &str) -> Result<usize, ControlError> {
        Ok(self.publish(ControlMessage::from_json(text)?))
    }

    /// Subscribe to all future messages.
    #[must_use]
    pub fn subscribe(&self) -> ControlReceiver {
        ControlReceiver {
            name: self.name.clone(),
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving end of a control channel.
#[derive(Debug)]
pub struct ControlReceiver {
    name: String,
    rx: broadcast::Receiver<ControlMessage>,
}

impl ControlReceiver {
    /// Wait for the next message.
    ///
    /// Messages dropped because this subscriber lagged are logged and
    /// skipped. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<ControlMessage> {
        loop {
            match self.rx.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!(
                        "Control channel '{}' lagged, skipped {} message(s)",
                        self.name,
                        skipped
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking receive; `None` when nothing is queued.
    pub fn try_recv(&mut self) -> Option<ControlMessage> {
        loop {
            match self.rx.try_recv() {
                Ok(message) => return Some(message),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    log::warn!(
                        "Control channel '{}' lagged, skipped {} message(s)",
                        self.name,
                        skipped
                    );
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_without_subscribers_does_not_panic() {
        let hub = ControlHub::new();
        let channel = hub.open("spectate-control").unwrap();
        assert_eq!(channel.publish(ControlMessage::new("swap")), 0);
    }

    #[tokio::test]
    async fn same_name_shares_channel() {
        let hub = ControlHub::new();
        let viewer = hub.open("spectate-control").unwrap();
        let panel = hub.open("spectate-control").unwrap();
        let mut rx = viewer.subscribe();

        assert_eq!(panel.publish(ControlMessage::new("mode").with_arg("both")), 1);
        let message = rx.recv().await.unwrap();
        assert_eq!(message.cmd.as_deref(), Some("mode"));
        assert_eq!(message.arg_text().as_deref(), Some("both"));
    }

    #[test]
    fn different_names_are_isolated() {
        let hub = ControlHub::new();
        let a = hub.open("a").unwrap();
        let b = hub.open("b").unwrap();
        let mut rx = a.subscribe();
        b.publish(ControlMessage::new("swap"));
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn unavailable_hub_refuses_to_open() {
        let hub = ControlHub::unavailable();
        assert!(!hub.is_available());
        assert!(matches!(
            hub.open("spectate-control"),
            Err(ControlError::Unavailable(_))
        ));
    }

    #[test]
    fn lagged_subscriber_skips_to_newest() {
        let hub = ControlHub::with_capacity(2);
        let channel = hub.open("c").unwrap();
        let mut rx = channel.subscribe();
        for i in 0..5 {
            channel.publish(ControlMessage::new("focus").with_arg(i.to_string()));
        }
        let first = rx.try_recv().unwrap();
        assert_eq!(first.arg_text().as_deref(), Some("3"));
    }

    #[test]
    fn publish_json_rejects_garbage() {
        let hub = ControlHub::new();
        let channel = hub.open("c").unwrap();
        assert!(channel.publish_json("not json").is_err());
        assert_eq!(channel.publish_json(r#"{"cmd":"swap"}"#).unwrap(), 0);
    }
}
