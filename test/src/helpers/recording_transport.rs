use std::sync::{Arc, Mutex, PoisonError};

use lumen_shared::{EffectMessage, EffectMessageType, ObserverKey, Transport};

/// Transport that keeps every message it is handed. Clones share one log, so
/// a clone can be given to a server and the original read afterwards.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<(ObserverKey, EffectMessage)>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message recorded since the last call, in send order
    pub fn take(&self) -> Vec<(ObserverKey, EffectMessage)> {
        let mut sent = self.sent.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *sent)
    }
}

impl Transport for RecordingTransport {
    fn send(&mut self, observer: &ObserverKey, message: EffectMessage) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((*observer, message));
    }
}

/// (observer, message type, instance id) of each message, for compact asserts
pub fn summarize(sent: &[(ObserverKey, EffectMessage)]) -> Vec<(u64, EffectMessageType, u64)> {
    sent.iter()
        .map(|(observer, message)| {
            (
                observer.to_u64(),
                message.message_type(),
                message.instance_id().to_u64(),
            )
        })
        .collect()
}

/// Messages of one type sent to one observer
pub fn count_to(
    sent: &[(ObserverKey, EffectMessage)],
    observer: &ObserverKey,
    message_type: EffectMessageType,
) -> usize {
    sent.iter()
        .filter(|(key, message)| key == observer && message.message_type() == message_type)
        .count()
}
