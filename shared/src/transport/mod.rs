mod channel;

pub use channel::{EffectChannel, EffectChannelReceiver};

use crate::{messages::EffectMessage, ObserverKey};

/// Delivers synchronization messages to observers.
///
/// Delivery is fire-and-forget: implementations must not block, and a failed
/// delivery is the transport's problem, never the sender's.
pub trait Transport: Send {
    fn send(&mut self, observer: &ObserverKey, message: EffectMessage);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, observer: &ObserverKey, message: EffectMessage) {
        self.as_mut().send(observer, message);
    }
}
