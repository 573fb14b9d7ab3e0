use smol::{
    channel,
    channel::{Receiver, Sender, TryRecvError},
};

use log::warn;

use crate::{messages::EffectMessage, ObserverKey};

use super::Transport;

/// In-process transport backed by an unbounded channel
pub struct EffectChannel;

impl EffectChannel {
    pub fn unbounded() -> (Box<dyn Transport>, EffectChannelReceiver) {
        let (sender, receiver) = channel::unbounded();
        (Box::new(sender), EffectChannelReceiver::new(receiver))
    }
}

impl Transport for Sender<(ObserverKey, EffectMessage)> {
    fn send(&mut self, observer: &ObserverKey, message: EffectMessage) {
        if self.send_blocking((*observer, message)).is_err() {
            warn!("effect channel closed, dropping message for {:?}", observer);
        }
    }
}

pub struct EffectChannelReceiver {
    receiver: Receiver<(ObserverKey, EffectMessage)>,
}

impl EffectChannelReceiver {
    fn new(receiver: Receiver<(ObserverKey, EffectMessage)>) -> Self {
        Self { receiver }
    }

    /// Next queued message, if any
    pub fn receive(&mut self) -> Option<(ObserverKey, EffectMessage)> {
        match self.receiver.try_recv() {
            Ok(entry) => Some(entry),
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => None,
        }
    }

    /// Every queued message, in send order
    pub fn drain(&mut self) -> Vec<(ObserverKey, EffectMessage)> {
        let mut output = Vec::new();
        while let Some(entry) = self.receive() {
            output.push(entry);
        }
        output
    }
}
