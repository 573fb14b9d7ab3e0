use std::collections::HashMap;

use lumen_client::{ClientError, EffectClient};
use lumen_shared::{EffectMessage, ObserverKey};

/// Sends each message through its wire encoding to the client of its
/// observer. Messages for observers without a client are dropped.
pub fn exchange_messages(
    sent: Vec<(ObserverKey, EffectMessage)>,
    clients: &mut HashMap<ObserverKey, EffectClient>,
) -> Result<(), ClientError> {
    for (observer, message) in sent {
        let Some(client) = clients.get_mut(&observer) else {
            continue;
        };
        client.receive_bytes(&message.to_bytes())?;
    }
    Ok(())
}
