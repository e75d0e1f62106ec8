use crate::core::packet::{AnyPacket, PacketType};
use crate::error::{constants, ProtocolError, Result};
use crate::registry::Client;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type HandlerFn = dyn Fn(&Client, &AnyPacket) -> Result<()> + Send + Sync + 'static;

/// Packet dispatcher keyed by packet type tag.
/// Handlers run after the sending client's last-seen store has been updated.
pub struct Dispatcher {
    handlers: Arc<RwLock<HashMap<PacketType, Box<HandlerFn>>>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Install `handler` for `packet_type`, replacing any earlier one
    pub fn register<F>(&self, packet_type: PacketType, handler: F) -> Result<()>
    where
        F: Fn(&Client, &AnyPacket) -> Result<()> + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().map_err(|_| {
            ProtocolError::Custom(constants::ERR_DISPATCHER_WRITE_LOCK.to_string())
        })?;

        handlers.insert(packet_type, Box::new(handler));
        Ok(())
    }

    /// Whether a handler is installed for `packet_type`
    pub fn handles(&self, packet_type: PacketType) -> bool {
        self.handlers
            .read()
            .map(|handlers| handlers.contains_key(&packet_type))
            .unwrap_or(false)
    }

    pub fn dispatch(&self, client: &Client, packet: &AnyPacket) -> Result<()> {
        let packet_type = packet.packet_type();

        let handlers = self.handlers.read().map_err(|_| {
            ProtocolError::Custom(constants::ERR_DISPATCHER_READ_LOCK.to_string())
        })?;

        handlers
            .get(&packet_type)
            .ok_or(ProtocolError::UnexpectedPacket(packet_type))
            .and_then(|handler| handler(client, packet))
    }
}
