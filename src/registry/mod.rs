//! # Connection Registry
//!
//! The set of live clients, the transport sessions bound to them, and the clients
//! that recently left.
//!
//! ## Locking
//! Live clients and session bindings sit behind one `parking_lot::RwLock`, so a
//! handshake updates both atomically. [`Registry::clients`] clones the client list
//! under a short read lock; callers then read each [`Client`] without holding it.
//! When both are needed, the registry lock is taken before the retention lock.

mod client;
mod retention;

pub use client::{Client, Slot};
pub use retention::{RetainedClients, RetentionStats, DEFAULT_MAX_RETAINED, DEFAULT_RETENTION_TTL};

use crate::config::Settings;
use crate::core::header::{decode_packet, PacketHeader};
use crate::core::packet::AnyPacket;
use crate::core::packets::ConnectPacket;
use crate::error::{constants, ProtocolError, Result};
use crate::protocol::dispatcher::Dispatcher;
use crate::protocol::handshake::{server_handshake, HandshakeOutcome};
use crate::utils::metrics::Metrics;
use parking_lot::{RwLock, RwLockWriteGuard};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Transport-assigned session handle
pub type SessionId = u64;

#[derive(Debug, Default)]
pub(crate) struct RegistryState {
    /// Live clients in join order
    pub(crate) clients: Vec<Arc<Client>>,
    /// Session → bound client id
    pub(crate) sessions: HashMap<SessionId, Uuid>,
}

impl RegistryState {
    pub(crate) fn find(&self, id: &Uuid) -> Option<Arc<Client>> {
        self.clients.iter().find(|c| c.id() == *id).cloned()
    }

    pub(crate) fn remove_client(&mut self, id: &Uuid) -> Option<Arc<Client>> {
        let index = self.clients.iter().position(|c| c.id() == *id)?;
        Some(self.clients.remove(index))
    }
}

/// What a received packet did
#[derive(Debug, Clone)]
pub enum Received {
    Handshake(HandshakeOutcome),
    /// The session disconnected; carries the client that left, if one was bound
    Disconnected(Option<Arc<Client>>),
    /// A state packet from a bound client, ready to relay
    Packet {
        client: Arc<Client>,
        packet: AnyPacket,
    },
}

/// Live connection registry
pub struct Registry {
    state: RwLock<RegistryState>,
    retained: RetainedClients,
    dispatcher: Dispatcher,
    metrics: Arc<Metrics>,
    max_players: u16,
}

impl Registry {
    pub fn new(max_players: u16) -> Self {
        Self::with_retention(max_players, RetainedClients::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.server.max_players)
    }

    pub fn with_retention(max_players: u16, retained: RetainedClients) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            retained,
            dispatcher: Dispatcher::new(),
            metrics: Arc::new(Metrics::new()),
            max_players,
        }
    }

    pub fn max_players(&self) -> u16 {
        self.max_players
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Extra per-type handlers run after a client's store is updated
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn retained(&self) -> &RetainedClients {
        &self.retained
    }

    pub(crate) fn state_mut(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write()
    }

    /// Live clients in join order
    pub fn clients(&self) -> Vec<Arc<Client>> {
        self.state.read().clients.clone()
    }

    pub fn client_count(&self) -> usize {
        self.state.read().clients.len()
    }

    pub fn client_by_id(&self, id: &Uuid) -> Option<Arc<Client>> {
        self.state.read().find(id)
    }

    pub fn client_for_session(&self, session: SessionId) -> Option<Arc<Client>> {
        let state = self.state.read();
        state.sessions.get(&session).and_then(|id| state.find(id))
    }

    /// Run the connection handshake for `session`
    pub fn handshake(
        &self,
        session: SessionId,
        id: Uuid,
        packet: &ConnectPacket,
        address: Option<SocketAddr>,
    ) -> Result<HandshakeOutcome> {
        server_handshake(self, session, id, packet, address)
    }

    /// Decode one packet from `session` and apply it
    ///
    /// # Errors
    /// - Decode errors from [`decode_packet`]
    /// - `HandshakeError` for a state packet from a session with no bound client
    /// - Handshake and dispatcher errors
    #[instrument(level = "trace", skip(self, header, body, address), fields(tag = header.packet_type))]
    pub fn receive(
        &self,
        session: SessionId,
        header: &PacketHeader,
        body: &[u8],
        address: Option<SocketAddr>,
    ) -> Result<Received> {
        let packet = match decode_packet(header, body) {
            Ok(packet) => {
                self.metrics.packet_decoded();
                packet
            }
            Err(e @ ProtocolError::InvalidConnectionType(_)) => {
                self.metrics.handshake_attempt();
                self.metrics.handshake_failed();
                warn!(session, client = %header.id, error = %e, "Handshake rejected");
                return Err(e);
            }
            Err(e) => {
                if matches!(e, ProtocolError::MalformedPacket { .. }) {
                    self.metrics.malformed_packet();
                }
                debug!(session, error = %e, "Dropping undecodable packet");
                return Err(e);
            }
        };

        match packet {
            AnyPacket::Connect(connect) => self
                .handshake(session, header.id, &connect, address)
                .map(Received::Handshake),
            AnyPacket::Disconnect(_) => Ok(Received::Disconnected(self.disconnect(session))),
            packet => {
                let client = self.client_for_session(session).ok_or_else(|| {
                    ProtocolError::HandshakeError(constants::ERR_CONNECT_EXPECTED.to_string())
                })?;
                client.observe(&packet);
                if self.dispatcher.handles(packet.packet_type()) {
                    self.dispatcher.dispatch(&client, &packet)?;
                }
                Ok(Received::Packet { client, packet })
            }
        }
    }

    /// Unbind `session` and move its client to the retained set
    pub fn disconnect(&self, session: SessionId) -> Option<Arc<Client>> {
        let mut state = self.state.write();
        let id = state.sessions.remove(&session)?;
        let client = state.remove_client(&id)?;
        client.set_connected(false);
        // retained before the session lock is released, so a racing reconnect finds it
        self.retained.store(client.clone());
        drop(state);

        self.metrics.client_left();
        info!(session, client = %id, name = %client.name(), "Client disconnected");
        Some(client)
    }
}
