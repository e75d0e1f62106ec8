//! Connection handshake state machine.
//!
//! A session becomes usable after its first `Connect` packet:
//!
//! - `FirstConnection` is always legal. It creates a fresh [`Client`] for the header's
//!   id and binds the session to it, replacing a live client with the same id and any
//!   different client the session was bound to before. Only the player limit can
//!   reject it, and a client being replaced does not count against that limit.
//! - `Reconnecting` is legal only when an earlier identity can be recovered. It looks,
//!   in order, at the client already bound to the session, a live client with the
//!   header's id, and the retained clients that left recently. The recovered client
//!   keeps its last-seen state.
//!
//! A rejected handshake fails that session only; the registry is left untouched.

use crate::core::packets::{ConnectPacket, ConnectionType};
use crate::error::{constants, ProtocolError, Result};
use crate::registry::{Client, Registry, SessionId};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Result of an accepted handshake
#[derive(Debug, Clone)]
pub enum HandshakeOutcome {
    /// A new identity was created
    Connected {
        client: Arc<Client>,
        /// Live client with the same id that was replaced
        replaced: Option<Arc<Client>>,
    },
    /// An earlier identity was re-bound to the session
    Reconnected {
        client: Arc<Client>,
        /// Whether the identity came back from the retained set
        restored: bool,
    },
}

impl HandshakeOutcome {
    pub fn client(&self) -> &Arc<Client> {
        match self {
            HandshakeOutcome::Connected { client, .. } => client,
            HandshakeOutcome::Reconnected { client, .. } => client,
        }
    }
}

/// Run the handshake for `session` against `registry`
#[instrument(skip(registry, packet, address), fields(kind = ?packet.connection_type, name = %packet.client_name))]
pub fn server_handshake(
    registry: &Registry,
    session: SessionId,
    id: Uuid,
    packet: &ConnectPacket,
    address: Option<SocketAddr>,
) -> Result<HandshakeOutcome> {
    let metrics = registry.metrics();
    metrics.handshake_attempt();

    let result = match packet.connection_type {
        ConnectionType::FirstConnection => first_connection(registry, session, id, packet, address),
        ConnectionType::Reconnecting => reconnect(registry, session, id, packet, address),
    };

    match &result {
        Ok(outcome) => {
            metrics.handshake_success();
            info!(
                session,
                client = %outcome.client().id(),
                name = %packet.client_name,
                "Handshake accepted"
            );
        }
        Err(e) => {
            metrics.handshake_failed();
            warn!(session, client = %id, error = %e, "Handshake rejected");
        }
    }

    result
}

fn first_connection(
    registry: &Registry,
    session: SessionId,
    id: Uuid,
    packet: &ConnectPacket,
    address: Option<SocketAddr>,
) -> Result<HandshakeOutcome> {
    let mut state = registry.state_mut();

    let previous = state
        .sessions
        .get(&session)
        .copied()
        .filter(|previous| *previous != id);

    let freed = [Some(id), previous]
        .iter()
        .flatten()
        .filter(|candidate| state.find(candidate).is_some())
        .count();
    if state.clients.len() - freed >= usize::from(registry.max_players()) {
        return Err(ProtocolError::HandshakeError(
            constants::ERR_SERVER_FULL.to_string(),
        ));
    }

    let departed = previous.and_then(|previous| state.remove_client(&previous));
    let replaced = state.remove_client(&id);
    state.sessions.retain(|_, bound| *bound != id);

    let client = Arc::new(Client::new(id, packet.client_name.as_str(), address));
    state.clients.push(client.clone());
    state.sessions.insert(session, id);

    if let Some(departed) = &departed {
        departed.set_connected(false);
        registry.retained().store(departed.clone());
    }
    registry.retained().forget(&id);
    drop(state);

    let metrics = registry.metrics();
    if departed.is_some() {
        metrics.client_left();
    }
    if let Some(replaced) = &replaced {
        replaced.set_connected(false);
        metrics.client_left();
    }
    metrics.client_joined();

    Ok(HandshakeOutcome::Connected { client, replaced })
}

fn reconnect(
    registry: &Registry,
    session: SessionId,
    id: Uuid,
    packet: &ConnectPacket,
    address: Option<SocketAddr>,
) -> Result<HandshakeOutcome> {
    let mut state = registry.state_mut();

    let live = state
        .sessions
        .get(&session)
        .and_then(|bound| state.find(bound))
        .or_else(|| state.find(&id));

    if let Some(client) = live {
        state.sessions.retain(|_, bound| *bound != client.id());
        state.sessions.insert(session, client.id());
        drop(state);

        refresh(&client, packet, address);
        return Ok(HandshakeOutcome::Reconnected {
            client,
            restored: false,
        });
    }

    let Some(client) = registry.retained().take(&id) else {
        return Err(ProtocolError::HandshakeError(
            constants::ERR_NO_PRIOR_IDENTITY.to_string(),
        ));
    };

    if state.clients.len() >= usize::from(registry.max_players()) {
        registry.retained().store(client);
        return Err(ProtocolError::HandshakeError(
            constants::ERR_SERVER_FULL.to_string(),
        ));
    }

    state.clients.push(client.clone());
    state.sessions.insert(session, id);
    drop(state);

    client.set_connected(true);
    refresh(&client, packet, address);
    registry.metrics().client_joined();

    Ok(HandshakeOutcome::Reconnected {
        client,
        restored: true,
    })
}

fn refresh(client: &Client, packet: &ConnectPacket, address: Option<SocketAddr>) {
    client.set_name(packet.client_name.as_str());
    if address.is_some() {
        client.set_address(address);
    }
}
