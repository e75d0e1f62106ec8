//! One live connection and its last-seen packet store.

use crate::core::packet::AnyPacket;
use crate::core::packets::{CapturePacket, CostumePacket, GamePacket, PlayerPacket, TagUpdate};
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Holder for the most recent packet of one kind.
///
/// Writers swap the whole `Arc` under a short lock, so readers always get either the
/// previous or the new packet in full.
#[derive(Debug)]
pub struct Slot<T> {
    value: RwLock<Option<Arc<T>>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: RwLock::new(None),
        }
    }
}

impl<T> Slot<T> {
    /// Replace the held packet
    pub fn store(&self, value: T) {
        *self.value.write() = Some(Arc::new(value));
    }

    /// Current packet, if one was ever stored
    pub fn load(&self) -> Option<Arc<T>> {
        self.value.read().clone()
    }
}

/// A connected player
#[derive(Debug)]
pub struct Client {
    id: Uuid,
    name: RwLock<String>,
    address: RwLock<Option<SocketAddr>>,
    costume: Slot<CostumePacket>,
    last_game: Slot<GamePacket>,
    last_player: Slot<PlayerPacket>,
    last_capture: Slot<CapturePacket>,
    seeking: RwLock<Option<bool>>,
    connected: AtomicBool,
}

impl Client {
    pub fn new(id: Uuid, name: impl Into<String>, address: Option<SocketAddr>) -> Self {
        Self {
            id,
            name: RwLock::new(name.into()),
            address: RwLock::new(address),
            costume: Slot::default(),
            last_game: Slot::default(),
            last_player: Slot::default(),
            last_capture: Slot::default(),
            seeking: RwLock::new(None),
            connected: AtomicBool::new(true),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> String {
        self.name.read().clone()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        *self.name.write() = name.into();
    }

    pub fn address(&self) -> Option<SocketAddr> {
        *self.address.read()
    }

    pub fn set_address(&self, address: Option<SocketAddr>) {
        *self.address.write() = address;
    }

    pub fn costume(&self) -> Option<Arc<CostumePacket>> {
        self.costume.load()
    }

    pub fn last_game(&self) -> Option<Arc<GamePacket>> {
        self.last_game.load()
    }

    pub fn last_player(&self) -> Option<Arc<PlayerPacket>> {
        self.last_player.load()
    }

    pub fn last_capture(&self) -> Option<Arc<CapturePacket>> {
        self.last_capture.load()
    }

    /// Last reported seeking flag; `None` until the first tag state update
    pub fn seeking(&self) -> Option<bool> {
        *self.seeking.read()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Release);
    }

    /// Fold a decoded packet into the last-seen store.
    ///
    /// Returns `true` when the packet changed stored state.
    pub fn observe(&self, packet: &AnyPacket) -> bool {
        match packet {
            AnyPacket::Game(game) => {
                debug!(client = %self.id, stage = %game.stage, "Stored game packet");
                self.last_game.store(game.clone());
            }
            AnyPacket::Player(player) => self.last_player.store(player.clone()),
            AnyPacket::Capture(capture) => {
                debug!(client = %self.id, model = %capture.model_name, "Stored capture packet");
                self.last_capture.store(capture.clone());
            }
            AnyPacket::Costume(costume) => {
                debug!(client = %self.id, body = %costume.body_name, cap = %costume.cap_name, "Stored costume");
                self.costume.store(costume.clone());
            }
            AnyPacket::Tag(tag) if tag.update_type.contains(TagUpdate::STATE) => {
                debug!(client = %self.id, seeking = tag.is_it, "Stored tag state");
                *self.seeking.write() = Some(tag.is_it);
            }
            _ => return false,
        }
        true
    }
}
