//! # odyssey-sync
//!
//! Synchronization core for an Odyssey multiplayer relay.
//!
//! Clients exchange fixed-layout binary packets describing live game state. This
//! crate decodes those packets, keeps the latest state of every connected client,
//! and projects a permission-filtered status snapshot of clients and settings.
//!
//! ## Modules
//! - [`core`]: packet header, packet shapes and the little-endian codec
//! - [`registry`]: live clients, session bindings and reconnect retention
//! - [`protocol`]: connection handshake and per-type dispatch
//! - [`status`]: settings and player projection
//! - [`permissions`]: the permission predicate consumed by the projection
//! - [`config`]: typed settings and the settings tree
//! - [`utils`]: logging setup and metrics
//!
//! ## Example
//! ```rust
//! use odyssey_sync::config::{Settings, SettingsTree};
//! use odyssey_sync::core::header::{encode_packet, PacketHeader};
//! use odyssey_sync::core::packets::{ConnectPacket, ConnectionType};
//! use odyssey_sync::permissions::PermissionSet;
//! use odyssey_sync::registry::Registry;
//! use odyssey_sync::status;
//! use uuid::Uuid;
//!
//! let settings = Settings::default();
//! let registry = Registry::from_settings(&settings);
//!
//! let connect = ConnectPacket::new(ConnectionType::FirstConnection, "Mario");
//! let frame = encode_packet(Uuid::new_v4(), &connect.into()).unwrap();
//! let header = PacketHeader::deserialize(&frame).unwrap();
//! registry.receive(1, &header, &frame[PacketHeader::SIZE..], None).unwrap();
//!
//! let tree = SettingsTree::from_settings(&settings).unwrap();
//! let perms: PermissionSet = ["Status/Players", "Status/Players/Name"].into_iter().collect();
//! let snapshot = status::project(&registry, &tree, &perms);
//! assert_eq!(snapshot.to_json().unwrap(), r#"{"Players":[{"Name":"Mario"}]}"#);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod permissions;
pub mod protocol;
pub mod registry;
pub mod status;
pub mod utils;

pub use crate::core::header::{decode_packet, encode_packet, PacketHeader};
pub use crate::core::packet::{AnyPacket, Packet, PacketType};
pub use error::{ProtocolError, Result};
pub use permissions::{PermissionSet, Permissions};
pub use registry::{Client, Registry, SessionId};
pub use status::StatusSnapshot;
