//! Concrete packet shapes.
//!
//! Offsets in the layout comments are relative to the start of the body (after the
//! 20-byte header). All multi-byte fields are little-endian.

mod connect;
mod costume;
mod game;
mod player;
mod simple;
mod tag;

pub use connect::{ConnectPacket, ConnectionType};
pub use costume::{CapturePacket, CostumePacket};
pub use game::{ChangeStagePacket, GamePacket};
pub use player::{CapPacket, PlayerPacket};
pub use simple::{CommandPacket, DisconnectPacket, InitPacket, ShinePacket, UnhandledPacket};
pub use tag::{TagPacket, TagUpdate};

/// Width of costume, capture and client-name string slots
pub const COSTUME_NAME_SIZE: usize = 0x20;
