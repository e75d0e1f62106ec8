//! # Packet Contract
//!
//! Every packet body implements [`Packet`]: a wire tag, a fixed encoded size, and the
//! field code that writes and reads that many bytes. [`AnyPacket`] is the closed set of
//! packet shapes, and [`AnyPacket::decode`] routes a body to the right shape by tag.
//!
//! ## Size invariant
//! `serialize` writes exactly `SIZE` bytes and `deserialize` reads exactly `SIZE` bytes.
//! Each concrete packet also carries a compile-time assertion that its field widths
//! add up to its declared `SIZE`.

use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::packets::{
    CapPacket, CapturePacket, ChangeStagePacket, CommandPacket, ConnectPacket, CostumePacket,
    DisconnectPacket, GamePacket, InitPacket, PlayerPacket, ShinePacket, TagPacket,
    UnhandledPacket,
};
use crate::error::{ProtocolError, Result};
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Wire-level packet type tag (`i16`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i16)]
pub enum PacketType {
    Unknown = 0,
    Init = 1,
    Player = 2,
    Cap = 3,
    Game = 4,
    Tag = 5,
    Connect = 6,
    Disconnect = 7,
    Costume = 8,
    Shine = 9,
    Capture = 10,
    ChangeStage = 11,
    Command = 12,
}

impl PacketType {
    /// All known tags in wire order
    pub const ALL: [PacketType; 13] = [
        PacketType::Unknown,
        PacketType::Init,
        PacketType::Player,
        PacketType::Cap,
        PacketType::Game,
        PacketType::Tag,
        PacketType::Connect,
        PacketType::Disconnect,
        PacketType::Costume,
        PacketType::Shine,
        PacketType::Capture,
        PacketType::ChangeStage,
        PacketType::Command,
    ];

    /// Resolve a raw wire tag
    pub fn from_tag(tag: i16) -> Result<Self> {
        usize::try_from(tag)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(ProtocolError::UnknownPacketType(tag))
    }

    /// Raw wire tag
    pub fn tag(self) -> i16 {
        self as i16
    }

    /// Fixed body size for this tag, `None` for the raw `Unknown` shape
    pub fn body_size(self) -> Option<usize> {
        match self {
            PacketType::Unknown => None,
            PacketType::Init => Some(InitPacket::SIZE),
            PacketType::Player => Some(PlayerPacket::SIZE),
            PacketType::Cap => Some(CapPacket::SIZE),
            PacketType::Game => Some(GamePacket::SIZE),
            PacketType::Tag => Some(TagPacket::SIZE),
            PacketType::Connect => Some(ConnectPacket::SIZE),
            PacketType::Disconnect => Some(DisconnectPacket::SIZE),
            PacketType::Costume => Some(CostumePacket::SIZE),
            PacketType::Shine => Some(ShinePacket::SIZE),
            PacketType::Capture => Some(CapturePacket::SIZE),
            PacketType::ChangeStage => Some(ChangeStagePacket::SIZE),
            PacketType::Command => Some(CommandPacket::SIZE),
        }
    }
}

/// A fixed-size packet body
pub trait Packet: Sized {
    /// Wire tag identifying this shape
    const TYPE: PacketType;

    /// Exact encoded length in bytes
    const SIZE: usize;

    /// Write every field in declared order; the writer has room for exactly `SIZE` bytes
    fn write_fields(&self, writer: &mut PacketWriter<'_>);

    /// Read every field in declared order; the reader holds at least `SIZE` bytes
    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self>;

    /// Encoded length of this value
    fn size(&self) -> usize {
        Self::SIZE
    }

    /// Encode into the front of `dst`, returning the number of bytes written
    ///
    /// # Errors
    /// Returns `ProtocolError::BufferTooSmall` when `dst` is shorter than `SIZE`
    fn serialize(&self, dst: &mut [u8]) -> Result<usize> {
        if dst.len() < Self::SIZE {
            return Err(ProtocolError::BufferTooSmall {
                packet: Self::TYPE,
                expected: Self::SIZE,
                actual: dst.len(),
            });
        }
        let mut writer = PacketWriter::new(&mut dst[..Self::SIZE]);
        self.write_fields(&mut writer);
        debug_assert_eq!(writer.written(), Self::SIZE);
        Ok(Self::SIZE)
    }

    /// Decode from the front of `src`
    ///
    /// # Errors
    /// Returns `ProtocolError::MalformedPacket` when `src` is shorter than `SIZE`
    fn deserialize(src: &[u8]) -> Result<Self> {
        if src.len() < Self::SIZE {
            return Err(ProtocolError::MalformedPacket {
                packet: Self::TYPE,
                expected: Self::SIZE,
                actual: src.len(),
            });
        }
        let mut reader = PacketReader::new(&src[..Self::SIZE]);
        let packet = Self::read_fields(&mut reader)?;
        debug_assert_eq!(reader.consumed(), Self::SIZE);
        Ok(packet)
    }

    /// Encode into a freshly allocated buffer of exactly `SIZE` bytes
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::zeroed(Self::SIZE);
        let mut writer = PacketWriter::new(&mut buf[..]);
        self.write_fields(&mut writer);
        debug_assert_eq!(writer.written(), Self::SIZE);
        buf.freeze()
    }
}

/// Any decoded packet body, tagged by shape
#[derive(Debug, Clone, PartialEq)]
pub enum AnyPacket {
    Unhandled(UnhandledPacket),
    Init(InitPacket),
    Player(PlayerPacket),
    Cap(CapPacket),
    Game(GamePacket),
    Tag(TagPacket),
    Connect(ConnectPacket),
    Disconnect(DisconnectPacket),
    Costume(CostumePacket),
    Shine(ShinePacket),
    Capture(CapturePacket),
    ChangeStage(ChangeStagePacket),
    Command(CommandPacket),
}

impl AnyPacket {
    /// Route `body` to the decoder selected by `packet_type`
    ///
    /// `Unknown` bodies are kept verbatim as [`UnhandledPacket`] so they can be relayed.
    pub fn decode(packet_type: PacketType, body: &[u8]) -> Result<Self> {
        trace!(?packet_type, len = body.len(), "Decoding packet body");
        let packet = match packet_type {
            PacketType::Unknown => AnyPacket::Unhandled(UnhandledPacket::new(body)),
            PacketType::Init => AnyPacket::Init(InitPacket::deserialize(body)?),
            PacketType::Player => AnyPacket::Player(PlayerPacket::deserialize(body)?),
            PacketType::Cap => AnyPacket::Cap(CapPacket::deserialize(body)?),
            PacketType::Game => AnyPacket::Game(GamePacket::deserialize(body)?),
            PacketType::Tag => AnyPacket::Tag(TagPacket::deserialize(body)?),
            PacketType::Connect => AnyPacket::Connect(ConnectPacket::deserialize(body)?),
            PacketType::Disconnect => AnyPacket::Disconnect(DisconnectPacket::deserialize(body)?),
            PacketType::Costume => AnyPacket::Costume(CostumePacket::deserialize(body)?),
            PacketType::Shine => AnyPacket::Shine(ShinePacket::deserialize(body)?),
            PacketType::Capture => AnyPacket::Capture(CapturePacket::deserialize(body)?),
            PacketType::ChangeStage => {
                AnyPacket::ChangeStage(ChangeStagePacket::deserialize(body)?)
            }
            PacketType::Command => AnyPacket::Command(CommandPacket::deserialize(body)?),
        };
        Ok(packet)
    }

    /// Route a raw wire tag and body
    pub fn decode_tagged(tag: i16, body: &[u8]) -> Result<Self> {
        Self::decode(PacketType::from_tag(tag)?, body)
    }

    pub fn packet_type(&self) -> PacketType {
        match self {
            AnyPacket::Unhandled(_) => PacketType::Unknown,
            AnyPacket::Init(_) => InitPacket::TYPE,
            AnyPacket::Player(_) => PlayerPacket::TYPE,
            AnyPacket::Cap(_) => CapPacket::TYPE,
            AnyPacket::Game(_) => GamePacket::TYPE,
            AnyPacket::Tag(_) => TagPacket::TYPE,
            AnyPacket::Connect(_) => ConnectPacket::TYPE,
            AnyPacket::Disconnect(_) => DisconnectPacket::TYPE,
            AnyPacket::Costume(_) => CostumePacket::TYPE,
            AnyPacket::Shine(_) => ShinePacket::TYPE,
            AnyPacket::Capture(_) => CapturePacket::TYPE,
            AnyPacket::ChangeStage(_) => ChangeStagePacket::TYPE,
            AnyPacket::Command(_) => CommandPacket::TYPE,
        }
    }

    /// Encoded body length
    pub fn size(&self) -> usize {
        match self {
            AnyPacket::Unhandled(p) => p.size(),
            AnyPacket::Init(p) => p.size(),
            AnyPacket::Player(p) => p.size(),
            AnyPacket::Cap(p) => p.size(),
            AnyPacket::Game(p) => p.size(),
            AnyPacket::Tag(p) => p.size(),
            AnyPacket::Connect(p) => p.size(),
            AnyPacket::Disconnect(p) => p.size(),
            AnyPacket::Costume(p) => p.size(),
            AnyPacket::Shine(p) => p.size(),
            AnyPacket::Capture(p) => p.size(),
            AnyPacket::ChangeStage(p) => p.size(),
            AnyPacket::Command(p) => p.size(),
        }
    }

    /// Encode the body into the front of `dst`
    pub fn serialize(&self, dst: &mut [u8]) -> Result<usize> {
        match self {
            AnyPacket::Unhandled(p) => p.serialize(dst),
            AnyPacket::Init(p) => p.serialize(dst),
            AnyPacket::Player(p) => p.serialize(dst),
            AnyPacket::Cap(p) => p.serialize(dst),
            AnyPacket::Game(p) => p.serialize(dst),
            AnyPacket::Tag(p) => p.serialize(dst),
            AnyPacket::Connect(p) => p.serialize(dst),
            AnyPacket::Disconnect(p) => p.serialize(dst),
            AnyPacket::Costume(p) => p.serialize(dst),
            AnyPacket::Shine(p) => p.serialize(dst),
            AnyPacket::Capture(p) => p.serialize(dst),
            AnyPacket::ChangeStage(p) => p.serialize(dst),
            AnyPacket::Command(p) => p.serialize(dst),
        }
    }

    /// Encode the body into a new buffer of exactly `size()` bytes
    pub fn to_bytes(&self) -> Bytes {
        match self {
            AnyPacket::Unhandled(p) => p.to_bytes(),
            AnyPacket::Init(p) => p.to_bytes(),
            AnyPacket::Player(p) => p.to_bytes(),
            AnyPacket::Cap(p) => p.to_bytes(),
            AnyPacket::Game(p) => p.to_bytes(),
            AnyPacket::Tag(p) => p.to_bytes(),
            AnyPacket::Connect(p) => p.to_bytes(),
            AnyPacket::Disconnect(p) => p.to_bytes(),
            AnyPacket::Costume(p) => p.to_bytes(),
            AnyPacket::Shine(p) => p.to_bytes(),
            AnyPacket::Capture(p) => p.to_bytes(),
            AnyPacket::ChangeStage(p) => p.to_bytes(),
            AnyPacket::Command(p) => p.to_bytes(),
        }
    }
}

macro_rules! impl_from_packet {
    ($($variant:ident => $packet:ty),* $(,)?) => {
        $(
            impl From<$packet> for AnyPacket {
                fn from(packet: $packet) -> Self {
                    AnyPacket::$variant(packet)
                }
            }
        )*
    };
}

impl_from_packet! {
    Unhandled => UnhandledPacket,
    Init => InitPacket,
    Player => PlayerPacket,
    Cap => CapPacket,
    Game => GamePacket,
    Tag => TagPacket,
    Connect => ConnectPacket,
    Disconnect => DisconnectPacket,
    Costume => CostumePacket,
    Shine => ShinePacket,
    Capture => CapturePacket,
    ChangeStage => ChangeStagePacket,
    Command => CommandPacket,
}
