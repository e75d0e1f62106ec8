use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::packet::{Packet, PacketType};
use crate::error::{ProtocolError, Result};
use bytes::Bytes;

/// Server greeting announcing the player limit (`MaxPlayers u16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitPacket {
    pub max_players: u16,
}

impl Packet for InitPacket {
    const TYPE: PacketType = PacketType::Init;
    const SIZE: usize = 2;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_u16(self.max_players);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            max_players: reader.get_u16(),
        })
    }
}

/// Collected moon (`ShineId i32`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShinePacket {
    pub shine_id: i32,
}

impl Packet for ShinePacket {
    const TYPE: PacketType = PacketType::Shine;
    const SIZE: usize = 4;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_i32(self.shine_id);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            shine_id: reader.get_i32(),
        })
    }
}

/// Graceful disconnect; empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisconnectPacket;

impl Packet for DisconnectPacket {
    const TYPE: PacketType = PacketType::Disconnect;
    const SIZE: usize = 0;

    fn write_fields(&self, _writer: &mut PacketWriter<'_>) {}

    fn read_fields(_reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(DisconnectPacket)
    }
}

/// Console command marker; empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandPacket;

impl Packet for CommandPacket {
    const TYPE: PacketType = PacketType::Command;
    const SIZE: usize = 0;

    fn write_fields(&self, _writer: &mut PacketWriter<'_>) {}

    fn read_fields(_reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(CommandPacket)
    }
}

/// Body of an `Unknown`-tagged packet, kept verbatim for relaying.
///
/// This is the only shape whose size depends on its contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnhandledPacket {
    pub data: Bytes,
}

impl UnhandledPacket {
    pub fn new(body: &[u8]) -> Self {
        Self {
            data: Bytes::copy_from_slice(body),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn serialize(&self, dst: &mut [u8]) -> Result<usize> {
        let len = self.data.len();
        if dst.len() < len {
            return Err(ProtocolError::BufferTooSmall {
                packet: PacketType::Unknown,
                expected: len,
                actual: dst.len(),
            });
        }
        PacketWriter::new(&mut dst[..len]).put_slice(&self.data);
        Ok(len)
    }

    pub fn to_bytes(&self) -> Bytes {
        self.data.clone()
    }
}
