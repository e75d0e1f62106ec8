use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::packet::{Packet, PacketType};
use crate::error::Result;

/// Bit flags selecting which parts of a [`TagPacket`] are meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagUpdate(u8);

impl TagUpdate {
    pub const NONE: TagUpdate = TagUpdate(0);
    pub const TIME: TagUpdate = TagUpdate(1);
    pub const STATE: TagUpdate = TagUpdate(2);

    pub const fn from_bits(bits: u8) -> Self {
        TagUpdate(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: TagUpdate) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for TagUpdate {
    type Output = TagUpdate;

    fn bitor(self, rhs: TagUpdate) -> TagUpdate {
        TagUpdate(self.0 | rhs.0)
    }
}

/// Hide-and-seek state.
///
/// ```text
/// 0x00  UpdateType  u8 flags
/// 0x01  IsIt        bool
/// 0x02  Seconds     u8 (+1 pad)
/// 0x04  Minutes     u16
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagPacket {
    pub update_type: TagUpdate,
    pub is_it: bool,
    pub seconds: u8,
    pub minutes: u16,
}

const _: () = assert!(TagPacket::SIZE == 1 + 1 + 1 + 1 + 2);

impl Packet for TagPacket {
    const TYPE: PacketType = PacketType::Tag;
    const SIZE: usize = 6;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_u8(self.update_type.bits());
        writer.put_bool(self.is_it);
        writer.put_u8(self.seconds);
        writer.pad(1);
        writer.put_u16(self.minutes);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        let update_type = TagUpdate::from_bits(reader.get_u8());
        let is_it = reader.get_bool();
        let seconds = reader.get_u8();
        reader.skip(1);
        Ok(Self {
            update_type,
            is_it,
            seconds,
            minutes: reader.get_u16(),
        })
    }
}
