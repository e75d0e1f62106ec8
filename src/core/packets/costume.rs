use super::COSTUME_NAME_SIZE;
use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::packet::{Packet, PacketType};
use crate::error::Result;

/// Outfit worn by a player.
///
/// ```text
/// 0x00  BodyName  str[0x20]
/// 0x20  CapName   str[0x20]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CostumePacket {
    pub body_name: String,
    pub cap_name: String,
}

impl CostumePacket {
    pub fn new(body_name: impl Into<String>, cap_name: impl Into<String>) -> Self {
        Self {
            body_name: body_name.into(),
            cap_name: cap_name.into(),
        }
    }
}

const _: () = assert!(CostumePacket::SIZE == 2 * COSTUME_NAME_SIZE);

impl Packet for CostumePacket {
    const TYPE: PacketType = PacketType::Costume;
    const SIZE: usize = 0x40;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_fixed_str(&self.body_name, COSTUME_NAME_SIZE);
        writer.put_fixed_str(&self.cap_name, COSTUME_NAME_SIZE);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            body_name: reader.get_fixed_str(COSTUME_NAME_SIZE),
            cap_name: reader.get_fixed_str(COSTUME_NAME_SIZE),
        })
    }
}

/// Enemy or object currently captured; empty when not capturing.
///
/// ```text
/// 0x00  ModelName  str[0x20]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapturePacket {
    pub model_name: String,
}

impl CapturePacket {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

impl Packet for CapturePacket {
    const TYPE: PacketType = PacketType::Capture;
    const SIZE: usize = COSTUME_NAME_SIZE;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_fixed_str(&self.model_name, COSTUME_NAME_SIZE);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            model_name: reader.get_fixed_str(COSTUME_NAME_SIZE),
        })
    }
}
