use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::packet::{Packet, PacketType};
use crate::error::Result;

/// Current stage and scenario of a player.
///
/// ```text
/// 0x00  Is2d         bool
/// 0x01  ScenarioNum  u8
/// 0x02  Stage        str[0x40]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GamePacket {
    pub is_2d: bool,
    pub scenario_num: u8,
    pub stage: String,
}

impl GamePacket {
    pub const STAGE_SIZE: usize = 0x40;

    pub fn new(is_2d: bool, scenario_num: u8, stage: impl Into<String>) -> Self {
        Self {
            is_2d,
            scenario_num,
            stage: stage.into(),
        }
    }
}

const _: () = assert!(GamePacket::SIZE == 1 + 1 + GamePacket::STAGE_SIZE);

impl Packet for GamePacket {
    const TYPE: PacketType = PacketType::Game;
    const SIZE: usize = 0x42;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_bool(self.is_2d);
        writer.put_u8(self.scenario_num);
        writer.put_fixed_str(&self.stage, Self::STAGE_SIZE);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            is_2d: reader.get_bool(),
            scenario_num: reader.get_u8(),
            stage: reader.get_fixed_str(Self::STAGE_SIZE),
        })
    }
}

/// Server-initiated stage warp.
///
/// ```text
/// 0x00  Stage            str[0x30]
/// 0x30  Id               str[0x10]
/// 0x40  Scenario         i8
/// 0x41  SubScenarioType  u8
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStagePacket {
    pub stage: String,
    pub id: String,
    pub scenario: i8,
    pub sub_scenario_type: u8,
}

impl ChangeStagePacket {
    pub const STAGE_SIZE: usize = 0x30;
    pub const ID_SIZE: usize = 0x10;
}

impl Default for ChangeStagePacket {
    fn default() -> Self {
        Self {
            stage: String::new(),
            id: String::new(),
            scenario: -1,
            sub_scenario_type: 0,
        }
    }
}

const _: () = assert!(
    ChangeStagePacket::SIZE == ChangeStagePacket::STAGE_SIZE + ChangeStagePacket::ID_SIZE + 1 + 1
);

impl Packet for ChangeStagePacket {
    const TYPE: PacketType = PacketType::ChangeStage;
    const SIZE: usize = 0x42;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_fixed_str(&self.stage, Self::STAGE_SIZE);
        writer.put_fixed_str(&self.id, Self::ID_SIZE);
        writer.put_i8(self.scenario);
        writer.put_u8(self.sub_scenario_type);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        Ok(Self {
            stage: reader.get_fixed_str(Self::STAGE_SIZE),
            id: reader.get_fixed_str(Self::ID_SIZE),
            scenario: reader.get_i8(),
            sub_scenario_type: reader.get_u8(),
        })
    }
}
