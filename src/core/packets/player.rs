use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::math::{Quat, Vec3};
use crate::core::packet::{Packet, PacketType};
use crate::error::Result;

/// Player transform and animation state.
///
/// ```text
/// 0x00  Position               vec3
/// 0x0C  Rotation               quat (x, y, z, w)
/// 0x1C  AnimationBlendWeights  f32[6]
/// 0x34  Act                    u16
/// 0x36  SubAct                 u16
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerPacket {
    pub position: Vec3,
    pub rotation: Quat,
    pub animation_blend_weights: [f32; 6],
    pub act: u16,
    pub sub_act: u16,
}

const _: () = assert!(PlayerPacket::SIZE == Vec3::SIZE + Quat::SIZE + 6 * 4 + 2 + 2);

impl Packet for PlayerPacket {
    const TYPE: PacketType = PacketType::Player;
    const SIZE: usize = 0x38;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_vec3(&self.position);
        writer.put_quat(&self.rotation);
        for weight in self.animation_blend_weights {
            writer.put_f32(weight);
        }
        writer.put_u16(self.act);
        writer.put_u16(self.sub_act);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        let position = reader.get_vec3();
        let rotation = reader.get_quat();
        let mut animation_blend_weights = [0.0f32; 6];
        for weight in &mut animation_blend_weights {
            *weight = reader.get_f32();
        }
        Ok(Self {
            position,
            rotation,
            animation_blend_weights,
            act: reader.get_u16(),
            sub_act: reader.get_u16(),
        })
    }
}

/// Thrown-cap transform.
///
/// ```text
/// 0x00  Position  vec3
/// 0x0C  Rotation  quat
/// 0x1C  CapOut    bool (+3 pad)
/// 0x20  CapAnim   str[0x30]
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CapPacket {
    pub position: Vec3,
    pub rotation: Quat,
    pub cap_out: bool,
    pub cap_anim: String,
}

impl CapPacket {
    pub const ANIM_SIZE: usize = 0x30;
}

const _: () = assert!(CapPacket::SIZE == Vec3::SIZE + Quat::SIZE + 4 + CapPacket::ANIM_SIZE);

impl Packet for CapPacket {
    const TYPE: PacketType = PacketType::Cap;
    const SIZE: usize = 0x50;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_vec3(&self.position);
        writer.put_quat(&self.rotation);
        writer.put_bool(self.cap_out);
        writer.pad(3);
        writer.put_fixed_str(&self.cap_anim, Self::ANIM_SIZE);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        let position = reader.get_vec3();
        let rotation = reader.get_quat();
        let cap_out = reader.get_bool();
        reader.skip(3);
        Ok(Self {
            position,
            rotation,
            cap_out,
            cap_anim: reader.get_fixed_str(Self::ANIM_SIZE),
        })
    }
}
