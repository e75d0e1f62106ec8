//! Property-based tests using proptest
//!
//! Round-trip and size invariants for every packet shape over generated field
//! values, plus decode robustness against arbitrary bytes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use odyssey_sync::core::cursor::truncate_utf8;
use odyssey_sync::core::header::{decode_frame, encode_packet};
use odyssey_sync::core::math::{Quat, Vec3};
use odyssey_sync::core::packet::{AnyPacket, Packet, PacketType};
use odyssey_sync::core::packets::{
    CapPacket, ChangeStagePacket, ConnectPacket, ConnectionType, CostumePacket, GamePacket,
    PlayerPacket, ShinePacket, TagPacket, TagUpdate, COSTUME_NAME_SIZE,
};
use proptest::prelude::*;
use uuid::Uuid;

fn finite() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn quat() -> impl Strategy<Value = Quat> {
    (finite(), finite(), finite(), finite()).prop_map(|(x, y, z, w)| Quat::new(x, y, z, w))
}

/// Any printable text, including multi-byte characters, without NULs
fn text() -> impl Strategy<Value = String> {
    "\\PC{0,40}"
}

fn slot(value: &str, width: usize) -> String {
    truncate_utf8(value, width).to_string()
}

// Property: player transforms survive a round trip bit for bit
proptest! {
    #[test]
    fn prop_player_roundtrip(
        position in vec3(),
        rotation in quat(),
        weights in prop::array::uniform6(finite()),
        act in any::<u16>(),
        sub_act in any::<u16>(),
    ) {
        let packet = PlayerPacket { position, rotation, animation_blend_weights: weights, act, sub_act };
        let bytes = packet.to_bytes();
        prop_assert_eq!(bytes.len(), PlayerPacket::SIZE);
        prop_assert_eq!(PlayerPacket::deserialize(&bytes).unwrap(), packet);
    }
}

// Property: string slots come back truncated to their width
proptest! {
    #[test]
    fn prop_cap_roundtrip(position in vec3(), rotation in quat(), cap_out in any::<bool>(), anim in text()) {
        let packet = CapPacket { position, rotation, cap_out, cap_anim: anim.clone() };
        let decoded = CapPacket::deserialize(&packet.to_bytes()).unwrap();
        prop_assert_eq!(decoded.cap_anim, slot(&anim, CapPacket::ANIM_SIZE));
        prop_assert_eq!(decoded.cap_out, cap_out);
    }

    #[test]
    fn prop_game_roundtrip(is_2d in any::<bool>(), scenario in any::<u8>(), stage in text()) {
        let packet = GamePacket::new(is_2d, scenario, stage.clone());
        let bytes = packet.to_bytes();
        prop_assert_eq!(bytes.len(), GamePacket::SIZE);
        let decoded = GamePacket::deserialize(&bytes).unwrap();
        prop_assert_eq!(decoded, GamePacket::new(is_2d, scenario, slot(&stage, GamePacket::STAGE_SIZE)));
    }

    #[test]
    fn prop_connect_roundtrip(reconnecting in any::<bool>(), name in text()) {
        let kind = if reconnecting { ConnectionType::Reconnecting } else { ConnectionType::FirstConnection };
        let packet = ConnectPacket::new(kind, name.clone());
        let decoded = ConnectPacket::deserialize(&packet.to_bytes()).unwrap();
        prop_assert_eq!(decoded.connection_type, kind);
        prop_assert_eq!(decoded.client_name, slot(&name, COSTUME_NAME_SIZE));
    }

    #[test]
    fn prop_costume_roundtrip(body in text(), cap in text()) {
        let decoded = CostumePacket::deserialize(&CostumePacket::new(body.clone(), cap.clone()).to_bytes()).unwrap();
        prop_assert_eq!(decoded.body_name, slot(&body, COSTUME_NAME_SIZE));
        prop_assert_eq!(decoded.cap_name, slot(&cap, COSTUME_NAME_SIZE));
    }

    #[test]
    fn prop_change_stage_roundtrip(stage in text(), id in text(), scenario in any::<i8>(), sub in any::<u8>()) {
        let packet = ChangeStagePacket { stage: stage.clone(), id: id.clone(), scenario, sub_scenario_type: sub };
        let decoded = ChangeStagePacket::deserialize(&packet.to_bytes()).unwrap();
        prop_assert_eq!(decoded.stage, slot(&stage, ChangeStagePacket::STAGE_SIZE));
        prop_assert_eq!(decoded.id, slot(&id, ChangeStagePacket::ID_SIZE));
        prop_assert_eq!(decoded.scenario, scenario);
        prop_assert_eq!(decoded.sub_scenario_type, sub);
    }

    #[test]
    fn prop_tag_and_shine_roundtrip(bits in any::<u8>(), is_it in any::<bool>(), seconds in any::<u8>(), minutes in any::<u16>(), shine in any::<i32>()) {
        let tag = TagPacket { update_type: TagUpdate::from_bits(bits), is_it, seconds, minutes };
        prop_assert_eq!(TagPacket::deserialize(&tag.to_bytes()).unwrap(), tag);

        let shine = ShinePacket { shine_id: shine };
        prop_assert_eq!(ShinePacket::deserialize(&shine.to_bytes()).unwrap(), shine);
    }
}

// Property: framed packets decode to the same packet and sender
proptest! {
    #[test]
    fn prop_frame_roundtrip(id in any::<u128>(), scenario in any::<u8>(), stage in "[A-Za-z]{0,64}") {
        let id = Uuid::from_u128(id);
        let packet = AnyPacket::from(GamePacket::new(false, scenario, stage));
        let frame = encode_packet(id, &packet).unwrap();
        let (header, decoded) = decode_frame(&frame).unwrap();
        prop_assert_eq!(header.id, id);
        prop_assert_eq!(decoded, packet);
    }
}

// Property: decoding arbitrary bytes never panics, and success implies a full-size body
proptest! {
    #[test]
    fn prop_decode_arbitrary_bytes(tag in 0i16..13, body in prop::collection::vec(any::<u8>(), 0..128)) {
        let packet_type = PacketType::from_tag(tag).unwrap();
        if let Ok(decoded) = AnyPacket::decode(packet_type, &body) {
            let expected = packet_type.body_size().unwrap_or(body.len());
            prop_assert!(body.len() >= expected);
            prop_assert_eq!(decoded.size(), expected);
        }
    }
}
