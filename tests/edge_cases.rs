//! Codec edge cases: short buffers, unknown tags, oversized strings and raw bodies.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use odyssey_sync::core::cursor::truncate_utf8;
use odyssey_sync::core::header::{decode_frame, decode_packet, encode_packet, PacketHeader};
use odyssey_sync::core::packet::{AnyPacket, Packet, PacketType};
use odyssey_sync::core::packets::{
    CapturePacket, ChangeStagePacket, ConnectPacket, ConnectionType, CostumePacket, GamePacket,
    UnhandledPacket, COSTUME_NAME_SIZE,
};
use odyssey_sync::error::ProtocolError;
use uuid::Uuid;

#[test]
fn test_every_fixed_shape_rejects_one_byte_short() {
    for packet_type in PacketType::ALL {
        let Some(size) = packet_type.body_size() else {
            continue;
        };
        if size == 0 {
            assert!(AnyPacket::decode(packet_type, &[]).is_ok());
            continue;
        }
        let body = vec![0u8; size - 1];
        match AnyPacket::decode(packet_type, &body) {
            Err(ProtocolError::MalformedPacket {
                packet,
                expected,
                actual,
            }) => {
                assert_eq!(packet, packet_type);
                assert_eq!(expected, size);
                assert_eq!(actual, size - 1);
            }
            other => panic!("{packet_type:?}: expected MalformedPacket, got {other:?}"),
        }
    }
}

#[test]
fn test_every_fixed_shape_decodes_zeroed_body() {
    for packet_type in PacketType::ALL {
        let Some(size) = packet_type.body_size() else {
            continue;
        };
        let decoded = AnyPacket::decode(packet_type, &vec![0u8; size]).unwrap();
        assert_eq!(decoded.packet_type(), packet_type);
        assert_eq!(decoded.size(), size);
        assert_eq!(decoded.to_bytes().len(), size);
    }
}

#[test]
fn test_longer_body_reads_only_declared_shape() {
    let mut body = GamePacket::new(false, 9, "CloudWorldHomeStage").to_bytes().to_vec();
    body.extend_from_slice(&[0xEE; 16]);
    let decoded = GamePacket::deserialize(&body).unwrap();
    assert_eq!(decoded.stage, "CloudWorldHomeStage");
}

#[test]
fn test_multibyte_name_truncated_on_char_boundary() {
    // 11 three-byte characters = 33 bytes, one more than the slot
    let name = "日本語日本語日本語日本";
    assert_eq!(name.len(), 33);

    let packet = CostumePacket::new(name, "Cap");
    let bytes = packet.to_bytes();
    let decoded = CostumePacket::deserialize(&bytes).unwrap();

    assert_eq!(decoded.body_name, "日本語日本語日本語日");
    assert_eq!(decoded.body_name.len(), 30);
    assert_eq!(bytes[30], 0);
    assert_eq!(bytes[31], 0);
    assert_eq!(&bytes[COSTUME_NAME_SIZE..COSTUME_NAME_SIZE + 3], b"Cap");
}

#[test]
fn test_exact_width_string_has_no_terminator() {
    let name = "A".repeat(COSTUME_NAME_SIZE);
    let packet = CapturePacket::new(name.clone());
    let bytes = packet.to_bytes();
    assert!(bytes.iter().all(|&b| b == b'A'));
    assert_eq!(CapturePacket::deserialize(&bytes).unwrap().model_name, name);
}

#[test]
fn test_invalid_utf8_decodes_lossy() {
    let mut body = vec![0u8; CapturePacket::SIZE];
    body[..3].copy_from_slice(&[b'K', 0xFF, b'o']);
    let decoded = CapturePacket::deserialize(&body).unwrap();
    assert_eq!(decoded.model_name, "K\u{FFFD}o");
}

#[test]
fn test_text_after_first_nul_is_dropped() {
    let mut body = vec![0u8; ChangeStagePacket::SIZE];
    body[..4].copy_from_slice(b"Sand");
    body[5..9].copy_from_slice(b"junk");
    let decoded = ChangeStagePacket::deserialize(&body).unwrap();
    assert_eq!(decoded.stage, "Sand");
}

#[test]
fn test_connection_type_out_of_range() {
    for bad in [-1i32, 2, i32::MAX] {
        let mut body = ConnectPacket::new(ConnectionType::FirstConnection, "x")
            .to_bytes()
            .to_vec();
        body[..4].copy_from_slice(&bad.to_le_bytes());
        let err = AnyPacket::decode(PacketType::Connect, &body).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidConnectionType(v) if v == bad));
        assert!(err.is_fatal_to_session());
    }
}

#[test]
fn test_unknown_packet_relays_verbatim() {
    let raw = UnhandledPacket::new(&[0xDE, 0xAD, 0xBE, 0xEF]);
    let frame = encode_packet(Uuid::new_v4(), &raw.clone().into()).unwrap();
    let (header, decoded) = decode_frame(&frame).unwrap();
    assert_eq!(header.size, 4);
    assert_eq!(decoded, AnyPacket::Unhandled(raw));
}

#[test]
fn test_tag_outside_table() {
    let header = PacketHeader {
        id: Uuid::nil(),
        packet_type: 13,
        size: 0,
    };
    assert!(matches!(
        decode_packet(&header, &[]),
        Err(ProtocolError::UnknownPacketType(13))
    ));
}

#[test]
fn test_truncate_helper_matches_codec() {
    let value = "ééééééééééééééééé"; // 17 two-byte characters
    assert_eq!(truncate_utf8(value, COSTUME_NAME_SIZE).len(), 32);
    assert_eq!(truncate_utf8(value, 31).len(), 30);
}
