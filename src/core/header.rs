//! # Packet Header
//!
//! Every packet on the wire is prefixed by a 20-byte header:
//!
//! ```text
//! 0x00  Id    GUID (16 bytes, mixed-endian .NET layout)
//! 0x10  Type  i16 packet type tag
//! 0x12  Size  i16 body length
//! ```
//!
//! The header is the only place a body length travels; bodies themselves carry no
//! framing. [`decode_packet`] checks the declared size against both the buffer and
//! the tag's fixed size before routing the body.

use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::packet::{AnyPacket, PacketType};
use crate::error::{ProtocolError, Result};
use bytes::{Bytes, BytesMut};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Fixed packet header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Sender's client id
    pub id: Uuid,
    /// Raw packet type tag; may be outside the known set
    pub packet_type: i16,
    /// Declared body length
    pub size: i16,
}

impl PacketHeader {
    /// Encoded width in bytes
    pub const SIZE: usize = 20;

    /// Build the header announcing `packet` from `id`
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidBodySize` for raw bodies longer than `i16::MAX`
    pub fn for_packet(id: Uuid, packet: &AnyPacket) -> Result<Self> {
        let size = packet.size();
        let size = i16::try_from(size).map_err(|_| ProtocolError::InvalidBodySize(size as i64))?;
        Ok(Self {
            id,
            packet_type: packet.packet_type().tag(),
            size,
        })
    }

    /// Resolve the tag into a known packet type
    pub fn kind(&self) -> Result<PacketType> {
        PacketType::from_tag(self.packet_type)
    }

    /// Declared body length; negative sizes are rejected
    pub fn body_len(&self) -> Result<usize> {
        usize::try_from(self.size).map_err(|_| ProtocolError::InvalidBodySize(self.size.into()))
    }

    /// Encode into the front of `dst`
    pub fn serialize(&self, dst: &mut [u8]) -> Result<usize> {
        if dst.len() < Self::SIZE {
            return Err(ProtocolError::TruncatedHeader {
                expected: Self::SIZE,
                actual: dst.len(),
            });
        }
        let mut writer = PacketWriter::new(&mut dst[..Self::SIZE]);
        writer.put_slice(&self.id.to_bytes_le());
        writer.put_i16(self.packet_type);
        writer.put_i16(self.size);
        Ok(Self::SIZE)
    }

    /// Decode from the front of `src`
    pub fn deserialize(src: &[u8]) -> Result<Self> {
        if src.len() < Self::SIZE {
            return Err(ProtocolError::TruncatedHeader {
                expected: Self::SIZE,
                actual: src.len(),
            });
        }
        let mut reader = PacketReader::new(&src[..Self::SIZE]);
        let mut id = [0u8; 16];
        id.copy_from_slice(reader.get_slice(16));
        Ok(Self {
            id: Uuid::from_bytes_le(id),
            packet_type: reader.get_i16(),
            size: reader.get_i16(),
        })
    }
}

/// Encode header and body into one contiguous buffer
pub fn encode_packet(id: Uuid, packet: &AnyPacket) -> Result<Bytes> {
    let header = PacketHeader::for_packet(id, packet)?;
    let mut buf = BytesMut::zeroed(PacketHeader::SIZE + packet.size());
    header.serialize(&mut buf[..PacketHeader::SIZE])?;
    packet.serialize(&mut buf[PacketHeader::SIZE..])?;
    Ok(buf.freeze())
}

/// Route `body` by the header's tag after checking the declared size
///
/// # Errors
/// - `UnknownPacketType` for a tag outside the known set
/// - `InvalidBodySize` for a negative declared size
/// - `MalformedPacket` when the buffer or the declared size is shorter than the shape
#[instrument(level = "trace", skip(body), fields(len = body.len()))]
pub fn decode_packet(header: &PacketHeader, body: &[u8]) -> Result<AnyPacket> {
    let packet_type = header.kind()?;
    let declared = header.body_len()?;
    let expected = packet_type.body_size().unwrap_or(declared);

    if declared < expected || body.len() < declared {
        debug!(?packet_type, declared, actual = body.len(), "Rejecting short packet body");
        return Err(ProtocolError::MalformedPacket {
            packet: packet_type,
            expected: expected.max(declared),
            actual: body.len().min(declared),
        });
    }

    AnyPacket::decode(packet_type, &body[..declared])
}

/// Split a contiguous header + body buffer and decode it
pub fn decode_frame(frame: &[u8]) -> Result<(PacketHeader, AnyPacket)> {
    let header = PacketHeader::deserialize(frame)?;
    let packet = decode_packet(&header, &frame[PacketHeader::SIZE..])?;
    Ok((header, packet))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::packet::Packet;
    use crate::core::packets::{CostumePacket, ShinePacket, UnhandledPacket};

    fn sample_id() -> Uuid {
        Uuid::from_u128(0x0011_2233_4455_6677_8899_aabb_ccdd_eeff)
    }

    #[test]
    fn test_header_layout() {
        let header = PacketHeader {
            id: sample_id(),
            packet_type: PacketType::Costume.tag(),
            size: 0x40,
        };
        let mut buf = [0u8; PacketHeader::SIZE];
        header.serialize(&mut buf).unwrap();
        // .NET GUID layout swaps the first three groups
        assert_eq!(&buf[..4], &[0x33, 0x22, 0x11, 0x00]);
        assert_eq!(&buf[4..6], &[0x55, 0x44]);
        assert_eq!(&buf[6..8], &[0x77, 0x66]);
        assert_eq!(&buf[8..16], &[0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(&buf[16..18], &[8, 0]);
        assert_eq!(&buf[18..20], &[0x40, 0]);
        assert_eq!(PacketHeader::deserialize(&buf).unwrap(), header);
    }

    #[test]
    fn test_frame_roundtrip() {
        let packet = AnyPacket::from(CostumePacket::new("Mario64", "Mario64Cap"));
        let frame = encode_packet(sample_id(), &packet).unwrap();
        assert_eq!(frame.len(), PacketHeader::SIZE + 0x40);

        let (header, decoded) = decode_frame(&frame).unwrap();
        assert_eq!(header.id, sample_id());
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_declared_size_smaller_than_shape_is_malformed() {
        let header = PacketHeader {
            id: sample_id(),
            packet_type: PacketType::Shine.tag(),
            size: 2,
        };
        let body = ShinePacket { shine_id: 5 }.to_bytes();
        assert!(matches!(
            decode_packet(&header, &body),
            Err(ProtocolError::MalformedPacket { .. })
        ));
    }

    #[test]
    fn test_body_shorter_than_declared_is_malformed() {
        let header = PacketHeader {
            id: sample_id(),
            packet_type: PacketType::Unknown.tag(),
            size: 8,
        };
        assert!(matches!(
            decode_packet(&header, &[1, 2, 3]),
            Err(ProtocolError::MalformedPacket { .. })
        ));
    }

    #[test]
    fn test_unknown_body_is_cut_at_declared_size() {
        let header = PacketHeader {
            id: sample_id(),
            packet_type: PacketType::Unknown.tag(),
            size: 2,
        };
        let decoded = decode_packet(&header, &[7, 8, 9]).unwrap();
        assert_eq!(decoded, AnyPacket::Unhandled(UnhandledPacket::new(&[7, 8])));
    }

    #[test]
    fn test_negative_size_and_unknown_tag() {
        let mut header = PacketHeader {
            id: Uuid::nil(),
            packet_type: PacketType::Init.tag(),
            size: -1,
        };
        assert!(matches!(
            decode_packet(&header, &[0, 0]),
            Err(ProtocolError::InvalidBodySize(-1))
        ));
        header.packet_type = 99;
        assert!(matches!(
            decode_packet(&header, &[0, 0]),
            Err(ProtocolError::UnknownPacketType(99))
        ));
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            PacketHeader::deserialize(&[0u8; 19]),
            Err(ProtocolError::TruncatedHeader {
                expected: 20,
                actual: 19
            })
        ));
    }
}
