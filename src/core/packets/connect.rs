use super::COSTUME_NAME_SIZE;
use crate::core::cursor::{PacketReader, PacketWriter};
use crate::core::packet::{Packet, PacketType};
use crate::error::{ProtocolError, Result};

/// Handshake kind carried by [`ConnectPacket`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ConnectionType {
    /// Brand-new transport session; always accepted
    #[default]
    FirstConnection = 0,
    /// Resumes a previously known client identity
    Reconnecting = 1,
}

impl TryFrom<i32> for ConnectionType {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(ConnectionType::FirstConnection),
            1 => Ok(ConnectionType::Reconnecting),
            other => Err(ProtocolError::InvalidConnectionType(other)),
        }
    }
}

/// Connection handshake.
///
/// ```text
/// 0x00  ConnectionType  i32
/// 0x04  ClientName      str[0x20]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectPacket {
    pub connection_type: ConnectionType,
    pub client_name: String,
}

impl ConnectPacket {
    pub fn new(connection_type: ConnectionType, client_name: impl Into<String>) -> Self {
        Self {
            connection_type,
            client_name: client_name.into(),
        }
    }
}

impl Default for ConnectPacket {
    fn default() -> Self {
        Self::new(ConnectionType::FirstConnection, "?????")
    }
}

const _: () = assert!(ConnectPacket::SIZE == 4 + COSTUME_NAME_SIZE);

impl Packet for ConnectPacket {
    const TYPE: PacketType = PacketType::Connect;
    const SIZE: usize = 0x24;

    fn write_fields(&self, writer: &mut PacketWriter<'_>) {
        writer.put_i32(self.connection_type as i32);
        writer.put_fixed_str(&self.client_name, COSTUME_NAME_SIZE);
    }

    fn read_fields(reader: &mut PacketReader<'_>) -> Result<Self> {
        let connection_type = ConnectionType::try_from(reader.get_i32())?;
        let client_name = reader.get_fixed_str(COSTUME_NAME_SIZE);
        Ok(Self {
            connection_type,
            client_name,
        })
    }
}
