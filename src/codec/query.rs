use crate::error::ProtocolError;

/// IPv6 slot of the query request is always the all-ones 32-bit value
/// widened to 64 bits. Protocol convention, not user-controlled.
pub const UID6_UNUSED: i64 = 0x0000_0000_FFFF_FFFF;

/// Usage query request for the UDP query service.
///
/// Wire image (56 bytes): uid4(8) + uid6(8) + reserved(40).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryRequest {
    pub uid4: i64,
    pub uid6: i64,
}

impl QueryRequest {
    pub const WIRE_SIZE: usize = 56;

    /// Build a query for the session identified by `login_id` (recovered
    /// from the check_online call).
    pub fn new(login_id: i64) -> Self {
        QueryRequest {
            uid4: login_id,
            uid6: UID6_UNUSED,
        }
    }

    pub fn encode(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buffer = [0u8; Self::WIRE_SIZE];
        buffer[0..8].copy_from_slice(&self.uid4.to_le_bytes());
        buffer[8..16].copy_from_slice(&self.uid6.to_le_bytes());
        buffer
    }

    pub fn decode(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() != Self::WIRE_SIZE {
            return Err(ProtocolError::UnexpectedLength {
                expected: Self::WIRE_SIZE,
                actual: buffer.len(),
            });
        }

        Ok(QueryRequest {
            uid4: i64::from_le_bytes(buffer[0..8].try_into().unwrap()),
            uid6: i64::from_le_bytes(buffer[8..16].try_into().unwrap()),
        })
    }
}

/// Usage query response carrying the session traffic counters.
///
/// Wire image (48 bytes): six 64-bit little-endian integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryResponse {
    pub uid4: i64,
    pub uid6: i64,
    pub balance_in: i64,
    pub balance_out: i64,
    pub free_in: i64,
    pub free_out: i64,
}

impl QueryResponse {
    pub const WIRE_SIZE: usize = 48;

    pub fn decode(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() != Self::WIRE_SIZE {
            return Err(ProtocolError::UnexpectedLength {
                expected: Self::WIRE_SIZE,
                actual: buffer.len(),
            });
        }

        Ok(QueryResponse {
            uid4: i64::from_le_bytes(buffer[0..8].try_into().unwrap()),
            uid6: i64::from_le_bytes(buffer[8..16].try_into().unwrap()),
            balance_in: i64::from_le_bytes(buffer[16..24].try_into().unwrap()),
            balance_out: i64::from_le_bytes(buffer[24..32].try_into().unwrap()),
            free_in: i64::from_le_bytes(buffer[32..40].try_into().unwrap()),
            free_out: i64::from_le_bytes(buffer[40..48].try_into().unwrap()),
        })
    }

    pub fn encode(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buffer = [0u8; Self::WIRE_SIZE];
        buffer[0..8].copy_from_slice(&self.uid4.to_le_bytes());
        buffer[8..16].copy_from_slice(&self.uid6.to_le_bytes());
        buffer[16..24].copy_from_slice(&self.balance_in.to_le_bytes());
        buffer[24..32].copy_from_slice(&self.balance_out.to_le_bytes());
        buffer[32..40].copy_from_slice(&self.free_in.to_le_bytes());
        buffer[40..48].copy_from_slice(&self.free_out.to_le_bytes());
        buffer
    }
}
