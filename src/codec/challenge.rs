use crate::error::ProtocolError;

/// Challenge request sent to the UDP auth service.
///
/// Wire image (56 bytes, little-endian, no alignment padding):
/// type(8) + user_id(8) + user_name(40, NUL-padded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRequest {
    pub user_name: String,
}

impl ChallengeRequest {
    pub const WIRE_SIZE: usize = 56;
    /// Fixed sentinel identifying a challenge request.
    pub const REQUEST_TYPE: i64 = -100;
    /// Fixed sentinel: no user id is known before the challenge.
    pub const REQUEST_USER_ID: i64 = -1;
    /// One byte of the 40-byte field is reserved for the NUL terminator.
    pub const MAX_USER_NAME_LEN: usize = 39;

    pub fn new(user_name: &str) -> Self {
        ChallengeRequest {
            user_name: user_name.to_string(),
        }
    }

    /// Encode as an exact byte image. Over-long user names fail loudly
    /// rather than truncate.
    pub fn encode(&self) -> Result<[u8; Self::WIRE_SIZE], ProtocolError> {
        let name = self.user_name.as_bytes();
        if name.len() > Self::MAX_USER_NAME_LEN {
            return Err(ProtocolError::FieldTooLong {
                field: "user_name",
                max: Self::MAX_USER_NAME_LEN,
                len: name.len(),
            });
        }

        let mut buffer = [0u8; Self::WIRE_SIZE];
        buffer[0..8].copy_from_slice(&Self::REQUEST_TYPE.to_le_bytes());
        buffer[8..16].copy_from_slice(&Self::REQUEST_USER_ID.to_le_bytes());
        buffer[16..16 + name.len()].copy_from_slice(name);
        Ok(buffer)
    }

    pub fn decode(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() != Self::WIRE_SIZE {
            return Err(ProtocolError::UnexpectedLength {
                expected: Self::WIRE_SIZE,
                actual: buffer.len(),
            });
        }

        let record_type = i64::from_le_bytes(buffer[0..8].try_into().unwrap());
        if record_type != Self::REQUEST_TYPE {
            return Err(ProtocolError::UnexpectedType {
                expected: Self::REQUEST_TYPE,
                actual: record_type,
            });
        }

        let name_field = &buffer[16..Self::WIRE_SIZE];
        let name_len = name_field
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(name_field.len());
        let user_name = std::str::from_utf8(&name_field[..name_len])
            .map_err(|_| ProtocolError::MalformedResponse("user name is not valid UTF-8"))?
            .to_string();

        Ok(ChallengeRequest { user_name })
    }
}

/// Challenge response from the UDP auth service.
///
/// Wire image (48 bytes): type(8) + user_id(8) + challenge(16) + reserved(16).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeResponse {
    pub user_id: i64,
    pub challenge: [u8; 16],
}

impl ChallengeResponse {
    pub const WIRE_SIZE: usize = 48;
    /// Sentinel the server sets on a successful challenge grant.
    pub const RESPONSE_TYPE: i64 = -101;

    /// Decode and validate a received datagram. Anything other than an exact
    /// 48-byte record with the success sentinel is rejected.
    pub fn decode(buffer: &[u8]) -> Result<Self, ProtocolError> {
        if buffer.len() != Self::WIRE_SIZE {
            return Err(ProtocolError::UnexpectedLength {
                expected: Self::WIRE_SIZE,
                actual: buffer.len(),
            });
        }

        let record_type = i64::from_le_bytes(buffer[0..8].try_into().unwrap());
        if record_type != Self::RESPONSE_TYPE {
            return Err(ProtocolError::UnexpectedType {
                expected: Self::RESPONSE_TYPE,
                actual: record_type,
            });
        }

        Ok(ChallengeResponse {
            user_id: i64::from_le_bytes(buffer[8..16].try_into().unwrap()),
            challenge: buffer[16..32].try_into().unwrap(),
        })
    }

    pub fn encode(&self) -> [u8; Self::WIRE_SIZE] {
        let mut buffer = [0u8; Self::WIRE_SIZE];
        buffer[0..8].copy_from_slice(&Self::RESPONSE_TYPE.to_le_bytes());
        buffer[8..16].copy_from_slice(&self.user_id.to_le_bytes());
        buffer[16..32].copy_from_slice(&self.challenge);
        buffer
    }
}
