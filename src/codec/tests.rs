#[cfg(test)]
mod tests {
    use crate::codec::challenge::{ChallengeRequest, ChallengeResponse};
    use crate::codec::query::{QueryRequest, QueryResponse, UID6_UNUSED};
    use crate::error::ProtocolError;

    #[test]
    fn test_challenge_request_layout() {
        let request = ChallengeRequest::new("2015012345");
        let bytes = request.encode().unwrap();

        assert_eq!(bytes.len(), 56);
        // type = -100, little-endian
        assert_eq!(&bytes[0..8], &(-100i64).to_le_bytes());
        // user_id = -1
        assert_eq!(&bytes[8..16], &[0xFF; 8]);
        // user name starts at offset 16
        assert_eq!(&bytes[16..26], b"2015012345");
        // rest of the name field is NUL padding
        assert!(bytes[26..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_challenge_request_round_trip() {
        let request = ChallengeRequest::new("a-user.name_39-bytes-or-less");
        let bytes = request.encode().unwrap();
        let decoded = ChallengeRequest::decode(&bytes).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_challenge_request_max_name_round_trips() {
        let name = "x".repeat(39);
        let request = ChallengeRequest::new(&name);
        let bytes = request.encode().unwrap();
        assert_eq!(ChallengeRequest::decode(&bytes).unwrap().user_name, name);
    }

    #[test]
    fn test_challenge_request_over_long_name_rejected() {
        let request = ChallengeRequest::new(&"x".repeat(40));
        match request.encode() {
            Err(ProtocolError::FieldTooLong { field, max, len }) => {
                assert_eq!(field, "user_name");
                assert_eq!(max, 39);
                assert_eq!(len, 40);
            }
            other => panic!("expected FieldTooLong, got {:?}", other),
        }
    }

    #[test]
    fn test_challenge_response_round_trip() {
        let response = ChallengeResponse {
            user_id: 0x0123_4567_89AB_CDEF,
            challenge: [0xA5; 16],
        };
        let bytes = response.encode();
        assert_eq!(bytes.len(), 48);
        assert_eq!(ChallengeResponse::decode(&bytes).unwrap(), response);
    }

    #[test]
    fn test_challenge_response_wrong_length_rejected() {
        // Any length other than the fixed record size is a protocol error,
        // regardless of content.
        for len in [0, 1, 40, 47, 49, 100] {
            let buffer = vec![0u8; len];
            match ChallengeResponse::decode(&buffer) {
                Err(ProtocolError::UnexpectedLength { expected: 48, actual }) => {
                    assert_eq!(actual, len)
                }
                other => panic!("len {}: expected UnexpectedLength, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_challenge_response_wrong_type_rejected() {
        let mut bytes = ChallengeResponse {
            user_id: 1,
            challenge: [0; 16],
        }
        .encode();
        bytes[0..8].copy_from_slice(&(-100i64).to_le_bytes());

        match ChallengeResponse::decode(&bytes) {
            Err(ProtocolError::UnexpectedType {
                expected: -101,
                actual: -100,
            }) => {}
            other => panic!("expected UnexpectedType, got {:?}", other),
        }
    }

    #[test]
    fn test_query_request_layout() {
        let request = QueryRequest::new(12345);
        let bytes = request.encode();

        assert_eq!(bytes.len(), 56);
        assert_eq!(&bytes[0..8], &12345i64.to_le_bytes());
        // uid6 is always the widened all-ones 32-bit value
        assert_eq!(&bytes[8..16], &[0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]);
        assert!(bytes[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_query_request_round_trip() {
        let request = QueryRequest::new(987654321);
        assert_eq!(request.uid6, UID6_UNUSED);
        let decoded = QueryRequest::decode(&request.encode()).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_query_response_round_trip() {
        let response = QueryResponse {
            uid4: 12345,
            uid6: UID6_UNUSED,
            balance_in: 1 << 40,
            balance_out: 42,
            free_in: 0,
            free_out: -1,
        };
        let bytes = response.encode();
        assert_eq!(bytes.len(), 48);
        assert_eq!(QueryResponse::decode(&bytes).unwrap(), response);
    }

    #[test]
    fn test_query_response_wrong_length_rejected() {
        let buffer = [0u8; 56];
        match QueryResponse::decode(&buffer) {
            Err(ProtocolError::UnexpectedLength {
                expected: 48,
                actual: 56,
            }) => {}
            other => panic!("expected UnexpectedLength, got {:?}", other),
        }
    }
}
