//! # Wire Codec Module
//!
//! Fixed-layout binary records for the TUNet UDP services.
//!
//! ## Key Types
//!
//! - [`ChallengeRequest`] / [`ChallengeResponse`] - challenge handshake records
//! - [`QueryRequest`] / [`QueryResponse`] - usage query records
//!
//! Every record is transmitted as an exact byte-for-byte image of its declared
//! layout, including reserved padding. Fields are encoded as explicit
//! little-endian fixed-width integers - never via in-memory struct layout -
//! because the server checks total datagram length and speaks the packed
//! layout of the original C structs.
//!
//! ## Example
//!
//! ```ignore
//! use tunet::codec::ChallengeRequest;
//!
//! let request = ChallengeRequest::new("2015012345");
//! let bytes = request.encode()?;
//! assert_eq!(bytes.len(), ChallengeRequest::WIRE_SIZE);
//! ```

pub mod challenge;
pub mod query;

pub use challenge::{ChallengeRequest, ChallengeResponse};
pub use query::{QueryRequest, QueryResponse, UID6_UNUSED};

mod tests;
