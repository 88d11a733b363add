//! Challenge-response login handshake.
//!
//! Linear state machine: acquire a challenge over UDP, derive the CHAP-style
//! password proof, submit the form-encoded login POST, classify the textual
//! response. Callers branch on the three-way outcome: `Ok(Success)`,
//! `Ok(IncorrectPassword)`, or `Err(_)` for "try again later".

use crate::codec::{ChallengeRequest, ChallengeResponse};
use crate::config::ClientConfig;
use crate::error::{ProtocolError, Result};
use crate::transport::http;
use crate::transport::UdpClient;
use log::debug;
use md5::{Digest, Md5};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    IncorrectPassword,
}

pub fn login(config: &ClientConfig, user_name: &str, password: &str) -> Result<LoginOutcome> {
    let challenge = acquire_challenge(config, user_name)?;
    let proof = password_proof(challenge.user_id, password, &challenge.challenge);

    let body = format!("username={user_name}&password={proof}&chap=1");
    let response = http::post_form(config, body.as_bytes())?;

    classify(&response.body).map_err(Into::into)
}

fn acquire_challenge(config: &ClientConfig, user_name: &str) -> Result<ChallengeResponse> {
    let request = ChallengeRequest::new(user_name).encode()?;

    let client = UdpClient::connect(config.udp_addr()?, config.timeout())?;
    let mut buffer = [0u8; 100];
    let received = client.round_trip(&request, &mut buffer)?;

    let response = ChallengeResponse::decode(&buffer[..received])?;
    debug!("challenge acquired, user id {}", response.user_id);
    Ok(response)
}

/// CHAP-style proof: hex MD5 over a 49-byte buffer of
/// (low user-id byte ++ hex MD5(password) ++ challenge token).
fn password_proof(user_id: i64, password: &str, challenge: &[u8; 16]) -> String {
    let password_digest = hex::encode(Md5::digest(password.as_bytes()));

    let mut material = [0u8; 49];
    material[0] = (user_id & 0xFF) as u8;
    material[1..33].copy_from_slice(password_digest.as_bytes());
    material[33..49].copy_from_slice(challenge);

    hex::encode(Md5::digest(material))
}

/// Exact body `password_error` means the credentials were wrong; a body
/// starting with an ASCII digit means success; anything else is the server
/// refusing the attempt for reasons worth a retry.
fn classify(body: &[u8]) -> std::result::Result<LoginOutcome, ProtocolError> {
    if body == b"password_error" {
        return Ok(LoginOutcome::IncorrectPassword);
    }
    match body.first() {
        Some(first) if first.is_ascii_digit() => Ok(LoginOutcome::Success),
        _ => Err(ProtocolError::MalformedResponse("unrecognized login response")),
    }
}
