//! Traffic usage query handshake.
//!
//! Two steps: a `check_online` status POST recovers the session login
//! identifier and the month-to-date usage, then a UDP query fetches the
//! current session counters. Any failure aborts the whole operation.

use crate::codec::{QueryRequest, QueryResponse};
use crate::config::ClientConfig;
use crate::error::{ProtocolError, Result};
use crate::transport::http;
use crate::transport::UdpClient;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageReport {
    /// Cumulative billing-cycle traffic in bytes, from check_online.
    pub month_usage: i64,
    /// Inbound bytes for the active session, from the UDP counters query.
    pub current_in: i64,
    /// Outbound bytes for the active session.
    pub current_out: i64,
}

pub fn query_usage(config: &ClientConfig) -> Result<UsageReport> {
    let (login_id, month_usage) = check_online(config)?;
    debug!("check_online: login id {}, month usage {}", login_id, month_usage);

    let request = QueryRequest::new(login_id).encode();
    let client = UdpClient::connect(config.udp_addr()?, config.timeout())?;
    let mut buffer = [0u8; 100];
    let received = client.round_trip(&request, &mut buffer)?;
    let response = QueryResponse::decode(&buffer[..received])?;

    Ok(UsageReport {
        month_usage,
        current_in: response.balance_in,
        current_out: response.balance_out,
    })
}

/// Recover (login id, month usage) from the check_online status call.
fn check_online(config: &ClientConfig) -> Result<(i64, i64)> {
    let response = http::post_form(config, b"action=check_online")?;
    parse_status_body(&response.body).map_err(Into::into)
}

/// The status body is a comma-separated field list: field 0 is the decimal
/// login identifier, field 2 the month usage in bytes.
fn parse_status_body(body: &[u8]) -> std::result::Result<(i64, i64), ProtocolError> {
    if body.is_empty() {
        return Err(ProtocolError::MalformedResponse("empty status body"));
    }
    let text = std::str::from_utf8(body)
        .map_err(|_| ProtocolError::MalformedResponse("status body is not valid UTF-8"))?;

    let mut fields = text.split(',');
    let login_id = fields
        .next()
        .and_then(parse_decimal)
        .ok_or(ProtocolError::MalformedResponse("login id is not a decimal number"))?;
    fields
        .next()
        .ok_or(ProtocolError::MalformedResponse("status body has too few fields"))?;
    let month_usage = fields
        .next()
        .and_then(parse_decimal)
        .ok_or(ProtocolError::MalformedResponse("month usage is not a decimal number"))?;

    Ok((login_id, month_usage))
}

/// Strict unsigned decimal scanner: one or more ASCII digits, nothing else.
/// No sign handling; overflow fails rather than wrapping.
fn parse_decimal(field: &str) -> Option<i64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
