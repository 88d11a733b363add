//! Minimal blocking HTTP/1.0 client.
//!
//! One TCP connection per request, no keep-alive, no chunked encoding, no
//! redirects. The response is read until the peer closes the connection and
//! parsed under the caller's [`HttpLimits`]; any over-limit or malformed
//! input fails the whole request, never yielding a partial result.

use crate::config::{ClientConfig, HttpLimits};
use crate::error::{ProtocolError, Result};
use log::debug;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderEntry {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Decoded response: status code, headers in received order, raw body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub code: u16,
    pub headers: Vec<HeaderEntry>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Case-insensitive header lookup, first match wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

/// Perform a single blocking HTTP/1.0 request/response cycle over a fresh
/// TCP connection. The connection is closed on every return path.
pub fn request(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[HeaderEntry],
    body: &[u8],
    limits: &HttpLimits,
    timeout: Duration,
) -> Result<HttpResponse> {
    let mut stream = TcpStream::connect_timeout(&addr, timeout)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    let mut request_bytes = Vec::with_capacity(256 + body.len());
    write!(request_bytes, "{method} {path} HTTP/1.0\r\n")?;
    for header in headers {
        write!(request_bytes, "{}: {}\r\n", header.name, header.value)?;
    }
    request_bytes.extend_from_slice(b"\r\n");
    request_bytes.extend_from_slice(body);

    stream.write_all(&request_bytes)?;

    // HTTP/1.0: the response ends when the peer closes the connection.
    let mut raw = Vec::with_capacity(1024);
    let mut chunk = [0u8; 2048];
    loop {
        let read = stream.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        if raw.len() + read > limits.max_response_len {
            return Err(ProtocolError::ResponseTooLarge {
                limit: limits.max_response_len,
            }
            .into());
        }
        raw.extend_from_slice(&chunk[..read]);
    }

    let response = parse_response(&raw, limits)?;
    debug!(
        "http {} {} -> {} ({} headers, {} body bytes)",
        method,
        path,
        response.code,
        response.headers.len(),
        response.body.len()
    );
    Ok(response)
}

/// POST a url-encoded form to the configured login endpoint with the fixed
/// header set the server expects.
pub fn post_form(config: &ClientConfig, body: &[u8]) -> Result<HttpResponse> {
    let headers = [
        HeaderEntry::new("Host", config.host_header()),
        HeaderEntry::new("Content-Type", "application/x-www-form-urlencoded"),
        HeaderEntry::new("Content-Length", body.len().to_string()),
    ];
    request(
        config.http_addr()?,
        "POST",
        &config.login_path,
        &headers,
        body,
        &config.http,
        config.timeout(),
    )
}

fn parse_response(raw: &[u8], limits: &HttpLimits) -> std::result::Result<HttpResponse, ProtocolError> {
    let mut pos = 0;

    let status_line =
        next_line(raw, &mut pos).ok_or(ProtocolError::MalformedResponse("missing status line"))?;
    let code = parse_status_line(status_line)?;

    let mut headers = Vec::new();
    loop {
        let line = next_line(raw, &mut pos)
            .ok_or(ProtocolError::MalformedResponse("unterminated header block"))?;
        if line.is_empty() {
            break;
        }
        if headers.len() == limits.max_headers {
            return Err(ProtocolError::TooManyHeaders {
                limit: limits.max_headers,
            });
        }
        headers.push(parse_header_line(line, limits)?);
    }

    // Body length is whatever remains after the blank line; HTTP/1.0 with
    // connection-close framing needs no Content-Length enforcement.
    let body = raw[pos..].to_vec();
    if body.len() > limits.max_body_len {
        return Err(ProtocolError::BodyTooLarge {
            limit: limits.max_body_len,
        });
    }

    Ok(HttpResponse {
        code,
        headers,
        body,
    })
}

/// Advance past the next CRLF-terminated line, returning it without the CRLF.
fn next_line<'a>(raw: &'a [u8], pos: &mut usize) -> Option<&'a [u8]> {
    let rest = &raw[*pos..];
    let end = rest.windows(2).position(|w| w == b"\r\n")?;
    *pos += end + 2;
    Some(&rest[..end])
}

fn parse_status_line(line: &[u8]) -> std::result::Result<u16, ProtocolError> {
    let line = std::str::from_utf8(line)
        .map_err(|_| ProtocolError::MalformedResponse("status line is not valid UTF-8"))?;
    let mut parts = line.split_whitespace();
    let version = parts
        .next()
        .ok_or(ProtocolError::MalformedResponse("empty status line"))?;
    if !version.starts_with("HTTP/") {
        return Err(ProtocolError::MalformedResponse("not an HTTP status line"));
    }
    parts
        .next()
        .and_then(|code| code.parse().ok())
        .ok_or(ProtocolError::MalformedResponse("status code is not numeric"))
}

fn parse_header_line(
    line: &[u8],
    limits: &HttpLimits,
) -> std::result::Result<HeaderEntry, ProtocolError> {
    let line = std::str::from_utf8(line)
        .map_err(|_| ProtocolError::MalformedResponse("header is not valid UTF-8"))?;
    let (name, value) = line
        .split_once(": ")
        .ok_or(ProtocolError::MalformedResponse("header without separator"))?;
    if name.len() > limits.max_header_len || value.len() > limits.max_header_len {
        return Err(ProtocolError::HeaderTooLong {
            limit: limits.max_header_len,
        });
    }
    Ok(HeaderEntry::new(name, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpLimits;

    fn limits() -> HttpLimits {
        HttpLimits::default()
    }

    #[test]
    fn test_parse_basic_response() {
        let raw = b"HTTP/1.0 200 OK\r\nFoo: Bar\r\n\r\nhello";
        let response = parse_response(raw, &limits()).unwrap();

        assert_eq!(response.code, 200);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers[0], HeaderEntry::new("Foo", "Bar"));
        assert_eq!(response.body, b"hello");
    }

    #[test]
    fn test_parse_empty_body() {
        let raw = b"HTTP/1.0 404 Not Found\r\n\r\n";
        let response = parse_response(raw, &limits()).unwrap();
        assert_eq!(response.code, 404);
        assert!(response.headers.is_empty());
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_headers_keep_received_order() {
        let raw = b"HTTP/1.0 200 OK\r\nB: 2\r\nA: 1\r\n\r\n";
        let response = parse_response(raw, &limits()).unwrap();
        assert_eq!(response.headers[0].name, "B");
        assert_eq!(response.headers[1].name, "A");
        assert_eq!(response.header("a"), Some("1"));
    }

    #[test]
    fn test_missing_status_line_rejected() {
        assert_eq!(
            parse_response(b"no crlf here", &limits()).unwrap_err(),
            ProtocolError::MalformedResponse("missing status line")
        );
    }

    #[test]
    fn test_unterminated_header_block_rejected() {
        assert_eq!(
            parse_response(b"HTTP/1.0 200 OK\r\nFoo: Bar", &limits()).unwrap_err(),
            ProtocolError::MalformedResponse("unterminated header block")
        );
    }

    #[test]
    fn test_non_numeric_status_rejected() {
        assert_eq!(
            parse_response(b"HTTP/1.0 abc OK\r\n\r\n", &limits()).unwrap_err(),
            ProtocolError::MalformedResponse("status code is not numeric")
        );
    }

    #[test]
    fn test_too_many_headers_rejected() {
        let limits = HttpLimits {
            max_headers: 1,
            ..HttpLimits::default()
        };
        let raw = b"HTTP/1.0 200 OK\r\nA: 1\r\nB: 2\r\n\r\n";
        assert_eq!(
            parse_response(raw, &limits).unwrap_err(),
            ProtocolError::TooManyHeaders { limit: 1 }
        );
    }

    #[test]
    fn test_over_long_header_rejected() {
        let limits = HttpLimits {
            max_header_len: 8,
            ..HttpLimits::default()
        };
        let raw = b"HTTP/1.0 200 OK\r\nName: waytoolongvalue\r\n\r\n";
        assert_eq!(
            parse_response(raw, &limits).unwrap_err(),
            ProtocolError::HeaderTooLong { limit: 8 }
        );
    }

    #[test]
    fn test_header_without_separator_rejected() {
        let raw = b"HTTP/1.0 200 OK\r\nNoSeparator\r\n\r\n";
        assert_eq!(
            parse_response(raw, &limits()).unwrap_err(),
            ProtocolError::MalformedResponse("header without separator")
        );
    }

    #[test]
    fn test_over_long_body_rejected() {
        let limits = HttpLimits {
            max_body_len: 4,
            ..HttpLimits::default()
        };
        let raw = b"HTTP/1.0 200 OK\r\n\r\ntoo long";
        assert_eq!(
            parse_response(raw, &limits).unwrap_err(),
            ProtocolError::BodyTooLarge { limit: 4 }
        );
    }
}
