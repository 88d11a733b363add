use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind};
use std::net::SocketAddr;
use std::time::Duration;

/// Bounds applied to HTTP responses before they are parsed.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpLimits {
    /// Total receive cap for a single response (default: 10000)
    #[serde(default = "default_max_response_len")]
    pub max_response_len: usize,
    /// Maximum number of response headers (default: 20)
    #[serde(default = "default_max_headers")]
    pub max_headers: usize,
    /// Maximum length of a single header name or value (default: 150)
    #[serde(default = "default_max_header_len")]
    pub max_header_len: usize,
    /// Maximum decoded body length (default: 1000)
    #[serde(default = "default_max_body_len")]
    pub max_body_len: usize,
}

impl Default for HttpLimits {
    fn default() -> Self {
        HttpLimits {
            max_response_len: default_max_response_len(),
            max_headers: default_max_headers(),
            max_header_len: default_max_header_len(),
            max_body_len: default_max_body_len(),
        }
    }
}

fn default_max_response_len() -> usize { 10000 }
fn default_max_headers() -> usize { 20 }
fn default_max_header_len() -> usize { 150 }
fn default_max_body_len() -> usize { 1000 }

/// Client endpoint configuration. Defaults match the production TUNet servers,
/// so a config file is only needed to point at a different deployment.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Server IPv4 address (default: 166.111.8.120)
    #[serde(default = "default_host")]
    pub host: String,
    /// Challenge/usage UDP service port (default: 3335)
    #[serde(default = "default_udp_port")]
    pub udp_port: u16,
    /// Login HTTP service port (default: 3333)
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Login endpoint path (default: /cgi-bin/do_login)
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Socket timeout for connect, send and receive (ms, default: 5000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub http: HttpLimits,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            host: default_host(),
            udp_port: default_udp_port(),
            http_port: default_http_port(),
            login_path: default_login_path(),
            timeout_ms: default_timeout_ms(),
            http: HttpLimits::default(),
        }
    }
}

fn default_host() -> String { "166.111.8.120".to_string() }
fn default_udp_port() -> u16 { 3335 }
fn default_http_port() -> u16 { 3333 }
fn default_login_path() -> String { "/cgi-bin/do_login".to_string() }
fn default_timeout_ms() -> u64 { 5000 }

impl ClientConfig {
    /// Load configuration from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: &str) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
    }

    pub fn udp_addr(&self) -> io::Result<SocketAddr> {
        resolve(&self.host, self.udp_port)
    }

    pub fn http_addr(&self) -> io::Result<SocketAddr> {
        resolve(&self.host, self.http_port)
    }

    /// Value of the Host request header.
    pub fn host_header(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn resolve(host: &str, port: u16) -> io::Result<SocketAddr> {
    format!("{host}:{port}")
        .parse()
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "166.111.8.120");
        assert_eq!(config.udp_port, 3335);
        assert_eq!(config.http_port, 3333);
        assert_eq!(config.login_path, "/cgi-bin/do_login");
        assert_eq!(config.host_header(), "166.111.8.120:3333");
        assert_eq!(config.udp_addr().unwrap().port(), 3335);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "host": "127.0.0.1", "udp_port": 4000 }"#).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.udp_port, 4000);
        assert_eq!(config.http_port, 3333);
        assert_eq!(config.http.max_headers, 20);
    }

    #[test]
    fn bad_host_is_rejected_on_resolve() {
        let config = ClientConfig {
            host: "not an address".to_string(),
            ..ClientConfig::default()
        };
        assert!(config.udp_addr().is_err());
    }
}
