pub mod auth;
pub mod codec;
pub mod config;
pub mod error;
pub mod transport;
pub mod units;
pub mod usage;

pub use auth::{login, LoginOutcome};
pub use codec::{ChallengeRequest, ChallengeResponse, QueryRequest, QueryResponse};
pub use config::{ClientConfig, HttpLimits};
pub use error::{Error, ProtocolError, Result};
pub use transport::{HttpResponse, UdpClient};
pub use usage::{query_usage, UsageReport};
