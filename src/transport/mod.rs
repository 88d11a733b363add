pub mod http;
pub mod udp;

pub use http::{HeaderEntry, HttpResponse};
pub use udp::UdpClient;
