use log::debug;
use std::io::Result;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

/// One-shot UDP request/response client.
///
/// The socket is connected to a single peer, so only that peer's reply is
/// routed back; there are no sequence numbers to correlate request and
/// response. The socket is released when the client is dropped.
pub struct UdpClient {
    socket: UdpSocket,
}

impl UdpClient {
    /// Bind an ephemeral socket, fix `peer` as its destination and bound
    /// every blocking call by `timeout`.
    pub fn connect(peer: SocketAddr, timeout: Duration) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.connect(peer)?;
        socket.set_read_timeout(Some(timeout))?;
        socket.set_write_timeout(Some(timeout))?;
        Ok(UdpClient { socket })
    }

    /// Send the whole request as one datagram and perform exactly one
    /// blocking receive into `response`. Returns the received length.
    pub fn round_trip(&self, request: &[u8], response: &mut [u8]) -> Result<usize> {
        self.socket.send(request)?;
        let received = self.socket.recv(response)?;
        debug!(
            "udp round trip: sent {} bytes, received {}",
            request.len(),
            received
        );
        Ok(received)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket.local_addr()
    }
}
