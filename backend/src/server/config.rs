//! HTTP server configuration object and helpers.

use std::net::{SocketAddr, TcpListener};

#[derive(Debug)]
pub(crate) enum Binding {
    Address(SocketAddr),
    Listener(TcpListener),
}

/// Where the server should accept connections.
#[derive(Debug)]
pub struct ServerConfig {
    pub(crate) binding: Binding,
}

impl ServerConfig {
    /// Bind `bind_addr` when the server starts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            binding: Binding::Address(bind_addr),
        }
    }

    /// Serve on an already bound listener, e.g. one on an ephemeral port.
    #[must_use]
    pub fn from_listener(listener: TcpListener) -> Self {
        Self {
            binding: Binding::Listener(listener),
        }
    }

    /// Address the server will accept connections on.
    ///
    /// # Errors
    /// Propagates [`TcpListener::local_addr`] failures.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        match &self.binding {
            Binding::Address(addr) => Ok(*addr),
            Binding::Listener(listener) => listener.local_addr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn listener_configs_report_the_bound_port() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port");
        let expected = listener.local_addr().expect("bound address");
        let config = ServerConfig::from_listener(listener);
        assert_eq!(config.bind_addr().expect("address"), expected);
    }

    #[rstest]
    fn address_configs_echo_the_address() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().expect("literal");
        assert_eq!(ServerConfig::new(addr).bind_addr().expect("address"), addr);
    }
}
