//! DNS lookup seam and the hickory-backed implementation.

use crate::error::{ReconError, ReconResult};
use async_trait::async_trait;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

#[cfg(feature = "hickory")]
pub use self::hickory::HickoryLookup;

/// Default DNS server address
pub const DEFAULT_DNS_SERVER: Ipv4Addr = Ipv4Addr::new(8, 8, 8, 8);

/// Default DNS server port
pub const DEFAULT_DNS_PORT: u16 = 53;

/// An IPv4 address lookup used by pool workers.
///
/// Implementations return the addresses in the order the server answered.
#[async_trait]
pub trait HostLookup: Send + Sync {
    /// Resolve `hostname` to its A records
    async fn lookup_ipv4(&self, hostname: &str) -> ReconResult<Vec<Ipv4Addr>>;
}

/// Name server every lookup is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsServer {
    /// Server address
    pub addr: IpAddr,
    /// Server port
    pub port: u16,
}

impl Default for DnsServer {
    fn default() -> Self {
        Self::new(IpAddr::V4(DEFAULT_DNS_SERVER), DEFAULT_DNS_PORT)
    }
}

impl DnsServer {
    /// Create a server from an address and port
    #[must_use]
    pub const fn new(addr: IpAddr, port: u16) -> Self {
        Self { addr, port }
    }

    /// Build a server from user input.
    ///
    /// IP literals are used as-is. Anything else is resolved once through
    /// the system resolver, preferring an IPv4 answer.
    pub async fn resolve(host: &str, port: u16) -> ReconResult<Self> {
        let host = host.trim();
        if host.is_empty() {
            return Err(ReconError::InvalidServer("empty server address".to_string()));
        }

        if let Ok(addr) = host.parse::<IpAddr>() {
            return Ok(Self::new(addr, port));
        }

        let addrs: Vec<IpAddr> = tokio::net::lookup_host((host, port))
            .await
            .map_err(|e| ReconError::InvalidServer(format!("{host}: {e}")))?
            .map(|a| a.ip())
            .collect();

        addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .map(|addr| Self::new(*addr, port))
            .ok_or_else(|| ReconError::InvalidServer(format!("{host}: no addresses")))
    }
}

impl fmt::Display for DnsServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.addr {
            IpAddr::V4(ip) => write!(f, "{ip}:{}", self.port),
            IpAddr::V6(ip) => write!(f, "[{ip}]:{}", self.port),
        }
    }
}

#[cfg(feature = "hickory")]
mod hickory {
    use super::{DnsServer, HostLookup};
    use crate::error::{ReconError, ReconResult};
    use async_trait::async_trait;
    use hickory_resolver::config::{LookupIpStrategy, NameServerConfigGroup, ResolverConfig};
    use hickory_resolver::name_server::TokioConnectionProvider;
    use hickory_resolver::TokioResolver;
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;
    use tracing::trace;

    /// Lookup that sends A queries to exactly one configured name server
    #[derive(Clone)]
    pub struct HickoryLookup {
        resolver: TokioResolver,
        server: DnsServer,
    }

    impl HickoryLookup {
        /// Build a resolver bound to `server`.
        ///
        /// The system configuration is ignored. Queries go over UDP with
        /// TCP fallback, answers are not cached, and each query is bounded
        /// by `timeout`.
        #[must_use]
        pub fn new(server: DnsServer, timeout: Duration) -> Self {
            let name_servers =
                NameServerConfigGroup::from_ips_clear(&[server.addr], server.port, true);
            let config = ResolverConfig::from_parts(None, vec![], name_servers);

            let mut builder =
                TokioResolver::builder_with_config(config, TokioConnectionProvider::default());
            let opts = builder.options_mut();
            opts.ip_strategy = LookupIpStrategy::Ipv4Only;
            opts.timeout = timeout;
            opts.cache_size = 0;

            Self {
                resolver: builder.build(),
                server,
            }
        }

        /// Server this lookup queries
        #[must_use]
        pub const fn server(&self) -> DnsServer {
            self.server
        }
    }

    #[async_trait]
    impl HostLookup for HickoryLookup {
        async fn lookup_ipv4(&self, hostname: &str) -> ReconResult<Vec<Ipv4Addr>> {
            trace!(hostname, server = %self.server, "A lookup");

            let lookup = self
                .resolver
                .lookup_ip(hostname)
                .await
                .map_err(|e| ReconError::Dns(e.to_string()))?;

            Ok(lookup
                .iter()
                .filter_map(|ip| match ip {
                    IpAddr::V4(v4) => Some(v4),
                    IpAddr::V6(_) => None,
                })
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[tokio::test]
    async fn ip_literal_is_used_directly() {
        let server = DnsServer::resolve("1.1.1.1", 5353).await.unwrap();
        assert_eq!(server, DnsServer::new("1.1.1.1".parse().unwrap(), 5353));
        assert_eq!(server.to_string(), "1.1.1.1:5353");
    }

    #[tokio::test]
    async fn localhost_name_resolves() {
        let server = DnsServer::resolve("localhost", 53).await.unwrap();
        assert!(server.addr.is_loopback());
    }

    #[tokio::test]
    async fn empty_server_is_rejected() {
        assert_err!(DnsServer::resolve("  ", 53).await);
    }

    #[test]
    fn default_is_google_dns() {
        assert_eq!(DnsServer::default().to_string(), "8.8.8.8:53");
    }

    #[test]
    fn ipv6_display_is_bracketed() {
        let server = DnsServer::new("::1".parse().unwrap(), 53);
        assert_eq!(server.to_string(), "[::1]:53");
    }

    #[cfg(feature = "hickory")]
    #[tokio::test]
    async fn hickory_lookup_against_dead_server_fails() {
        use std::time::Duration;

        // Nothing listens on the discard port; the query errors or times out.
        let server = DnsServer::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9);
        let lookup = HickoryLookup::new(server, Duration::from_millis(200));
        assert_eq!(lookup.server(), server);

        let outcome = tokio::time::timeout(
            Duration::from_secs(10),
            lookup.lookup_ipv4("www.example.com"),
        )
        .await;

        match outcome {
            Ok(result) => assert!(result.is_err()),
            Err(_) => panic!("lookup did not honour its timeout"),
        }
    }

    /// Answers every A query with `answers`, in order, and reports the
    /// record type of each query it sees.
    #[cfg(feature = "hickory")]
    async fn stub_name_server(
        answers: Vec<Ipv4Addr>,
    ) -> (
        std::net::SocketAddr,
        tokio::sync::mpsc::UnboundedReceiver<hickory_resolver::proto::rr::RecordType>,
    ) {
        use hickory_resolver::proto::op::{Message, MessageType, ResponseCode};
        use hickory_resolver::proto::rr::rdata::A;
        use hickory_resolver::proto::rr::{RData, Record, RecordType};

        let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let (seen_tx, seen_rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            loop {
                let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                    return;
                };
                let Ok(request) = Message::from_vec(&buf[..len]) else {
                    continue;
                };

                let mut response = Message::new();
                response
                    .set_id(request.id())
                    .set_message_type(MessageType::Response)
                    .set_op_code(request.op_code())
                    .set_recursion_desired(request.recursion_desired())
                    .set_recursion_available(true)
                    .set_response_code(ResponseCode::NoError);

                for query in request.queries() {
                    let _ = seen_tx.send(query.query_type());
                    response.add_query(query.clone());
                    if query.query_type() == RecordType::A {
                        for ip in &answers {
                            response.add_answer(Record::from_rdata(
                                query.name().clone(),
                                60,
                                RData::A(A(*ip)),
                            ));
                        }
                    }
                }

                let bytes = response.to_vec().unwrap();
                let _ = socket.send_to(&bytes, peer).await;
            }
        });

        (addr, seen_rx)
    }

    #[cfg(feature = "hickory")]
    #[tokio::test]
    async fn hickory_lookup_queries_configured_server() {
        use hickory_resolver::proto::rr::RecordType;
        use std::time::Duration;

        let answers = vec![Ipv4Addr::new(1, 2, 3, 4), Ipv4Addr::new(1, 2, 3, 5)];
        let (addr, mut seen) = stub_name_server(answers.clone()).await;

        let server = DnsServer::new(addr.ip(), addr.port());
        let lookup = HickoryLookup::new(server, Duration::from_secs(2));

        let ips = tokio::time::timeout(
            Duration::from_secs(10),
            lookup.lookup_ipv4("www.example.com"),
        )
        .await
        .expect("lookup hung")
        .unwrap();

        assert_eq!(ips, answers);

        let mut types = Vec::new();
        while let Ok(ty) = seen.try_recv() {
            types.push(ty);
        }
        assert!(!types.is_empty());
        assert!(types.iter().all(|ty| *ty == RecordType::A), "{types:?}");
    }
}
