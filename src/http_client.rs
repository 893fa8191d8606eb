use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use std::time::{Duration, Instant};

use crate::config::ProbeConfig;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Status and body prefix of a completed request. Headers are not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub body: Vec<u8>,
    /// Time until the response headers arrived; the body read is not counted.
    pub response_time: Duration,
}

/// One GET per call. Non-2xx statuses are successes here; only transport
/// failures (connect, DNS, timeout) come back as `Err`.
#[async_trait]
pub trait ProbeClient: Send + Sync {
    async fn fetch(&self, url: &str, body_cap: usize) -> anyhow::Result<Fetched>;
}

/// Build the shared client. The timeout covers the whole exchange, body read included.
pub fn create_probe_client(timeout: Duration, max_idle_connections: usize) -> anyhow::Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(max_idle_connections)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .tcp_nodelay(true)
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .use_rustls_tls()
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// reqwest-backed probe client, cheap to share across workers.
#[derive(Debug, Clone)]
pub struct HttpProbeClient {
    client: Client,
}

impl HttpProbeClient {
    pub fn new(config: &ProbeConfig) -> anyhow::Result<Self> {
        let client = create_probe_client(config.timeout(), config.concurrency)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeClient for HttpProbeClient {
    async fn fetch(&self, url: &str, body_cap: usize) -> anyhow::Result<Fetched> {
        let start = Instant::now();
        let mut resp = self.client.get(url).send().await?;
        let response_time = start.elapsed();
        let status = resp.status().as_u16();
        let body = read_prefix(&mut resp, body_cap).await;
        // `resp` is dropped here; the unread remainder is discarded with it.
        Ok(Fetched { status, body, response_time })
    }
}

/// Read chunks until `cap` bytes are collected or the body ends. A read error
/// after the headers arrived keeps whatever was already collected.
async fn read_prefix(resp: &mut Response, cap: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(cap.min(64 * 1024));
    while buf.len() < cap {
        match resp.chunk().await {
            Ok(Some(chunk)) => {
                let take = (cap - buf.len()).min(chunk.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, read = buf.len(), "body read stopped early");
                break;
            }
        }
    }
    buf
}
