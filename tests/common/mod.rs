#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use recon_probe::http_client::{Fetched, ProbeClient};

/// Replies per URL: `Ok((status, body))` or a transport error message.
/// Unknown URLs answer 404 with an empty body.
#[derive(Default)]
pub struct ScriptedClient {
    replies: HashMap<String, Result<(u16, Vec<u8>), String>>,
    response_time: Duration,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, status: u16, body: &str) -> Self {
        self.replies.insert(url.to_string(), Ok((status, body.as_bytes().to_vec())));
        self
    }

    pub fn with_response_time(mut self, t: Duration) -> Self {
        self.response_time = t;
        self
    }

    pub fn fail(mut self, url: &str, error: &str) -> Self {
        self.replies.insert(url.to_string(), Err(error.to_string()));
        self
    }
}

#[async_trait]
impl ProbeClient for ScriptedClient {
    async fn fetch(&self, url: &str, body_cap: usize) -> anyhow::Result<Fetched> {
        match self.replies.get(url) {
            Some(Ok((status, body))) => Ok(Fetched {
                status: *status,
                body: body[..body.len().min(body_cap)].to_vec(),
                response_time: self.response_time,
            }),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            None => Ok(Fetched { status: 404, body: Vec::new(), response_time: self.response_time }),
        }
    }
}

/// Counts how many fetches overlap and records the peak.
pub struct CountingClient {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
    delay: Duration,
}

impl CountingClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            delay,
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProbeClient for CountingClient {
    async fn fetch(&self, _url: &str, _body_cap: usize) -> anyhow::Result<Fetched> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Fetched { status: 200, body: b"ok".to_vec(), response_time: self.delay })
    }
}

pub fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
