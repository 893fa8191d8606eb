pub mod dir;
pub mod sanitize;
pub mod ssrf;

pub use dir::DirProbe;
pub use sanitize::sanitize;
pub use ssrf::SsrfProbe;

use std::time::Instant;

use async_trait::async_trait;

use crate::http_client::{Fetched, ProbeClient};
use crate::observation::{Mode, Observation};

/// URL construction plus emission rule for one probing mode.
#[async_trait]
pub trait ProbeStrategy: Send + Sync {
    fn mode(&self) -> Mode;

    /// Probe one candidate. `None` means the outcome is not reported.
    async fn probe(&self, candidate: &str) -> Option<Observation>;
}

/// Result of a single timed attempt, failures included.
pub(crate) struct Attempt {
    pub result: anyhow::Result<Fetched>,
    pub duration_ms: u64,
}

/// Completed requests are timed up to the response headers, as reported by
/// the client. Failed ones are timed up to the failure.
pub(crate) async fn timed_fetch(client: &dyn ProbeClient, url: &str, body_cap: usize) -> Attempt {
    let start = Instant::now();
    let result = client.fetch(url, body_cap).await;
    let elapsed = match &result {
        Ok(fetched) => fetched.response_time,
        Err(_) => start.elapsed(),
    };
    Attempt { result, duration_ms: elapsed.as_millis() as u64 }
}
