use std::sync::Arc;

use async_trait::async_trait;

use super::sanitize::sanitize_bytes;
use super::{timed_fetch, ProbeStrategy};
use crate::http_client::ProbeClient;
use crate::observation::{Mode, Observation};

/// Path discovery against one base URL. Only 200 responses are reported;
/// everything else, transport failures included, is treated as "not there".
pub struct DirProbe {
    base: String,
    client: Arc<dyn ProbeClient>,
    body_cap: usize,
}

impl DirProbe {
    pub fn new(base: impl Into<String>, client: Arc<dyn ProbeClient>, body_cap: usize) -> Self {
        Self { base: base.into(), client, body_cap }
    }

    pub fn build_url(&self, candidate: &str) -> String {
        join_path(&self.base, candidate)
    }
}

/// Join without doubling or dropping the separator.
pub fn join_path(base: &str, segment: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), segment.trim_start_matches('/'))
}

#[async_trait]
impl ProbeStrategy for DirProbe {
    fn mode(&self) -> Mode {
        Mode::Dir
    }

    async fn probe(&self, candidate: &str) -> Option<Observation> {
        let url = self.build_url(candidate);
        let attempt = timed_fetch(self.client.as_ref(), &url, self.body_cap).await;

        let fetched = match attempt.result {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "dir probe failed");
                return None;
            }
        };
        if fetched.status != 200 {
            tracing::debug!(url = %url, status = fetched.status, "dir probe miss");
            return None;
        }

        tracing::debug!(url = %url, ms = attempt.duration_ms, "dir probe hit");
        Some(Observation {
            mode: Mode::Dir,
            target: candidate.to_string(),
            final_url: url,
            status_code: fetched.status,
            duration_ms: attempt.duration_ms,
            body_length: fetched.body.len(),
            body_sample: sanitize_bytes(&fetched.body),
            error: None,
        })
    }
}
