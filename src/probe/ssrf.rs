use std::sync::Arc;

use async_trait::async_trait;
use url::form_urlencoded;

use super::sanitize::sanitize_bytes;
use super::{timed_fetch, ProbeStrategy};
use crate::http_client::ProbeClient;
use crate::observation::{Mode, Observation};

pub const PLACEHOLDER: &str = "{TARGET}";

/// Blind SSRF fan-out: each candidate is substituted into an endpoint
/// template. Every attempt is reported, failed ones with status 0.
pub struct SsrfProbe {
    template: String,
    client: Arc<dyn ProbeClient>,
    body_cap: usize,
}

impl SsrfProbe {
    pub fn new(template: impl Into<String>, client: Arc<dyn ProbeClient>, body_cap: usize) -> Self {
        Self { template: template.into(), client, body_cap }
    }

    pub fn build_url(&self, candidate: &str) -> String {
        substitute(&self.template, candidate)
    }
}

/// Replace the first placeholder with the candidate escaped as a query
/// component (space becomes `+`, reserved bytes are percent-escaped).
pub fn substitute(template: &str, candidate: &str) -> String {
    let escaped: String = form_urlencoded::byte_serialize(candidate.as_bytes()).collect();
    template.replacen(PLACEHOLDER, &escaped, 1)
}

#[async_trait]
impl ProbeStrategy for SsrfProbe {
    fn mode(&self) -> Mode {
        Mode::Ssrf
    }

    async fn probe(&self, candidate: &str) -> Option<Observation> {
        let url = self.build_url(candidate);
        let attempt = timed_fetch(self.client.as_ref(), &url, self.body_cap).await;

        let obs = match attempt.result {
            Ok(fetched) => {
                tracing::debug!(url = %url, status = fetched.status, ms = attempt.duration_ms, "ssrf probe done");
                Observation {
                    mode: Mode::Ssrf,
                    target: candidate.to_string(),
                    final_url: url,
                    status_code: fetched.status,
                    duration_ms: attempt.duration_ms,
                    body_length: fetched.body.len(),
                    body_sample: sanitize_bytes(&fetched.body),
                    error: None,
                }
            }
            Err(e) => {
                let mut error = format!("{:#}", e);
                if error.is_empty() {
                    error = "request failed".to_string();
                }
                tracing::debug!(url = %url, error = %error, "ssrf probe failed");
                Observation {
                    mode: Mode::Ssrf,
                    target: candidate.to_string(),
                    final_url: url,
                    status_code: 0,
                    duration_ms: attempt.duration_ms,
                    body_length: 0,
                    body_sample: String::new(),
                    error: Some(error),
                }
            }
        };
        Some(obs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ip_substituted() {
        assert_eq!(
            substitute("https://victim/ssrf?url={TARGET}", "10.0.0.1"),
            "https://victim/ssrf?url=10.0.0.1"
        );
    }

    #[test]
    fn reserved_characters_escaped() {
        assert_eq!(substitute("https://v/s?u={TARGET}", "a b"), "https://v/s?u=a+b");
        assert_eq!(substitute("https://v/s?u={TARGET}", "a+b&c=d"), "https://v/s?u=a%2Bb%26c%3Dd");
        assert_eq!(
            substitute("https://v/s?u={TARGET}", "http://169.254.169.254/latest"),
            "https://v/s?u=http%3A%2F%2F169.254.169.254%2Flatest"
        );
    }

    #[test]
    fn only_first_placeholder_replaced() {
        assert_eq!(substitute("{TARGET}/{TARGET}", "x"), "x/{TARGET}");
    }
}
