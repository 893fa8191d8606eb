use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Dir,
    Ssrf,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Dir => "dir",
            Mode::Ssrf => "ssrf",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of probing a single candidate. Built once by the worker that ran
/// the probe and never mutated after it is handed to the result sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub mode: Mode,
    pub target: String,
    pub final_url: String,
    /// 0 when the request never completed.
    pub status_code: u16,
    pub duration_ms: u64,
    /// Bytes read into the sample, not the advertised content length.
    pub body_length: usize,
    pub body_sample: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sort observations by target so reports are stable across runs.
pub fn sort_by_target(items: &mut [Observation]) {
    items.sort_by(|a, b| a.target.cmp(&b.target).then_with(|| a.final_url.cmp(&b.final_url)));
}
