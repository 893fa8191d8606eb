use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DIR_CONCURRENCY: usize = 50;
pub const SSRF_CONCURRENCY: usize = 10;
pub const DIR_BODY_CAP: usize = 1024;
pub const SSRF_BODY_CAP: usize = 2048;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Per-run settings handed to the probe client and the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub body_cap: usize,
}

impl ProbeConfig {
    /// Preset for directory discovery.
    pub fn dir() -> Self {
        Self { timeout_secs: DEFAULT_TIMEOUT_SECS, concurrency: DIR_CONCURRENCY, body_cap: DIR_BODY_CAP }
    }

    /// Preset for SSRF endpoint fan-out.
    pub fn ssrf() -> Self {
        Self { timeout_secs: DEFAULT_TIMEOUT_SECS, concurrency: SSRF_CONCURRENCY, body_cap: SSRF_BODY_CAP }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Overlay the fields present in a JSON file on top of `self`.
    pub fn merge_json_file(self, path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let overlay: PartialConfig = serde_json::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(Self {
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            concurrency: overlay.concurrency.unwrap_or(self.concurrency),
            body_cap: overlay.body_cap.unwrap_or(self.body_cap),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.concurrency == 0 {
            bail!("concurrency must be at least 1");
        }
        if self.timeout_secs == 0 {
            bail!("timeout must be at least 1 second");
        }
        if self.body_cap == 0 {
            bail!("body cap must be at least 1 byte");
        }
        Ok(())
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::dir()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    timeout_secs: Option<u64>,
    concurrency: Option<usize>,
    body_cap: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_modes() {
        assert_eq!(ProbeConfig::dir().concurrency, 50);
        assert_eq!(ProbeConfig::dir().body_cap, 1024);
        assert_eq!(ProbeConfig::ssrf().concurrency, 10);
        assert_eq!(ProbeConfig::ssrf().body_cap, 2048);
        assert_eq!(ProbeConfig::ssrf().timeout(), Duration::from_secs(10));
    }

    #[test]
    fn json_overlay_keeps_missing_fields() {
        let path = std::env::temp_dir().join(format!("recon_probe_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"concurrency": 3}"#).unwrap();
        let cfg = ProbeConfig::ssrf().merge_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.concurrency, 3);
        assert_eq!(cfg.body_cap, 2048);
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn zero_concurrency_rejected() {
        let cfg = ProbeConfig { concurrency: 0, ..ProbeConfig::dir() };
        assert!(cfg.validate().is_err());
        assert!(ProbeConfig::dir().validate().is_ok());
    }
}
