use std::fs;
use std::path::Path;

use anyhow::Context;

/// Read a word or target list: one entry per line, trimmed, blank lines and
/// `#` comments skipped. Order is kept.
pub fn load_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_lines(&data))
}

pub fn parse_lines(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Promote a bare host to an https base URL; anything already carrying a
/// scheme is left alone.
pub fn normalize_base(target: &str) -> String {
    let target = target.trim();
    if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("https://{}", target)
    }
}

pub fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blanks_skipped() {
        let lines = parse_lines("admin\n\n  # comment\n  .git/config  \r\n#x\nbackup\n");
        assert_eq!(lines, ["admin", ".git/config", "backup"]);
    }

    #[test]
    fn bare_host_gets_https() {
        assert_eq!(normalize_base("example.com"), "https://example.com");
        assert_eq!(normalize_base("http://10.0.0.5:8080/"), "http://10.0.0.5:8080/");
    }
}
