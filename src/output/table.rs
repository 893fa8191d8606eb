use std::io::{self, Write};

use crate::observation::Observation;

const RULE_WIDTH: usize = 110;

/// Render the fixed-width console table.
pub fn render_table(items: &[Observation]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{:<4} {:<6} {:<8} {:<10} {:<20} {}\n",
        "MODE", "CODE", "TIME", "SIZE", "TARGET", "SAMPLE"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for it in items {
        // failed ssrf attempts have no sample; show why instead
        let sample = match &it.error {
            Some(err) => format!("ERR: {}", err),
            None => it.body_sample.clone(),
        };
        out.push_str(&format!(
            "{:<4} {:<6} {:<8} {:<10} {:<20} {}\n",
            it.mode.as_str(),
            it.status_code,
            it.duration_ms,
            it.body_length,
            it.target,
            sample
        ));
    }
    out
}

pub fn print_table(items: &[Observation]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(render_table(items).as_bytes())?;
    stdout.flush()
}
