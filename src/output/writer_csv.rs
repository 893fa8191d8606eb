use std::fs::File;
use std::path::Path;

use anyhow::Context;
use csv::Writer;

use crate::observation::Observation;

pub fn write_csv(path: &Path, items: &[Observation]) -> anyhow::Result<()> {
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = Writer::from_writer(f);
    w.write_record(["mode", "target", "final_url", "status_code", "duration_ms", "body_length", "body_sample", "error"])?;
    for it in items {
        w.write_record(&[
            it.mode.to_string(),
            it.target.clone(),
            it.final_url.clone(),
            it.status_code.to_string(),
            it.duration_ms.to_string(),
            it.body_length.to_string(),
            it.body_sample.clone(),
            it.error.clone().unwrap_or_default(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
