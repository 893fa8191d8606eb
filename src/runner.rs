use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{Cli, Commands, RunArgs};
use recon_probe::concurrent::Dispatcher;
use recon_probe::config::ProbeConfig;
use recon_probe::http_client::{HttpProbeClient, ProbeClient};
use recon_probe::observation::{sort_by_target, Observation};
use recon_probe::output::{print_table, read_jsonl, write_csv, write_jsonl};
use recon_probe::probe::ssrf::PLACEHOLDER;
use recon_probe::probe::{DirProbe, ProbeStrategy, SsrfProbe};
use recon_probe::utils::{ensure_parent_dir, load_lines, normalize_base};

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    // Keep reqwest/hyper at INFO so --debug only floods with our own probe lines.
    use tracing_subscriber::EnvFilter;
    let crate_level = if cli.debug { "debug" } else if cli.verbose { "info" } else { "warn" };
    let filter_str = format!("recon_probe={lvl},recon={lvl},reqwest=info,hyper=info", lvl = crate_level);
    let env_filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Dir { target, wordlist, run } => run_dir(target, wordlist, run).await,
        Commands::Ssrf { endpoint, targets, run } => run_ssrf(endpoint, targets, run).await,
        Commands::Show { file, sort } => show(&file, sort),
    }
}

async fn run_dir(target: String, wordlist: PathBuf, run: RunArgs) -> anyhow::Result<()> {
    if target.trim().is_empty() {
        bail!("missing target");
    }
    let base = normalize_base(&target);
    url::Url::parse(&base).with_context(|| format!("invalid target URL {}", base))?;

    let words = load_lines(&wordlist).with_context(|| format!("wordlist {} not usable", wordlist.display()))?;
    if words.is_empty() {
        tracing::warn!(path = %wordlist.display(), "wordlist has no entries");
    }
    let config = resolve_config(ProbeConfig::dir(), &run)?;

    println!("[*] Scanning {} using {} words...", base, words.len());
    let client: Arc<dyn ProbeClient> = Arc::new(HttpProbeClient::new(&config)?);
    let strategy = Arc::new(DirProbe::new(base, client, config.body_cap));
    let results = execute(strategy, words, &config, &run).await;
    report(results, &run)
}

async fn run_ssrf(endpoint: String, targets: PathBuf, run: RunArgs) -> anyhow::Result<()> {
    validate_template(&endpoint)?;
    let candidates = load_lines(&targets).with_context(|| format!("failed to load targets from {}", targets.display()))?;
    if candidates.is_empty() {
        tracing::warn!(path = %targets.display(), "target list has no entries");
    }
    let config = resolve_config(ProbeConfig::ssrf(), &run)?;

    println!("[*] Running SSRF mode using {} targets...", candidates.len());
    let client: Arc<dyn ProbeClient> = Arc::new(HttpProbeClient::new(&config)?);
    let strategy = Arc::new(SsrfProbe::new(endpoint, client, config.body_cap));
    let results = execute(strategy, candidates, &config, &run).await;
    report(results, &run)
}

fn show(file: &Path, sort: bool) -> anyhow::Result<()> {
    let mut results = read_jsonl(file)?;
    if sort {
        sort_by_target(&mut results);
    }
    print_table(&results)?;
    Ok(())
}

/// Mode preset, then the optional JSON file, then explicit flags.
fn resolve_config(preset: ProbeConfig, run: &RunArgs) -> anyhow::Result<ProbeConfig> {
    let mut config = match &run.config {
        Some(path) => preset.merge_json_file(path)?,
        None => preset,
    };
    if let Some(c) = run.concurrency {
        config.concurrency = c;
    }
    if let Some(t) = run.timeout {
        config.timeout_secs = t;
    }
    if let Some(b) = run.body_cap {
        config.body_cap = b;
    }
    config.validate()?;
    tracing::info!(?config, "probe configuration");
    Ok(config)
}

fn validate_template(endpoint: &str) -> anyhow::Result<()> {
    if endpoint.trim().is_empty() {
        bail!("missing endpoint");
    }
    match endpoint.matches(PLACEHOLDER).count() {
        0 => bail!("endpoint must contain {}", PLACEHOLDER),
        1 => {}
        n => bail!("endpoint contains {} placeholders, expected exactly one", n),
    }
    url::Url::parse(&endpoint.replace(PLACEHOLDER, "probe"))
        .with_context(|| format!("invalid endpoint URL {}", endpoint))?;
    Ok(())
}

async fn execute<S>(strategy: Arc<S>, candidates: Vec<String>, config: &ProbeConfig, run: &RunArgs) -> Vec<Observation>
where
    S: ProbeStrategy + 'static,
{
    let bar = if run.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(candidates.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    };

    let dispatcher = Dispatcher::new(config.concurrency).with_progress(bar.clone());
    let results = dispatcher.dispatch(candidates, strategy).await;
    bar.finish_and_clear();
    println!("[*] {} probed, {} reported", dispatcher.probed(), dispatcher.emitted());
    results
}

fn report(mut results: Vec<Observation>, run: &RunArgs) -> anyhow::Result<()> {
    if run.sort {
        sort_by_target(&mut results);
    }
    print_table(&results)?;

    if let Some(path) = &run.jsonl {
        ensure_parent_dir(path)?;
        write_jsonl(path, &results)?;
        println!("[*] Wrote {}", path.display());
    }
    if let Some(path) = &run.csv {
        ensure_parent_dir(path)?;
        write_csv(path, &results)?;
        println!("[*] Wrote {}", path.display());
    }
    Ok(())
}
