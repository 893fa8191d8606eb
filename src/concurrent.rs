use futures::future::join_all;
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::observation::Observation;
use crate::probe::ProbeStrategy;

/// Bounded worker pool that runs a probe strategy over a candidate list.
///
/// Completion happens in three stages: the producer closes the work queue
/// after the last candidate, workers exit once the queue is drained, and the
/// result sink closes when the last worker is gone. The collector returns
/// when the sink is closed, so nothing is lost and no task outlives the call.
pub struct Dispatcher {
    concurrency: usize,
    probed: Arc<AtomicUsize>,
    emitted: Arc<AtomicUsize>,
    progress: Option<ProgressBar>,
}

impl Dispatcher {
    /// `concurrency` is clamped to at least one worker.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            probed: Arc::new(AtomicUsize::new(0)),
            emitted: Arc::new(AtomicUsize::new(0)),
            progress: None,
        }
    }

    /// Tick `bar` once per probed candidate.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probe every candidate and return the emitted observations in completion order.
    pub async fn dispatch<S>(&self, candidates: Vec<String>, strategy: Arc<S>) -> Vec<Observation>
    where
        S: ProbeStrategy + ?Sized + 'static,
    {
        let total = candidates.len();
        tracing::info!(mode = %strategy.mode(), candidates = total, workers = self.concurrency, "dispatch started");

        let (job_tx, job_rx) = mpsc::channel::<String>(self.concurrency);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Observation>();

        let producer = tokio::spawn(async move {
            for candidate in candidates {
                if job_tx.send(candidate).await.is_err() {
                    // every worker is gone
                    break;
                }
            }
            // job_tx dropped here, closing the queue
        });

        let mut workers = Vec::with_capacity(self.concurrency);
        for id in 0..self.concurrency {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let strategy = strategy.clone();
            let probed = self.probed.clone();
            let emitted = self.emitted.clone();
            let progress = self.progress.clone();

            workers.push(tokio::spawn(async move {
                loop {
                    // Hold the lock only while receiving so other workers can pull.
                    let next = job_rx.lock().await.recv().await;
                    let Some(candidate) = next else { break };

                    let outcome = strategy.probe(&candidate).await;
                    probed.fetch_add(1, Ordering::Relaxed);
                    if let Some(bar) = &progress {
                        bar.inc(1);
                    }
                    if let Some(obs) = outcome {
                        emitted.fetch_add(1, Ordering::Relaxed);
                        if result_tx.send(obs).is_err() {
                            break;
                        }
                    }
                }
                tracing::trace!(worker = id, "worker exited");
            }));
        }
        // Only worker clones remain, so the sink closes when the last worker exits.
        drop(result_tx);

        let barrier = tokio::spawn(async move {
            for (id, res) in join_all(workers).await.into_iter().enumerate() {
                if let Err(e) = res {
                    tracing::error!(worker = id, error = %e, "worker task failed");
                }
            }
        });

        let mut results = Vec::new();
        while let Some(obs) = result_rx.recv().await {
            results.push(obs);
        }

        if let Err(e) = producer.await {
            tracing::error!(error = %e, "producer task failed");
        }
        if let Err(e) = barrier.await {
            tracing::error!(error = %e, "worker barrier failed");
        }

        tracing::info!(probed = self.probed(), emitted = results.len(), "dispatch finished");
        results
    }

    /// Candidates probed so far, across every run on this dispatcher.
    pub fn probed(&self) -> usize {
        self.probed.load(Ordering::Relaxed)
    }

    /// Observations emitted so far, across every run on this dispatcher.
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::Relaxed)
    }
}
