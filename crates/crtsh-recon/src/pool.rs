//! Bounded worker pool that resolves a [`HostnameSet`].
//!
//! The pool is wired from two one-way channels:
//!
//! ```text
//! producer ──work queue──▶ worker × N ──results──▶ aggregator ──▶ ResultCollection
//! ```
//!
//! Workers share the receiving end of the work queue and each pulls the next
//! hostname until the queue is drained and closed, so a pool with more
//! workers than hostnames simply has idle workers exit early. Only the
//! aggregator ever touches the [`ResultCollection`].
//!
//! Shutdown follows [`PoolPhase`]: every worker is joined before the pool's
//! own results sender is dropped, and the aggregator is joined only after
//! that. Closing the sink earlier would race live workers; waiting on the
//! aggregator while a sender is still alive would never return.

use crate::dns::HostLookup;
use crate::error::{ReconError, ReconResult};
use crtsh_core::{HostnameSet, ResolutionResult, ResultCollection};
use futures_util::future::join_all;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// Default number of concurrent lookup workers
pub const DEFAULT_WORKERS: usize = 10;

/// Default per-lookup deadline
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Work-queue slots per worker
const QUEUE_DEPTH_PER_WORKER: usize = 4;

/// Pool sizing and deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker tasks
    pub workers: usize,
    /// Deadline applied to every individual lookup
    pub lookup_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl PoolConfig {
    /// Set the worker count (at least one worker always runs)
    #[must_use]
    pub const fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the per-lookup deadline
    #[must_use]
    pub const fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Workers actually spawned for `total` hostnames: at least one, and
    /// never more than there are names to resolve.
    fn effective_workers(&self, total: usize) -> usize {
        self.workers.min(total).max(1)
    }
}

/// Stages of a pool run, in the only order they may occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPhase {
    /// Producer is pushing hostnames into the work queue
    Filling,
    /// Work queue is closed; waiting for every worker to exit
    Draining,
    /// All workers are gone; dropping the last results sender
    Sealing,
    /// Results sink is closed; waiting for the aggregator to finish
    Collecting,
    /// Collection is complete and owned by the caller
    Done,
}

impl PoolPhase {
    /// The phase that must follow this one
    #[must_use]
    pub const fn successor(self) -> Self {
        match self {
            Self::Filling => Self::Draining,
            Self::Draining => Self::Sealing,
            Self::Sealing => Self::Collecting,
            Self::Collecting | Self::Done => Self::Done,
        }
    }
}

impl fmt::Display for PoolPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Filling => "filling",
            Self::Draining => "draining",
            Self::Sealing => "sealing",
            Self::Collecting => "collecting",
            Self::Done => "done",
        })
    }
}

/// Resolves every hostname of a set with bounded concurrency
pub struct ResolverPool {
    lookup: Arc<dyn HostLookup>,
    config: PoolConfig,
}

impl ResolverPool {
    /// Create a pool around a lookup implementation
    pub fn new<L: HostLookup + 'static>(lookup: L, config: PoolConfig) -> Self {
        Self::with_shared(Arc::new(lookup), config)
    }

    /// Create a pool around an already shared lookup
    #[must_use]
    pub fn with_shared(lookup: Arc<dyn HostLookup>, config: PoolConfig) -> Self {
        Self { lookup, config }
    }

    /// Pool configuration
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    /// Resolve each hostname exactly once.
    ///
    /// Lookup failures never fail the run; they are recorded as
    /// unresolvable. The returned collection has one entry per input
    /// hostname, in arrival order.
    pub async fn resolve_all(&self, names: &HostnameSet) -> ReconResult<ResultCollection> {
        let total = names.len();
        let workers = self.config.effective_workers(total);
        let mut phase = PoolPhase::Filling;
        debug!(hostnames = total, workers, %phase, "starting resolver pool");

        let (work_tx, work_rx) =
            mpsc::channel::<String>(workers.saturating_mul(QUEUE_DEPTH_PER_WORKER));
        let (results_tx, results_rx) = mpsc::channel::<ResolutionResult>(workers);
        let queue = Arc::new(Mutex::new(work_rx));

        let aggregator = tokio::spawn(aggregate(results_rx, total));

        let handles: Vec<JoinHandle<usize>> = (0..workers)
            .map(|id| {
                tokio::spawn(worker(
                    id,
                    Arc::clone(&queue),
                    results_tx.clone(),
                    Arc::clone(&self.lookup),
                    self.config.lookup_timeout,
                ))
            })
            .collect();
        // Workers hold the only references to the receiver from here on.
        drop(queue);

        for name in names {
            if work_tx.send(name.clone()).await.is_err() {
                warn!("every worker exited before the queue was filled");
                break;
            }
        }
        drop(work_tx);

        phase = advance(phase);
        let mut failure = None;
        let mut handled = 0;
        for joined in join_all(handles).await {
            match joined {
                Ok(count) => handled += count,
                Err(e) => failure = Some(ReconError::Worker(e.to_string())),
            }
        }

        phase = advance(phase);
        drop(results_tx);

        phase = advance(phase);
        let collection = aggregator
            .await
            .map_err(|e| ReconError::Worker(format!("aggregator: {e}")))?;

        phase = advance(phase);
        debug_assert_eq!(phase, PoolPhase::Done);

        if let Some(err) = failure {
            return Err(err);
        }
        if collection.len() != total {
            return Err(ReconError::Worker(format!(
                "collected {} results for {total} hostnames",
                collection.len()
            )));
        }

        debug!(
            handled,
            resolvable = collection.resolvable_count(),
            unresolvable = collection.unresolvable_count(),
            "resolver pool finished"
        );
        Ok(collection)
    }
}

fn advance(phase: PoolPhase) -> PoolPhase {
    let next = phase.successor();
    debug!(from = %phase, to = %next, "pool phase");
    next
}

/// Take hostnames until the queue is closed and empty, emitting one result each
async fn worker(
    id: usize,
    queue: Arc<Mutex<mpsc::Receiver<String>>>,
    results: mpsc::Sender<ResolutionResult>,
    lookup: Arc<dyn HostLookup>,
    timeout: Duration,
) -> usize {
    let mut handled = 0;

    loop {
        // The lock is only held while waiting for the next item.
        let next = queue.lock().await.recv().await;
        let Some(hostname) = next else {
            break;
        };

        let result = resolve_one(lookup.as_ref(), hostname, timeout).await;
        if results.send(result).await.is_err() {
            warn!(worker = id, "results sink closed while workers were running");
            break;
        }
        handled += 1;
    }

    trace!(worker = id, handled, "worker exiting");
    handled
}

async fn resolve_one(
    lookup: &dyn HostLookup,
    hostname: String,
    timeout: Duration,
) -> ResolutionResult {
    match tokio::time::timeout(timeout, lookup.lookup_ipv4(&hostname)).await {
        Ok(Ok(ips)) if !ips.is_empty() => ResolutionResult::resolved(hostname, ips),
        Ok(Ok(_)) => {
            debug!(hostname, "no A records");
            ResolutionResult::unresolvable(hostname)
        }
        Ok(Err(e)) => {
            debug!(hostname, error = %e, "lookup failed");
            ResolutionResult::unresolvable(hostname)
        }
        Err(_) => {
            debug!(hostname, timeout_ms = timeout.as_millis(), "lookup timed out");
            ResolutionResult::unresolvable(hostname)
        }
    }
}

/// Single writer for the result collection
async fn aggregate(
    mut results: mpsc::Receiver<ResolutionResult>,
    expected: usize,
) -> ResultCollection {
    let mut collection = ResultCollection::with_capacity(expected);
    while let Some(result) = results.recv().await {
        collection.push(result);
    }
    collection
}
