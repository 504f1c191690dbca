//! Check cycle engine

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use watch_common::{CheckerConfig, OracleConfig};
use watch_core::traits::{DomainRepository, DueDomain, SettleOutcome};
use watch_core::SnowflakeGenerator;
use watch_oracle::{blocked_for, StatusOracle};

/// Engine timing and batching parameters
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Time between sweeps
    pub sweep_interval: Duration,
    /// Maximum domains per oracle request
    pub batch_size: usize,
    /// Pause between batch requests, to stay under the oracle's own rate limit
    pub batch_pause: Duration,
}

impl EngineConfig {
    /// Assemble engine parameters from application configuration
    #[must_use]
    pub fn from_app(checker: &CheckerConfig, oracle: &OracleConfig) -> Self {
        Self {
            sweep_interval: Duration::from_secs(checker.sweep_interval_secs),
            batch_size: oracle.batch_size.max(1),
            batch_pause: Duration::from_millis(oracle.batch_pause_ms),
        }
    }
}

/// Outcome counters for one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Checks settled: status written, owner charged, history appended
    pub settled: usize,
    /// Settles lost to a concurrent check of the same domain
    pub superseded: usize,
    /// Settles skipped because the owner's balance ran out mid-sweep
    pub out_of_credits: usize,
    /// Per-domain settle failures (logged and skipped)
    pub domain_failures: usize,
    /// Whole batches skipped on oracle failure, without charges
    pub failed_batches: usize,
    /// True when this sweep was skipped because the previous one still ran
    pub skipped_overlap: bool,
}

/// The periodic check cycle engine
pub struct CheckEngine {
    domain_repo: Arc<dyn DomainRepository>,
    oracle: Arc<dyn StatusOracle>,
    ids: Arc<SnowflakeGenerator>,
    config: EngineConfig,
    /// Held for the duration of a sweep; an overlapping tick is skipped
    run_guard: Mutex<()>,
}

impl CheckEngine {
    /// Create a new engine over the given repository and oracle
    pub fn new(
        domain_repo: Arc<dyn DomainRepository>,
        oracle: Arc<dyn StatusOracle>,
        ids: Arc<SnowflakeGenerator>,
        config: EngineConfig,
    ) -> Self {
        Self {
            domain_repo,
            oracle,
            ids,
            config,
            run_guard: Mutex::new(()),
        }
    }

    /// Run the engine forever on its fixed period
    ///
    /// The first sweep runs immediately. Errors never terminate the loop;
    /// a failed sweep is retried naturally on the next tick.
    pub async fn run(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.config.sweep_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        info!(
            interval_secs = self.config.sweep_interval.as_secs(),
            batch_size = self.config.batch_size,
            "Check cycle engine started"
        );

        loop {
            interval.tick().await;
            let summary = self.sweep().await;
            debug!(?summary, "Sweep complete");
        }
    }

    /// Run one sweep over every eligible domain
    ///
    /// Returns counters describing what the sweep did. If the previous sweep
    /// is still in progress this one is skipped entirely.
    #[instrument(skip(self))]
    pub async fn sweep(&self) -> SweepSummary {
        let Ok(_guard) = self.run_guard.try_lock() else {
            warn!("Previous sweep still running, skipping this tick");
            return SweepSummary {
                skipped_overlap: true,
                ..SweepSummary::default()
            };
        };

        let mut summary = SweepSummary::default();

        let due = match self.domain_repo.due_domains().await {
            Ok(due) => due,
            Err(e) => {
                error!(error = %e, "Failed to select due domains");
                return summary;
            }
        };

        if due.is_empty() {
            return summary;
        }

        debug!(count = due.len(), "Checking due domains");

        for (index, batch) in due.chunks(self.config.batch_size).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.batch_pause).await;
            }
            self.process_batch(batch, &mut summary).await;
        }

        summary
    }

    /// Query the oracle for one batch and settle every domain in it
    ///
    /// An oracle failure skips the whole batch with no status changes and no
    /// charges; it will be retried on the next sweep. Per-domain settle
    /// failures are logged and do not stop the rest of the batch.
    async fn process_batch(&self, batch: &[DueDomain], summary: &mut SweepSummary) {
        let names: Vec<String> = batch.iter().map(|d| d.domain.domain.clone()).collect();

        let statuses = match self.oracle.check_batch(&names).await {
            Ok(statuses) => statuses,
            Err(e) => {
                error!(domains = batch.len(), error = %e, "Oracle batch call failed, skipping batch");
                summary.failed_batches += 1;
                return;
            }
        };

        for due in batch {
            let domain = &due.domain;
            let blocked = blocked_for(&statuses, &domain.domain);

            let outcome = self
                .domain_repo
                .settle_check(domain.id, domain.last_checked, blocked, self.ids.generate())
                .await;

            match outcome {
                Ok(SettleOutcome::Settled) => {
                    info!(
                        domain = %domain.domain,
                        blocked,
                        "Checked domain"
                    );
                    summary.settled += 1;
                }
                Ok(SettleOutcome::Superseded) => {
                    debug!(domain = %domain.domain, "Settle superseded by a concurrent check");
                    summary.superseded += 1;
                }
                Ok(SettleOutcome::InsufficientCredits) => {
                    debug!(domain = %domain.domain, "Owner out of credits, check skipped");
                    summary.out_of_credits += 1;
                }
                Err(e) => {
                    error!(domain = %domain.domain, error = %e, "Failed to settle check");
                    summary.domain_failures += 1;
                }
            }
        }
    }
}
