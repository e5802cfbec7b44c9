//! Load orchestration: timeout ceiling, minimum loading display, cleanup.
//!
//! One [`LoadOrchestrator`] backs one view. Each [`load`](LoadOrchestrator::load)
//! is a cycle:
//!
//! ```text
//! Idle -> Loading -> ShowingMinDuration -> Ready
//!                 \-> Error
//! ```
//!
//! A success that arrives before the minimum display time holds the view in
//! `ShowingMinDuration` until `min_display` has passed since the call
//! started. A failure goes to `Error` straight away. Starting a new cycle or
//! tearing the orchestrator down cancels a pending dismissal, so a stale
//! timer never flips the phase.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use prosmart_catalog::catalog::CategoryTree;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::error::{FetchError, LoadErrorKind, LoadFailure};
use crate::policy::LoadPolicy;
use crate::source::CatalogSource;

/// Where a view is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Waiting for the API.
    Loading,
    /// Data is in; the loading state is held until the floor passes.
    ShowingMinDuration,
    /// Data is shown.
    Ready,
    /// The load failed.
    Error(LoadErrorKind),
}

impl LoadPhase {
    /// Check if the loading indicator is visible.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadPhase::Loading | LoadPhase::ShowingMinDuration)
    }

    /// Check if the cycle is over.
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadPhase::Ready | LoadPhase::Error(_))
    }
}

/// Runs load cycles against a [`CatalogSource`].
pub struct LoadOrchestrator<S> {
    source: S,
    policy: LoadPolicy,
    phase: Arc<watch::Sender<LoadPhase>>,
    cycle: Arc<AtomicU64>,
    dismissal: Mutex<Option<JoinHandle<()>>>,
}

impl<S: CatalogSource> LoadOrchestrator<S> {
    /// Create an idle orchestrator.
    pub fn new(source: S, policy: LoadPolicy) -> Self {
        let (phase, _) = watch::channel(LoadPhase::Idle);
        Self {
            source,
            policy,
            phase: Arc::new(phase),
            cycle: Arc::new(AtomicU64::new(0)),
            dismissal: Mutex::new(None),
        }
    }

    /// The timing policy.
    pub fn policy(&self) -> &LoadPolicy {
        &self.policy
    }

    /// Current phase.
    pub fn phase(&self) -> LoadPhase {
        *self.phase.borrow()
    }

    /// Watch phase changes.
    pub fn subscribe(&self) -> watch::Receiver<LoadPhase> {
        self.phase.subscribe()
    }

    /// Run one load cycle.
    ///
    /// Returns as soon as the outcome is known; on success the phase may
    /// still be [`LoadPhase::ShowingMinDuration`] for a while after.
    /// Must be called within a tokio runtime.
    pub async fn load(&self) -> Result<CategoryTree, LoadFailure> {
        self.cancel_dismissal();
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;
        let started = Instant::now();
        self.phase.send_replace(LoadPhase::Loading);
        debug!(cycle, "catalog load started");

        let outcome = match time::timeout(
            self.policy.ceiling,
            self.source.categories_with_products(),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.policy.ceiling)),
        };
        let elapsed = started.elapsed();

        match outcome {
            Ok(tree) => {
                info!(
                    cycle,
                    categories = tree.len(),
                    products = tree.product_count(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "catalog loaded"
                );
                if self.is_current(cycle) {
                    self.schedule_ready(cycle, self.policy.remaining_display(elapsed));
                }
                Ok(tree)
            }
            Err(error) => {
                let failure = LoadFailure::from(error);
                warn!(
                    cycle,
                    kind = %failure.kind,
                    error = %failure.cause,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "catalog load failed"
                );
                if self.is_current(cycle) {
                    self.phase.send_replace(LoadPhase::Error(failure.kind));
                }
                Err(failure)
            }
        }
    }

    /// Wait until the current cycle is settled and return its final phase.
    ///
    /// Returns immediately when idle. After [`teardown`](Self::teardown) the
    /// phase is frozen, so a cycle torn down mid-load never settles.
    pub async fn settled(&self) -> LoadPhase {
        let mut rx = self.subscribe();
        let result = rx
            .wait_for(|phase| phase.is_settled() || *phase == LoadPhase::Idle)
            .await
            .map(|phase| *phase);
        // The sender lives in `self`, so the channel cannot close here.
        result.unwrap_or_else(|_| self.phase())
    }

    /// Cancel pending timers. Later phase updates from in-flight work are
    /// dropped.
    pub fn teardown(&self) {
        self.cycle.fetch_add(1, Ordering::SeqCst);
        self.cancel_dismissal();
        debug!("load orchestrator torn down");
    }

    fn is_current(&self, cycle: u64) -> bool {
        self.cycle.load(Ordering::SeqCst) == cycle
    }

    fn schedule_ready(&self, cycle: u64, remaining: std::time::Duration) {
        if remaining.is_zero() {
            self.phase.send_replace(LoadPhase::Ready);
            return;
        }

        self.phase.send_replace(LoadPhase::ShowingMinDuration);
        debug!(cycle, remaining_ms = remaining.as_millis() as u64, "holding loading state");

        let phase = Arc::clone(&self.phase);
        let current = Arc::clone(&self.cycle);
        let handle = tokio::spawn(async move {
            time::sleep(remaining).await;
            if current.load(Ordering::SeqCst) == cycle {
                phase.send_replace(LoadPhase::Ready);
            }
        });

        let mut slot = self.dismissal.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = slot.replace(handle) {
            previous.abort();
        }
    }

    fn cancel_dismissal(&self) {
        let mut slot = self.dismissal.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}

impl<S> Drop for LoadOrchestrator<S> {
    fn drop(&mut self) {
        let slot = self
            .dismissal
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}
