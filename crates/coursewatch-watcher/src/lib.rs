//! Watcher cycle logic.
//!
//! One reconciliation cycle: capture a fresh snapshot, load the persisted
//! one, reconcile, and on change notify and persist. The persisted
//! snapshot is an explicitly passed value (load, reconcile, conditionally
//! store), so the cycle is testable without process-wide state. The
//! binary in `main.rs` owns scheduling and retry policy; this module owns
//! none.

use coursewatch_catalog::CatalogSource;
use coursewatch_diff::{diff, ChangeSet};
use coursewatch_notify::Notifier;
use coursewatch_store::SnapshotStore;
use thiserror::Error;
use tracing::{debug, info};

/// Errors surfaced by a reconciliation cycle. Each wraps the collaborator
/// that failed; the cycle itself adds no failure modes of its own.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Catalog(#[from] coursewatch_catalog::CatalogError),

    #[error(transparent)]
    Store(#[from] coursewatch_store::StoreError),

    #[error(transparent)]
    Notify(#[from] coursewatch_notify::NotifyError),
}

/// What a reconciliation cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No persisted snapshot existed yet; the fresh one was stored without
    /// notifying.
    Initialized { count: usize },

    /// The catalog is structurally equal to the persisted snapshot.
    Unchanged,

    /// Changes were reported and the fresh snapshot stored.
    Changed(ChangeSet),
}

/// Runs one reconciliation cycle.
///
/// The persisted snapshot is only replaced when the catalog changed, and
/// notification happens before the replacement; if delivery fails, the
/// next cycle reports the same changes again rather than losing them.
pub async fn run_cycle(
    source: &dyn CatalogSource,
    store: &SnapshotStore,
    notifier: &dyn Notifier,
) -> Result<CycleOutcome, CycleError> {
    let current = source.fetch().await?;
    debug!(source = source.source_name(), count = current.len(), "snapshot captured");

    if !store.exists().await {
        store.save(&current).await?;
        info!(count = current.len(), "no persisted snapshot yet; initialized");
        return Ok(CycleOutcome::Initialized { count: current.len() });
    }

    let previous = store.load().await?;
    if previous == current {
        return Ok(CycleOutcome::Unchanged);
    }

    let changes = diff(&previous, &current);
    notifier.notify(&changes).await?;
    store.save(&current).await?;
    info!(count = changes.len(), "catalog changed");
    Ok(CycleOutcome::Changed(changes))
}
