//! Adjacency dirty propagation
//!
//! Damage and fire on one building affect the profit of its neighbors, so
//! every mutation that touches those fields fans a dirty mark out over the
//! surrounding tiles. The marks are fire-and-forget: an external
//! recalculation pass consumes the flag, and this engine never clears it.

use racket_core::{LedgerBatch, LedgerWrite, Location, Policy};

/// Push one dirty mark per neighbor tile into the batch.
///
/// The store makes the marks idempotent: empty tiles and already-dirty rows
/// are skipped at apply time.
pub fn collect_dirty_marks(center: &Location, policy: &Policy, batch: &mut LedgerBatch) {
    for neighbor in center.neighbors(policy.adjacency_radius()) {
        batch.push(LedgerWrite::MarkTileDirty { location: neighbor });
    }
}
