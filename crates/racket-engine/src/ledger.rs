//! Transaction ledger writer
//!
//! Builds the immutable audit row that joins every successful action's
//! batch. Allocation of the row ID is store-backed; the sign convention
//! (extinguish 0, everything else a cost) is enforced here.

use crate::error::Result;
use chrono::{DateTime, Utc};
use racket_core::{
    BuildingId, CompanyId, MapId, Money, TransactionDetail, TransactionRecord,
};
use racket_db::Store;

/// Build a ledger row for a successful action.
///
/// The action kind is derived from the detail payload so the two can never
/// disagree.
pub(crate) fn transaction_entry(
    store: &Store,
    actor: CompanyId,
    map: MapId,
    building: BuildingId,
    target_company: Option<CompanyId>,
    amount: Money,
    detail: TransactionDetail,
    now: DateTime<Utc>,
) -> Result<TransactionRecord> {
    let action = detail.kind();
    debug_assert!(
        action.amount_sign_ok(amount),
        "amount {amount} violates the sign convention for {action}"
    );
    let id = store.next_transaction_id()?;
    Ok(TransactionRecord {
        id,
        actor,
        map,
        action,
        building,
        target_company,
        amount,
        detail,
        created_at: now,
    })
}
