//! Authorization gate
//!
//! Pure checks against already-fetched rows; no side effects. The location
//! check exists specifically to stop action-by-guessed-id: a caller of the
//! public extinguish path must supply the target's full position, proving
//! it genuinely observed the building on the map.

use racket_core::{ActionError, Building, Company, Location, Result};

/// Reject incarcerated actors.
pub fn ensure_at_liberty(actor: &Company) -> Result<()> {
    if actor.in_prison {
        return Err(ActionError::PrisonBlocked);
    }
    Ok(())
}

/// Reject actors that do not own the target building.
///
/// Unowned buildings fail this check for every actor.
pub fn ensure_owner(actor: &Company, building: &Building) -> Result<()> {
    if !building.is_owned_by(actor.id) {
        return Err(ActionError::NotOwner);
    }
    Ok(())
}

/// Reject callers whose claimed location does not match the stored row.
pub fn verify_location(building: &Building, claimed: &Location) -> Result<()> {
    if building.location != *claimed {
        return Err(ActionError::LocationMismatch);
    }
    Ok(())
}
