//! Engine construction and shared row fetching

use crate::error::{Error, Result};
use racket_core::{
    ActionError, Building, BuildingId, BuildingKind, Company, CompanyId, Policy,
};
use racket_db::Store;

/// The action engine: owns the ledger store and the policy parameters
///
/// One instance serves the whole process; every inbound request flows
/// through one of its action methods.
pub struct Engine {
    pub(crate) store: Store,
    pub(crate) policy: Policy,
}

impl Engine {
    /// Create an engine over a store with the given policy
    pub fn new(store: Store, policy: Policy) -> Self {
        Self { store, policy }
    }

    /// The underlying ledger store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The active policy parameters
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Fetch the acting company
    ///
    /// The identity comes from the external session layer, so a missing row
    /// is a data fault, not an action rejection.
    pub(crate) fn fetch_company(&self, id: CompanyId) -> Result<Company> {
        self.store
            .company(id)?
            .ok_or_else(|| Error::Store(racket_db::Error::NotFound(id.to_string())))
    }

    /// Fetch the target building, rejecting the action when it is missing
    pub(crate) fn fetch_building(&self, id: BuildingId) -> Result<Building> {
        self.store
            .building(id)?
            .ok_or(Error::Action(ActionError::NotFound(id)))
    }

    /// Fetch a building's type definition
    pub(crate) fn fetch_kind(&self, building: &Building) -> Result<BuildingKind> {
        self.store
            .building_kind(building.kind)?
            .ok_or_else(|| Error::Store(racket_db::Error::NotFound(building.kind.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn test_fetch_building_rejects_unknown_id() {
        let world = testutil::world();
        let missing = BuildingId::new(9999);

        let err = world.engine.fetch_building(missing).unwrap_err();
        assert_eq!(err.as_action(), Some(&ActionError::NotFound(missing)));
    }

    #[test]
    fn test_fetch_company_missing_is_a_store_fault() {
        let world = testutil::world();

        let err = world.engine.fetch_company(CompanyId::new(9999)).unwrap_err();
        assert!(err.as_action().is_none());
    }
}
