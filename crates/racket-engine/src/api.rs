//! Request/response surface
//!
//! Serde DTOs for the JSON bodies the external shell exchanges with the
//! engine, plus [`Engine::handle`] to dispatch a typed request. Every error
//! response carries a stable machine-readable kind and a human-readable
//! message; monetary rejections also carry the computed cost.

use crate::engine::Engine;
use crate::error::Error;
use racket_core::{BuildingId, CompanyId, Location, MapId, Money, TrickKind};
use serde::{Deserialize, Serialize};
use tracing::error;

/// An inbound action request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    /// Apply a trick to a target building
    Attack {
        /// The building to attack
        target_building_id: u64,
        /// Which trick to apply
        trick_type: TrickKind,
    },
    /// Put out a fire; the caller must supply the observed location
    Extinguish {
        /// The burning building
        building_id: u64,
        /// The map the caller observed it on
        map_id: u64,
        /// Observed tile column
        x: i32,
        /// Observed tile row
        y: i32,
    },
    /// Clear the non-fire tricks on an owned building
    Cleanup {
        /// The building to clean
        building_id: u64,
    },
    /// Restore an owned building's damage to zero
    Repair {
        /// The building to repair
        building_id: u64,
    },
}

/// Success payload for an attack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackResponse {
    /// Always true
    pub success: bool,
    /// The attacked building
    pub building_id: u64,
    /// Damage percent after the trick
    pub damage_percent: u8,
    /// Fire state after the trick
    pub is_on_fire: bool,
}

/// Success payload for an extinguish
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtinguishResponse {
    /// Always true
    pub success: bool,
    /// The building whose fire was put out
    pub building_id: u64,
    /// The owner's display name, if the building is owned
    pub owner_name: Option<String>,
    /// Human-readable summary
    pub message: String,
}

/// Success payload for a cleanup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResponse {
    /// Always true
    pub success: bool,
    /// Non-fire attacks marked cleaned
    pub attacks_cleaned: u32,
    /// What the owner paid
    pub cleanup_cost: Money,
}

/// Success payload for a repair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairResponse {
    /// Always true
    pub success: bool,
    /// The damage percent that was repaired away
    pub damage_repaired: u8,
    /// What the owner paid
    pub repair_cost: Money,
}

/// Uniform error payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// Stable machine-readable error kind
    pub kind: String,
    /// Human-readable message
    pub message: String,
    /// The computed cost, for monetary rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<Money>,
}

impl ErrorResponse {
    fn from_error(err: &Error) -> Self {
        match err {
            Error::Action(action) => Self {
                success: false,
                kind: action.kind().to_string(),
                message: action.to_string(),
                cost: action.cost(),
            },
            Error::Store(store) => {
                error!(error = %store, "action failed in the store");
                Self {
                    success: false,
                    kind: "internal".to_string(),
                    message: "internal storage error".to_string(),
                    cost: None,
                }
            }
        }
    }
}

/// An outbound response body
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ActionResponse {
    /// Successful attack
    Attack(AttackResponse),
    /// Successful extinguish
    Extinguish(ExtinguishResponse),
    /// Successful cleanup
    Cleanup(CleanupResponse),
    /// Successful repair
    Repair(RepairResponse),
    /// Any rejection
    Error(ErrorResponse),
}

impl ActionResponse {
    /// Whether this is a success payload
    pub fn is_success(&self) -> bool {
        !matches!(self, ActionResponse::Error(_))
    }
}

impl Engine {
    /// Dispatch a typed request for an authenticated actor.
    ///
    /// Rejections come back as [`ActionResponse::Error`]; the engine never
    /// retries on the caller's behalf.
    pub fn handle(&self, actor: CompanyId, request: ActionRequest) -> ActionResponse {
        let result = match request {
            ActionRequest::Attack {
                target_building_id,
                trick_type,
            } => self
                .perform_attack(actor, BuildingId::new(target_building_id), trick_type)
                .map(|o| {
                    ActionResponse::Attack(AttackResponse {
                        success: true,
                        building_id: o.building.raw(),
                        damage_percent: o.damage_percent,
                        is_on_fire: o.on_fire,
                    })
                }),

            ActionRequest::Extinguish {
                building_id,
                map_id,
                x,
                y,
            } => self
                .extinguish_fire(
                    actor,
                    BuildingId::new(building_id),
                    Location::new(MapId::new(map_id), x, y),
                )
                .map(|o| {
                    let message = match &o.owner_name {
                        Some(name) => format!("put out the fire on {name}'s building"),
                        None => "put out the fire".to_string(),
                    };
                    ActionResponse::Extinguish(ExtinguishResponse {
                        success: true,
                        building_id: o.building.raw(),
                        owner_name: o.owner_name,
                        message,
                    })
                }),

            ActionRequest::Cleanup { building_id } => self
                .cleanup_tricks(actor, BuildingId::new(building_id))
                .map(|o| {
                    ActionResponse::Cleanup(CleanupResponse {
                        success: true,
                        attacks_cleaned: o.attacks_cleaned,
                        cleanup_cost: o.cost,
                    })
                }),

            ActionRequest::Repair { building_id } => self
                .repair_building(actor, BuildingId::new(building_id))
                .map(|o| {
                    ActionResponse::Repair(RepairResponse {
                        success: true,
                        damage_repaired: o.damage_repaired,
                        repair_cost: o.cost,
                    })
                }),
        };

        result.unwrap_or_else(|err| ActionResponse::Error(ErrorResponse::from_error(&err)))
    }
}
