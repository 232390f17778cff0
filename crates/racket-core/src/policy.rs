//! Policy parameters for the action engine
//!
//! The numbers game design tunes without touching engine code: per-trick
//! damage, the attacker's fee, the cleanup rate, and the adjacency radius.
//! Loadable from RON, with out-of-range values clamped or rejected.

use crate::{Money, TrickKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MAX_ADJACENCY_RADIUS: u8 = 4;

/// Errors from loading or validating a policy
#[derive(Debug, Error)]
pub enum PolicyError {
    /// RON parse error
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// A numeric parameter is outside its legal range
    #[error("policy parameter {name} out of range: {value}")]
    OutOfRange {
        /// The offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// Tunable parameters for the action engine
///
/// # Example
///
/// ```
/// use racket_core::{Policy, TrickKind};
///
/// let policy = Policy::default();
/// assert_eq!(policy.trick_damage(TrickKind::Arson), 15);
/// assert_eq!(policy.adjacency_radius(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Damage percent added by a graffiti trick
    graffiti_damage: u8,
    /// Damage percent added by a brick-throw trick
    brick_throw_damage: u8,
    /// Damage percent added by an arson trick
    arson_damage: u8,
    /// Fee charged to the attacker per trick
    attack_fee: Money,
    /// Fraction of base cost charged per outstanding trick on cleanup
    cleanup_rate: f64,
    /// Chebyshev radius of the dirty-propagation neighborhood
    adjacency_radius: u8,
}

impl Policy {
    /// Load a policy from a RON string and validate it
    pub fn from_ron(source: &str) -> Result<Self, PolicyError> {
        let policy: Policy = ron::from_str(source)?;
        policy.validate()
    }

    /// Damage percent dealt by the given trick
    pub fn trick_damage(&self, trick: TrickKind) -> u8 {
        let damage = match trick {
            TrickKind::Graffiti => self.graffiti_damage,
            TrickKind::BrickThrow => self.brick_throw_damage,
            TrickKind::Arson => self.arson_damage,
        };
        damage.min(100)
    }

    /// Fee charged to the attacker per trick
    pub fn attack_fee(&self) -> Money {
        self.attack_fee
    }

    /// Fraction of base cost charged per outstanding trick on cleanup
    pub fn cleanup_rate(&self) -> f64 {
        self.cleanup_rate
    }

    /// Chebyshev radius of the dirty-propagation neighborhood
    ///
    /// Clamped to `[1, 4]`; the default of 1 marks the 8 surrounding tiles.
    pub fn adjacency_radius(&self) -> u8 {
        self.adjacency_radius.clamp(1, MAX_ADJACENCY_RADIUS)
    }

    fn validate(self) -> Result<Self, PolicyError> {
        if !(0.0..=1.0).contains(&self.cleanup_rate) {
            return Err(PolicyError::OutOfRange {
                name: "cleanup_rate",
                value: self.cleanup_rate,
            });
        }
        if self.attack_fee.is_negative() {
            return Err(PolicyError::OutOfRange {
                name: "attack_fee",
                value: self.attack_fee.amount() as f64,
            });
        }
        if self.adjacency_radius < 1 || self.adjacency_radius > MAX_ADJACENCY_RADIUS {
            return Err(PolicyError::OutOfRange {
                name: "adjacency_radius",
                value: f64::from(self.adjacency_radius),
            });
        }
        Ok(self)
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            graffiti_damage: 0,
            brick_throw_damage: 10,
            arson_damage: 15,
            attack_fee: Money::ZERO,
            cleanup_rate: 0.05,
            adjacency_radius: 1,
        }
    }
}
