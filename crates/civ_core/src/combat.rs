//! Combat resolution between two units.
//!
//! Damage scales with the attacker's strength and remaining health and is
//! reduced by the defender's terrain:
//!
//! `round(strength × health/100 × 10 × (1 − defense/10))`, never below 1.
//!
//! The formula is evaluated in fixed point so rounding is identical on every
//! platform.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::math::{manhattan_distance, Fixed};
use crate::unit::{Unit, UnitId};

/// Smallest damage any successful attack deals.
pub const MIN_DAMAGE: i32 = 1;

/// Result of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Attacking unit.
    pub attacker: UnitId,
    /// Defending unit.
    pub defender: UnitId,
    /// Damage dealt.
    pub damage: i32,
    /// Defender health after the attack.
    pub defender_health: i32,
    /// Whether the defender was destroyed.
    pub defender_destroyed: bool,
}

/// Damage dealt by an attacker of `strength` at `health` against a defender
/// standing on terrain with `defense`.
#[must_use]
pub fn calculate_damage(strength: u32, health: i32, defense: u32) -> i32 {
    let health = health.max(0);
    let mitigation = 10u32.saturating_sub(defense);
    let raw = i64::from(strength) * i64::from(health) * i64::from(mitigation);
    let damage = (Fixed::from_num(raw) / Fixed::from_num(100)).round();
    damage.to_num::<i32>().max(MIN_DAMAGE)
}

/// Check whether `attacker` may attack `defender` this turn.
pub fn validate_attack(attacker: &Unit, defender: &Unit) -> Result<()> {
    if attacker.has_attacked {
        return Err(GameError::AlreadyAttacked(attacker.id));
    }
    if !attacker.is_combatant() {
        return Err(GameError::NonCombatant(attacker.id));
    }
    if attacker.owner == defender.owner {
        return Err(GameError::FriendlyTarget);
    }
    let distance = manhattan_distance(attacker.position, defender.position);
    let reach = attacker.attack_reach();
    if distance > reach {
        return Err(GameError::OutOfRange { distance, reach });
    }
    Ok(())
}

/// Resolve an attack that already passed [`validate_attack`].
///
/// The attacker spends its attack and all remaining moves. The defender's
/// health is reduced; removing a destroyed defender from the map is up to
/// the caller.
pub fn resolve_attack(attacker: &mut Unit, defender: &mut Unit, defense: u32) -> AttackOutcome {
    let damage = calculate_damage(attacker.strength, attacker.health, defense);
    let destroyed = defender.take_damage(damage);

    attacker.has_attacked = true;
    attacker.moves_left = 0;

    tracing::debug!(
        attacker = attacker.id.0,
        defender = defender.id.0,
        damage,
        destroyed,
        "Attack resolved"
    );

    AttackOutcome {
        attacker: attacker.id,
        defender: defender.id,
        damage,
        defender_health: defender.health,
        defender_destroyed: destroyed,
    }
}
