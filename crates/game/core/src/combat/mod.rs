//! Combat resolution.
//!
//! - [`weapon`]: player weapons, magazines and hit acquisition
//! - [`damage`]: zone-based damage policy
//! - [`resolver`]: applies hits, scores them and dispatches deaths
//! - [`enemy_attack`]: damage enemies deal back to the player
//!
//! Scoring is keyed by the collider tag that was hit, not by the enemy kind;
//! population bookkeeping uses the dying agent's actual kind.

pub mod damage;
pub mod enemy_attack;
pub mod ledger;
pub mod resolver;
pub mod weapon;
pub mod zone;

pub use damage::{HitDamage, Strike, hit_damage};
pub use enemy_attack::{AttackCadence, AttackStance, EnemyHit};
pub use ledger::{ScoreLedger, ScoreTable};
pub use resolver::{CombatEvent, CombatResolver, Death, HitOutcome, ScoreDelta};
pub use weapon::{Arsenal, Magazine, ShotHit, Weapon, WeaponError, WeaponKind, WeaponProfile};
pub use zone::{HitZone, ScoreCategory, kill_category};
