//! Damage dealt by enemies to the player.
//!
//! Attack cadence stands in for animation hit frames: while the agent holds an
//! attack stance and its conditions keep holding, one hit lands per interval.

use crate::agent::Blackboard;
use crate::config::EnemyAttackConfig;

/// Which attack an agent's current state performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum AttackStance {
    Melee,
    Gun,
    Flame,
}

/// One hit on the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyHit {
    pub stance: AttackStance,
    pub damage: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackCadence {
    charge: f32,
    stance: Option<AttackStance>,
}

impl AttackCadence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` and report a landed hit, if any.
    ///
    /// `distance` is the current distance to the target. Melee swings end on
    /// the hit frame: the attack type is reset so a new swing gets picked.
    pub fn advance(
        &mut self,
        stance: Option<AttackStance>,
        blackboard: &mut Blackboard,
        distance: f32,
        dt: f32,
        config: &EnemyAttackConfig,
    ) -> Option<EnemyHit> {
        if stance != self.stance {
            self.stance = stance;
            self.charge = 0.0;
        }
        let stance = stance?;

        let (engaged, interval, damage) = match stance {
            AttackStance::Melee => (
                blackboard.in_melee_range && blackboard.attack_type != 0,
                config.melee_interval,
                config.melee_damage,
            ),
            AttackStance::Gun => (
                blackboard.attack_type != 0
                    && blackboard.player_in_sight
                    && distance <= config.gun_range,
                config.gun_interval,
                config.gun_damage,
            ),
            AttackStance::Flame => (
                blackboard.in_flamethrower_range
                    && blackboard.is_ranged_attacking
                    && blackboard.attack_type == 1,
                config.flame_interval,
                config.flame_damage,
            ),
        };

        if !engaged {
            self.charge = 0.0;
            return None;
        }
        self.charge += dt;
        if self.charge < interval {
            return None;
        }
        self.charge = 0.0;
        if stance == AttackStance::Melee {
            blackboard.attack_type = 0;
        }
        Some(EnemyHit { stance, damage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        cadence: &mut AttackCadence,
        stance: AttackStance,
        bb: &mut Blackboard,
        distance: f32,
        seconds: f32,
    ) -> Vec<EnemyHit> {
        let config = EnemyAttackConfig::default();
        let dt = 0.0625;
        let frames = (seconds / dt).round() as usize;
        (0..frames)
            .filter_map(|_| cadence.advance(Some(stance), bb, distance, dt, &config))
            .collect()
    }

    #[test]
    fn melee_swing_lands_and_ends() {
        let mut bb = Blackboard::new(false, 10.0);
        bb.in_melee_range = true;
        bb.attack_type = 2;
        let mut cadence = AttackCadence::new();

        let hits = run(&mut cadence, AttackStance::Melee, &mut bb, 1.0, 1.3);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].damage, 10.0);
        assert_eq!(bb.attack_type, 0);
    }

    #[test]
    fn gunshots_need_sight_and_range() {
        let mut bb = Blackboard::new(true, 10.0);
        bb.attack_type = 1;
        bb.player_in_sight = true;
        let mut cadence = AttackCadence::new();

        assert!(run(&mut cadence, AttackStance::Gun, &mut bb, 20.0, 3.0).is_empty());
        let hits = run(&mut cadence, AttackStance::Gun, &mut bb, 10.0, 3.1);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.damage == 25.0));
    }

    #[test]
    fn flame_ticks_while_lit() {
        let mut bb = Blackboard::new(true, 10.0);
        bb.in_flamethrower_range = true;
        bb.is_ranged_attacking = true;
        bb.attack_type = 1;
        let mut cadence = AttackCadence::new();

        let hits = run(&mut cadence, AttackStance::Flame, &mut bb, 4.0, 2.05);
        assert_eq!(hits.len(), 4);

        bb.attack_type = 0;
        assert!(run(&mut cadence, AttackStance::Flame, &mut bb, 4.0, 2.0).is_empty());
    }

    #[test]
    fn switching_stance_drops_charge() {
        let mut bb = Blackboard::new(true, 10.0);
        bb.in_melee_range = true;
        bb.attack_type = 1;
        let config = EnemyAttackConfig::default();
        let mut cadence = AttackCadence::new();

        for _ in 0..20 {
            cadence.advance(Some(AttackStance::Melee), &mut bb, 1.0, 0.05, &config);
        }
        cadence.advance(None, &mut bb, 1.0, 0.05, &config);
        let hit = cadence.advance(Some(AttackStance::Melee), &mut bb, 1.0, 0.5, &config);
        assert_eq!(hit, None);
    }
}
