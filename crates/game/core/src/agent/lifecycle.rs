//! Enemy health and the one-shot death transition.

/// Outcome of applying damage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// Health dropped but stayed positive.
    Wounded { before: f32, after: f32 },
    /// This application crossed health to `<= 0`. Reported exactly once.
    Killed { before: f32, after: f32 },
    /// The agent was already dead; health is untouched.
    AlreadyDead,
}

impl DamageOutcome {
    #[inline]
    pub fn is_kill(&self) -> bool {
        matches!(self, Self::Killed { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vitals {
    health: f32,
    max_health: f32,
    dead: bool,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        let max_health = max_health.max(f32::MIN_POSITIVE);
        Self {
            health: max_health,
            max_health,
            dead: false,
        }
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Subtract `amount`. Negative amounts are treated as zero.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::AlreadyDead;
        }
        let before = self.health;
        self.health -= amount.max(0.0);
        let after = self.health;
        if after <= 0.0 {
            self.dead = true;
            DamageOutcome::Killed { before, after }
        } else {
            DamageOutcome::Wounded { before, after }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn death_fires_exactly_once() {
        let mut vitals = Vitals::new(25.0);

        assert_eq!(
            vitals.apply_damage(10.0),
            DamageOutcome::Wounded {
                before: 25.0,
                after: 15.0
            }
        );
        assert!(vitals.apply_damage(200.0).is_kill());
        assert_eq!(vitals.health(), -185.0);

        for _ in 0..3 {
            assert_eq!(vitals.apply_damage(50.0), DamageOutcome::AlreadyDead);
        }
        assert_eq!(vitals.health(), -185.0);
    }

    #[test]
    fn health_strictly_decreases_while_alive() {
        let mut vitals = Vitals::new(100.0);
        let mut last = vitals.health();
        for amount in [0.5, 1.0, 10.0, 0.25] {
            vitals.apply_damage(amount);
            assert!(vitals.health() < last);
            last = vitals.health();
        }
    }
}
