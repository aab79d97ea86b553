//! Player health.

use crate::config::PlayerConfig;

/// Result of damaging the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerDamage {
    Hurt { health: f32 },
    /// Health crossed to `<= 0` on this hit. Reported once.
    Died,
    /// The player was already dead.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerVitals {
    health: f32,
    max_health: f32,
    low_health: f32,
    alive: bool,
}

impl PlayerVitals {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            health: config.max_health,
            max_health: config.max_health,
            low_health: config.low_health,
            alive: true,
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
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn is_low_health(&self) -> bool {
        self.alive && self.health <= self.low_health
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.health >= self.max_health
    }

    pub fn apply_damage(&mut self, amount: f32) -> PlayerDamage {
        if !self.alive {
            return PlayerDamage::Ignored;
        }
        self.health -= amount.max(0.0);
        if self.health <= 0.0 {
            self.alive = false;
            return PlayerDamage::Died;
        }
        PlayerDamage::Hurt {
            health: self.health,
        }
    }

    /// Heal up to max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
        self.health - before
    }
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_after_death_is_ignored() {
        let mut player = PlayerVitals::default();
        assert_eq!(player.apply_damage(60.0), PlayerDamage::Hurt { health: 40.0 });
        assert_eq!(player.apply_damage(40.0), PlayerDamage::Died);
        assert_eq!(player.apply_damage(10.0), PlayerDamage::Ignored);
        assert_eq!(player.health(), 0.0);
        assert!(!player.is_alive());
    }

    #[test]
    fn healing_is_capped() {
        let mut player = PlayerVitals::default();
        player.apply_damage(10.0);
        assert_eq!(player.heal(15.0), 10.0);
        assert!(player.is_full());
    }

    #[test]
    fn low_health_threshold_is_inclusive() {
        let mut player = PlayerVitals::default();
        player.apply_damage(69.0);
        assert!(!player.is_low_health());
        player.apply_damage(1.0);
        assert!(player.is_low_health());
    }
}
