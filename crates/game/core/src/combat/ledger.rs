//! Score values and the running score/population ledger.

use super::ScoreCategory;
use crate::agent::EnemyKind;

/// Points per score category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreTable {
    pub punch: u32,
    pub body_shot: u32,
    pub headshot: u32,
    pub kill_melee: u32,
    pub kill_armoured: u32,
    pub kill_flamer: u32,
}

impl ScoreTable {
    pub const fn value(&self, category: ScoreCategory) -> u32 {
        match category {
            ScoreCategory::Punch => self.punch,
            ScoreCategory::BodyShot => self.body_shot,
            ScoreCategory::Headshot => self.headshot,
            ScoreCategory::KillMelee => self.kill_melee,
            ScoreCategory::KillArmoured => self.kill_armoured,
            ScoreCategory::KillFlamer => self.kill_flamer,
        }
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            punch: 5,
            body_shot: 10,
            headshot: 20,
            kill_melee: 50,
            kill_armoured: 100,
            kill_flamer: 150,
        }
    }
}

/// Running score, kill count and live population.
///
/// Passed explicitly to whoever mutates it and reset on level start. Only the
/// resolver (kills, score) and the spawner (population) write to it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreLedger {
    score: u64,
    kills: u32,
    active: u32,
    active_by_kind: [u32; EnemyKind::COUNT],
    peak_active: u32,
}

impl ScoreLedger {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[inline]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Enemies currently alive.
    #[inline]
    pub fn active(&self) -> u32 {
        self.active
    }

    #[inline]
    pub fn active_of(&self, kind: EnemyKind) -> u32 {
        self.active_by_kind[kind.index()]
    }

    /// Highest simultaneous population since the last reset.
    #[inline]
    pub fn peak_active(&self) -> u32 {
        self.peak_active
    }

    /// Add the points of `category`. Returns the points awarded.
    pub fn award(&mut self, category: ScoreCategory, table: &ScoreTable) -> u32 {
        let points = table.value(category);
        self.score += u64::from(points);
        points
    }

    pub fn record_spawn(&mut self, kind: EnemyKind) {
        self.active += 1;
        self.active_by_kind[kind.index()] += 1;
        self.peak_active = self.peak_active.max(self.active);
    }

    pub fn record_kill(&mut self, kind: EnemyKind) {
        self.kills += 1;
        self.release(kind);
    }

    /// Drop an agent from the live population without counting a kill.
    pub fn release(&mut self, kind: EnemyKind) {
        self.active = self.active.saturating_sub(1);
        let slot = &mut self.active_by_kind[kind.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kills_release_population_of_the_dying_kind() {
        let mut ledger = ScoreLedger::new();
        ledger.record_spawn(EnemyKind::Melee);
        ledger.record_spawn(EnemyKind::Flamer);
        assert_eq!(ledger.active(), 2);

        ledger.record_kill(EnemyKind::Flamer);
        assert_eq!(ledger.kills(), 1);
        assert_eq!(ledger.active(), 1);
        assert_eq!(ledger.active_of(EnemyKind::Flamer), 0);
        assert_eq!(ledger.active_of(EnemyKind::Melee), 1);
        assert_eq!(ledger.peak_active(), 2);
    }

    #[test]
    fn award_uses_table_values() {
        let table = ScoreTable::default();
        let mut ledger = ScoreLedger::new();
        assert_eq!(ledger.award(ScoreCategory::Headshot, &table), 20);
        assert_eq!(ledger.award(ScoreCategory::KillMelee, &table), 50);
        assert_eq!(ledger.score(), 70);

        ledger.reset();
        assert_eq!(ledger, ScoreLedger::default());
    }
}
