//! Per-kind enemy definitions.

use arrayvec::ArrayVec;

use super::EnemyKind;
use crate::pickup::PickupKind;

/// Upper bound on pickups an enemy can carry into death.
pub const MAX_ATTACHED_PICKUPS: usize = 4;

pub type AttachedPickups = ArrayVec<PickupKind, MAX_ATTACHED_PICKUPS>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub kind: EnemyKind,
    pub max_health: f32,
    pub fov_degrees: f32,
    /// Pickups carried by the body and released after death.
    pub pickups: AttachedPickups,
}

impl EnemyTemplate {
    pub fn melee() -> Self {
        Self {
            kind: EnemyKind::Melee,
            max_health: 25.0,
            fov_degrees: 110.0,
            pickups: AttachedPickups::new(),
        }
    }

    pub fn armoured() -> Self {
        let mut pickups = AttachedPickups::new();
        pickups.push(PickupKind::Health);
        Self {
            kind: EnemyKind::Armoured,
            max_health: 120.0,
            fov_degrees: 110.0,
            pickups,
        }
    }

    pub fn flamer() -> Self {
        let mut pickups = AttachedPickups::new();
        pickups.push(PickupKind::Health);
        pickups.push(PickupKind::Health);
        Self {
            kind: EnemyKind::Flamer,
            max_health: 200.0,
            fov_degrees: 110.0,
            pickups,
        }
    }

    pub fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Melee => Self::melee(),
            EnemyKind::Armoured => Self::armoured(),
            EnemyKind::Flamer => Self::flamer(),
        }
    }

    /// Pickups released on death: none for melee, the first one for armoured,
    /// all of them for flamers.
    pub fn drops(&self) -> &[PickupKind] {
        let count = match self.kind {
            EnemyKind::Melee => 0,
            EnemyKind::Armoured => self.pickups.len().min(1),
            EnemyKind::Flamer => self.pickups.len(),
        };
        &self.pickups[..count]
    }
}

/// One template per enemy kind.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyRoster {
    templates: [EnemyTemplate; EnemyKind::COUNT],
}

impl EnemyRoster {
    /// Build a roster from loaded templates, falling back to defaults for any
    /// kind that is not listed. Later entries override earlier ones.
    pub fn from_templates(templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        let mut roster = Self::default();
        for template in templates {
            let index = template.kind.index();
            roster.templates[index] = template;
        }
        roster
    }

    pub fn get(&self, kind: EnemyKind) -> &EnemyTemplate {
        &self.templates[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.templates.iter()
    }
}

impl Default for EnemyRoster {
    fn default() -> Self {
        Self {
            templates: EnemyKind::ALL.map(EnemyTemplate::for_kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_depend_on_kind() {
        let mut armoured = EnemyTemplate::armoured();
        armoured.pickups.push(PickupKind::Health);
        assert_eq!(armoured.drops().len(), 1);
        assert_eq!(EnemyTemplate::flamer().drops().len(), 2);

        let mut melee = EnemyTemplate::melee();
        melee.pickups.push(PickupKind::Health);
        assert!(melee.drops().is_empty());
    }

    #[test]
    fn roster_overrides_listed_kinds() {
        let mut tough = EnemyTemplate::melee();
        tough.max_health = 40.0;
        let roster = EnemyRoster::from_templates([tough]);
        assert_eq!(roster.get(EnemyKind::Melee).max_health, 40.0);
        assert_eq!(roster.get(EnemyKind::Flamer).max_health, 200.0);
    }
}
