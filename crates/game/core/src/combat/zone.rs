//! Hit-zone classification and score categories.

use crate::agent::ColliderTag;

/// Where a hit landed, as far as damage is concerned.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HitZone {
    Body,
    Head,
    /// Flamer plating. Absorbs nearly everything.
    Armor,
    /// The flamer's exposed fuel tank.
    EnergyPack,
    /// Player melee swing.
    Punch,
}

impl HitZone {
    /// Zone of a collider tag.
    pub const fn of(tag: ColliderTag) -> Self {
        match tag {
            ColliderTag::MeleeEnemy | ColliderTag::ArmouredEnemy | ColliderTag::EnemyBodypart => {
                Self::Body
            }
            ColliderTag::EnemyHead => Self::Head,
            ColliderTag::FlamerEnemy => Self::Armor,
            ColliderTag::EnergyPack => Self::EnergyPack,
        }
    }

    /// Score category awarded for a non-lethal hit in this zone.
    pub const fn hit_category(self) -> Option<ScoreCategory> {
        match self {
            Self::Body => Some(ScoreCategory::BodyShot),
            Self::Head | Self::EnergyPack => Some(ScoreCategory::Headshot),
            Self::Armor => None,
            Self::Punch => Some(ScoreCategory::Punch),
        }
    }
}

/// Scoring buckets. Values live in [`super::ScoreTable`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ScoreCategory {
    Punch,
    BodyShot,
    Headshot,
    KillMelee,
    KillArmoured,
    KillFlamer,
}

/// Category awarded for the killing blow, keyed by the collider tag hit.
///
/// A limb kill pays no kill bonus; the hit award is all the blow is worth.
pub const fn kill_category(tag: ColliderTag) -> Option<ScoreCategory> {
    match tag {
        ColliderTag::MeleeEnemy | ColliderTag::EnemyHead => Some(ScoreCategory::KillMelee),
        ColliderTag::ArmouredEnemy => Some(ScoreCategory::KillArmoured),
        ColliderTag::FlamerEnemy | ColliderTag::EnergyPack => Some(ScoreCategory::KillFlamer),
        ColliderTag::EnemyBodypart => None,
    }
}
