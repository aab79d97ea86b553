//! Enemy categories and hit-collider tags.

/// Enemy category. Drives state graph, population caps and scoring.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyKind {
    /// Close-quarters brawler. The only kind with a head collider.
    Melee,
    /// Gunner that also brawls when cornered.
    Armoured,
    /// Armoured flamethrower carrier with an exposed energy pack.
    Flamer,
}

impl EnemyKind {
    pub const COUNT: usize = 3;
    pub const ALL: [EnemyKind; Self::COUNT] = [Self::Melee, Self::Armoured, Self::Flamer];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Melee => 0,
            Self::Armoured => 1,
            Self::Flamer => 2,
        }
    }

    /// Whether the kind refines range flags with a projectile attack range.
    #[inline]
    pub const fn is_ranged(self) -> bool {
        matches!(self, Self::Armoured | Self::Flamer)
    }

    /// Collider tags carried by this kind's body.
    pub const fn colliders(self) -> &'static [ColliderTag] {
        match self {
            Self::Melee => &[ColliderTag::MeleeEnemy, ColliderTag::EnemyHead],
            Self::Armoured => &[ColliderTag::ArmouredEnemy],
            Self::Flamer => &[ColliderTag::FlamerEnemy, ColliderTag::EnergyPack],
        }
    }
}

/// Tag of the collider a shot or swing connected with.
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
pub enum ColliderTag {
    MeleeEnemy,
    ArmouredEnemy,
    FlamerEnemy,
    EnemyHead,
    EnemyBodypart,
    EnergyPack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_melee_has_a_head() {
        for kind in EnemyKind::ALL {
            let has_head = kind.colliders().contains(&ColliderTag::EnemyHead);
            assert_eq!(has_head, kind == EnemyKind::Melee);
        }
    }

    #[test]
    fn kinds_parse_from_data_names() {
        assert_eq!("armoured".parse::<EnemyKind>(), Ok(EnemyKind::Armoured));
        assert_eq!(EnemyKind::Flamer.to_string(), "flamer");
        assert_eq!(ColliderTag::EnergyPack.as_ref(), "energy_pack");
    }
}
