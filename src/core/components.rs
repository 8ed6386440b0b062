use bevy::prelude::*;

use crate::core::config::{FactionConfig, FactionsConfig};

/// One of the two opposing sides. Each owns a wall, a bullet type and a fire cadence.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    A,
    B,
}

impl Faction {
    pub const ALL: [Faction; 2] = [Faction::A, Faction::B];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Faction::A => 0,
            Faction::B => 1,
        }
    }

    /// Negative collision group: members of the same group never touch each other.
    #[inline]
    pub fn group_index(self) -> i16 {
        match self {
            Faction::A => -1,
            Faction::B => -2,
        }
    }

    pub fn from_group_index(group: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.group_index() == group)
    }

    /// Left half of the arena fires A, right half (midpoint included) fires B.
    #[inline]
    pub fn for_touch(touch_x: f32, center_x: f32) -> Self {
        if touch_x < center_x {
            Faction::A
        } else {
            Faction::B
        }
    }

    pub fn config(self, factions: &FactionsConfig) -> &FactionConfig {
        match self {
            Faction::A => &factions.a,
            Faction::B => &factions.b,
        }
    }
}

/// Stable bullet identifier; the contact payload and the registry key.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(pub u64);

/// Marker for projectile entities (the `BulletId` sits next to it).
#[derive(Component, Debug, Clone, Copy)]
#[require(Transform, Visibility)]
pub struct Bullet;

/// Static divider owned by a faction.
#[derive(Component, Debug, Clone, Copy)]
#[require(Transform, Visibility)]
pub struct Wall;

/// Fading damage number. Opacity starts at 1 and drops by `fade_step` every frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DamageLabel {
    pub damage: f32,
    pub opacity: f32,
    pub fade_step: f32,
}

impl DamageLabel {
    pub fn new(damage: f32, fade_step: f32) -> Self {
        Self {
            damage,
            opacity: 1.0,
            fade_step,
        }
    }

    /// Text shown for the label: damage rounded to one decimal.
    pub fn text(&self) -> String {
        format_damage(self.damage)
    }

    /// Advance one frame. Returns true once the label is fully transparent.
    pub fn fade(&mut self) -> bool {
        self.opacity -= self.fade_step;
        self.opacity <= 0.0
    }
}

#[inline]
pub fn format_damage(damage: f32) -> String {
    format!("{damage:.1}")
}
