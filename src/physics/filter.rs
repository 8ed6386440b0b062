//! Box2D-style collision filtering expressed through Rapier collision groups.
//!
//! A filter is `{group_index, category_bits, mask_bits}`. Two fixtures sharing a
//! non-zero group index always collide (positive) or never collide (negative);
//! otherwise each fixture's category must appear in the other's mask.
//!
//! Rapier groups are plain membership/filter bitmasks, so the negative-group
//! exclusion is folded in by giving every (category, group slot) pair its own
//! membership bit. Slot 0 is "no group"; slot `n` is group index `-n`.
use bevy::prelude::*;
use bevy_rapier2d::prelude::{CollisionGroups, Group};

use crate::core::components::Faction;

pub const CATEGORY_BULLET: u16 = 0x0001;
pub const CATEGORY_WALL: u16 = 0x0002;

/// Categories that have a slot in the Rapier bit layout, in bit order.
const CATEGORIES: [u16; 2] = [CATEGORY_BULLET, CATEGORY_WALL];
/// "No group" plus one slot per faction.
const GROUP_SLOTS: u32 = 3;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    pub group_index: i16,
    pub category_bits: u16,
    pub mask_bits: u16,
}

impl CollisionFilter {
    pub fn bullet(faction: Faction) -> Self {
        Self {
            group_index: faction.group_index(),
            category_bits: CATEGORY_BULLET,
            mask_bits: CATEGORY_WALL,
        }
    }

    pub fn wall(faction: Faction) -> Self {
        Self {
            group_index: faction.group_index(),
            category_bits: CATEGORY_WALL,
            mask_bits: CATEGORY_BULLET,
        }
    }

    pub fn faction(&self) -> Option<Faction> {
        Faction::from_group_index(self.group_index)
    }

    /// Reference semantics, identical to Box2D's default contact filter.
    pub fn should_collide(&self, other: &Self) -> bool {
        if self.group_index == other.group_index && self.group_index != 0 {
            return self.group_index > 0;
        }
        (self.mask_bits & other.category_bits) != 0 && (self.category_bits & other.mask_bits) != 0
    }

    fn group_slot(&self) -> u32 {
        if self.group_index < 0 {
            (-i32::from(self.group_index)) as u32
        } else {
            0
        }
    }

    fn pair_bit(category_slot: u32, group_slot: u32) -> u32 {
        1 << (category_slot * GROUP_SLOTS + group_slot)
    }

    /// Rapier groups reproducing [`Self::should_collide`] for the categories and
    /// non-positive groups this game uses.
    pub fn collision_groups(&self) -> CollisionGroups {
        let own_slot = self.group_slot();
        let mut memberships = 0u32;
        let mut filters = 0u32;
        for (cat_slot, category) in CATEGORIES.iter().enumerate() {
            let cat_slot = cat_slot as u32;
            if self.category_bits & category != 0 {
                memberships |= Self::pair_bit(cat_slot, own_slot);
            }
            if self.mask_bits & category == 0 {
                continue;
            }
            for slot in 0..GROUP_SLOTS {
                if own_slot != 0 && slot == own_slot {
                    continue;
                }
                filters |= Self::pair_bit(cat_slot, slot);
            }
        }
        CollisionGroups::new(
            Group::from_bits_truncate(memberships),
            Group::from_bits_truncate(filters),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rapier_pass(a: &CollisionFilter, b: &CollisionFilter) -> bool {
        let ga = a.collision_groups();
        let gb = b.collision_groups();
        ga.memberships.intersects(gb.filters) && gb.memberships.intersects(ga.filters)
    }

    fn all_bodies() -> Vec<CollisionFilter> {
        Faction::ALL
            .into_iter()
            .flat_map(|f| [CollisionFilter::bullet(f), CollisionFilter::wall(f)])
            .collect()
    }

    #[test]
    fn bullets_only_hit_the_opposing_wall() {
        let a_bullet = CollisionFilter::bullet(Faction::A);
        assert!(a_bullet.should_collide(&CollisionFilter::wall(Faction::B)));
        assert!(!a_bullet.should_collide(&CollisionFilter::wall(Faction::A)));
        assert!(!a_bullet.should_collide(&CollisionFilter::bullet(Faction::B)));
        assert!(!a_bullet.should_collide(&CollisionFilter::bullet(Faction::A)));
    }

    #[test]
    fn rapier_groups_match_reference_filter() {
        let bodies = all_bodies();
        for a in &bodies {
            for b in &bodies {
                assert_eq!(
                    rapier_pass(a, b),
                    a.should_collide(b),
                    "mismatch for {a:?} vs {b:?}"
                );
            }
        }
    }

    #[test]
    fn faction_read_back_from_filter() {
        assert_eq!(CollisionFilter::bullet(Faction::B).faction(), Some(Faction::B));
        assert_eq!(CollisionFilter::wall(Faction::A).faction(), Some(Faction::A));
    }
}
