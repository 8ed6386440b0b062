use bevy::color::palettes::css::{CRIMSON, TEAL};
use bevy::prelude::*;

use crate::core::components::Faction;

pub const FACTION_COLORS: [Color; 2] = [
    Color::Srgba(CRIMSON), // A
    Color::Srgba(TEAL),    // B
];

#[inline]
pub fn faction_color(faction: Faction) -> Color {
    FACTION_COLORS[faction.index()]
}
