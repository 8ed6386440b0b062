use bevy::prelude::*;

use crate::core::components::Faction;
use crate::core::config::GameConfig;
use crate::gameplay::factory::BodyFactory;

/// World-space layout of the battlefield. Touches left of `center.x` belong to A.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub center: Vec2,
    pub size: Vec2,
}

impl Arena {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            center: Vec2::ZERO,
            size: Vec2::new(cfg.window.width, cfg.window.height),
        }
    }

    /// A's wall sits left of the center, B's to the right, so each faction
    /// shoots across the midpoint at the other's wall.
    pub fn wall_position(&self, faction: Faction, cfg: &GameConfig) -> Vec2 {
        let offset = cfg.wall.offset_m * cfg.world.pixels_per_meter;
        match faction {
            Faction::A => self.center - Vec2::X * offset,
            Faction::B => self.center + Vec2::X * offset,
        }
    }
}

impl FromWorld for Arena {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<GameConfig>() {
            Some(cfg) => Self::from_config(cfg),
            None => Self::from_config(&GameConfig::default()),
        }
    }
}

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Arena>().add_systems(Startup, spawn_walls);
    }
}

fn spawn_walls(arena: Res<Arena>, cfg: Res<GameConfig>, mut factory: BodyFactory) {
    for faction in Faction::ALL {
        factory.spawn_wall(faction, arena.wall_position(faction, &cfg));
    }
    info!(target: "arena", "walls spawned; arena {}x{}", arena.size.x, arena.size.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_straddle_the_center() {
        let cfg = GameConfig::default();
        let arena = Arena::from_config(&cfg);
        let a = arena.wall_position(Faction::A, &cfg);
        let b = arena.wall_position(Faction::B, &cfg);
        assert_eq!(Faction::for_touch(a.x, arena.center.x), Faction::A);
        assert_eq!(Faction::for_touch(b.x, arena.center.x), Faction::B);
        assert_eq!(a.y, b.y);
    }
}
