//! Creates the paired render entity + Rapier body for bullets and walls.
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::sprite::MeshMaterial2d;
use bevy_rapier2d::prelude::{
    ActiveEvents, Ccd, Collider, ColliderMassProperties, ExternalImpulse, Friction, Restitution,
    RigidBody,
};
use rand::Rng;

use crate::core::components::{Bullet, Faction, Wall};
use crate::core::config::GameConfig;
use crate::core::rng::{SimClock, SimRng};
use crate::gameplay::arena::Arena;
use crate::gameplay::bullets::{BattleStats, BulletRegistry, LiveBullet};
use crate::gameplay::firing::fire_impulse;
use crate::physics::filter::CollisionFilter;
use crate::physics::rapier::rapier_physics::pixel_density;
use crate::rendering::materials::materials::BulletVisuals;
use crate::rendering::palette::palette::faction_color;

const LOG_TARGET: &str = "factory";
const WALL_Z: f32 = 0.0;
const BULLET_Z: f32 = 1.0;

#[derive(SystemParam)]
pub struct BodyFactory<'w, 's> {
    commands: Commands<'w, 's>,
    registry: ResMut<'w, BulletRegistry>,
    rng: ResMut<'w, SimRng>,
    clock: Res<'w, SimClock>,
    cfg: Res<'w, GameConfig>,
    arena: Res<'w, Arena>,
    visuals: Option<Res<'w, BulletVisuals>>,
    stats: ResMut<'w, BattleStats>,
}

impl BodyFactory<'_, '_> {
    /// Uniform in `[base - jitter, base + jitter)`.
    fn roll_damage(&mut self) -> f32 {
        let base = self.cfg.bullet.base_damage;
        let jitter = self.cfg.bullet.damage_jitter;
        base + self.rng.gen::<f32>() * 2.0 * jitter - jitter
    }

    pub fn spawn_bullet(&mut self, faction: Faction, position: Vec2) -> LiveBullet {
        let bullet_cfg = self.cfg.bullet.clone();
        let ppm = self.cfg.world.pixels_per_meter;
        let damage = self.roll_damage();
        let id = self.registry.allocate_id();
        let filter = CollisionFilter::bullet(faction);

        let mut entity = self.commands.spawn((
            Bullet,
            id,
            faction,
            filter,
            filter.collision_groups(),
            Transform::from_translation(position.extend(BULLET_Z)),
            RigidBody::Dynamic,
            Collider::ball(bullet_cfg.diameter_m * ppm * 0.5),
            ColliderMassProperties::Density(pixel_density(bullet_cfg.density, ppm)),
            Friction::coefficient(bullet_cfg.friction),
            Restitution::coefficient(bullet_cfg.restitution),
            ActiveEvents::COLLISION_EVENTS,
            Name::new("Bullet"),
        ));
        if bullet_cfg.ccd {
            entity.insert(Ccd::enabled());
        }
        if let Some(visuals) = self.visuals.as_deref() {
            entity.insert((
                Mesh2d(visuals.mesh.clone()),
                MeshMaterial2d(visuals.materials[faction.index()].clone()),
            ));
        }

        let bullet = LiveBullet {
            id,
            entity: entity.id(),
            faction,
            damage,
            spawned_at: self.clock.elapsed,
        };
        self.registry.register(bullet);
        bullet
    }

    /// Spawns a bullet and gives it the faction's (randomly rotated) launch impulse.
    pub fn shoot(&mut self, faction: Faction, position: Vec2) -> LiveBullet {
        let bullet = self.spawn_bullet(faction, position);
        let impulse = fire_impulse(
            faction.config(&self.cfg.factions),
            &mut self.rng.0,
            self.cfg.world.pixels_per_meter,
        );
        self.commands.entity(bullet.entity).insert(ExternalImpulse {
            impulse,
            torque_impulse: 0.0,
        });
        self.stats.fired[faction.index()] += 1;
        debug!(
            target: LOG_TARGET,
            "{faction:?} fired {:?} at ({:.0}, {:.0}) dmg {:.1}",
            bullet.id, position.x, position.y, bullet.damage
        );
        bullet
    }

    pub fn spawn_wall(&mut self, faction: Faction, position: Vec2) -> Entity {
        let wall_cfg = &self.cfg.wall;
        let ppm = self.cfg.world.pixels_per_meter;
        let size = Vec2::new(
            wall_cfg.width_m * ppm,
            self.arena.size.y * wall_cfg.height_fraction,
        );
        let filter = CollisionFilter::wall(faction);
        self.commands
            .spawn((
                Wall,
                faction,
                filter,
                filter.collision_groups(),
                Sprite::from_color(faction_color(faction), size),
                Transform::from_translation(position.extend(WALL_Z)),
                RigidBody::Fixed,
                Collider::cuboid(size.x * 0.5, size.y * 0.5),
                ColliderMassProperties::Density(pixel_density(wall_cfg.density, ppm)),
                Friction::coefficient(wall_cfg.friction),
                Restitution::coefficient(wall_cfg.restitution),
                ActiveEvents::COLLISION_EVENTS,
                Name::new(format!("Wall:{faction:?}")),
            ))
            .id()
    }
}
