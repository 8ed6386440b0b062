//! Live-bullet registry and every way a bullet leaves the world: collision,
//! timeout and teardown. All three go through [`remove_bullet`], which is a
//! no-op for bullets that are already gone.
use bevy::prelude::*;
use std::time::Duration;

use crate::core::components::{BulletId, DamageLabel, Faction};
use crate::core::config::GameConfig;
use crate::core::rng::SimClock;
use crate::core::system::system_order::FrameSet;
use crate::gameplay::damage::spawn_damage_label;
use crate::physics::contacts::PendingContacts;
use crate::physics::filter::CollisionFilter;
use crate::rendering::palette::palette::faction_color;

const LOG_TARGET: &str = "bullets";

/// Side-table entry for one live bullet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveBullet {
    pub id: BulletId,
    pub entity: Entity,
    pub faction: Faction,
    pub damage: f32,
    /// Simulation time at creation.
    pub spawned_at: Duration,
}

impl LiveBullet {
    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.spawned_at)
    }
}

/// Every bullet still in the world, in creation order.
#[derive(Resource, Debug, Default)]
pub struct BulletRegistry {
    live: Vec<LiveBullet>,
    next_id: u64,
}

impl BulletRegistry {
    pub fn allocate_id(&mut self) -> BulletId {
        let id = BulletId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn register(&mut self, bullet: LiveBullet) {
        self.live.push(bullet);
    }

    pub fn get(&self, id: BulletId) -> Option<&LiveBullet> {
        self.live.iter().find(|b| b.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&LiveBullet> {
        self.live.get(index)
    }

    pub fn contains(&self, id: BulletId) -> bool {
        self.get(id).is_some()
    }

    /// Removes the entry while keeping the order of the rest.
    pub fn remove(&mut self, id: BulletId) -> Option<LiveBullet> {
        let index = self.live.iter().position(|b| b.id == id)?;
        Some(self.live.remove(index))
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiveBullet> {
        self.live.iter()
    }

    pub fn ids(&self) -> Vec<BulletId> {
        self.live.iter().map(|b| b.id).collect()
    }
}

/// Running totals, logged by the debug plugin.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BattleStats {
    pub fired: [u32; 2],
    pub hits: u32,
    pub expired: u32,
}

/// Unregisters the bullet and despawns its entity (which drops the Rapier body).
/// Returns false when the bullet was already removed.
pub fn remove_bullet(commands: &mut Commands, registry: &mut BulletRegistry, id: BulletId) -> bool {
    let Some(bullet) = registry.remove(id) else {
        return false;
    };
    commands.entity(bullet.entity).despawn();
    true
}

/// Drains the contacts recorded during the last physics step. Each matching bullet
/// leaves a damage label at its current position and is removed.
pub fn resolve_contacts(
    mut commands: Commands,
    mut registry: ResMut<BulletRegistry>,
    mut pending: ResMut<PendingContacts>,
    mut stats: ResMut<BattleStats>,
    bodies: Query<(&Transform, Option<&CollisionFilter>)>,
    cfg: Res<GameConfig>,
) {
    while let Some(record) = pending.pop() {
        let mut i = 0;
        while let Some(bullet) = registry.get_index(i).copied() {
            if !record.involves(bullet.id) {
                i += 1;
                continue;
            }
            if let Ok((tf, filter)) = bodies.get(bullet.entity) {
                let faction = filter.and_then(CollisionFilter::faction).unwrap_or(bullet.faction);
                spawn_damage_label(
                    &mut commands,
                    tf.translation.truncate(),
                    bullet.damage,
                    faction_color(faction),
                    &cfg.damage_label,
                );
            }
            debug!(target: LOG_TARGET, "bullet {:?} hit ({:.1} dmg)", bullet.id, bullet.damage);
            remove_bullet(&mut commands, &mut registry, bullet.id);
            stats.hits += 1;
            // index i now holds the next entry
        }
    }
}

/// Bullets older than the configured lifetime are removed unconditionally.
pub fn expire_bullets(
    mut commands: Commands,
    mut registry: ResMut<BulletRegistry>,
    mut stats: ResMut<BattleStats>,
    clock: Res<SimClock>,
    cfg: Res<GameConfig>,
) {
    let lifetime = Duration::from_millis(cfg.bullet.lifetime_ms);
    let expired: Vec<BulletId> = registry
        .iter()
        .filter(|b| b.age(clock.elapsed) >= lifetime)
        .map(|b| b.id)
        .collect();
    for id in expired {
        if remove_bullet(&mut commands, &mut registry, id) {
            debug!(target: LOG_TARGET, "bullet {:?} expired", id);
            stats.expired += 1;
        }
    }
}

/// Releases everything the battle owns: live bullets, queued contacts, labels.
pub fn teardown_battlefield(
    mut commands: Commands,
    mut registry: ResMut<BulletRegistry>,
    mut pending: ResMut<PendingContacts>,
    labels: Query<Entity, With<DamageLabel>>,
) {
    let ids = registry.ids();
    let count = ids.len();
    for id in ids {
        remove_bullet(&mut commands, &mut registry, id);
    }
    pending.clear();
    for e in &labels {
        commands.entity(e).despawn();
    }
    info!(target: LOG_TARGET, "teardown: released {count} live bullets");
}

pub struct BulletLifecyclePlugin;

impl Plugin for BulletLifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BulletRegistry>()
            .init_resource::<BattleStats>()
            .add_systems(
                Update,
                (
                    resolve_contacts.in_set(FrameSet::ResolveContacts),
                    expire_bullets.in_set(FrameSet::Expire),
                ),
            )
            .add_systems(Last, teardown_battlefield.run_if(on_event::<AppExit>));
    }
}
