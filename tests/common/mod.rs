#![allow(dead_code)]

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use crossfire::gameplay::factory::BodyFactory;
use crossfire::{remove_bullet, BattleCorePlugin, BulletRegistry, Faction, GameConfig, LiveBullet};

/// Headless battle: no window, no physics. Startup has already run.
pub fn core_app(cfg: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(cfg)
        .add_plugins(BattleCorePlugin);
    app.update();
    app
}

pub fn spawn_bullet(app: &mut App, faction: Faction, pos: Vec2) -> LiveBullet {
    app.world_mut()
        .run_system_once(move |mut factory: BodyFactory| factory.spawn_bullet(faction, pos))
        .expect("spawn bullet")
}

pub fn remove(app: &mut App, bullet: &LiveBullet) -> bool {
    let id = bullet.id;
    app.world_mut()
        .run_system_once(move |mut commands: Commands, mut registry: ResMut<BulletRegistry>| {
            remove_bullet(&mut commands, &mut registry, id)
        })
        .expect("remove bullet")
}

pub fn live_count(app: &App) -> usize {
    app.world().resource::<BulletRegistry>().len()
}
