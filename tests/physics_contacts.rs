//! Full Rapier stepping, headless.
mod common;

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use common::{live_count, spawn_bullet};
use crossfire::gameplay::arena::Arena;
use crossfire::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crossfire::{BattleCorePlugin, BattleStats, Faction, GameConfig, PointerEvent};

fn physics_app() -> App {
    let cfg = GameConfig::default();
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(cfg.clone())
        .add_plugins((BattleCorePlugin, PhysicsSetupPlugin::from_config(&cfg)));
    app.update();
    app
}

fn wall_position(app: &App, faction: Faction) -> Vec2 {
    let arena = *app.world().resource::<Arena>();
    arena.wall_position(faction, app.world().resource::<GameConfig>())
}

#[test]
fn bullet_touching_the_opposing_wall_is_resolved() {
    let mut app = physics_app();
    let at = wall_position(&app, Faction::B);
    spawn_bullet(&mut app, Faction::A, at);
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(live_count(&app), 0);
    assert_eq!(app.world().resource::<BattleStats>().hits, 1);
}

#[test]
fn bullet_passes_through_its_own_wall() {
    let mut app = physics_app();
    let at = wall_position(&app, Faction::A);
    spawn_bullet(&mut app, Faction::A, at);
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(live_count(&app), 1);
    assert_eq!(app.world().resource::<BattleStats>().hits, 0);
}

#[test]
fn opposing_bullets_never_collide() {
    let mut app = physics_app();
    spawn_bullet(&mut app, Faction::A, Vec2::new(0.0, 200.0));
    spawn_bullet(&mut app, Faction::B, Vec2::new(1.0, 200.0));
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(live_count(&app), 2);
    assert_eq!(app.world().resource::<BattleStats>().hits, 0);
}

/// Holds a touch until the first bullet leaves, releases, then steps until the hit
/// or the given frame budget runs out. Returns the frame count the hit took.
fn fire_once_and_wait(app: &mut App, touch: Vec2, max_frames: u32) -> Option<u32> {
    app.world_mut().send_event(PointerEvent::Down(touch));
    for _ in 0..6 {
        app.update();
        if app.world().resource::<BattleStats>().fired != [0, 0] {
            break;
        }
    }
    app.world_mut().send_event(PointerEvent::Up);
    for frame in 0..max_frames {
        if app.world().resource::<BattleStats>().hits > 0 {
            return Some(frame);
        }
        app.update();
    }
    None
}

#[test]
fn fired_a_bullet_crosses_to_the_b_wall() {
    let mut app = physics_app();
    // Well inside the 3000 ms lifetime (180 frames at 60 fps).
    let frames = fire_once_and_wait(&mut app, Vec2::new(-150.0, 0.0), 120);
    assert!(frames.is_some(), "A bullet never reached B's wall");
    let stats = *app.world().resource::<BattleStats>();
    assert_eq!(stats.fired, [1, 0]);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.expired, 0);
    assert_eq!(live_count(&app), 0);
}

#[test]
fn fired_b_bullet_crosses_to_the_a_wall() {
    let mut app = physics_app();
    let frames = fire_once_and_wait(&mut app, Vec2::new(150.0, 0.0), 120);
    assert!(frames.is_some(), "B bullet never reached A's wall");
    let stats = *app.world().resource::<BattleStats>();
    assert_eq!(stats.fired, [0, 1]);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.expired, 0);
}
