use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

const LOG_TARGET: &str = "physics";

/// Our wrapper to install and configure Rapier: pixel scale, fixed step, gravity.
pub struct PhysicsSetupPlugin {
    pub pixels_per_meter: f32,
    pub step_secs: f32,
    pub debug_render: bool,
}

impl PhysicsSetupPlugin {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            pixels_per_meter: cfg.world.pixels_per_meter,
            step_secs: cfg.world.step_secs(),
            debug_render: cfg.rapier_debug,
        }
    }
}

impl Default for PhysicsSetupPlugin {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            self.pixels_per_meter,
        ))
        // One step of exactly 1 / frame_rate per frame, regardless of wall-clock time.
        .insert_resource(TimestepMode::Fixed {
            dt: self.step_secs,
            substeps: 1,
        })
        .add_systems(Startup, configure_gravity);
        if self.debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

fn configure_gravity(mut q_cfg: Query<&mut RapierConfiguration>, game_cfg: Res<GameConfig>) {
    // RapierConfiguration lives on the default context entity.
    let gravity = game_cfg.world.gravity.as_vec2() * game_cfg.world.pixels_per_meter;
    for mut cfg in q_cfg.iter_mut() {
        cfg.gravity = gravity;
    }
    info!(target: LOG_TARGET, "Rapier gravity set to ({:.1}, {:.1}) px/s²", gravity.x, gravity.y);
}

/// Rapier works in pixels here: areas are px², so an SI density (kg/m²) must be
/// divided by ppm² to give the body its real mass.
#[inline]
pub fn pixel_density(density: f32, pixels_per_meter: f32) -> f32 {
    density / (pixels_per_meter * pixels_per_meter)
}

/// SI impulse (N·s) to Rapier's pixel units. Linear momentum scales with length only.
#[inline]
pub fn pixel_impulse(impulse: Vec2, pixels_per_meter: f32) -> Vec2 {
    impulse * pixels_per_meter
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn bullet_mass_matches_si_body() {
        let ppm = 50.0;
        let radius_m = 0.05;
        let radius_px = radius_m * ppm;
        let mass_px = pixel_density(1.0, ppm) * PI * radius_px * radius_px;
        let mass_si = 1.0 * PI * radius_m * radius_m;
        assert!((mass_px - mass_si).abs() < 1e-6, "{mass_px} vs {mass_si}");
    }

    #[test]
    fn launch_speed_is_scale_independent() {
        // v_px = (J·ppm) / m must equal (J / m)·ppm for any ppm.
        let impulse = Vec2::new(0.1, 0.0);
        let mass = PI * 0.05 * 0.05;
        for ppm in [1.0, 50.0, 100.0] {
            let v_px = pixel_impulse(impulse, ppm) / mass;
            let v_si = impulse / mass;
            assert!((v_px - v_si * ppm).length() < 1e-3);
        }
        // ~12.7 m/s for faction A's default shot.
        assert!(((impulse / mass).x - 12.73).abs() < 0.01);
    }
}
