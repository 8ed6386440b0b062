// This file is part of Crossfire.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::rng::{advance_sim_clock, SimClock, SimRng};
use crate::core::system::system_order::{configure_frame_sets, FrameSet};
use crate::debug::DebugPlugin;
use crate::gameplay::arena::ArenaPlugin;
use crate::gameplay::bullets::BulletLifecyclePlugin;
use crate::gameplay::damage::DamageLabelPlugin;
use crate::gameplay::firing::FiringPlugin;
use crate::interaction::input::pointer::{PointerCapturePlugin, PointerPlugin};
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::physics::contacts::ContactRecorderPlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::materials::materials::MaterialsPlugin;

/// Everything that runs without a window: frame ordering, seeded RNG, the
/// simulation clock, input state, firing, contact resolution and labels.
/// Physics and rendering are added on top by [`GamePlugin`] (or by a test).
pub struct BattleCorePlugin;

impl Plugin for BattleCorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.init_resource::<GameConfig>();
        }
        let (seed, frame_rate) = {
            let cfg = app.world().resource::<GameConfig>();
            (cfg.world.seed, cfg.world.frame_rate)
        };
        configure_frame_sets(app);
        app.insert_resource(SimRng::new(seed))
            .insert_resource(SimClock::from_frame_rate(frame_rate))
            .add_systems(Update, advance_sim_clock.in_set(FrameSet::Clock))
            .add_plugins((
                ContactRecorderPlugin,
                PointerPlugin,
                BulletLifecyclePlugin,
                FiringPlugin,
                DamageLabelPlugin,
                ArenaPlugin,
            ));
    }
}

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let physics = match app.world().get_resource::<GameConfig>() {
            Some(cfg) => PhysicsSetupPlugin::from_config(cfg),
            None => PhysicsSetupPlugin::default(),
        };
        app.add_plugins((
            BattleCorePlugin,
            physics,
            MaterialsPlugin,
            CameraPlugin,
            PointerCapturePlugin,
            DebugPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
        ));
    }
}
