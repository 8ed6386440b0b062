//! Debug module: feature gated battle stats and periodic logging.
//! Built only when compiled with `--features debug` (on by default).

#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use stats::{DebugState, DebugStats};

#[cfg(feature = "debug")]
use crate::core::config::GameConfig;
#[cfg(feature = "debug")]
use crate::core::system::system_order::FrameSet;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;

#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use logging::debug_logging_system;
        use stats::debug_stats_collect_system;

        let log_interval = app
            .world()
            .get_resource::<GameConfig>()
            .map_or(1.0, |c| c.debug_log_interval);
        app.insert_resource(DebugState {
            log_interval,
            ..default()
        })
        .init_resource::<DebugStats>()
        .add_systems(
            Update,
            (debug_stats_collect_system, debug_logging_system)
                .chain()
                .after(FrameSet::Effects),
        );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;

#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}
