use bevy::prelude::*;

use super::stats::{DebugState, DebugStats};

pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    info!(
        target: "battle",
        "SIM frame={} t={:.3}s fps={:.1} live={} fired=A:{}/B:{} hits={} expired={} \
         pending={} labels={}",
        stats.sim_frame,
        time.elapsed_secs(),
        stats.fps,
        stats.live_bullets,
        stats.battle.fired[0],
        stats.battle.fired[1],
        stats.battle.hits,
        stats.battle.expired,
        stats.pending_contacts,
        stats.labels
    );
}
