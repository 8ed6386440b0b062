use bevy::prelude::*;

use crate::core::components::DamageLabel;
use crate::core::rng::SimClock;
use crate::gameplay::bullets::{BattleStats, BulletRegistry};
use crate::physics::contacts::PendingContacts;

#[derive(Resource, Debug, Clone)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

/// Snapshot refreshed every frame; the logger prints it on its interval.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DebugStats {
    pub fps: f32,
    pub sim_frame: u64,
    pub live_bullets: usize,
    pub pending_contacts: usize,
    pub labels: usize,
    pub battle: BattleStats,
}

pub fn debug_stats_collect_system(
    time: Res<Time>,
    clock: Res<SimClock>,
    registry: Res<BulletRegistry>,
    pending: Res<PendingContacts>,
    battle: Res<BattleStats>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_labels: Query<(), With<DamageLabel>>,
) {
    state.frame_counter += 1;
    let inst_fps = 1.0 / time.delta_secs().max(1e-6);
    stats.fps = if stats.fps == 0.0 {
        inst_fps
    } else {
        stats.fps * 0.9 + inst_fps * 0.1
    };
    stats.sim_frame = clock.frame;
    stats.live_bullets = registry.len();
    stats.pending_contacts = pending.len();
    stats.labels = q_labels.iter().count();
    stats.battle = *battle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_registry_and_label_counts() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SimClock>()
            .init_resource::<BulletRegistry>()
            .init_resource::<PendingContacts>()
            .init_resource::<BattleStats>()
            .init_resource::<DebugState>()
            .init_resource::<DebugStats>()
            .add_systems(Update, debug_stats_collect_system);
        app.world_mut().spawn(DamageLabel::new(12.0, 0.05));
        app.world_mut().resource_mut::<BattleStats>().hits = 3;
        app.update();
        let stats = app.world().resource::<DebugStats>();
        assert_eq!(stats.labels, 1);
        assert_eq!(stats.live_bullets, 0);
        assert_eq!(stats.battle.hits, 3);
        assert_eq!(app.world().resource::<DebugState>().frame_counter, 1);
    }
}
