use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::GameConfig;

const LOG_TARGET: &str = "config";

#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings {
    pub paths: Vec<PathBuf>,
    pub interval_secs: f32,
}

impl Default for ConfigReloadSettings {
    fn default() -> Self {
        Self {
            paths: vec![
                PathBuf::from("assets/config/game.ron"),
                PathBuf::from("assets/config/game.local.ron"),
            ],
            interval_secs: 0.5,
        }
    }
}

#[derive(Resource, Debug)]
struct ConfigReloadState {
    last_mod: HashMap<PathBuf, SystemTime>,
    timer: Timer,
}

impl FromWorld for ConfigReloadState {
    fn from_world(world: &mut World) -> Self {
        let secs = world
            .get_resource::<ConfigReloadSettings>()
            .map_or(0.5, |s| s.interval_secs)
            .max(0.05);
        Self {
            last_mod: HashMap::new(),
            timer: Timer::from_seconds(secs, TimerMode::Repeating),
        }
    }
}

/// Polls the config files' modification times (native only) and swaps in the
/// reloaded config when it differs. Bodies already spawned keep their old material.
pub struct ConfigHotReloadPlugin;

impl Plugin for ConfigHotReloadPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.init_resource::<ConfigReloadSettings>()
                .init_resource::<ConfigReloadState>()
                .add_systems(Update, poll_and_reload_config);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = app;
    }
}

/// Records newer modification times; true when any file changed since the last poll.
fn files_changed(
    settings: &ConfigReloadSettings,
    last_mod: &mut HashMap<PathBuf, SystemTime>,
) -> bool {
    let mut dirty = false;
    for path in &settings.paths {
        let Ok(mod_time) = std::fs::metadata(path).and_then(|m| m.modified()) else {
            continue;
        };
        let entry = last_mod.entry(path.clone()).or_insert(SystemTime::UNIX_EPOCH);
        if mod_time > *entry {
            *entry = mod_time;
            dirty = true;
        }
    }
    dirty
}

/// Sections baked into the clock, RNG, Rapier plugin and live bodies at startup keep
/// their running values. Returns the merged config and the names of the sections kept.
fn keep_startup_sections(
    current: &GameConfig,
    mut incoming: GameConfig,
) -> (GameConfig, Vec<&'static str>) {
    let mut kept = Vec::new();
    if incoming.world != current.world {
        incoming.world = current.world.clone();
        kept.push("world");
    }
    if incoming.rapier_debug != current.rapier_debug {
        incoming.rapier_debug = current.rapier_debug;
        kept.push("rapier_debug");
    }
    (incoming, kept)
}

fn poll_and_reload_config(
    time: Res<Time>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut windows: Query<&mut Window>,
) {
    if !state.timer.tick(time.delta()).just_finished() {
        return;
    }
    if !files_changed(&settings, &mut state.last_mod) {
        return;
    }
    let existing = settings.paths.iter().filter(|p| p.exists());
    let (loaded, _used, errors) = GameConfig::load_layered(existing);
    for e in errors {
        warn!(target: LOG_TARGET, "hot reload issue: {e}");
    }
    let (new_cfg, kept) = keep_startup_sections(&cfg_res, loaded);
    for section in kept {
        warn!(target: LOG_TARGET, "`{section}` changed on disk; it only applies after a restart");
    }
    if *cfg_res == new_cfg {
        return;
    }
    for w in new_cfg.validate() {
        warn!(target: LOG_TARGET, "{w}");
    }
    info!(target: LOG_TARGET, "config hot reload applied");
    if let Ok(mut window) = windows.single_mut() {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height {
            window.resolution.set(new_cfg.window.width, new_cfg.window.height);
        }
        if window.title != new_cfg.window.title {
            window.title = new_cfg.window.title.clone();
        }
    }
    *cfg_res = new_cfg;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn first_poll_sees_existing_files_then_settles() {
        let mut file = tempfile::NamedTempFile::new().expect("tmp file");
        writeln!(file, "(rapier_debug: true)").expect("write");
        let settings = ConfigReloadSettings {
            paths: vec![file.path().to_path_buf(), PathBuf::from("does/not/exist.ron")],
            interval_secs: 0.5,
        };
        let mut last_mod = HashMap::new();
        assert!(files_changed(&settings, &mut last_mod));
        assert!(!files_changed(&settings, &mut last_mod));
        assert_eq!(last_mod.len(), 1);
    }

    #[test]
    fn world_changes_wait_for_restart() {
        let current = GameConfig::default();
        let mut incoming = GameConfig::default();
        incoming.world.frame_rate = 30.0;
        incoming.world.pixels_per_meter = 100.0;
        incoming.rapier_debug = true;
        incoming.bullet.base_damage = 40.0;

        let (merged, kept) = keep_startup_sections(&current, incoming);
        assert_eq!(kept, vec!["world", "rapier_debug"]);
        assert_eq!(merged.world, current.world);
        assert!(!merged.rapier_debug);
        assert_eq!(merged.bullet.base_damage, 40.0);
    }

    #[test]
    fn live_sections_apply_without_warnings() {
        let current = GameConfig::default();
        let mut incoming = GameConfig::default();
        incoming.damage_label.fade_step = 0.1;
        let (merged, kept) = keep_startup_sections(&current, incoming);
        assert!(kept.is_empty());
        assert_eq!(merged.damage_label.fade_step, 0.1);
    }
}
