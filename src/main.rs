use bevy::prelude::*;
use std::path::Path;

use crossfire::{GameConfig, GamePlugin};

const BASE_CONFIG: &str = "assets/config/game.ron";
const LOCAL_CONFIG: &str = "assets/config/game.local.ron";

fn main() -> AppExit {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    // Base file first, optional local overrides on top.
    let paths = [BASE_CONFIG, LOCAL_CONFIG]
        .into_iter()
        .filter(|p| *p == BASE_CONFIG || Path::new(p).exists());
    let (cfg, used, errors) = GameConfig::load_layered(paths);
    let warnings = cfg.validate();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }));

    // Logging is only up once DefaultPlugins is in.
    info!(target: "config", "loaded config layers: {}", used.join(", "));
    for e in &errors {
        error!(target: "config", "{e}");
    }
    for w in &warnings {
        warn!(target: "config", "{w}");
    }

    app.insert_resource(cfg).add_plugins(GamePlugin).run()
}
