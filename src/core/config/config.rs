use anyhow::Context;
use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Crossfire".into(),
            auto_close: 0.0,
        }
    }
}

/// Plain `(x, y)` pair; keeps the RON files free of bevy's math serde format.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Vec2Config {
    pub x: f32,
    pub y: f32,
}
impl Vec2Config {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Meters per second squared; the arena is top-down so both axes default to zero.
    pub gravity: Vec2Config,
    pub pixels_per_meter: f32,
    /// Frames per second; one physics step of `1 / frame_rate` runs every frame.
    pub frame_rate: f32,
    pub seed: u64,
}
impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2Config::new(0.0, 0.0),
            pixels_per_meter: 50.0,
            frame_rate: 60.0,
            seed: 42,
        }
    }
}
impl WorldConfig {
    pub fn step_secs(&self) -> f32 {
        1.0 / self.frame_rate.max(1.0)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BulletConfig {
    pub diameter_m: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub base_damage: f32,
    /// Damage is `base_damage + uniform(-damage_jitter, damage_jitter)`.
    pub damage_jitter: f32,
    pub lifetime_ms: u64,
    pub ccd: bool,
}
impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            diameter_m: 0.1,
            density: 1.0,
            friction: 0.3,
            restitution: 0.7,
            base_damage: 20.0,
            damage_jitter: 5.0,
            lifetime_ms: 3000,
            ccd: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WallConfig {
    pub width_m: f32,
    /// Wall height as a fraction of the arena height.
    pub height_fraction: f32,
    /// Horizontal distance of each wall from the arena center.
    pub offset_m: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}
impl Default for WallConfig {
    fn default() -> Self {
        Self {
            width_m: 0.3,
            height_fraction: 1.0 / 3.0,
            offset_m: 1.0,
            density: 1.0,
            friction: 0.3,
            restitution: 0.7,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FactionConfig {
    /// A shot leaves every `fire_interval_frames` frames of held touch.
    pub fire_interval_frames: u32,
    /// Base impulse in N·s before the accuracy rotation.
    pub impulse: Vec2Config,
    /// Half-width of the firing cone in degrees.
    pub accuracy_deg: f32,
}
impl FactionConfig {
    pub fn default_a() -> Self {
        Self {
            fire_interval_frames: 3,
            impulse: Vec2Config::new(0.1, 0.0),
            accuracy_deg: 10.0,
        }
    }
    pub fn default_b() -> Self {
        Self {
            fire_interval_frames: 6,
            impulse: Vec2Config::new(-0.2, 0.0),
            accuracy_deg: 3.0,
        }
    }
}
impl Default for FactionConfig {
    fn default() -> Self {
        Self::default_a()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FactionsConfig {
    pub a: FactionConfig,
    pub b: FactionConfig,
}
impl Default for FactionsConfig {
    fn default() -> Self {
        Self {
            a: FactionConfig::default_a(),
            b: FactionConfig::default_b(),
        }
    }
}

/// How the per-frame fire counter is shared between factions.
/// Written as a string in RON (`cadence: "PerFaction"`) so layered merging keeps it intact.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "String")]
pub enum CadenceMode {
    /// One counter drives both factions (switching sides mid-hold carries the count over).
    #[default]
    Shared,
    /// Each faction counts its own frames.
    PerFaction,
}

impl TryFrom<String> for CadenceMode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Shared" => Ok(CadenceMode::Shared),
            "PerFaction" => Ok(CadenceMode::PerFaction),
            other => Err(format!("unknown cadence mode {other:?} (expected Shared or PerFaction)")),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DamageLabelConfig {
    /// Opacity removed every frame; the label starts fully opaque.
    pub fade_step: f32,
    pub z: f32,
}
impl Default for DamageLabelConfig {
    fn default() -> Self {
        Self {
            fade_step: 0.05,
            z: 10.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub bullet: BulletConfig,
    pub wall: WallConfig,
    pub factions: FactionsConfig,
    pub cadence: CadenceMode,
    pub damage_label: DamageLabelConfig,
    pub rapier_debug: bool,
    pub debug_log_interval: f32,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            world: Default::default(),
            bullet: Default::default(),
            wall: Default::default(),
            factions: Default::default(),
            cadence: CadenceMode::Shared,
            damage_label: Default::default(),
            rapier_debug: false,
            debug_log_interval: 1.0,
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        ron::from_str(&data).with_context(|| format!("parse RON {}", path.display()))
    }

    /// Deep-merges every readable RON file in order (later files win) and deserializes
    /// the result. Returns the config, the files that were used, and per-file errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (GameConfig::default(), used, errors);
        };
        match val.into_rust::<GameConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (GameConfig::default(), used, errors)
            }
        }
    }

    /// Non-fatal sanity checks. Every entry is a human readable warning.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.world.pixels_per_meter <= 0.0 {
            w.push("world.pixels_per_meter must be > 0".into());
        }
        if self.world.frame_rate <= 0.0 {
            w.push(format!(
                "world.frame_rate {} must be > 0; clamped to 1",
                self.world.frame_rate
            ));
        }
        if self.world.gravity.as_vec2().length_squared() > 0.0 {
            w.push(format!(
                "world.gravity ({}, {}) is non-zero; bullets will drift out of the lanes",
                self.world.gravity.x, self.world.gravity.y
            ));
        }
        if self.bullet.diameter_m <= 0.0 {
            w.push("bullet.diameter_m must be > 0".into());
        }
        if self.bullet.density <= 0.0 {
            w.push("bullet.density must be > 0 (massless bodies ignore impulses)".into());
        }
        if self.bullet.damage_jitter < 0.0 {
            w.push("bullet.damage_jitter negative; its magnitude is used".into());
        }
        if self.bullet.damage_jitter.abs() >= self.bullet.base_damage {
            w.push(format!(
                "bullet.damage_jitter {} can push damage to <= 0 (base {})",
                self.bullet.damage_jitter, self.bullet.base_damage
            ));
        }
        if self.bullet.lifetime_ms == 0 {
            w.push("bullet.lifetime_ms is 0; bullets expire on the frame after firing".into());
        }
        if !(0.0..=1.5).contains(&self.bullet.restitution) {
            w.push(format!(
                "bullet.restitution {} outside recommended 0..1.5",
                self.bullet.restitution
            ));
        }
        if self.wall.width_m <= 0.0 {
            w.push("wall.width_m must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.wall.height_fraction) || self.wall.height_fraction == 0.0 {
            w.push(format!(
                "wall.height_fraction {} outside (0, 1]",
                self.wall.height_fraction
            ));
        }
        for (label, f) in [("factions.a", &self.factions.a), ("factions.b", &self.factions.b)] {
            if f.fire_interval_frames == 0 {
                w.push(format!(
                    "{label}.fire_interval_frames is 0; treated as 1 (fires every frame)"
                ));
            }
            if f.impulse.as_vec2().length_squared() == 0.0 {
                w.push(format!("{label}.impulse is zero; bullets will not move"));
            }
            if !(0.0..=180.0).contains(&f.accuracy_deg) {
                w.push(format!(
                    "{label}.accuracy_deg {} outside 0..180",
                    f.accuracy_deg
                ));
            }
        }
        if self.damage_label.fade_step <= 0.0 {
            w.push(format!(
                "damage_label.fade_step {} must be > 0 or labels never disappear",
                self.damage_label.fade_step
            ));
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn faction_defaults_face_each_other() {
        let cfg = GameConfig::default();
        assert!(cfg.factions.a.impulse.x > 0.0);
        assert!(cfg.factions.b.impulse.x < 0.0);
        assert_eq!(cfg.factions.a.fire_interval_frames, 3);
        assert_eq!(cfg.factions.b.fire_interval_frames, 6);
    }

    #[test]
    fn partial_ron_fills_defaults() {
        let cfg: GameConfig =
            ron::from_str("(cadence: \"PerFaction\", bullet: (base_damage: 30.0))").unwrap();
        assert_eq!(cfg.cadence, CadenceMode::PerFaction);
        assert_eq!(cfg.bullet.base_damage, 30.0);
        assert_eq!(cfg.bullet.lifetime_ms, 3000);
        assert_eq!(cfg.world.pixels_per_meter, 50.0);
    }

    #[test]
    fn zero_interval_and_fade_warn() {
        let mut cfg = GameConfig::default();
        cfg.factions.b.fire_interval_frames = 0;
        cfg.damage_label.fade_step = 0.0;
        let warns = cfg.validate().join("\n");
        assert!(warns.contains("factions.b.fire_interval_frames"));
        assert!(warns.contains("damage_label.fade_step"));
    }
}
