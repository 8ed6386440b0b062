pub mod config;

pub use config::{
    BulletConfig, CadenceMode, DamageLabelConfig, FactionConfig, FactionsConfig, GameConfig,
    Vec2Config, WallConfig, WindowConfig, WorldConfig,
};
