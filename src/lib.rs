pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::game::{BattleCorePlugin, GamePlugin};
pub use crate::core::components::{BulletId, Faction};
pub use crate::core::config::{GameConfig, WindowConfig};
pub use crate::gameplay::bullets::{remove_bullet, BattleStats, BulletRegistry, LiveBullet};
pub use crate::interaction::input::pointer::{PointerEvent, TouchState};
pub use crate::physics::contacts::{ContactRecord, PendingContacts};
