use bevy::prelude::*;
use rand::Rng;

use crate::core::components::Faction;
use crate::core::config::{CadenceMode, FactionConfig, GameConfig};
use crate::core::system::system_order::FrameSet;
use crate::gameplay::arena::Arena;
use crate::gameplay::factory::BodyFactory;
use crate::physics::rapier::rapier_physics::pixel_impulse;
use crate::interaction::input::pointer::TouchState;

/// Frame counters deciding when a held touch fires. In `Shared` mode both
/// factions advance and reset the same counter.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct FireCadence {
    counters: [u32; 2],
}

impl FireCadence {
    pub fn counter(&self, mode: CadenceMode, faction: Faction) -> u32 {
        self.counters[Self::slot(mode, faction)]
    }

    fn slot(mode: CadenceMode, faction: Faction) -> usize {
        match mode {
            CadenceMode::Shared => 0,
            CadenceMode::PerFaction => faction.index(),
        }
    }

    /// One eligible frame. Fires on every `interval`-th call and resets.
    pub fn tick(&mut self, mode: CadenceMode, faction: Faction, interval: u32) -> bool {
        let counter = &mut self.counters[Self::slot(mode, faction)];
        let threshold = interval.max(1) - 1;
        let fire = threshold <= *counter;
        *counter += 1;
        if fire {
            *counter = 0;
        }
        fire
    }
}

/// The faction's base impulse rotated by an angle uniform in `[-accuracy, accuracy)`,
/// converted to Rapier's pixel units.
pub fn fire_impulse(faction: &FactionConfig, rng: &mut impl Rng, pixels_per_meter: f32) -> Vec2 {
    let acc = faction.accuracy_deg;
    let angle = rng.gen::<f32>() * 2.0 * acc - acc;
    let si = Vec2::from_angle(angle.to_radians()).rotate(faction.impulse.as_vec2());
    pixel_impulse(si, pixels_per_meter)
}

pub fn fire_from_touch(
    touch: Res<TouchState>,
    arena: Res<Arena>,
    cfg: Res<GameConfig>,
    mut cadence: ResMut<FireCadence>,
    mut factory: BodyFactory,
) {
    let TouchState::Touching { position } = *touch else {
        return;
    };
    let faction = Faction::for_touch(position.x, arena.center.x);
    let interval = faction.config(&cfg.factions).fire_interval_frames;
    if cadence.tick(cfg.cadence, faction, interval) {
        factory.shoot(faction, position);
    }
}

pub struct FiringPlugin;

impl Plugin for FiringPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FireCadence>()
            .add_systems(Update, fire_from_touch.in_set(FrameSet::Fire));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Vec2Config;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fires_every_interval_frames() {
        let mut cadence = FireCadence::default();
        let fired: Vec<bool> = (0..6)
            .map(|_| cadence.tick(CadenceMode::PerFaction, Faction::A, 3))
            .collect();
        assert_eq!(fired, vec![false, false, true, false, false, true]);
    }

    #[test]
    fn shared_counter_is_reset_by_either_faction() {
        let mut cadence = FireCadence::default();
        assert!(!cadence.tick(CadenceMode::Shared, Faction::B, 6));
        assert!(!cadence.tick(CadenceMode::Shared, Faction::B, 6));
        // A sees the counter B advanced
        assert!(cadence.tick(CadenceMode::Shared, Faction::A, 3));
        assert_eq!(cadence.counter(CadenceMode::Shared, Faction::B), 0);
    }

    #[test]
    fn per_faction_counters_are_independent() {
        let mut cadence = FireCadence::default();
        cadence.tick(CadenceMode::PerFaction, Faction::B, 6);
        cadence.tick(CadenceMode::PerFaction, Faction::B, 6);
        assert_eq!(cadence.counter(CadenceMode::PerFaction, Faction::A), 0);
        assert_eq!(cadence.counter(CadenceMode::PerFaction, Faction::B), 2);
    }

    #[test]
    fn zero_interval_fires_every_frame() {
        let mut cadence = FireCadence::default();
        assert!(cadence.tick(CadenceMode::Shared, Faction::A, 0));
        assert!(cadence.tick(CadenceMode::Shared, Faction::A, 0));
    }

    #[test]
    fn impulse_stays_within_accuracy_cone() {
        let faction = FactionConfig {
            fire_interval_frames: 3,
            impulse: Vec2Config::new(0.1, 0.0),
            accuracy_deg: 10.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let v = fire_impulse(&faction, &mut rng, 50.0);
            assert!((v.length() - 5.0).abs() < 1e-4);
            assert!(v.x > 0.0);
            assert!(v.to_angle().to_degrees().abs() <= 10.0 + 1e-3);
        }
    }

    #[test]
    fn zero_accuracy_keeps_base_direction() {
        let faction = FactionConfig {
            fire_interval_frames: 6,
            impulse: Vec2Config::new(-0.2, 0.0),
            accuracy_deg: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let v = fire_impulse(&faction, &mut rng, 50.0);
        assert!((v - Vec2::new(-10.0, 0.0)).length() < 1e-4);
    }
}
