use bevy::prelude::*;

use crate::core::components::DamageLabel;
use crate::core::config::DamageLabelConfig;
use crate::core::system::system_order::FrameSet;

/// Floating damage number at `position`. Font size follows the damage value.
pub fn spawn_damage_label(
    commands: &mut Commands,
    position: Vec2,
    damage: f32,
    color: Color,
    cfg: &DamageLabelConfig,
) -> Entity {
    let label = DamageLabel::new(damage, cfg.fade_step);
    commands
        .spawn((
            Text2d::new(label.text()),
            TextFont {
                font_size: damage.max(1.0),
                ..default()
            },
            TextColor(color),
            Transform::from_translation(position.extend(cfg.z)),
            label,
            Name::new("DamageLabel"),
        ))
        .id()
}

pub fn fade_damage_labels(
    mut commands: Commands,
    mut labels: Query<(Entity, &mut DamageLabel, &mut TextColor)>,
) {
    for (entity, mut label, mut color) in &mut labels {
        if label.fade() {
            commands.entity(entity).despawn();
        } else {
            color.0.set_alpha(label.opacity);
        }
    }
}

pub struct DamageLabelPlugin;

impl Plugin for DamageLabelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, fade_damage_labels.in_set(FrameSet::Effects));
    }
}
