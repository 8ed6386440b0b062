use crate::core::config::GameConfig;
use crate::rendering::palette::palette::FACTION_COLORS;
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct BulletVisualsInitSet;

/// Shared circle mesh + one material per faction. Absent in headless apps, where
/// bullets spawn without visuals.
#[derive(Resource, Clone)]
pub struct BulletVisuals {
    pub mesh: Handle<Mesh>,
    pub materials: [Handle<ColorMaterial>; 2],
}

pub struct MaterialsPlugin;
impl Plugin for MaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, setup_bullet_visuals.in_set(BulletVisualsInitSet));
    }
}

fn setup_bullet_visuals(
    mut commands: Commands,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<ColorMaterial>>>,
    cfg: Res<GameConfig>,
) {
    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        return;
    };
    let radius_px = cfg.bullet.diameter_m * cfg.world.pixels_per_meter * 0.5;
    let mesh = meshes.add(Circle::new(radius_px));
    let materials = FACTION_COLORS.map(|c| materials.add(c));
    commands.insert_resource(BulletVisuals { mesh, materials });
}
