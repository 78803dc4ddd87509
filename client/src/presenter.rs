//! Bevy side of [`sim::Presenter`]: each simulation visual is a mesh entity.

use bevy::{ecs::system::SystemParam, light::NotShadowCaster, prelude::*};
use sim::{BoxSpec, Pose, Presenter, VisualStyle};

use crate::transform::{box_primitive, pose_to_transform, write_pose};

const BRICK_COLOR: Color = Color::srgb_u8(0xAA, 0x4A, 0x44);

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, load_scene_materials);
}

/// Marks mesh entities whose transform is owned by the simulation.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimVisual(pub VisualStyle);

/// Materials shared by every visual of a given style.
#[derive(Resource)]
pub struct SceneMaterials {
    ground: Handle<StandardMaterial>,
    brick: Handle<StandardMaterial>,
}

pub(crate) fn load_scene_materials(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(SceneMaterials {
        ground: materials.add(ground_material()),
        brick: materials.add(StandardMaterial {
            base_color: BRICK_COLOR,
            perceptual_roughness: 0.8,
            ..default()
        }),
    });
}

/// Shadow catcher: a lit white surface multiplied over the background leaves it
/// nearly untouched, while the parts in shadow darken it.
fn ground_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        alpha_mode: AlphaMode::Multiply,
        perceptual_roughness: 1.0,
        metallic: 0.0,
        reflectance: 0.0,
        ..default()
    }
}

impl SceneMaterials {
    fn get(&self, style: VisualStyle) -> Handle<StandardMaterial> {
        match style {
            VisualStyle::Ground => self.ground.clone(),
            VisualStyle::Brick => self.brick.clone(),
        }
    }
}

/// Everything needed to create, move and despawn simulation visuals from a system.
#[derive(SystemParam)]
pub struct BevyPresenter<'w, 's> {
    commands: Commands<'w, 's>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: Res<'w, SceneMaterials>,
    transforms: Query<'w, 's, &'static mut Transform, With<SimVisual>>,
}

impl<'w, 's> BevyPresenter<'w, 's> {
    pub fn commands(&mut self) -> &mut Commands<'w, 's> {
        &mut self.commands
    }
}

impl Presenter for BevyPresenter<'_, '_> {
    type Visual = Entity;

    fn create_box(&mut self, spec: &BoxSpec, pose: &Pose, style: VisualStyle) -> Entity {
        let mesh = self.meshes.add(box_primitive(spec));
        let mut entity = self.commands.spawn((
            SimVisual(style),
            Mesh3d(mesh),
            MeshMaterial3d(self.materials.get(style)),
            pose_to_transform(pose),
        ));

        if style == VisualStyle::Ground {
            entity.insert(NotShadowCaster);
        }

        entity.id()
    }

    fn apply_pose(&mut self, visual: &Entity, pose: &Pose) {
        if let Ok(mut transform) = self.transforms.get_mut(*visual) {
            write_pose(&mut transform, pose);
        } else {
            // Spawned this frame; its components land when commands are applied.
            self.commands.entity(*visual).insert(pose_to_transform(pose));
        }
    }

    fn remove(&mut self, visual: Entity) {
        self.commands.entity(visual).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_only_darkens_where_shadowed() {
        let material = ground_material();
        assert!(matches!(material.alpha_mode, AlphaMode::Multiply));
        assert_eq!(material.base_color, Color::WHITE);
        assert_eq!(material.reflectance, 0.0);
        // Must stay lit, or the shadows it receives would not show.
        assert!(!material.unlit);
    }
}
