use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

/// Mouse actions driving the orbit camera.
#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraAction {
    /// Drag to rotate around the target.
    Orbit,
    /// Drag to slide the target in the view plane.
    Pan,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<CameraAction>::default());

    app.register_type::<CameraAction>();

    let mut input_map = InputMap::<CameraAction>::default();
    input_map.insert(CameraAction::Orbit, MouseButton::Left);
    input_map.insert(CameraAction::Pan, MouseButton::Right);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<CameraAction>::default());
}
