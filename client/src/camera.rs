use crate::input::CameraAction;
use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};
use leafwing_input_manager::prelude::ActionState;

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb_u8(0x6e, 0x9b, 0x8e)));
    app.add_systems(Startup, add_camera);
    app.add_systems(Update, orbit_controls);
}

const CAMERA_POSITION: Vec3 = Vec3::new(100.0, 45.0, -40.0);
const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 20.0, 0.0);
const CAMERA_FOV_DEGREES: f32 = 45.0;
const CAMERA_NEAR: f32 = 1.0;
const CAMERA_FAR: f32 = 1000.0;

/// Radians of rotation per pixel of mouse drag.
const ORBIT_SENSITIVITY: f32 = 0.005;
/// Fraction of the orbit radius panned per pixel of mouse drag.
const PAN_SENSITIVITY: f32 = 0.001;
/// Fraction of the orbit radius zoomed per scroll unit.
const ZOOM_SENSITIVITY: f32 = 0.1;
/// Keep the camera off the poles so `looking_at` never sees a degenerate up vector.
const MAX_PITCH: f32 = 1.54;

/// Spherical coordinates of the camera around a target point.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Rotation about +Y, zero looking down -Z.
    pub yaw: f32,
    /// Elevation above the XZ plane.
    pub pitch: f32,
}

impl OrbitCamera {
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(CAMERA_NEAR);
        Self {
            target,
            radius,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(
                cos_pitch * sin_yaw,
                sin_pitch,
                cos_pitch * cos_yaw,
            ) * self.radius
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub fn pan(&mut self, delta: Vec2, right: Vec3, up: Vec3) {
        let scale = self.radius * PAN_SENSITIVITY;
        self.target += (-right * delta.x + up * delta.y) * scale;
    }

    pub fn zoom(&mut self, scroll: f32) {
        let factor = 1.0 - scroll * ZOOM_SENSITIVITY;
        self.radius = (self.radius * factor).clamp(CAMERA_NEAR, CAMERA_FAR);
    }
}

fn add_camera(mut commands: Commands) {
    let orbit = OrbitCamera::looking_at(CAMERA_POSITION, CAMERA_TARGET);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
        orbit,
        AmbientLight {
            color: Color::srgb_u8(0x40, 0x40, 0x40),
            brightness: 400.0,
            ..default()
        },
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 1.2 * light_consts::lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(20.0, 30.0, -25.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn orbit_controls(
    mut camera_query: Query<(&mut Transform, &mut OrbitCamera), With<Camera3d>>,
    actions: Res<ActionState<CameraAction>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
) {
    let Ok((mut cam_tf, mut orbit)) = camera_query.single_mut() else {
        return;
    };

    let before = *orbit;
    if actions.pressed(&CameraAction::Orbit) {
        orbit.rotate(motion.delta);
    } else if actions.pressed(&CameraAction::Pan) {
        let (right, up) = (*cam_tf.right(), *cam_tf.up());
        orbit.pan(motion.delta, right, up);
    }
    if scroll.delta.y != 0.0 {
        orbit.zoom(scroll.delta.y);
    }

    if *orbit != before {
        *cam_tf = orbit.transform();
    }
}
