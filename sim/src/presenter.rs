//! Renderer-facing side of the simulation.
//!
//! The core never talks to a renderer directly. It creates, moves and removes visuals
//! through a [`Presenter`], and the copy always goes physics -> visual.

use crate::pose::{BoxSpec, Pose};

/// How a visual should look. The presenter maps this onto its own materials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualStyle {
    /// Large static slab; receives shadows but does not cast them.
    Ground,
    /// Dropped brick; casts and receives shadows.
    Brick,
}

/// Sink for visual state derived from the physics world.
pub trait Presenter {
    /// Handle to one visual representation (a mesh entity, a scene node, ...).
    type Visual;

    /// Create a box visual sized by `spec`, placed at `pose`.
    fn create_box(&mut self, spec: &BoxSpec, pose: &Pose, style: VisualStyle) -> Self::Visual;

    /// Overwrite the visual's transform with `pose`.
    fn apply_pose(&mut self, visual: &Self::Visual, pose: &Pose);

    /// Destroy a visual.
    fn remove(&mut self, visual: Self::Visual);
}

/// Presenter that stores every visual in memory. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub visuals: Vec<RecordedVisual>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedVisual {
    pub spec: BoxSpec,
    pub style: VisualStyle,
    pub pose: Pose,
    /// Number of `apply_pose` calls received.
    pub updates: u32,
    pub removed: bool,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, visual: usize) -> &RecordedVisual {
        &self.visuals[visual]
    }

    /// Visuals that have not been removed.
    pub fn live(&self) -> impl Iterator<Item = &RecordedVisual> {
        self.visuals.iter().filter(|v| !v.removed)
    }
}

impl Presenter for RecordingPresenter {
    type Visual = usize;

    fn create_box(&mut self, spec: &BoxSpec, pose: &Pose, style: VisualStyle) -> usize {
        self.visuals.push(RecordedVisual {
            spec: *spec,
            style,
            pose: *pose,
            updates: 0,
            removed: false,
        });
        self.visuals.len() - 1
    }

    fn apply_pose(&mut self, visual: &usize, pose: &Pose) {
        let v = &mut self.visuals[*visual];
        v.pose = *pose;
        v.updates += 1;
    }

    fn remove(&mut self, visual: usize) {
        self.visuals[visual].removed = true;
    }
}
