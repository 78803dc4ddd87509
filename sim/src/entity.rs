use crate::body::BodyHandle;
use crate::physics::PhysicsWorld;
use crate::pose::Pose;
use crate::presenter::Presenter;

/// A physics body paired with the visual that mirrors it.
///
/// Both halves are built before the entity exists, so a live entity always has a
/// registered body and a visual.
#[derive(Debug)]
pub struct Entity<V> {
    pub body: BodyHandle,
    pub visual: V,
}

impl<V> Entity<V> {
    pub fn new(body: BodyHandle, visual: V) -> Self {
        Self { body, visual }
    }

    /// Copy the body's current backend pose into the visual.
    ///
    /// Returns the pose written, or `None` if the body has been removed from `world`.
    pub fn sync<P>(&self, world: &PhysicsWorld, presenter: &mut P) -> Option<Pose>
    where
        P: Presenter<Visual = V>,
    {
        let pose = self.body.pose(world)?;
        presenter.apply_pose(&self.visual, &pose);
        Some(pose)
    }
}
