/// Downward gravity applied to every dynamic body (meters per second squared).
///
/// Deliberately much stronger than Earth gravity so a brick dropped from
/// [`DROP_HEIGHT`] lands in about two seconds.
pub const GRAVITY_Y: f32 = -100.0;

/// Fixed integration step used by the physics world (seconds).
pub const FIXED_TIME_STEP: f32 = 1.0 / 60.0;

/// Maximum number of fixed sub-steps taken for a single frame.
///
/// Frame time in excess of `MAX_SUBSTEPS * FIXED_TIME_STEP` is dropped.
pub const MAX_SUBSTEPS: u32 = 10;

/// Ground slab full extents (width, height, depth), centered at the origin.
pub const GROUND_DIMENSIONS: [f32; 3] = [200.0, 1.0, 200.0];

/// Ground restitution. Nearly perfectly bouncy; the brick's own low restitution
/// is what actually damps the bounce since coefficients are multiplied.
pub const GROUND_RESTITUTION: f32 = 0.99;

/// Brick full extents (width, height, depth).
pub const BRICK_DIMENSIONS: [f32; 3] = [5.0, 3.0, 10.0];

pub const BRICK_MASS: f32 = 10.0;
pub const BRICK_RESTITUTION: f32 = 0.125;
pub const BRICK_FRICTION: f32 = 1.0;
pub const BRICK_ROLLING_FRICTION: f32 = 5.0;

/// Width of the square XZ band bricks are dropped into, centered at the origin.
pub const SPAWN_BAND: f32 = 30.0;

/// Height bricks are dropped from.
pub const DROP_HEIGHT: f32 = 200.0;

/// How many bricks are dropped in total.
pub const SPAWN_LIMIT: u32 = 3;

/// Delay between consecutive drops once the first brick has fallen.
pub const SPAWN_INTERVAL_SECS: f32 = 0.25;

/// Delay before the first drop.
pub const INITIAL_COUNTDOWN_SECS: f32 = 1.0;

/// Bodies falling below this height are released.
pub const KILL_PLANE_Y: f32 = -100.0;
