//! Error type for simulation setup and body management.

use std::fmt;

/// Errors surfaced by the simulation core.
///
/// Setup code treats every variant as fatal. Inside the frame loop they are
/// logged and the frame carries on.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A box dimension was zero, negative or not finite.
    InvalidBoxSpec {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Mass was negative or not finite. Zero is valid and means static.
    InvalidMass(f32),
    /// The backend no longer holds the body (or collider) a handle points at.
    MissingBody,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBoxSpec {
                width,
                height,
                depth,
            } => write!(
                f,
                "box dimensions must be finite and positive (got {width} x {height} x {depth})"
            ),
            Self::InvalidMass(mass) => {
                write!(f, "mass must be finite and non-negative (got {mass})")
            }
            Self::MissingBody => write!(f, "body is not registered with the physics world"),
        }
    }
}

impl std::error::Error for SimError {}
