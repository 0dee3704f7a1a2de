//! Errors raised by the simulation core
//!
//! Every variant is fatal: the step (or scenario build) that produced it
//! is abandoned and the driver is expected to stop the run

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Two bodies share a position, so the force between them is undefined
    #[error("bodies `{subject}` and `{other}` are coincident (zero separation)")]
    CoincidentBodies { subject: String, other: String },

    /// An update produced NaN or infinite position/velocity
    #[error("state of body `{body}` became non-finite")]
    NonFinite { body: String },

    #[error("body `{body}` has invalid mass {mass} (must be finite and > 0)")]
    InvalidMass { body: String, mass: f64 },

    #[error("body `{body}` has invalid radius {radius} (must be finite and >= 0)")]
    InvalidRadius { body: String, radius: f64 },

    #[error("body `{body}` has a non-finite initial position or velocity")]
    InvalidState { body: String },

    #[error("both `{first}` and `{second}` are marked as the reference body")]
    MultipleReferences { first: String, second: String },

    #[error("body name `{name}` is used more than once")]
    DuplicateName { name: String },

    #[error("invalid timestep {dt} (must be finite and > 0)")]
    InvalidTimestep { dt: f64 },

    /// The driving app no longer holds the scenario it was built with
    #[error("scenario resource is missing from the app")]
    ScenarioMissing,
}
