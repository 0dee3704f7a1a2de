//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size `h0` (one simulated day by default),
//! - gravitational constant `G`,
//! - whole-system update ordering,
//! - optional trail capacity

use serde::Deserialize;

/// Gravitational constant, N·m²/kg²
pub const G: f64 = 6.67428e-11;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Default step: one simulated day, seconds
pub const TIMESTEP: f64 = SECONDS_PER_DAY;

/// Astronomical unit, meters
pub const AU: f64 = 149.6e6 * 1000.0;

/// How a whole-system step orders force evaluation and state updates
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOrdering {
    /// Advance bodies one at a time in set order; later bodies see the
    /// already-advanced positions of earlier ones
    #[default]
    Sequential,
    /// Evaluate every net force from pre-step positions, then advance all bodies
    Snapshot,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub h0: f64, // step size, seconds
    pub G: f64, // gravitational constant
    pub ordering: UpdateOrdering,
    pub trail_limit: Option<usize>, // None = unbounded trails
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            h0: TIMESTEP,
            G,
            ordering: UpdateOrdering::Sequential,
            trail_limit: None,
        }
    }
}
