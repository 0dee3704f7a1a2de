//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - active force set (`ForceSet`)
//! - per-body draw colors
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! physics step and the viewer systems

use bevy::log::{debug, info};
use bevy::prelude::Resource;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::error::SimError;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::{Parameters, AU};
use crate::simulation::states::{Body, System};

/// Bevy resource representing a fully-initialized simulation scenario
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the parameters, current system state, the set of active
/// force laws and the color each body is drawn with (`colors[i]` belongs
/// to `system.bodies[i]`)
#[derive(Debug, Resource)]
pub struct Scenario {
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
    pub colors: Vec<[u8; 3]>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            h0: p_cfg.timestep,
            G: p_cfg.G,
            ordering: p_cfg.ordering,
            trail_limit: p_cfg.trail_limit,
        };
        if !(parameters.h0.is_finite() && parameters.h0 > 0.0) {
            return Err(SimError::InvalidTimestep { dt: parameters.h0 });
        }

        // Bodies: map `BodyConfig` -> runtime `Body`, AU -> meters
        let bodies: Vec<Body> = cfg.bodies.iter().map(|bc: &BodyConfig| {
            let mut body = Body::new(
                bc.name.clone(),
                bc.x_au * AU,
                bc.y_au * AU,
                bc.radius,
                bc.mass,
                bc.initial_velocity,
            )
            .with_trail_capacity(parameters.trail_limit);
            if bc.reference {
                body.mark_as_reference();
            }
            body
        }).collect();
        let colors = cfg.bodies.iter().map(|bc| bc.color).collect();

        let system = System::new(bodies)?;

        // Forces: construct a ForceSet and register Newtonian gravity
        let forces = ForceSet::new().with(NewtonianGravity { G: parameters.G });

        info!(
            "scenario ready: {} bodies, reference = {}, dt = {} s, ordering = {:?}",
            system.bodies.len(),
            system.reference().map(|b| b.name.as_str()).unwrap_or("none"),
            parameters.h0,
            parameters.ordering,
        );

        Ok(Self {
            parameters,
            system,
            forces,
            colors,
        })
    }

    /// Advance every body by one step
    pub fn advance(&mut self) -> Result<(), SimError> {
        semi_implicit_euler(&mut self.system, &self.forces, &self.parameters)?;
        debug!("step {} done, t = {} s", self.system.steps, self.system.t);
        Ok(())
    }

    /// Advance `steps` times, stopping at the first error
    pub fn run(&mut self, steps: u64) -> Result<(), SimError> {
        for _ in 0..steps {
            self.advance()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::UpdateOrdering;

    #[test]
    fn solar_system_builds_in_meters() {
        let scenario = Scenario::build_scenario(ScenarioConfig::solar_system()).unwrap();
        let earth = scenario.system.body("Earth").unwrap();
        assert_eq!(earth.x.x, -1.0 * AU);
        assert_eq!(earth.v.y, 29.783 * 1000.0);
        assert_eq!(scenario.system.reference().unwrap().name, "Sun");
        assert_eq!(scenario.colors.len(), scenario.system.bodies.len());
        assert_eq!(scenario.forces.len(), 1);
    }

    #[test]
    fn trail_limit_reaches_bodies() {
        let mut cfg = ScenarioConfig::solar_system();
        cfg.parameters.trail_limit = Some(4);
        cfg.parameters.ordering = UpdateOrdering::Snapshot;
        let mut scenario = Scenario::build_scenario(cfg).unwrap();
        scenario.run(10).unwrap();
        assert!(scenario.system.bodies.iter().all(|b| b.trail_len() == 4));
        assert_eq!(scenario.parameters.ordering, UpdateOrdering::Snapshot);
    }

    #[test]
    fn bad_timestep_is_rejected() {
        let mut cfg = ScenarioConfig::solar_system();
        cfg.parameters.timestep = -1.0;
        assert!(matches!(
            Scenario::build_scenario(cfg),
            Err(SimError::InvalidTimestep { .. })
        ));
    }

    #[test]
    fn coincident_start_fails_first_step() {
        let mut cfg = ScenarioConfig::solar_system();
        cfg.bodies[2].x_au = cfg.bodies[1].x_au;
        let mut scenario = Scenario::build_scenario(cfg).unwrap();
        assert!(matches!(
            scenario.advance(),
            Err(SimError::CoincidentBodies { .. })
        ));
    }
}
