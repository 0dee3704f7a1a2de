//! Bevy wiring for the physics step.
//!
//! Shared by the 2D viewer (fixed 60 Hz clock) and the headless runner
//! (one step per `App::update`).

use bevy::prelude::*;

use crate::simulation::error::SimError;
use crate::simulation::scenario::Scenario;

/// Which schedule drives the physics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepSchedule {
    /// `FixedUpdate`, paced by `Time<Fixed>`
    Fixed,
    /// `Update`, exactly one step per app update
    EveryUpdate,
}

/// Resource recording the fatal error that stopped the simulation, if any.
#[derive(Resource, Default, Debug)]
pub struct SimulationStatus {
    pub halted: Option<SimError>,
}

/// Plugin that advances the [`Scenario`] resource once per tick of `schedule`.
pub struct SimulationPlugin {
    pub schedule: StepSchedule,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationStatus>();
        match self.schedule {
            StepSchedule::Fixed => app.add_systems(FixedUpdate, physics_step_system),
            StepSchedule::EveryUpdate => app.add_systems(Update, physics_step_system),
        };
    }
}

/// Advance the scenario one step; a numerical failure halts the run and
/// requests app exit.
pub fn physics_step_system(
    mut scenario: ResMut<Scenario>,
    mut status: ResMut<SimulationStatus>,
    mut exit: EventWriter<AppExit>,
) {
    if status.halted.is_some() {
        return;
    }

    if let Err(e) = scenario.advance() {
        error!("simulation halted after {} steps: {e}", scenario.system.steps);
        status.halted = Some(e);
        exit.send(AppExit::error());
    }
}
