//! Window-less driver.
//!
//! Runs the same physics system as the viewer inside a `MinimalPlugins`
//! app, one step per `App::update`, then logs where every body ended up.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::simulation::diagnostics::{total_energy, total_momentum};
use crate::simulation::error::SimError;
use crate::simulation::params::{AU, SECONDS_PER_DAY};
use crate::simulation::scenario::Scenario;
use crate::simulation::systems::{SimulationPlugin, SimulationStatus, StepSchedule};

/// App that advances `scenario` once per `update()`, without logging or windowing
pub fn headless_app(scenario: Scenario) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(scenario)
        .add_plugins(SimulationPlugin { schedule: StepSchedule::EveryUpdate });
    app
}

/// Advance `scenario` by `steps` steps and log a per-body summary.
///
/// Returns the final scenario, or the error that halted the run.
pub fn run_headless(scenario: Scenario, steps: u64) -> Result<Scenario, SimError> {
    let g = scenario.parameters.G;
    let e0 = total_energy(&scenario.system, g);

    let mut app = headless_app(scenario);
    app.add_plugins(LogPlugin::default());

    info!("headless run: {steps} steps");
    for _ in 0..steps {
        app.update();
        if app.world().resource::<SimulationStatus>().halted.is_some() {
            break;
        }
    }

    let scenario = take_scenario(app.world_mut())?;

    let sys = &scenario.system;
    info!("t = {:.1} days after {} steps", sys.t / SECONDS_PER_DAY, sys.steps);
    for b in &sys.bodies {
        let p = b.position();
        if b.is_reference {
            info!("{:>8}: ({:+.4}, {:+.4}) AU", b.name, p.x / AU, p.y / AU);
        } else {
            info!(
                "{:>8}: ({:+.4}, {:+.4}) AU, {:.1} km from reference, {} trail points",
                b.name,
                p.x / AU,
                p.y / AU,
                b.distance_to_reference / 1000.0,
                b.trail_len(),
            );
        }
    }

    let e1 = total_energy(sys, g);
    let p = total_momentum(sys);
    info!(
        "energy drift {:.3e} (relative), momentum ({:.3e}, {:.3e}) kg m/s",
        if e0 != 0.0 { (e1 - e0) / e0.abs() } else { e1 },
        p.x,
        p.y,
    );

    Ok(scenario)
}

/// Halting error if the run stopped early, else the scenario moved out of `world`
fn take_scenario(world: &mut World) -> Result<Scenario, SimError> {
    if let Some(err) = world.resource_mut::<SimulationStatus>().halted.take() {
        return Err(err);
    }
    world.remove_resource::<Scenario>().ok_or(SimError::ScenarioMissing)
}
