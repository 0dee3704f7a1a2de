pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use simulation::error::SimError;
pub use simulation::states::{Body, System, Trail, NVec2};
pub use simulation::forces::{separation, PairForce, ForceSet, NetForce, NewtonianGravity};
pub use simulation::integrator::{semi_implicit_euler, step_body};
pub use simulation::params::{Parameters, UpdateOrdering, G, TIMESTEP, SECONDS_PER_DAY, AU};
pub use simulation::scenario::Scenario;
pub use simulation::systems::{SimulationPlugin, SimulationStatus, StepSchedule};

pub use configuration::config::{ParametersConfig, DisplayConfig, DisplayError, BodyConfig, ScenarioConfig};

pub use visualization::{vis2d::run_2d, headless::{headless_app, run_headless}};
