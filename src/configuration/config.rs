//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – step size, gravitational constant, update ordering, trail cap
//! - [`DisplayConfig`]    – window, scale and label settings for the viewer
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Everything except `bodies` has a default, so the smallest valid file is
//! just a body list.
//!
//! # YAML format
//! ```yaml
//! parameters:
//!   timestep: 86400.0       # seconds per step (one day)
//!   G: 6.67428e-11          # gravitational constant
//!   ordering: sequential    # or "snapshot"
//!   trail_limit: 2000       # omit for unbounded trails
//!
//! display:
//!   width: 1600
//!   height: 900
//!   pixels_per_au: 35.0
//!   fps: 60.0
//!
//! bodies:
//!   - name: Sun
//!     x_au: 0.0
//!     mass: 1.98892e30
//!     radius: 30.0
//!     color: [255, 215, 0]
//!     reference: true
//!   - name: Earth
//!     x_au: -1.0
//!     mass: 5.9742e24
//!     radius: 8.0
//!     initial_velocity: 29783.0
//!     color: [65, 105, 225]
//! ```
//!
//! Positions are in astronomical units and velocities in m/s; the scenario
//! builder converts to meters.

use bevy::prelude::Resource;
use serde::Deserialize;
use thiserror::Error;

use crate::simulation::params::{UpdateOrdering, G, TIMESTEP};

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const YELLOW: [u8; 3] = [255, 215, 0];
pub const BLUE: [u8; 3] = [65, 105, 225];
pub const RED: [u8; 3] = [204, 51, 51];
pub const DARK_GREY: [u8; 3] = [169, 169, 169];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const ORANGE: [u8; 3] = [255, 165, 0];
pub const PURPLE: [u8; 3] = [128, 0, 128];
pub const CYAN: [u8; 3] = [0, 255, 255];

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
#[allow(non_snake_case)]
pub struct ParametersConfig {
    pub timestep: f64, // seconds per step
    pub G: f64, // gravitational constant
    pub ordering: UpdateOrdering, // how bodies are advanced within one step
    pub trail_limit: Option<usize>, // max trail points per body, None = unbounded
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            timestep: TIMESTEP,
            G,
            ordering: UpdateOrdering::Sequential,
            trail_limit: None,
        }
    }
}

/// Viewer settings, handed to the rendering driver as a resource
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub pixels_per_au: f64, // linear meters-to-pixels scale, expressed per AU
    pub fps: f64, // physics steps per real second
    pub label_font_size: f32,
    pub show_trails: bool,
    pub show_labels: bool,
    pub trail_color_alpha: u8, // opacity of trail polylines
    pub background: [u8; 3],
}

/// Viewer settings that parse but cannot be rendered
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DisplayError {
    #[error("invalid fps {0} (must be finite and > 0)")]
    InvalidFps(f64),

    #[error("invalid pixels_per_au {0} (must be finite and > 0)")]
    InvalidScale(f64),
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), DisplayError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(DisplayError::InvalidFps(self.fps));
        }
        if !(self.pixels_per_au.is_finite() && self.pixels_per_au > 0.0) {
            return Err(DisplayError::InvalidScale(self.pixels_per_au));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            title: "Planet Simulation".to_string(),
            pixels_per_au: 35.0,
            fps: 60.0,
            label_font_size: 16.0,
            show_trails: true,
            show_labels: true,
            trail_color_alpha: 160,
            background: [0, 0, 0],
        }
    }
}

fn default_color() -> [u8; 3] {
    WHITE
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub x_au: f64, // initial x, AU
    #[serde(default)]
    pub y_au: f64, // initial y, AU
    pub mass: f64, // kg
    pub radius: f64, // display radius, pixels
    #[serde(default)]
    pub initial_velocity: f64, // initial speed along +y, m/s
    #[serde(default = "default_color")]
    pub color: [u8; 3],
    #[serde(default)]
    pub reference: bool, // distance labels are measured from this body
}

impl BodyConfig {
    fn planet(name: &str, x_au: f64, radius: f64, mass: f64, initial_velocity: f64, color: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            x_au,
            y_au: 0.0,
            mass,
            radius,
            initial_velocity,
            color,
            reference: false,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    pub bodies: Vec<BodyConfig>, // initial state of the system, in update order
}

impl ScenarioConfig {
    pub fn from_yaml(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// The Sun and the eight planets, all starting on the x axis
    pub fn solar_system() -> Self {
        let mut sun = BodyConfig::planet("Sun", 0.0, 30.0, 1.98892e30, 0.0, YELLOW);
        sun.reference = true;

        let bodies = vec![
            sun,
            BodyConfig::planet("Mercury", 0.387, 4.0, 3.30e23, -47.4 * 1000.0, DARK_GREY),
            BodyConfig::planet("Venus", 0.723, 7.0, 4.8685e24, -35.02 * 1000.0, WHITE),
            BodyConfig::planet("Earth", -1.0, 8.0, 5.9742e24, 29.783 * 1000.0, BLUE),
            BodyConfig::planet("Mars", -1.524, 6.0, 6.39e23, 24.077 * 1000.0, RED),
            BodyConfig::planet("Jupiter", 5.203, 14.0, 1.8982e27, -13.07 * 1000.0, ORANGE),
            BodyConfig::planet("Saturn", 9.537, 13.0, 5.6834e26, -9.69 * 1000.0, PURPLE),
            BodyConfig::planet("Uranus", 19.191, 10.0, 8.6810e25, -6.81 * 1000.0, CYAN),
            BodyConfig::planet("Neptune", 30.069, 9.0, 1.02413e26, -5.43 * 1000.0, GREEN),
        ];

        Self {
            parameters: ParametersConfig::default(),
            display: DisplayConfig::default(),
            bodies,
        }
    }
}
