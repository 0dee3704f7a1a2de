pub mod vis2d;
pub mod headless;

use bevy::math::Vec2;

use crate::simulation::params::AU;
use crate::simulation::states::{Body, NVec2};

/// Map a position in meters to window coordinates, origin at the window center
pub fn world_to_screen(p: NVec2, pixels_per_au: f64) -> Vec2 {
    let s = pixels_per_au / AU;
    Vec2::new((p.x * s) as f32, (p.y * s) as f32)
}

/// `"{name}: {km}km"` for every body except the reference one
pub fn distance_label(body: &Body) -> Option<String> {
    if body.is_reference {
        return None;
    }
    Some(format!("{}: {:.1}km", body.name, body.distance_to_reference / 1000.0))
}
