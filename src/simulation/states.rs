//! Core state types for the N-body simulation.
//!
//! - `Body`   one point mass with display metadata and its orbit trail
//! - `Trail`  chronological position history, optionally capped
//! - `System` the fixed body set plus elapsed simulated time
//!
//! All quantities are SI: meters, meters/second, kilograms.

use std::collections::HashSet;
use std::collections::VecDeque;

use nalgebra::Vector2;

use super::error::SimError;

pub type NVec2 = Vector2<f64>;

/// Ordered history of past positions, oldest first.
///
/// Unbounded unless a capacity is given, in which case the oldest
/// entries are dropped once the buffer is full.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<NVec2>,
    capacity: Option<usize>,
}

impl Trail {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    pub fn push(&mut self, point: NVec2) {
        if let Some(cap) = self.capacity {
            if cap == 0 {
                return;
            }
            while self.points.len() >= cap {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<NVec2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = NVec2> + Clone + '_ {
        self.points.iter().copied()
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    m: f64, // mass, fixed at construction
    pub radius: f64, // display size in pixels
    pub is_reference: bool,
    pub distance_to_reference: f64, // pre-step separation from the reference body
    trail: Trail,
}

impl Body {
    /// Body at `(x, y)` moving along +y at `initial_velocity`.
    pub fn new(name: impl Into<String>, x: f64, y: f64, radius: f64, mass: f64, initial_velocity: f64) -> Self {
        Self {
            name: name.into(),
            x: NVec2::new(x, y),
            v: NVec2::new(0.0, initial_velocity),
            m: mass,
            radius,
            is_reference: false,
            distance_to_reference: 0.0,
            trail: Trail::default(),
        }
    }

    /// Replace the initial velocity with an arbitrary vector
    pub fn with_velocity(mut self, v: NVec2) -> Self {
        self.v = v;
        self
    }

    /// Cap the trail at `capacity` entries (`None` keeps every step)
    pub fn with_trail_capacity(mut self, capacity: Option<usize>) -> Self {
        self.trail = Trail::new(capacity);
        self
    }

    pub fn mark_as_reference(&mut self) {
        self.is_reference = true;
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    /// Positions recorded after each completed step, oldest first
    pub fn trail(&self) -> impl ExactSizeIterator<Item = NVec2> + Clone + '_ {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    pub fn last_trail_point(&self) -> Option<NVec2> {
        self.trail.last()
    }

    pub(crate) fn record_position(&mut self) {
        self.trail.push(self.x);
    }

    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }

    /// Reject inputs the integrator cannot handle
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.m.is_finite() && self.m > 0.0) {
            return Err(SimError::InvalidMass { body: self.name.clone(), mass: self.m });
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(SimError::InvalidRadius { body: self.name.clone(), radius: self.radius });
        }
        if !self.is_finite() {
            return Err(SimError::InvalidState { body: self.name.clone() });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct System {
    pub bodies: Vec<Body>, // fixed for the whole run
    pub t: f64, // elapsed simulated seconds
    pub steps: u64, // completed whole-system steps
}

impl System {
    /// Validated body set at t = 0.
    ///
    /// Each body must pass [`Body::validate`], names must be unique and
    /// at most one body may carry the reference flag.
    pub fn new(bodies: Vec<Body>) -> Result<Self, SimError> {
        let mut names = HashSet::new();
        let mut reference: Option<&str> = None;

        for b in &bodies {
            b.validate()?;
            if !names.insert(b.name.as_str()) {
                return Err(SimError::DuplicateName { name: b.name.clone() });
            }
            if b.is_reference {
                if let Some(first) = reference {
                    return Err(SimError::MultipleReferences {
                        first: first.to_string(),
                        second: b.name.clone(),
                    });
                }
                reference = Some(b.name.as_str());
            }
        }

        Ok(Self { bodies, t: 0.0, steps: 0 })
    }

    pub fn reference(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_reference)
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }
}
