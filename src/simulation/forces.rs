//! Pairwise force contributors for the n-body engine
//!
//! Defines the [`PairForce`] trait, direct Newtonian gravity, and a
//! [`ForceSet`] that sums every registered term for one body against the
//! rest of the set

use super::error::SimError;
use super::states::{Body, NVec2};

/// Separation from `subject` to `other`.
///
/// Returns the displacement `other.x - subject.x` and its length, or
/// [`SimError::CoincidentBodies`] when the length is zero or not finite
pub fn separation(subject: &Body, other: &Body) -> Result<(NVec2, f64), SimError> {
    let d = other.x - subject.x;
    let r = (d.x * d.x + d.y * d.y).sqrt();
    if r == 0.0 || !r.is_finite() {
        return Err(SimError::CoincidentBodies {
            subject: subject.name.clone(),
            other: other.name.clone(),
        });
    }
    Ok((d, r))
}

/// Trait for force sources acting between a pair of bodies
/// Implementations return the force `subject` feels due to `other`
pub trait PairForce {
    fn force(&self, subject: &Body, other: &Body) -> Result<NVec2, SimError>;
}

/// Unsoftened 2D Newtonian gravity
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitional constant
}

impl PairForce for NewtonianGravity {
    fn force(&self, subject: &Body, other: &Body) -> Result<NVec2, SimError> {
        let (d, r) = separation(subject, other)?;

        // F = G m_a m_b / r^2, directed from subject toward other
        let f = self.G * subject.mass() * other.mass() / (r * r);
        let theta = d.y.atan2(d.x);

        Ok(NVec2::new(f * theta.cos(), f * theta.sin()))
    }
}

/// Net force on one body plus the separation from the reference body,
/// both taken from the state the evaluation read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetForce {
    pub force: NVec2,
    pub distance_to_reference: Option<f64>,
}

/// Collection of pair-force terms (gravity, drag, etc.)
/// Contributions of every term against every other body are summed
pub struct ForceSet {
    terms: Vec<Box<dyn PairForce + Send + Sync>>,
}

impl std::fmt::Debug for ForceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForceSet")
            .field("terms", &self.terms.len())
            .finish()
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: PairForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Net force on `bodies[i]` from every other body in `bodies`
    pub fn net_force(&self, i: usize, bodies: &[Body]) -> Result<NetForce, SimError> {
        let subject = &bodies[i];
        let mut total = NVec2::zeros();
        let mut distance_to_reference = None;

        for (j, other) in bodies.iter().enumerate() {
            if j == i {
                continue;
            }
            if other.is_reference {
                distance_to_reference = Some(separation(subject, other)?.1);
            }
            for term in &self.terms {
                total += term.force(subject, other)?;
            }
        }

        Ok(NetForce { force: total, distance_to_reference })
    }
}
