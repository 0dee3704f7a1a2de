//! Conserved-quantity diagnostics over a `System`
//!
//! Used for headless run summaries and for checking integrator drift in tests

use super::states::{NVec2, System};

/// Sum of 1/2 m v^2 over all bodies, joules
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies
        .iter()
        .map(|b| 0.5 * b.mass() * b.v.norm_squared())
        .sum()
}

/// Sum of -G m_i m_j / r over unordered pairs, joules
///
/// Coincident pairs are skipped
#[allow(non_snake_case)]
pub fn potential_energy(sys: &System, G: f64) -> f64 {
    let n = sys.bodies.len();
    let mut u = 0.0;
    for i in 0..n {
        let bi = &sys.bodies[i];
        for bj in &sys.bodies[(i + 1)..] {
            let r = (bj.x - bi.x).norm();
            if r > 0.0 {
                u -= G * bi.mass() * bj.mass() / r;
            }
        }
    }
    u
}

#[allow(non_snake_case)]
pub fn total_energy(sys: &System, G: f64) -> f64 {
    kinetic_energy(sys) + potential_energy(sys, G)
}

/// Vector sum of m v, kg·m/s
pub fn total_momentum(sys: &System) -> NVec2 {
    sys.bodies
        .iter()
        .fold(NVec2::zeros(), |p, b| p + b.mass() * b.v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::params::G;
    use crate::simulation::states::Body;
    use approx::assert_relative_eq;

    #[test]
    fn two_body_energies() {
        let a = Body::new("a", 0.0, 0.0, 1.0, 2.0, 3.0);
        let b = Body::new("b", 4.0, 0.0, 1.0, 5.0, 0.0);
        let sys = System::new(vec![a, b]).unwrap();

        assert_relative_eq!(kinetic_energy(&sys), 9.0);
        assert_relative_eq!(potential_energy(&sys, G), -G * 10.0 / 4.0);
        assert_relative_eq!(total_momentum(&sys).y, 6.0);
    }
}
