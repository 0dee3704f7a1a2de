//! Fixed-step semi-implicit Euler integrator for the N-body system
//!
//! Velocity is kicked with the net force first, then the position drifts
//! with the new velocity. Driven by a `ForceSet` and `Parameters`.

use super::error::SimError;
use super::forces::{ForceSet, NetForce};
use super::params::{Parameters, UpdateOrdering};
use super::states::{Body, NVec2, System};

/// Post-step kinematic state of one body, not yet written back
struct Staged {
    v: NVec2,
    x: NVec2,
    distance_to_reference: Option<f64>,
}

/// Kick and drift one body given its already-evaluated net force.
///
/// Fails without touching the body if the new state would be non-finite
fn stage(body: &Body, net: NetForce, dt: f64) -> Result<Staged, SimError> {
    // v += F / m * dt
    let v = body.v + net.force / body.mass() * dt;
    // x += v * dt, with the velocity just updated
    let x = body.x + v * dt;

    if !v.iter().chain(x.iter()).all(|c| c.is_finite()) {
        return Err(SimError::NonFinite { body: body.name.clone() });
    }
    Ok(Staged { v, x, distance_to_reference: net.distance_to_reference })
}

fn commit(body: &mut Body, staged: Staged) {
    if let Some(r) = staged.distance_to_reference {
        body.distance_to_reference = r;
    }
    body.v = staged.v;
    body.x = staged.x;
    body.record_position();
}

/// Advance `sys.bodies[i]` by one step against the current state of the rest
pub fn step_body(sys: &mut System, i: usize, forces: &ForceSet, dt: f64) -> Result<(), SimError> {
    let net = forces.net_force(i, &sys.bodies)?;
    let staged = stage(&sys.bodies[i], net, dt)?;
    commit(&mut sys.bodies[i], staged);
    Ok(())
}

/// Advance the whole system by one step of `params.h0` seconds
///
/// With [`UpdateOrdering::Sequential`] each body reads the already-advanced
/// state of the bodies before it. With [`UpdateOrdering::Snapshot`] every
/// body's new state is computed before any body moves, so an error leaves
/// the system untouched.
pub fn semi_implicit_euler(sys: &mut System, forces: &ForceSet, params: &Parameters) -> Result<(), SimError> {
    let dt = params.h0;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::InvalidTimestep { dt });
    }

    let n = sys.bodies.len();
    match params.ordering {
        UpdateOrdering::Sequential => {
            for i in 0..n {
                step_body(sys, i, forces, dt)?;
            }
        }
        UpdateOrdering::Snapshot => {
            let staged = (0..n)
                .map(|i| stage(&sys.bodies[i], forces.net_force(i, &sys.bodies)?, dt))
                .collect::<Result<Vec<_>, _>>()?;
            for (body, s) in sys.bodies.iter_mut().zip(staged) {
                commit(body, s);
            }
        }
    }

    sys.t += dt;
    sys.steps += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::NewtonianGravity;
    use crate::simulation::params::G;

    fn three_bodies() -> System {
        let mut sun = Body::new("Sun", 0.0, 0.0, 30.0, 1.98892e30, 0.0);
        sun.mark_as_reference();
        let earth = Body::new("Earth", -1.496e11, 0.0, 8.0, 5.9742e24, 29_783.0);
        let mars = Body::new("Mars", -2.279e11, 0.0, 6.0, 6.39e23, 24_077.0);
        System::new(vec![sun, earth, mars]).unwrap()
    }

    fn gravity() -> ForceSet {
        ForceSet::new().with(NewtonianGravity { G })
    }

    #[test]
    fn step_advances_time_and_counter() {
        let mut sys = three_bodies();
        let params = Parameters::default();
        semi_implicit_euler(&mut sys, &gravity(), &params).unwrap();
        semi_implicit_euler(&mut sys, &gravity(), &params).unwrap();
        assert_eq!(sys.steps, 2);
        assert_eq!(sys.t, 2.0 * params.h0);
    }

    #[test]
    fn orderings_differ_only_after_first_body() {
        let mut seq = three_bodies();
        let mut snap = three_bodies();
        let forces = gravity();

        semi_implicit_euler(&mut seq, &forces, &Parameters::default()).unwrap();
        let params = Parameters { ordering: UpdateOrdering::Snapshot, ..Parameters::default() };
        semi_implicit_euler(&mut snap, &forces, &params).unwrap();

        // The first body sees identical pre-step state either way
        assert_eq!(seq.bodies[0].x, snap.bodies[0].x);
        // Later bodies read the Sun's new position only in sequential mode
        assert_ne!(seq.bodies[1].v, snap.bodies[1].v);
    }

    #[test]
    fn snapshot_failure_leaves_state_untouched() {
        let a = Body::new("a", 1.0, 0.0, 1.0, 1.0, 0.0);
        let b = Body::new("b", 2.0, 0.0, 1.0, 1.0, 0.0);
        let c = Body::new("c", 2.0, 0.0, 1.0, 1.0, 0.0);
        let mut sys = System::new(vec![a, b, c]).unwrap();
        let params = Parameters { ordering: UpdateOrdering::Snapshot, ..Parameters::default() };

        let err = semi_implicit_euler(&mut sys, &gravity(), &params).unwrap_err();
        assert!(matches!(err, SimError::CoincidentBodies { .. }));
        assert_eq!(sys.bodies[0].x, NVec2::new(1.0, 0.0));
        assert_eq!(sys.bodies[0].trail_len(), 0);
        assert_eq!(sys.steps, 0);
    }

    #[test]
    fn non_positive_timestep_is_rejected() {
        let mut sys = three_bodies();
        let params = Parameters { h0: 0.0, ..Parameters::default() };
        assert_eq!(
            semi_implicit_euler(&mut sys, &gravity(), &params),
            Err(SimError::InvalidTimestep { dt: 0.0 })
        );
    }

    #[test]
    fn overflowing_state_is_reported() {
        let a = Body::new("a", 0.0, 0.0, 1.0, 1.0e300, 0.0);
        let b = Body::new("b", 1.0e-150, 0.0, 1.0, 1.0e300, 0.0);
        let mut sys = System::new(vec![a, b]).unwrap();
        let err = semi_implicit_euler(&mut sys, &gravity(), &Parameters::default()).unwrap_err();
        assert_eq!(err, SimError::NonFinite { body: "a".into() });
        assert_eq!(sys.bodies[0].x, NVec2::zeros());
        assert_eq!(sys.bodies[0].v, NVec2::zeros());
        assert_eq!(sys.bodies[0].trail_len(), 0);
    }

    #[test]
    fn snapshot_overflow_leaves_earlier_bodies_in_place() {
        // Far-off "a" steps cleanly; the overflowing pair comes after it
        let a = Body::new("a", 1.0e12, 0.0, 1.0, 1.0, 0.0);
        let b = Body::new("b", 0.0, 0.0, 1.0, 1.0e300, 0.0);
        let c = Body::new("c", 1.0e-150, 0.0, 1.0, 1.0e300, 0.0);
        let mut sys = System::new(vec![a, b, c]).unwrap();
        let params = Parameters { ordering: UpdateOrdering::Snapshot, ..Parameters::default() };

        let err = semi_implicit_euler(&mut sys, &gravity(), &params).unwrap_err();
        assert_eq!(err, SimError::NonFinite { body: "b".into() });
        assert_eq!(sys.bodies[0].x, NVec2::new(1.0e12, 0.0));
        assert_eq!(sys.bodies[0].trail_len(), 0);
        assert!(sys.bodies.iter().all(|b| b.is_finite()));
        assert_eq!(sys.steps, 0);
    }
}
