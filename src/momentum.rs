//! This module implements some domain-specific jet kinematics logic.

use crate::numeric::{reals::consts::PI, Float};
use nalgebra::SVector;
use num_traits::Zero;
use prefix_num_ops::real::*;

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Build a 4-momentum from collider coordinates (pt, eta, phi, mass)
pub fn from_pt_eta_phi_m(pt: Float, eta: Float, phi: Float, mass: Float) -> Momentum {
    let p_z = pt * eta.sinh();
    let p_tot = pt * eta.cosh();
    let energy = sqrt(p_tot * p_tot + mass * mass);
    Momentum::new(pt * phi.cos(), pt * phi.sin(), p_z, energy)
}

/// Azimuthal difference between two angles, wrapped into (-π, π]
pub fn delta_phi(phi1: Float, phi2: Float) -> Float {
    let two_pi = 2. * PI;
    let dphi = (phi1 - phi2) % two_pi;
    if dphi > PI {
        dphi - two_pi
    } else if dphi <= -PI {
        dphi + two_pi
    } else {
        dphi
    }
}

/// Invariant mass of a system of 4-momenta
///
/// Space-like sums yield a negative mass, in the TLorentzVector tradition.
///
pub fn invariant_mass(momenta: impl IntoIterator<Item = Momentum>) -> Float {
    let total = momenta
        .into_iter()
        .fold(Momentum::zero(), |acc, p| acc + p);
    let p_xyz = total.fixed_rows::<3>(X);
    let m2 = total[E] * total[E] - p_xyz.norm_squared();
    if m2 < 0. {
        -sqrt(-m2)
    } else {
        sqrt(m2)
    }
}

/// Scalar sum of the transverse momenta of a set of jets
pub fn scalar_ht(pt: &[Float]) -> Float {
    pt.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn delta_phi_stays_in_half_open_range() {
        assert_relative_eq!(delta_phi(0., 2.0), -2.0);
        assert_relative_eq!(delta_phi(3.0, -3.0), 6.0 - 2. * PI, epsilon = 1e-6);
        assert_relative_eq!(delta_phi(-3.0, 3.0), 2. * PI - 6.0, epsilon = 1e-6);
        assert_relative_eq!(delta_phi(PI, 0.), PI);
        assert_relative_eq!(delta_phi(-PI, 0.), PI);
        assert_relative_eq!(delta_phi(0.5, 0.5), 0.);
    }

    #[test]
    fn momentum_keeps_its_mass() {
        let p = from_pt_eta_phi_m(400., 1.2, -0.7, 172.5);
        assert_relative_eq!(p.fixed_rows::<2>(X).norm(), 400., max_relative = 1e-5);
        assert_relative_eq!(invariant_mass([p]), 172.5, max_relative = 1e-4);
    }

    #[test]
    fn back_to_back_massless_jets() {
        let j1 = from_pt_eta_phi_m(500., 0., 0., 0.);
        let j2 = from_pt_eta_phi_m(500., 0., PI, 0.);
        assert_relative_eq!(invariant_mass([j1, j2]), 1000., max_relative = 1e-5);
    }

    #[test]
    fn empty_system_is_massless() {
        assert_eq!(invariant_mass(std::iter::empty()), 0.);
        assert_eq!(scalar_ht(&[]), 0.);
        assert_relative_eq!(scalar_ht(&[400., 350.5, 20.]), 770.5);
    }
}
