//! Mechanism to pick a pair of back-to-back jets out of an event

use crate::{
    error::SelectionError,
    event::{check_length, IndexPair, JetIndex, ETA_COLUMN, MASS_COLUMN, NO_JET, PHI_COLUMN},
    momentum::delta_phi,
    numeric::{reals::consts::FRAC_PI_2, Float},
};
use prefix_num_ops::real::*;

/// Minimal transverse momentum of a candidate jet (GeV)
pub const PT_MIN: Float = 350.;

/// Maximal absolute pseudorapidity of a candidate jet
pub const ABS_ETA_MAX: Float = 2.4;

/// Minimal softdrop mass of a candidate jet (GeV)
pub const MASS_MIN: Float = 50.;

/// Minimal azimuthal separation between the two picked jets
pub const DELTA_PHI_MIN: Float = FRAC_PI_2;

/// Truth that a jet passes the kinematic cuts on its own
fn is_candidate(pt: Float, eta: Float, mass: Float) -> bool {
    pt > PT_MIN && abs(eta) < ABS_ETA_MAX && mass > MASS_MIN
}

/// Pick the first two candidate jets that are more than 90° apart in phi
///
/// The first candidate jet becomes the leading one and is never replaced.
/// Subsequent candidates are compared to it, and the first one which is
/// separated enough ends the search. Missing jets are reported as NO_JET.
///
pub fn pick_dijets(
    pt: &[Float],
    eta: &[Float],
    phi: &[Float],
    mass: &[Float],
) -> Result<IndexPair, SelectionError> {
    let num_jets = pt.len();
    check_length(ETA_COLUMN, eta, num_jets)?;
    check_length(PHI_COLUMN, phi, num_jets)?;
    check_length(MASS_COLUMN, mass, num_jets)?;

    let mut candidates = (0..num_jets).filter(|&i| is_candidate(pt[i], eta[i], mass[i]));

    // Without a leading jet, there is nothing to pair up
    let Some(jet0) = candidates.next() else {
        return Ok([NO_JET, NO_JET]);
    };

    let jet1 = candidates.find(|&i| abs(delta_phi(phi[jet0], phi[i])) > DELTA_PHI_MIN);

    Ok([to_index(Some(jet0))?, to_index(jet1)?])
}

/// Convert a collection position into a jet index
fn to_index(pos: Option<usize>) -> Result<JetIndex, SelectionError> {
    match pos {
        Some(pos) => JetIndex::try_from(pos).map_err(|_| SelectionError::IndexOverflow(pos)),
        None => Ok(NO_JET),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_jets() {
        assert_eq!(pick_dijets(&[], &[], &[], &[]), Ok([NO_JET, NO_JET]));
    }

    #[test]
    fn back_to_back_pair() {
        let picked = pick_dijets(&[400., 400.], &[0., 0.], &[0., 2.0], &[60., 60.]);
        assert_eq!(picked, Ok([0, 1]));
    }

    #[test]
    fn collinear_pair() {
        let picked = pick_dijets(&[400., 400.], &[0., 0.], &[0., 0.1], &[60., 60.]);
        assert_eq!(picked, Ok([0, NO_JET]));
    }

    #[test]
    fn single_candidate() {
        // Only jet 2 passes pt, eta and mass cuts
        let pt = [100., 500., 500., 800.];
        let eta = [0., 3.0, 1.0, 0.5];
        let phi = [3.0, 3.0, 0., 3.0];
        let mass = [80., 80., 90., 20.];
        assert_eq!(pick_dijets(&pt, &eta, &phi, &mass), Ok([2, NO_JET]));
    }

    #[test]
    fn cuts_are_strict() {
        let phi = [0., 3.0];
        assert_eq!(
            pick_dijets(&[400., 350.], &[0., 0.], &phi, &[60., 60.]),
            Ok([0, NO_JET])
        );
        assert_eq!(
            pick_dijets(&[400., 400.], &[0., -2.4], &phi, &[60., 60.]),
            Ok([0, NO_JET])
        );
        assert_eq!(
            pick_dijets(&[400., 400.], &[0., 0.], &phi, &[60., 50.]),
            Ok([0, NO_JET])
        );
    }

    #[test]
    fn first_match_wins() {
        // Jets 1 and 3 are both far enough from jet 0, jet 3 even more so
        let pt = [400., 400., 900., 900.];
        let eta = [0., 0., 0., 0.];
        let phi = [0., 1.7, 0.2, 3.1];
        let mass = [60., 60., 60., 60.];
        assert_eq!(pick_dijets(&pt, &eta, &phi, &mass), Ok([0, 1]));

        // The leading jet is not replaced by a harder one later on
        let phi = [0., 0.3, 0.2, 3.1];
        assert_eq!(pick_dijets(&pt, &eta, &phi, &mass), Ok([0, 3]));
    }

    #[test]
    fn separation_wraps_around() {
        // 3.0 and -3.0 are only ~0.28 rad apart once wrapped
        let picked = pick_dijets(&[400., 400.], &[0., 0.], &[3.0, -3.0], &[60., 60.]);
        assert_eq!(picked, Ok([0, NO_JET]));

        // ...and the separation counts in both directions
        let picked = pick_dijets(&[400., 400.], &[0., 0.], &[2.0, 0.], &[60., 60.]);
        assert_eq!(picked, Ok([0, 1]));
    }

    #[test]
    fn mismatched_lengths() {
        let picked = pick_dijets(&[400., 400.], &[0.], &[0., 2.0], &[60., 60.]);
        assert_eq!(
            picked,
            Err(SelectionError::LengthMismatch {
                column: ETA_COLUMN,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let args = ([500., 380., 420.], [0.3, -1.1, 2.0], [1.0, -2.5, 0.9], [120., 75., 55.]);
        let first = pick_dijets(&args.0, &args.1, &args.2, &args.3);
        for _ in 0..3 {
            assert_eq!(pick_dijets(&args.0, &args.1, &args.2, &args.3), first);
        }
        assert_eq!(first, Ok([0, 1]));
    }

    #[test]
    fn oversized_positions() {
        assert_eq!(to_index(None), Ok(NO_JET));
        assert_eq!(to_index(Some(7)), Ok(7));
        let max = JetIndex::MAX as usize;
        assert_eq!(to_index(Some(max)), Ok(JetIndex::MAX));
        assert_eq!(
            to_index(Some(max + 1)),
            Err(SelectionError::IndexOverflow(max + 1))
        );
    }
}
