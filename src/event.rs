//! This module defines the per-event jet data that the selection works on

use crate::{
    dataset::Record,
    error::SelectionError,
    momentum::{self, Momentum},
    numeric::Float,
};

/// Position of a jet in its event's collection, or NO_JET
///
/// A signed integer is used so that the selection results can be stored as
/// derived dataset columns, as the rest of the analysis chain expects.
///
pub type JetIndex = i32;

/// Sentinel index meaning "no qualifying jet"
pub const NO_JET: JetIndex = -1;

/// Pair of jet indices produced by the selection steps
pub type IndexPair = [JetIndex; 2];

/// Record column holding the jet transverse momenta
pub const PT_COLUMN: &str = "FatJet_pt";

/// Record column holding the jet pseudorapidities
pub const ETA_COLUMN: &str = "FatJet_eta";

/// Record column holding the jet azimuthal angles
pub const PHI_COLUMN: &str = "FatJet_phi";

/// Record column holding the jet softdrop masses
pub const MASS_COLUMN: &str = "FatJet_msoftdrop";

/// Record column holding the top-vs-QCD tagger scores
pub const TAG_SCORE_COLUMN: &str = "FatJet_deepTag_TvsQCD";

/// Check that a parallel jet column has the expected number of entries
pub fn check_length(
    column: &'static str,
    values: &[Float],
    expected: usize,
) -> Result<(), SelectionError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(SelectionError::LengthMismatch {
            column,
            expected,
            found: values.len(),
        })
    }
}

/// Translate a jet index into a collection position
///
/// The sentinel maps to None, anything else must designate an actual jet.
///
pub fn resolve_index(index: JetIndex, num_jets: usize) -> Result<Option<usize>, SelectionError> {
    if index == NO_JET {
        return Ok(None);
    }
    usize::try_from(index)
        .ok()
        .filter(|&pos| pos < num_jets)
        .map(Some)
        .ok_or(SelectionError::InvalidIndex { index, num_jets })
}

/// One event's jets, stored as parallel columns borrowed from a record
#[derive(Clone, Copy, Debug)]
pub struct JetCollection<'rec> {
    pub pt: &'rec [Float],
    pub eta: &'rec [Float],
    pub phi: &'rec [Float],
    pub mass: &'rec [Float],
    pub tag_score: &'rec [Float],
}
//
impl<'rec> JetCollection<'rec> {
    /// Assemble a jet collection, checking that all columns line up
    pub fn new(
        pt: &'rec [Float],
        eta: &'rec [Float],
        phi: &'rec [Float],
        mass: &'rec [Float],
        tag_score: &'rec [Float],
    ) -> Result<Self, SelectionError> {
        let num_jets = pt.len();
        check_length(ETA_COLUMN, eta, num_jets)?;
        check_length(PHI_COLUMN, phi, num_jets)?;
        check_length(MASS_COLUMN, mass, num_jets)?;
        check_length(TAG_SCORE_COLUMN, tag_score, num_jets)?;
        Ok(Self {
            pt,
            eta,
            phi,
            mass,
            tag_score,
        })
    }

    /// Extract the jet columns of an event record
    pub fn from_record(record: &'rec Record) -> Result<Self, SelectionError> {
        let column = |name: &str| {
            record
                .column(name)
                .ok_or_else(|| SelectionError::MissingColumn(name.to_owned()))
        };
        Self::new(
            column(PT_COLUMN)?,
            column(ETA_COLUMN)?,
            column(PHI_COLUMN)?,
            column(MASS_COLUMN)?,
            column(TAG_SCORE_COLUMN)?,
        )
    }

    /// Number of jets in the event
    pub fn len(&self) -> usize {
        self.pt.len()
    }

    /// 4-momentum of the jet at a given position
    pub fn momentum(&self, pos: usize) -> Momentum {
        momentum::from_pt_eta_phi_m(self.pt[pos], self.eta[pos], self.phi[pos], self.mass[pos])
    }

    /// Scalar sum of the jets' transverse momenta
    pub fn ht(&self) -> Float {
        momentum::scalar_ht(self.pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_resolution() {
        assert_eq!(resolve_index(NO_JET, 0), Ok(None));
        assert_eq!(resolve_index(2, 3), Ok(Some(2)));
        assert_eq!(
            resolve_index(3, 3),
            Err(SelectionError::InvalidIndex {
                index: 3,
                num_jets: 3
            })
        );
        assert_eq!(
            resolve_index(-2, 5),
            Err(SelectionError::InvalidIndex {
                index: -2,
                num_jets: 5
            })
        );
    }

    #[test]
    fn mismatched_columns_are_rejected() {
        let two = [1., 2.];
        let one = [1.];
        let err = JetCollection::new(&two, &two, &two, &one, &two).unwrap_err();
        assert_eq!(
            err,
            SelectionError::LengthMismatch {
                column: MASS_COLUMN,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn empty_collection_is_fine() {
        let jets = JetCollection::new(&[], &[], &[], &[], &[]).unwrap();
        assert_eq!(jets.len(), 0);
        assert_eq!(jets.ht(), 0.);
    }
}
