//! Per-event application of the jet selection chain

use crate::{
    dataset::Record,
    error::SelectionError,
    event::{resolve_index, IndexPair, JetCollection, NO_JET},
    evcut::pick_dijets,
    momentum::invariant_mass,
    numeric::Float,
    toptag::TopCut,
};

/// Derived column holding the invariant mass of the picked jet pair
pub const DIJET_MASS_COLUMN: &str = "Dijet_invMass";

/// Derived column holding the scalar sum of jet transverse momenta
pub const HT_COLUMN: &str = "FatJet_HT";

/// Quantities derived from one event by the selection chain
#[derive(Clone, Debug, PartialEq)]
pub struct EventSelection {
    /// Indices of the back-to-back jet pair (DijetIdxs)
    pub dijet_idxs: IndexPair,

    /// Top-ordered jet pair (TopIdxs), for events which have a dijet pair
    pub top_idxs: Option<IndexPair>,

    /// Invariant mass of the dijet pair, for events which have one
    pub dijet_mass: Option<Float>,

    /// Scalar sum of the transverse momenta of all jets
    pub ht: Float,
}
//
impl EventSelection {
    /// Run the selection chain on an event record
    pub fn new(top_cut: &TopCut, record: &Record) -> Result<Self, SelectionError> {
        let jets = JetCollection::from_record(record)?;
        let dijet_idxs = pick_dijets(jets.pt, jets.eta, jets.phi, jets.mass)?;

        // Events without a complete pair stop here ("dijetsExist" cut)
        let (top_idxs, dijet_mass) = if dijet_idxs.contains(&NO_JET) {
            (None, None)
        } else {
            let top_idxs = top_cut.pick_top(jets.mass, jets.tag_score, &dijet_idxs)?;
            let mut momenta = Vec::with_capacity(dijet_idxs.len());
            for &idx in &dijet_idxs {
                if let Some(pos) = resolve_index(idx, jets.len())? {
                    momenta.push(jets.momentum(pos));
                }
            }
            (Some(top_idxs), Some(invariant_mass(momenta)))
        };

        Ok(Self {
            dijet_idxs,
            top_idxs,
            dijet_mass,
            ht: jets.ht(),
        })
    }

    /// Truth that the event has a dijet pair
    pub fn has_dijet(&self) -> bool {
        self.top_idxs.is_some()
    }

    /// Truth that at least one jet of the dijet pair is top-like
    pub fn has_top(&self) -> bool {
        matches!(self.top_idxs, Some([leading, _]) if leading != NO_JET)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        event::{ETA_COLUMN, MASS_COLUMN, PHI_COLUMN, PT_COLUMN, TAG_SCORE_COLUMN},
        toptag::MassWindow,
    };
    use approx::assert_relative_eq;

    /// Build an event record from per-jet (pt, eta, phi, mass, score) tuples
    pub fn make_record(jets: &[(Float, Float, Float, Float, Float)]) -> Record {
        let column = |f: fn(&(Float, Float, Float, Float, Float)) -> Float| {
            jets.iter().map(f).collect::<Vec<_>>()
        };
        Record::default()
            .with_column(PT_COLUMN, column(|j| j.0))
            .with_column(ETA_COLUMN, column(|j| j.1))
            .with_column(PHI_COLUMN, column(|j| j.2))
            .with_column(MASS_COLUMN, column(|j| j.3))
            .with_column(TAG_SCORE_COLUMN, column(|j| j.4))
    }

    pub fn nominal() -> TopCut {
        TopCut::new(MassWindow::new(105., 210.), 0.94)
    }

    #[test]
    fn event_with_top_pair() {
        let record = make_record(&[
            (30., 0.5, 1.0, 10., 0.1),
            (500., 0., 0., 170., 0.95),
            (500., 0., 3.0, 160., 0.99),
        ]);
        let selection = EventSelection::new(&nominal(), &record).unwrap();
        assert_eq!(selection.dijet_idxs, [1, 2]);
        assert_eq!(selection.top_idxs, Some([2, 1]));
        assert!(selection.has_dijet());
        assert!(selection.has_top());
        assert_relative_eq!(selection.ht, 1030.);
        assert!(selection.dijet_mass.unwrap() > 900.);
    }

    #[test]
    fn event_without_pair() {
        let record = make_record(&[(500., 0., 0., 170., 0.95), (500., 0., 0.2, 160., 0.99)]);
        let selection = EventSelection::new(&nominal(), &record).unwrap();
        assert_eq!(selection.dijet_idxs, [0, NO_JET]);
        assert_eq!(selection.top_idxs, None);
        assert_eq!(selection.dijet_mass, None);
        assert!(!selection.has_dijet());
        assert!(!selection.has_top());
    }

    #[test]
    fn pair_without_top() {
        let record = make_record(&[(500., 0., 0., 60., 0.95), (500., 0., 3.0, 80., 0.99)]);
        let selection = EventSelection::new(&nominal(), &record).unwrap();
        assert_eq!(selection.top_idxs, Some([NO_JET, NO_JET]));
        assert!(selection.has_dijet());
        assert!(!selection.has_top());
    }

    #[test]
    fn missing_score_column() {
        let record = Record::default()
            .with_column(PT_COLUMN, vec![])
            .with_column(ETA_COLUMN, vec![])
            .with_column(PHI_COLUMN, vec![])
            .with_column(MASS_COLUMN, vec![]);
        assert_eq!(
            EventSelection::new(&nominal(), &record),
            Err(SelectionError::MissingColumn(TAG_SCORE_COLUMN.to_owned()))
        );
    }
}
