//! Mechanism to identify which jets of a picked pair look like top quarks

use crate::{
    error::SelectionError,
    event::{check_length, resolve_index, IndexPair, JetIndex, NO_JET, TAG_SCORE_COLUMN},
    numeric::Float,
};

use log::warn;

/// Open interval of accepted jet masses (GeV)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassWindow {
    pub min: Float,
    pub max: Float,
}
//
impl MassWindow {
    /// Build a mass window from its bounds
    pub fn new(min: Float, max: Float) -> Self {
        Self { min, max }
    }

    /// Truth that a mass lies strictly inside of the window
    pub fn contains(&self, mass: Float) -> bool {
        mass > self.min && mass < self.max
    }
}

/// Top identification working point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopCut {
    /// Accepted softdrop mass range
    pub mass_window: MassWindow,

    /// Tagger score that top jets must exceed
    pub score_cut: Float,
}
//
impl TopCut {
    /// Set up a top identification working point
    pub fn new(mass_window: MassWindow, score_cut: Float) -> Self {
        Self {
            mass_window,
            score_cut,
        }
    }

    /// Truth that the jet at some collection position is top-like
    fn is_top(&self, mass: &[Float], tag_score: &[Float], pos: Option<usize>) -> bool {
        pos.map_or(false, |pos| {
            self.mass_window.contains(mass[pos]) && tag_score[pos] > self.score_cut
        })
    }

    /// Sort a pair of jets according to their top identification
    ///
    /// If both jets are top-like, the one with the highest tagger score comes
    /// first. If only one is, it comes first. If none is, both indices are
    /// replaced with NO_JET.
    ///
    /// Only the first two indices are considered, extra ones are reported.
    ///
    pub fn pick_top(
        &self,
        mass: &[Float],
        tag_score: &[Float],
        idxs: &[JetIndex],
    ) -> Result<IndexPair, SelectionError> {
        check_length(TAG_SCORE_COLUMN, tag_score, mass.len())?;
        let (idx0, idx1) = match *idxs {
            [idx0, idx1] => (idx0, idx1),
            [idx0, idx1, ..] => {
                warn!(
                    "pick_top received {} jet indices, only the first two will be used",
                    idxs.len()
                );
                (idx0, idx1)
            }
            _ => return Err(SelectionError::MissingIndices(idxs.len())),
        };

        let num_jets = mass.len();
        let pos0 = resolve_index(idx0, num_jets)?;
        let pos1 = resolve_index(idx1, num_jets)?;
        let is_top1 = self.is_top(mass, tag_score, pos1);

        // The reference analysis overwrote the first flag with the second one
        let is_top0 = if cfg!(feature = "legacy-top-tagging") {
            is_top1
        } else {
            self.is_top(mass, tag_score, pos0)
        };

        Ok(match (is_top0, is_top1) {
            (true, true) => {
                let score = |pos: Option<usize>| pos.map_or(Float::NEG_INFINITY, |p| tag_score[p]);
                if score(pos0) > score(pos1) {
                    [idx0, idx1]
                } else {
                    [idx1, idx0]
                }
            }
            (true, false) => [idx0, idx1],
            (false, true) => [idx1, idx0],
            (false, false) => [NO_JET, NO_JET],
        })
    }
}
