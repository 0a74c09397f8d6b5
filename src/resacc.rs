//! This module allows integrating selection results across events

use crate::{
    config::Configuration,
    dataset::Record,
    error::SelectionError,
    event::MASS_COLUMN,
    histogram::Histogram1D,
    resfin::{CutFlow, FinalResults},
    selection::{EventSelection, DIJET_MASS_COLUMN, HT_COLUMN},
};

/// This struct accumulates per-event selection results, and ultimately
/// produces the final results (see FinalResults).
pub struct ResultsAccumulator<'cfg> {
    /// Event counts after each selection step
    cutflow: CutFlow,

    /// Histogram of the configured column
    histogram: Histogram1D,

    /// Per-event selection results, in event order
    selections: Vec<EventSelection>,

    /// Configuration of the analysis
    cfg: &'cfg Configuration,
}
//
impl<'cfg> ResultsAccumulator<'cfg> {
    /// Prepare for results integration
    pub fn new(cfg: &'cfg Configuration) -> Self {
        let column = &cfg.hist_column;
        Self {
            cutflow: CutFlow::default(),
            histogram: Histogram1D::new(
                column,
                histogram_title(column),
                cfg.hist_bins,
                cfg.hist_min,
                cfg.hist_max,
            ),
            selections: Vec::new(),
            cfg,
        }
    }

    /// Integrate the selection results of one event
    pub fn integrate(
        &mut self,
        record: &Record,
        selection: EventSelection,
    ) -> Result<(), SelectionError> {
        // Draw the requested column, like TTree::Draw would
        match self.cfg.hist_column.as_str() {
            DIJET_MASS_COLUMN => {
                if let Some(mass) = selection.dijet_mass {
                    self.histogram.fill(mass);
                }
            }
            HT_COLUMN => self.histogram.fill(selection.ht),
            column => {
                let values = record
                    .column(column)
                    .ok_or_else(|| SelectionError::MissingColumn(column.to_owned()))?;
                self.histogram.fill_all(values);
            }
        }

        // Update the cutflow
        self.cutflow.events += 1;
        if selection.has_dijet() {
            self.cutflow.dijet_events += 1;
        }
        if selection.has_top() {
            self.cutflow.top_events += 1;
        }

        self.selections.push(selection);
        Ok(())
    }

    /// Integrate results from a ResultsAccumulator of later events
    #[allow(clippy::needless_pass_by_value)]
    pub fn merge(&mut self, other: Self) {
        self.cutflow.merge(&other.cutflow);
        self.histogram.merge(&other.histogram);
        self.selections.extend(other.selections);
    }

    /// Turn integrated selection data into finalized results
    pub fn finalize(self) -> FinalResults<'cfg> {
        FinalResults {
            cutflow: self.cutflow,
            histogram: self.histogram,
            selections: self.selections,
            cfg: self.cfg,
        }
    }
}

/// ROOT-style "title;x axis;y axis" description of a histogrammed column
fn histogram_title(column: &str) -> &str {
    match column {
        MASS_COLUMN => "softdrop mass;m_{SD} (GeV);N_{Events}",
        DIJET_MASS_COLUMN => "dijet invariant mass;m_{jj} (GeV);N_{Events}",
        HT_COLUMN => "scalar jet p_{T} sum;H_{T} (GeV);N_{Events}",
        other => other,
    }
}
