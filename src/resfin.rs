//! This module contains the final results of the selection: cutflow,
//! histogram of the requested column and per-event derived fields

use crate::{
    config::Configuration, histogram::Histogram1D, numeric::Float, selection::EventSelection,
};

/// Number of events remaining after each selection step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CutFlow {
    /// Events read from the record store
    pub events: usize,

    /// Events with a back-to-back jet pair
    pub dijet_events: usize,

    /// Events where at least one jet of the pair is top-like
    pub top_events: usize,
}
//
impl CutFlow {
    /// Add up the counts of another cutflow
    pub fn merge(&mut self, other: &Self) {
        self.events += other.events;
        self.dijet_events += other.dijet_events;
        self.top_events += other.top_events;
    }

    /// Fraction of the events which passed a selection step
    pub fn efficiency(&self, count: usize) -> Float {
        if self.events == 0 {
            0.
        } else {
            count as Float / self.events as Float
        }
    }
}

/// Final results of the selection
pub struct FinalResults<'cfg> {
    /// Event counts after each selection step
    pub cutflow: CutFlow,

    /// Histogram of the configured column
    pub histogram: Histogram1D,

    /// Per-event selection results, in event order
    pub selections: Vec<EventSelection>,

    /// Configuration of the analysis
    pub cfg: &'cfg Configuration,
}
//
impl FinalResults<'_> {
    /// Display the cutflow on stdout
    pub fn print(&self) {
        let cutflow = &self.cutflow;
        println!("Counts:                {}", cutflow.events);
        println!(
            "Counts after dijets:   {} ({:.2}%)",
            cutflow.dijet_events,
            100. * cutflow.efficiency(cutflow.dijet_events)
        );
        println!(
            "Counts after top ID:   {} ({:.2}%)",
            cutflow.top_events,
            100. * cutflow.efficiency(cutflow.top_events)
        );
        println!(
            "Histogram {}: {} entries, {} underflow, {} overflow",
            self.histogram.name,
            self.histogram.entries,
            self.histogram.underflow,
            self.histogram.overflow
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutflow_efficiency() {
        let mut cutflow = CutFlow::default();
        assert_eq!(cutflow.efficiency(0), 0.);
        cutflow.merge(&CutFlow {
            events: 8,
            dijet_events: 4,
            top_events: 1,
        });
        cutflow.merge(&CutFlow {
            events: 2,
            dijet_events: 1,
            top_events: 1,
        });
        assert_eq!(cutflow.events, 10);
        assert_eq!(cutflow.efficiency(cutflow.dijet_events), 0.5);
        assert_eq!(cutflow.efficiency(cutflow.top_events), 0.2);
    }
}
