//! Dijet picker: back-to-back jet pair and top-tag selection
//!
//!
//! # Introduction (for the physicist)
//!
//! This small program looks for events with two energetic, massive and
//! back-to-back large-radius jets, and then decides which of the two jets (if
//! any) looks like the hadronic decay of a top quark, based on its softdrop
//! mass and on the score of a top-versus-QCD tagger.
//!
//! The jet pair is the first one found when going through the jets in storage
//! order: a jet with pT > 350 GeV, |η| < 2.4 and m > 50 GeV, followed by the
//! first similar jet more than 90° away from it in φ.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The program is organized as a chain of pure per-event functions:
//!
//! * read in the configuration and the event records
//! * for each event,
//!     * pick the dijet pair (DijetIdxs),
//!     * if there is one, sort it according to top identification (TopIdxs),
//!     * derive a few kinematic quantities,
//!     * accumulate the cutflow and a histogram of some column
//! * then display / store the results and render the histogram.
//!
//! Since events are independent, they can be processed in parallel batches
//! (see the "multi-threading" feature).

#![warn(missing_docs)]

mod config;
mod dataset;
mod error;
mod evcut;
mod event;
mod histogram;
mod momentum;
mod numeric;
mod output;
mod render;
mod resacc;
mod resfin;
mod scheduling;
mod selection;
mod toptag;

use eyre::WrapErr;
use log::info;

use crate::{
    config::Configuration, dataset::Dataset, resacc::ResultsAccumulator,
    selection::EventSelection,
};

use std::time::Instant;

/// We'll use eyre's type-erased result type throughout the application
type Result<T> = eyre::Result<T>;

/// Configuration file used when none is given on the command line
const DEFAULT_CONFIG: &str = "selection.cfg";

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    // The configuration echo and selection warnings are shown unless RUST_LOG
    // says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // ### CONFIGURATION READOUT ###

    let config_file = std::env::args().nth(1);
    let config_file = config_file.as_deref().unwrap_or(DEFAULT_CONFIG);
    let cfg = Configuration::load(config_file)
        .wrap_err_with(|| format!("Failed to load the configuration from {}", config_file))?;

    // ### EVENT READOUT ###

    let dataset = Dataset::load(&cfg.input_file, &cfg.store_name)?;
    info!(
        "Read {} events from store {} of {}",
        dataset.records.len(),
        dataset.name,
        cfg.input_file.display()
    );

    // Start the clock after I/O, to avoid IO-induced timing fluctuations
    let saved_time = Instant::now();

    // ### SELECTION ###

    // The selection kernel runs the selection chain on a batch of events,
    // given the number of the first event of the batch, and returns the
    // accumulated intermediary results
    let results = scheduling::run_selection(&dataset.records, |first_event, records| {
        let mut res_acc = ResultsAccumulator::new(&cfg);
        for (offset, record) in records.iter().enumerate() {
            let event_number = first_event + offset;
            let selection = EventSelection::new(&cfg.top_cut, record)
                .wrap_err_with(|| format!("Failed to select event {}", event_number))?;
            res_acc
                .integrate(record, selection)
                .wrap_err_with(|| format!("Failed to histogram event {}", event_number))?;
        }
        Ok(res_acc)
    })?;
    info!(
        "Selected {} dijet events, {} with a top candidate",
        results.cutflow.dijet_events, results.cutflow.top_events
    );

    // ### RESULTS DISPLAY AND STORAGE ###

    // Measure how much time has elapsed
    let elapsed_time = saved_time.elapsed();

    // Send the results to the standard output and to disk and we're done
    output::dump_results(&results, elapsed_time).wrap_err("Failed to output the results")?;

    Ok(())
}
