//! This module takes care of scheduling the selection work, encapsulating use
//! of multiple threads

#[cfg(feature = "multi-threading")]
mod multi_threading;
#[cfg(not(feature = "multi-threading"))]
mod sequential;

use crate::{dataset::Record, resacc::ResultsAccumulator, resfin::FinalResults, Result};

/// Size of the event batches
///
/// Events are grouped in batches of a certain size, whose results are merged
/// in event order. This makes the results of sequential and parallel runs
/// identical, down to the order of per-event outputs.
///
/// Selecting an event is cheap, so batches must be large enough for the
/// scheduling overhead to remain negligible.
///
const EVENT_BATCH_SIZE: usize = 10_000;

/// Run the selection in the manner that was configured at build time.
///
/// Takes as parameters the event records, and a selection kernel that
/// processes a batch of records given the number of the batch's first event.
///
/// Returns the finalized selection results, or the first error encountered
///
pub fn run_selection<'cfg>(
    records: &[Record],
    select_events: impl Send + Sync + Fn(usize, &[Record]) -> Result<ResultsAccumulator<'cfg>>,
) -> Result<FinalResults<'cfg>> {
    // Integrate selection results...
    let accumulator = {
        // ...in sequential mode
        #[cfg(not(feature = "multi-threading"))]
        {
            sequential::run_selection_impl(records, select_events)?
        }

        // ...in multi-threaded mode
        #[cfg(feature = "multi-threading")]
        {
            multi_threading::run_selection_impl(records, select_events)?
        }
    };

    // Finalize the results
    Ok(accumulator.finalize())
}
