//! Sequential back-end of the selection

use crate::{dataset::Record, resacc::ResultsAccumulator, scheduling::EVENT_BATCH_SIZE, Result};

/// Select events in sequential mode
///
/// We use batched logic even in sequential mode, in order to achieve
/// reproducibility with respect to multi-threaded runs.
///
pub fn run_selection_impl<'cfg>(
    records: &[Record],
    select_events: impl Fn(usize, &[Record]) -> Result<ResultsAccumulator<'cfg>>,
) -> Result<ResultsAccumulator<'cfg>> {
    let mut batches = records.chunks(EVENT_BATCH_SIZE);

    // Initialize the accumulator with the first batch of events (if any)
    let mut accumulator = select_events(0, batches.next().unwrap_or(&[]))?;

    // Select and integrate the other batches of events
    for (batch_id, batch) in batches.enumerate() {
        let first_event = (batch_id + 1) * EVENT_BATCH_SIZE;
        log::debug!("Selecting events {}..{}", first_event, first_event + batch.len());
        accumulator.merge(select_events(first_event, batch)?);
    }

    // Return the final accumulated results
    Ok(accumulator)
}
