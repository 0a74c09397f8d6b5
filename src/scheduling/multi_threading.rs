//! Multi-threaded back-end of the selection

use crate::{dataset::Record, resacc::ResultsAccumulator, scheduling::EVENT_BATCH_SIZE, Result};

use std::sync::Mutex;

/// Select events in multi-threaded mode
///
/// Each batch of events is processed by a separate task, and the task results
/// are merged in event order once all of them are available.
///
pub fn run_selection_impl<'cfg>(
    records: &[Record],
    select_events: impl Send + Sync + Fn(usize, &[Record]) -> Result<ResultsAccumulator<'cfg>>,
) -> Result<ResultsAccumulator<'cfg>> {
    // An empty record store still yields a (empty) set of results
    if records.is_empty() {
        return select_events(0, records);
    }

    // We know in advance how many batches of event we will process
    let num_batches = (records.len() + EVENT_BATCH_SIZE - 1) / EVENT_BATCH_SIZE;
    let accumulator = ReproducibleAccumulator::new(num_batches);

    // This function is a synchronization scope: it will only return
    // once all inner tasks have been executed
    rayon::scope(|scope| {
        for (batch_id, batch) in records.chunks(EVENT_BATCH_SIZE).enumerate() {
            let accumulator_ref = &accumulator;
            let select_events_ref = &select_events;
            scope.spawn(move |_| {
                let first_event = batch_id * EVENT_BATCH_SIZE;
                log::debug!("Selecting events {}..{}", first_event, first_event + batch.len());
                let result = select_events_ref(first_event, batch);
                accumulator_ref.set_task_result(batch_id, result);
            });
        }
    });

    // Extract the results from the accumulator
    accumulator.get_merged_result()
}

/// Order-preserving results accumulation mechanism
struct ReproducibleAccumulator<'cfg> {
    /// Storage for the intermediary selection results of parallel tasks
    results: Box<[Mutex<Option<Result<ResultsAccumulator<'cfg>>>>]>,
}
//
impl<'cfg> ReproducibleAccumulator<'cfg> {
    /// Set up results storage for N parallel tasks
    fn new(num_tasks: usize) -> Self {
        assert!(num_tasks > 0, "There should be at least one task");
        Self {
            results: (0..num_tasks)
                .map(|_| Mutex::new(None))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        }
    }

    /// Integrate the results of the n-th selection task
    fn set_task_result(&self, task_id: usize, result: Result<ResultsAccumulator<'cfg>>) {
        let mut lock = self.results[task_id]
            .lock()
            .expect("Mutex data should be valid");
        assert!(lock.is_none(), "Tasks should not report results twice");
        *lock = Some(result);
    }

    /// Aggregate the results in event order, stopping at the first error
    fn get_merged_result(self) -> Result<ResultsAccumulator<'cfg>> {
        // Start iterating over the task results
        let mut results_iter = self.results.into_vec().into_iter().map(|entry| {
            entry
                .into_inner()
                .expect("Mutex data should be valid")
                .expect("Result should be ready")
        });

        // Initialize results storage with the result of the first task
        let mut merged = results_iter
            .next()
            .expect("There should be at least one task")?;

        // Merge the results of the other tasks
        for result in results_iter {
            merged.merge(result?);
        }
        Ok(merged)
    }
}
