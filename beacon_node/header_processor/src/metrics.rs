pub use prometheus::Error;
use prometheus::{Histogram, HistogramTimer, IntCounter, Result};

pub fn start_timer(histogram: &Result<Histogram>) -> Option<HistogramTimer> {
    if let Ok(histogram) = histogram {
        Some(histogram.start_timer())
    } else {
        None
    }
}

pub fn stop_timer(timer: Option<HistogramTimer>) {
    if let Some(t) = timer {
        t.observe_duration()
    }
}

pub fn inc_counter(counter: &Result<IntCounter>) {
    if let Ok(counter) = counter {
        counter.inc();
    }
}

pub fn inc_counter_by(counter: &Result<IntCounter>, value: u64) {
    if let Ok(counter) = counter {
        counter.inc_by(value);
    }
}

pub fn observe(histogram: &Result<Histogram>, value: f64) {
    if let Ok(histogram) = histogram {
        histogram.observe(value);
    }
}

lazy_static! {
    /*
     * Slot Processing
     */
    pub static ref SLOT_PROCESSING_TIMES: Result<Histogram> =
        register_histogram!("slot_processing_times", "Time spent advancing the state one slot");
    pub static ref SLOTS_ADVANCED: Result<IntCounter> = register_int_counter!(
        "slots_advanced_total",
        "Count of slots the state has been advanced through"
    );
    pub static ref SKIP_SLOT_LIMIT_EXCEEDED: Result<IntCounter> = register_int_counter!(
        "skip_slot_limit_exceeded_total",
        "Count of advances refused for skipping too many slots"
    );

    /*
     * Header Processing
     */
    pub static ref HEADER_PROCESSING_REQUESTS: Result<IntCounter> = register_int_counter!(
        "header_processing_requests",
        "Count of block headers submitted for processing"
    );
    pub static ref HEADER_PROCESSING_SUCCESSES: Result<IntCounter> = register_int_counter!(
        "header_processing_successes",
        "Count of block headers processed without error"
    );
    pub static ref HEADER_PROCESSING_INVALID: Result<IntCounter> = register_int_counter!(
        "header_processing_invalid",
        "Count of block headers rejected as invalid"
    );
    pub static ref HEADER_PROCESSING_FATAL: Result<IntCounter> = register_int_counter!(
        "header_processing_fatal",
        "Count of block headers that could not be processed due to a faulty state"
    );
    pub static ref HEADER_PROCESSING_TIMES: Result<Histogram> =
        register_histogram!("header_processing_times", "Full runtime of header processing");

    /*
     * Candidates
     */
    pub static ref CANDIDATES_PER_BATCH: Result<Histogram> = register_histogram!(
        "candidates_per_batch",
        "Number of sibling candidate headers validated together"
    );
}
