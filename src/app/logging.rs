//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs how many prompts have been retrieved and scored so far.
pub fn log_progress(start_time: std::time::Instant, completed: &AtomicUsize, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = completed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Scored {}/{} prompts in {:.2} seconds (~{:.2} prompts/sec)",
        completed, total, elapsed_secs, rate
    );
}
