//! Render progress reporting.

use std::thread;
use std::time::{Duration, Instant};

use crate::scanline::RowCursor;

/// Polls a [`RowCursor`] and logs progress until every row is claimed.
///
/// Purely observational: it reads the cursor and never blocks a worker.
#[derive(Debug, Clone, Copy)]
pub struct ProgressMonitor {
    interval: Duration,
}

impl ProgressMonitor {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Log progress every `interval` until the cursor is exhausted.
    ///
    /// Returns the number of progress lines written.
    pub fn watch(&self, cursor: &RowCursor) -> usize {
        let start = Instant::now();
        let total = cursor.height();
        let mut reports = 0;

        while !cursor.is_exhausted() {
            thread::sleep(self.interval);

            let done = cursor.claimed();
            let elapsed = start.elapsed();
            let percent = if total == 0 {
                100.0
            } else {
                100.0 * done as f64 / total as f64
            };

            match estimate_remaining(done, total, elapsed) {
                Some(eta) => log::info!(
                    "Rendering: {:5.1}% ({}/{} rows), elapsed {:.1}s, ETA {}",
                    percent,
                    done,
                    total,
                    elapsed.as_secs_f64(),
                    format_eta(eta)
                ),
                None => log::info!(
                    "Rendering: {:5.1}% ({}/{} rows), elapsed {:.1}s",
                    percent,
                    done,
                    total,
                    elapsed.as_secs_f64()
                ),
            }
            reports += 1;
        }

        reports
    }
}

/// Linear estimate of the time left: `elapsed * (1 / progress - 1)`.
///
/// `None` until at least one row has been claimed.
pub fn estimate_remaining(done: usize, total: usize, elapsed: Duration) -> Option<Duration> {
    if done == 0 || total == 0 {
        return None;
    }
    let progress = (done as f64 / total as f64).min(1.0);
    Some(elapsed.mul_f64(1.0 / progress - 1.0))
}

fn format_eta(eta: Duration) -> String {
    let secs = eta.as_secs_f64();
    if secs > 60.0 {
        format!("{:.1}min", secs / 60.0)
    } else {
        format!("{:.1}s", secs)
    }
}
