//! Progress reporting shared by deck search and ranking.
//!
//! Engines talk to a [`ProgressReporter`], which always forwards the first
//! and last report and throttles everything in between.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Observer for long-running stages. `total == 0` means the total is not known yet.
pub trait Progress {
    fn report(&mut self, done: usize, total: usize);
}

impl<F: FnMut(usize, usize)> Progress for F {
    fn report(&mut self, done: usize, total: usize) {
        self(done, total)
    }
}

/// Observer that ignores every report
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _done: usize, _total: usize) {}
}

pub const REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Rate-limiting adapter owned by a single engine invocation
pub struct ProgressReporter<'a> {
    observer: &'a mut dyn Progress,
    interval: Duration,
    last: Instant,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(observer: &'a mut dyn Progress) -> Self {
        Self::with_interval(observer, REPORT_INTERVAL)
    }

    pub fn with_interval(observer: &'a mut dyn Progress, interval: Duration) -> Self {
        ProgressReporter {
            observer,
            interval,
            last: Instant::now(),
        }
    }

    /// Unconditional `(0, total)` report
    pub fn start(&mut self, total: usize) {
        self.last = Instant::now();
        self.observer.report(0, total);
    }

    /// Forwarded only if the interval elapsed since the previous report
    pub fn tick(&mut self, done: usize, total: usize) {
        if self.last.elapsed() >= self.interval {
            self.last = Instant::now();
            self.observer.report(done, total);
        }
    }

    /// Unconditional final report
    pub fn finish(&mut self, done: usize, total: usize) {
        self.last = Instant::now();
        self.observer.report(done, total);
    }
}

/// Terminal progress bar for the command line
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(stage: &str) -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{prefix:>12} [{elapsed_precise}] {bar:40} {pos}/{len} ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_prefix(stage.to_string());
        BarProgress { bar }
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl Progress for BarProgress {
    fn report(&mut self, done: usize, total: usize) {
        if total > 0 {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(done as u64);
    }
}
