//! Progress reporting through `tracing`, and the run timeout.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use jnd_engine::{CancellationToken, ProgressMonitor};

/// Logs start, every tenth of the work, and the end of each stage.
///
/// Cancellation is delegated to a shared [`CancellationToken`].
#[derive(Debug)]
pub struct LogProgress {
    task: String,
    token: CancellationToken,
    total: AtomicUsize,
    done: AtomicUsize,
}

impl LogProgress {
    pub fn new(task: impl Into<String>, token: CancellationToken) -> Self {
        Self {
            task: task.into(),
            token,
            total: AtomicUsize::new(0),
            done: AtomicUsize::new(0),
        }
    }

    /// Units completed in the current stage.
    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }
}

impl ProgressMonitor for LogProgress {
    fn start(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        tracing::info!(task = %self.task, total, "Started");
    }

    fn step(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed);
        if total == 0 {
            return;
        }
        // Log when crossing a 10% boundary
        if done * 10 / total != (done - 1) * 10 / total {
            let percent = done * 100 / total;
            tracing::info!(task = %self.task, done, total, percent, "Progress");
        }
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    fn finish(&self) {
        let done = self.done();
        let total = self.total.load(Ordering::Relaxed);
        if self.token.is_cancelled() {
            tracing::warn!(task = %self.task, done, total, "Cancelled, keeping partial result");
        } else {
            tracing::info!(task = %self.task, done, total, "Finished");
        }
    }
}

/// Cancels a token once a time limit passes.
///
/// Dropping the watchdog disarms it and joins its thread.
#[derive(Debug)]
pub struct Watchdog {
    disarm: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Watchdog {
    pub fn arm(token: CancellationToken, timeout: Duration) -> Self {
        let (disarm, rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            // A disconnect means the run ended first
            if let Err(RecvTimeoutError::Timeout) = rx.recv_timeout(timeout) {
                tracing::warn!(
                    timeout_secs = timeout.as_secs_f64(),
                    "Time limit reached, cancelling run"
                );
                token.cancel();
            }
        });
        Self {
            disarm: Some(disarm),
            handle: Some(handle),
        }
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.disarm.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Watchdog thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_counts_and_delegates() {
        let token = CancellationToken::new();
        let progress = LogProgress::new("test", token.clone());
        progress.start(3);
        progress.step();
        progress.step();
        assert_eq!(progress.done(), 2);
        assert!(!progress.is_cancelled());
        token.cancel();
        assert!(progress.is_cancelled());
        progress.finish();
    }

    #[test]
    fn test_watchdog_cancels_after_timeout() {
        let token = CancellationToken::new();
        let watchdog = Watchdog::arm(token.clone(), Duration::from_millis(10));
        thread::sleep(Duration::from_millis(200));
        assert!(token.is_cancelled());
        drop(watchdog);
    }

    #[test]
    fn test_dropped_watchdog_never_fires() {
        let token = CancellationToken::new();
        drop(Watchdog::arm(token.clone(), Duration::from_secs(60)));
        assert!(!token.is_cancelled());
    }
}
