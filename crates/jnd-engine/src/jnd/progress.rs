//! Progress reporting and cooperative cancellation.
//!
//! Long operations call [`ProgressMonitor::start`] once, then
//! [`step`](ProgressMonitor::step) and
//! [`is_cancelled`](ProgressMonitor::is_cancelled) after every unit of work
//! (one candidate point, one region), and [`finish`](ProgressMonitor::finish)
//! at the end, including after a cancellation. Monitors never feed data back
//! into the computation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Notification and cancellation channel for long-running operations.
///
/// All methods take `&self` because region tracing reports from several
/// rayon workers at once.
pub trait ProgressMonitor: Send + Sync {
    fn start(&self, _total: usize) {}

    fn step(&self) {}

    fn is_cancelled(&self) -> bool {
        false
    }

    fn finish(&self) {}
}

/// No-op monitor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressMonitor for SilentProgress {}

/// Shared cancellation flag.
///
/// Clones share the flag, so one clone can be handed to a watchdog or a
/// UI thread while another is passed to the computation.
///
/// ```
/// use jnd_engine::{CancellationToken, ProgressMonitor};
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl ProgressMonitor for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}
