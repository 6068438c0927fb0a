//! Row-level progress notifications and cooperative cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stage of a distance map computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPhase {
    Initialization,
    ForwardScan,
    BackwardScan,
    Normalization,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanPhase::Initialization => "initialization",
            ScanPhase::ForwardScan => "forward scan",
            ScanPhase::BackwardScan => "backward scan",
            ScanPhase::Normalization => "normalization",
        })
    }
}

/// Observer of a running transform.
///
/// Both callbacks run synchronously on the computing thread and cannot
/// influence the result.
pub trait ProgressObserver {
    /// Called when the transform enters `phase`.
    fn phase_started(&mut self, _phase: ScanPhase) {}

    /// Called after each scanned row with the number of rows done so far.
    fn row_done(&mut self, _phase: ScanPhase, _rows_done: usize, _total_rows: usize) {}
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Adapts a closure `(phase, rows_done, total_rows)` into a [`ProgressObserver`].
pub struct FnProgress<F>(pub F);

impl<F> ProgressObserver for FnProgress<F>
where
    F: FnMut(ScanPhase, usize, usize),
{
    fn row_done(&mut self, phase: ScanPhase, rows_done: usize, total_rows: usize) {
        (self.0)(phase, rows_done, total_rows)
    }
}

/// Shared flag polled between rows.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-row hook handed to the scans.
pub(crate) struct RowHook<'a> {
    observer: &'a mut dyn ProgressObserver,
    cancel: Option<&'a CancelToken>,
}

impl<'a> RowHook<'a> {
    pub(crate) fn new(
        observer: &'a mut dyn ProgressObserver,
        cancel: Option<&'a CancelToken>,
    ) -> Self {
        Self { observer, cancel }
    }

    pub(crate) fn phase_started(&mut self, phase: ScanPhase) {
        log::debug!("{phase}");
        self.observer.phase_started(phase);
    }

    /// Report a finished row; `false` means the caller must stop.
    pub(crate) fn row_done(
        &mut self,
        phase: ScanPhase,
        rows_done: usize,
        total_rows: usize,
    ) -> bool {
        self.observer.row_done(phase, rows_done, total_rows);
        !self.cancel.is_some_and(CancelToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_stops_once_token_is_cancelled() {
        let token = CancelToken::new();
        let mut seen = Vec::new();
        let mut observer = FnProgress(|phase, done, total| seen.push((phase, done, total)));
        {
            let mut hook = RowHook::new(&mut observer, Some(&token));
            assert!(hook.row_done(ScanPhase::ForwardScan, 1, 3));
            token.clone().cancel();
            assert!(!hook.row_done(ScanPhase::ForwardScan, 2, 3));
        }
        assert_eq!(
            seen,
            vec![(ScanPhase::ForwardScan, 1, 3), (ScanPhase::ForwardScan, 2, 3)]
        );
    }

    #[test]
    fn phase_names() {
        assert_eq!(ScanPhase::ForwardScan.to_string(), "forward scan");
        assert_eq!(
            serde_json::to_string(&ScanPhase::BackwardScan).expect("json"),
            "\"backward_scan\""
        );
    }
}
