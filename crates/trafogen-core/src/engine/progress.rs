/// Progress callback: `(done, total)`, returning `false` to request an early
/// stop of the current stage.
pub type ProgressCallback<'a> = Box<dyn Fn(u64, u64) -> bool + Send + Sync + 'a>;

/// Thin wrapper around an optional progress callback.
///
/// With no callback installed, every report answers "continue".
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, done: u64, total: u64) -> bool {
        match &self.callback {
            Some(cb) => cb(done, total),
            None => true,
        }
    }
}

/// Integer progress percent, `clamp(done*100/total, 0, 100)`.
///
/// An empty stage reports 100: it is complete, not undefined.
pub fn percent(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.saturating_mul(100) / total).min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn reporter_without_callback_always_continues() {
        let reporter = ProgressReporter::new();
        assert!(reporter.report(0, 10));
        assert!(reporter.report(10, 10));
    }

    #[test]
    fn reporter_forwards_done_and_total() {
        let last = AtomicU64::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|done, total| {
            last.store(done * 1000 + total, Ordering::SeqCst);
            true
        }));
        assert!(reporter.report(7, 42));
        assert_eq!(last.load(Ordering::SeqCst), 7042);
    }

    #[test]
    fn reporter_propagates_an_early_stop() {
        let reporter = ProgressReporter::with_callback(Box::new(|done, _| done < 5));
        assert!(reporter.report(4, 10));
        assert!(!reporter.report(5, 10));
    }

    #[test]
    fn percent_clamps_and_handles_empty_totals() {
        assert_eq!(percent(0, 10), 0);
        assert_eq!(percent(5, 10), 50);
        assert_eq!(percent(10, 10), 100);
        assert_eq!(percent(20, 10), 100);
        assert_eq!(percent(0, 0), 100);
    }
}
