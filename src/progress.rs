//! Progress-callback trait for per-row conversion events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::BatchConfigBuilder::progress_callback`] to receive an
//! event as the batch driver finishes each row.
//!
//! # Why callbacks instead of return values?
//!
//! The batch is sequential, but a caller driving a terminal progress bar
//! (or a GUI, or a log aggregator) wants to hear about each file as it is
//! written, not after the whole batch returns. The callback is the
//! least-invasive integration point: the library stays ignorant of how
//! the host application reports progress. The trait is `Send + Sync` so a
//! single callback can be shared with other threads observing the run.

use std::path::Path;
use std::sync::Arc;

/// Called by the batch driver as it processes each row.
///
/// All methods have default no-op implementations so callers only
/// override what they care about. Row numbers are 1-indexed data rows
/// (the header row is not counted).
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before any row is processed.
    fn on_batch_start(&self, total_rows: usize) {
        let _ = total_rows;
    }

    /// Called just before a row is rendered.
    fn on_row_start(&self, row_num: usize, total_rows: usize) {
        let _ = (row_num, total_rows);
    }

    /// Called when a row's PDF has been written.
    fn on_row_complete(&self, row_num: usize, total_rows: usize, output_path: &Path) {
        let _ = (row_num, total_rows, output_path);
    }

    /// Called when a row fails to render or write.
    fn on_row_error(&self, row_num: usize, total_rows: usize, error: &str) {
        let _ = (row_num, total_rows, error);
    }

    /// Called once after all rows have been attempted.
    fn on_batch_complete(&self, total_rows: usize, generated: usize) {
        let _ = (total_rows, generated);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::BatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct TrackingCallback {
        completes: AtomicUsize,
        errors: AtomicUsize,
        final_generated: AtomicUsize,
    }

    impl BatchProgressCallback for TrackingCallback {
        fn on_row_complete(&self, _row: usize, _total: usize, _path: &Path) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_row_error(&self, _row: usize, _total: usize, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_batch_complete(&self, _total: usize, generated: usize) {
            self.final_generated.store(generated, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(3);
        cb.on_row_start(1, 3);
        cb.on_row_complete(1, 3, Path::new("output_cvs/Ana_Duarte_CV.pdf"));
        cb.on_row_error(2, 3, "some error");
        cb.on_batch_complete(3, 2);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback {
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            final_generated: AtomicUsize::new(0),
        };

        tracker.on_batch_start(2);
        tracker.on_row_complete(1, 2, Path::new("a.pdf"));
        tracker.on_row_error(2, 2, "render failed");
        tracker.on_batch_complete(2, 1);

        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.final_generated.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn BatchProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_batch_start(10);
        cb.on_row_complete(1, 10, Path::new("x.pdf"));
    }
}
