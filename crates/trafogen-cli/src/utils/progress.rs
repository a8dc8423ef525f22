use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use trafogen::engine::progress::ProgressCallback;

/// Bridges the library's `(done, total)` progress callback onto an indicatif
/// bar on stderr.
///
/// The generation stages report against their own totals, so the bar length
/// is re-synced on every tick.
pub struct SweepProgressHandler {
    pb: ProgressBar,
}

impl SweepProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        Self { pb }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        Box::new(move |done, total| {
            if pb.length() != Some(total) {
                pb.set_length(total);
            }
            pb.set_position(done);
            true
        })
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<12} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap()
                },
            )
            .progress_chars("##-")
    }
}

impl Default for SweepProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
