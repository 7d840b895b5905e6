use bindscan::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const TICK_INTERVAL: Duration = Duration::from_millis(100);

struct BarState {
    bar: ProgressBar,
    phase: &'static str,
    failed: Vec<String>,
}

impl BarState {
    fn apply(&mut self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => {
                self.phase = name;
                self.bar.reset();
                self.bar.set_length(0);
                self.bar.set_style(spinner_style());
                self.bar.set_message(format!("{}...", name));
                self.bar.enable_steady_tick(TICK_INTERVAL);
            }
            Progress::TaskStart { total_steps } => {
                self.bar.disable_steady_tick();
                self.bar.reset();
                self.bar.set_style(bar_style());
                self.bar.set_length(total_steps);
                self.bar.set_message(self.phase);
            }
            Progress::TaskIncrement => self.bar.inc(1),
            Progress::ItemFailed { pdb_id, reason } => {
                self.bar.suspend(|| eprintln!("  ✗ {}: {}", pdb_id, reason));
                self.failed.push(pdb_id);
                self.bar
                    .set_message(format!("{} ({} failed)", self.phase, self.failed.len()));
            }
            Progress::TaskFinish => {
                let total = self.bar.length().unwrap_or(0);
                self.bar.set_position(total);
                self.bar.finish();
            }
            Progress::PhaseFinish => {
                self.bar.disable_steady_tick();
                self.bar
                    .finish_with_message(format!("✓ {} finished", self.phase));
            }
            Progress::Message(text) if self.bar.is_finished() => self.bar.set_message(text),
            Progress::Message(text) => self.bar.println(format!("  {}", text)),
        }
    }
}

/// Renders engine progress events on stderr and remembers which entries failed.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        bar.finish_and_clear();
        Self {
            state: Arc::new(Mutex::new(BarState {
                bar,
                phase: "",
                failed: Vec::new(),
            })),
        }
    }

    /// Identifiers reported through [`Progress::ItemFailed`], in arrival order.
    pub fn failed_ids(&self) -> Vec<String> {
        match self.state.lock() {
            Ok(state) => state.failed.clone(),
            Err(_) => Vec::new(),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = Arc::clone(&self.state);
        Box::new(move |event: Progress| match state.lock() {
            Ok(mut guard) => guard.apply(event),
            Err(_) => warn!("Progress state lock was poisoned; dropping event."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .expect("Failed to create spinner style template")
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{msg:<24} [{bar:36.green/white}] {pos}/{len} [{elapsed_precise}] {rate}",
    )
    .expect("Failed to create bar style template")
    .with_key("rate", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
        let _ = write!(w, "{:.1}/s", state.per_sec());
    })
    .progress_chars("=> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden() -> CliProgressHandler {
        CliProgressHandler::with_target(ProgressDrawTarget::hidden())
    }

    fn bar_of(handler: &CliProgressHandler) -> ProgressBar {
        handler.state.lock().unwrap().bar.clone()
    }

    #[test]
    fn new_handler_has_a_finished_empty_bar() {
        let handler = hidden();
        let bar = bar_of(&handler);
        assert!(bar.is_finished());
        assert_eq!(bar.length(), Some(0));
        assert!(handler.failed_ids().is_empty());
    }

    #[test]
    fn phase_and_task_events_drive_the_bar() {
        let handler = hidden();
        let report = handler.get_callback();

        report(Progress::PhaseStart { name: "Resolution" });
        assert_eq!(bar_of(&handler).message(), "Resolution...");

        report(Progress::TaskStart { total_steps: 4 });
        report(Progress::TaskIncrement);
        report(Progress::TaskIncrement);
        let bar = bar_of(&handler);
        assert_eq!((bar.position(), bar.length()), (2, Some(4)));
        assert_eq!(bar.message(), "Resolution");

        report(Progress::TaskFinish);
        assert_eq!(bar_of(&handler).position(), 4);

        report(Progress::PhaseFinish);
        let bar = bar_of(&handler);
        assert!(bar.is_finished());
        assert_eq!(bar.message(), "✓ Resolution finished");
    }

    #[test]
    fn failed_items_are_recorded_and_counted_in_the_message() {
        let handler = hidden();
        let report = handler.get_callback();

        report(Progress::PhaseStart { name: "Resolution" });
        report(Progress::TaskStart { total_steps: 3 });
        report(Progress::ItemFailed {
            pdb_id: "9ZZZ".to_string(),
            reason: "no result document".to_string(),
        });
        report(Progress::ItemFailed {
            pdb_id: "1ABC".to_string(),
            reason: "missing sequence".to_string(),
        });

        assert_eq!(handler.failed_ids(), vec!["9ZZZ", "1ABC"]);
        assert_eq!(bar_of(&handler).message(), "Resolution (2 failed)");
    }

    #[test]
    fn message_after_finish_replaces_the_bar_text() {
        let handler = hidden();
        let report = handler.get_callback();

        report(Progress::Message("summary written".to_string()));
        assert_eq!(bar_of(&handler).message(), "summary written");
    }

    #[test]
    fn events_from_worker_threads_reach_the_shared_state() {
        let handler = hidden();
        let report = handler.get_callback();

        std::thread::scope(|scope| {
            scope.spawn(|| {
                report(Progress::TaskStart { total_steps: 2 });
                report(Progress::TaskIncrement);
            });
        });
        report(Progress::TaskIncrement);

        assert_eq!(bar_of(&handler).position(), 2);
    }
}
