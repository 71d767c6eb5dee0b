use crate::facts::Progress;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinHandle;

type ProgressCallback = Box<dyn Fn() -> (u64, u64, String) + Send + Sync>;

/// Refresh rate for progress updates (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const PAGES_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";
const PAGES_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {msg}";
const SPINNER_TEMPLATE: &str = "{prefix:>12.bold.cyan} {spinner} {msg}";
const SPINNER_TEMPLATE_NO_COLOR: &str = "{prefix:>12} {spinner} {msg}";

/// Shared between the reporter and its refresh task.
#[derive(Debug)]
struct Visibility {
    visible_after: Instant,
    visible: AtomicBool,
}

impl Visibility {
    /// Flip to visible once the delay has passed. Returns whether the bar is visible.
    fn check(&self, bar: &ProgressBar) -> bool {
        if self.visible.load(Ordering::Relaxed) {
            return true;
        }

        if Instant::now() < self.visible_after {
            return false;
        }

        self.visible.store(true, Ordering::Relaxed);
        bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        true
    }
}

/// Download indicator on stderr that stays hidden for quick runs.
///
/// Nothing is drawn until `delay` has elapsed, so fetching a handful of pages produces no output at all.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    visibility: Arc<Visibility>,
    callback: Arc<Mutex<ProgressCallback>>,
    refresh_task: Arc<JoinHandle<()>>,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter. Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();

        let visibility = Arc::new(Visibility {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
        });

        let callback = Arc::new(Mutex::new(Box::new(|| (0u64, 0u64, String::new())) as ProgressCallback));

        Self {
            refresh_task: Arc::new(tokio::spawn(refresh_task(bar.clone(), Arc::clone(&visibility), Arc::clone(&callback)))),
            bar,
            visibility,
            callback,
            use_colors,
        }
    }

    fn template(&self, colored: &'static str, plain: &'static str) -> &'static str {
        if self.use_colors { colored } else { plain }
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
    }

    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>) {
        *self.callback.lock().expect("lock poisoned") = callback;
        self.bar.disable_steady_tick();
        self.bar.set_length(0);
        self.bar.set_position(0);

        if let Ok(style) = ProgressStyle::default_bar().template(self.template(PAGES_TEMPLATE, PAGES_TEMPLATE_NO_COLOR)) {
            self.bar.set_style(style.progress_chars("=> "));
        }
    }

    fn set_indeterminate(&self, callback: Box<dyn Fn() -> String + Send + Sync + 'static>) {
        *self.callback.lock().expect("lock poisoned") = Box::new(move || (0, 0, callback()));
        self.bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));

        if let Ok(style) = ProgressStyle::default_spinner().template(self.template(SPINNER_TEMPLATE, SPINNER_TEMPLATE_NO_COLOR)) {
            self.bar.set_style(style);
        }
    }

    fn done(&self) {
        self.refresh_task.abort();
        if self.visibility.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("visibility", &self.visibility)
            .field("callback", &"<callback>")
            .field("refresh_task", &"<task>")
            .field("use_colors", &self.use_colors)
            .finish()
    }
}

/// Background refresh task that periodically updates the progress bar.
async fn refresh_task(bar: ProgressBar, visibility: Arc<Visibility>, callback: Arc<Mutex<ProgressCallback>>) {
    let mut interval = tokio::time::interval(Duration::from_millis(REFRESH_INTERVAL_MS));
    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !visibility.check(&bar) {
            continue;
        }

        let (length, position, message) = {
            let callback_guard = callback.lock().expect("lock poisoned");
            callback_guard()
        };

        if length > 0 {
            bar.set_length(length);
            bar.set_position(position);
        }
        bar.set_message(message);
    }
}
