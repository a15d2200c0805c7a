//! The busy indicator for long merge-and-save steps.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run `task` on one worker thread while the foreground polls for
/// completion to keep a spinner responsive.
///
/// UI responsiveness only: there is no parallelism across files and no
/// cancellation once the task starts.
pub fn with_spinner<T, F>(message: &str, task: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message.to_string());
    std::thread::scope(|scope| {
        let handle = scope.spawn(task);
        while !handle.is_finished() {
            spinner.tick();
            std::thread::sleep(POLL_INTERVAL);
        }
        let result = match handle.join() {
            Ok(value) => value,
            Err(panic) => std::panic::resume_unwind(panic),
        };
        spinner.finish_and_clear();
        result
    })
}
