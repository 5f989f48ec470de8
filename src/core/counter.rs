use crate::domain::page::{ElementRef, WeakElementRef};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Nominal frame interval the per-frame increment is derived from.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub const DEFAULT_COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Handle to a running animation task. Dropping the handle leaves the task
/// running; `cancel` stops it mid-flight.
#[derive(Debug)]
pub struct AnimationHandle {
    task: JoinHandle<()>,
}

impl AnimationHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the task to stop, whether it ran to completion, was
    /// cancelled, or lost its element.
    pub async fn stopped(self) {
        let _ = self.task.await;
    }
}

/// Counts the element's text up from 0 to `target`, displayed as `"<n>+"`.
///
/// Each frame adds `target / (duration / 16ms)` to a float accumulator and
/// shows its floor; the terminal frame snaps to exactly `target` so frame
/// timing can never leave an off-by-one on screen. A zero target still takes
/// its one frame and settles on `"0+"`. The task holds the element weakly:
/// if the element is dropped mid-animation the loop stops on its next frame.
///
/// Calling this again for an element that already finished restarts the count
/// from 0.
pub fn animate(element: &ElementRef, target: u64, duration: Duration) -> AnimationHandle {
    let weak: WeakElementRef = Arc::downgrade(element);

    let task = tokio::spawn(async move {
        let frames = (duration.as_millis() as f64 / FRAME_INTERVAL.as_millis() as f64).max(1.0);
        let increment = target as f64 / frames;
        let mut interval = tokio::time::interval(FRAME_INTERVAL);
        let mut current = 0.0_f64;

        loop {
            interval.tick().await;

            let Some(element) = weak.upgrade() else {
                tracing::debug!("Counter target detached, stopping animation");
                break;
            };

            current += increment;
            if current >= target as f64 {
                if let Ok(mut element) = element.lock() {
                    element.set_text(format!("{}+", target));
                }
                break;
            }
            if let Ok(mut element) = element.lock() {
                element.set_text(format!("{}+", current.floor() as u64));
            };
        }
    });

    AnimationHandle::new(task)
}
