// scheduler.rs - Cancellable fixed-interval tick source for auto-play

use std::io;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config;

/// Drives auto-play: fires a callback once per interval until cancelled.
///
/// The driver owns the scheduler and with it the cancellation. The callback
/// runs on a background task, so it should only post a wakeup to the driver's
/// thread; the driver performs the actual step there, where its `running`
/// check discards any tick that raced a stop.
pub struct TickScheduler {
    runtime: Runtime,
    active: Option<ActiveTicks>,
}

struct ActiveTicks {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl TickScheduler {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            runtime: Runtime::new()?,
            active: None,
        })
    }

    /// Begin ticking, replacing any previous schedule. The interval is
    /// clamped to the configured speed bounds; the first tick fires one full
    /// interval after this call.
    pub fn start(&mut self, interval: Duration, mut on_tick: impl FnMut() + Send + 'static) {
        self.cancel();
        let interval = interval.clamp(
            Duration::from_millis(config::SPEED_MIN_MS),
            Duration::from_millis(config::SPEED_MAX_MS),
        );
        log::debug!("ticking every {interval:?}");

        let (cancel, mut cancelled) = watch::channel(false);
        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the zeroth tick of a tokio interval completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = cancelled.changed() => break,
                    _ = ticker.tick() => on_tick(),
                }
            }
        });
        self.active = Some(ActiveTicks { cancel, task });
    }

    /// Stop ticking. Idempotent. The pending wait is abandoned, so no
    /// further callback fires once this returns.
    pub fn cancel(&mut self) {
        if let Some(ticks) = self.active.take() {
            let _ = ticks.cancel.send(true);
            ticks.task.abort();
            log::debug!("tick schedule cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    const TICK_MS: u64 = 20;

    #[test]
    fn ticks_fire_while_scheduled() {
        let mut scheduler = TickScheduler::new().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        scheduler.start(Duration::from_millis(TICK_MS), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert!(scheduler.is_active());

        thread::sleep(Duration::from_millis(TICK_MS * 10));
        assert!(count.load(Ordering::SeqCst) >= 2, "expected some ticks");
    }

    #[test]
    fn cancel_stops_ticks() {
        let mut scheduler = TickScheduler::new().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        scheduler.start(Duration::from_millis(TICK_MS), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        thread::sleep(Duration::from_millis(TICK_MS * 5));
        scheduler.cancel();
        assert!(!scheduler.is_active());

        // settle, then verify no callback fires anymore
        thread::sleep(Duration::from_millis(TICK_MS * 2));
        let after_cancel = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(TICK_MS * 5));
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn restarting_replaces_the_previous_schedule() {
        let mut scheduler = TickScheduler::new().unwrap();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let seen = Arc::clone(&first);
        scheduler.start(Duration::from_millis(TICK_MS), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let seen = Arc::clone(&second);
        scheduler.start(Duration::from_millis(TICK_MS), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        thread::sleep(Duration::from_millis(TICK_MS * 8));
        scheduler.cancel();
        thread::sleep(Duration::from_millis(TICK_MS * 2));
        assert!(first.load(Ordering::SeqCst) <= 1, "old schedule kept firing");
        assert!(second.load(Ordering::SeqCst) >= 2);
    }
}
