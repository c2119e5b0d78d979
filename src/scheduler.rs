//! Periodic refresh driver with single-stream cancellation.
//!
//! The defect this design rules out: a location change fires off a fetch for
//! the new coordinates while the old once-per-second tick is still alive, and
//! a stale tick computed against the old timezone lands after the fresh data
//! does. The scheduler therefore owns at most one tick worker at a time, and
//! every replacement goes cancel-old, then mutate state, then start-new.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration as StdDuration, Instant};

/// Granularity at which a sleeping tick worker rechecks its cancel flag.
const CANCEL_POLL_MS: u64 = 25;

/// Two-state (Idle/Ticking) periodic scheduler.
///
/// `Ticking` is represented by ownership of the single worker handle; there
/// is no state in which two workers exist. `stop` joins the worker before
/// returning, so once it returns no further tick can fire.
pub struct RefreshScheduler {
    active: Option<TickWorker>,
}

struct TickWorker {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// Whether a tick stream is currently running.
    pub fn is_ticking(&self) -> bool {
        self.active.is_some()
    }

    /// Begin periodic invocation of `tick`.
    ///
    /// The first invocation fires immediately on the worker thread rather
    /// than after one interval, so displayed state is never stale on entry.
    /// Subsequent invocations are scheduled against the stream's start
    /// instant, not the end of the previous tick, so the cadence does not
    /// drift as tick work accumulates.
    ///
    /// Calling `start` while already ticking is a misuse; it logs and leaves
    /// the running stream untouched rather than spawning a second one.
    pub fn start<F>(&mut self, interval: StdDuration, mut tick: F)
    where
        F: FnMut() + Send + 'static,
    {
        if self.active.is_some() {
            log_warning!("Refresh scheduler already ticking, ignoring start request");
            return;
        }

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_for_worker = Arc::clone(&cancel);

        let handle = std::thread::spawn(move || {
            let started = Instant::now();
            let mut fired: u32 = 0;

            loop {
                if cancel_for_worker.load(Ordering::SeqCst) {
                    break;
                }

                tick();
                fired += 1;

                // Sleep until the next deadline in short slices so
                // cancellation never waits out a full interval
                let deadline = started + interval * fired;
                loop {
                    if cancel_for_worker.load(Ordering::SeqCst) {
                        return;
                    }
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    let remaining = deadline - now;
                    crate::time_source::sleep(
                        remaining.min(StdDuration::from_millis(CANCEL_POLL_MS)),
                    );
                }
            }
        });

        self.active = Some(TickWorker { cancel, handle });
    }

    /// Cancel the running tick stream and wait for its worker to finish.
    /// Idempotent when already idle.
    pub fn stop(&mut self) {
        if let Some(worker) = self.active.take() {
            worker.cancel.store(true, Ordering::SeqCst);
            let _ = worker.handle.join();
        }
    }
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Log;
    use std::sync::atomic::AtomicUsize;

    fn counted_start(scheduler: &mut RefreshScheduler, interval_ms: u64) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let count_for_tick = Arc::clone(&count);
        scheduler.start(StdDuration::from_millis(interval_ms), move || {
            count_for_tick.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_first_tick_fires_immediately() {
        let mut scheduler = RefreshScheduler::new();
        let count = counted_start(&mut scheduler, 60_000);
        // Generous spin: the worker only needs to be scheduled once
        let deadline = Instant::now() + StdDuration::from_secs(2);
        while count.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(StdDuration::from_millis(5));
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
        scheduler.stop();
    }

    #[test]
    fn test_ticks_repeat_at_interval() {
        let mut scheduler = RefreshScheduler::new();
        let count = counted_start(&mut scheduler, 20);
        std::thread::sleep(StdDuration::from_millis(150));
        scheduler.stop();
        let fired = count.load(Ordering::SeqCst);
        assert!(fired >= 3, "expected repeated ticks, got {fired}");
    }

    #[test]
    fn test_stop_halts_ticking() {
        let mut scheduler = RefreshScheduler::new();
        let count = counted_start(&mut scheduler, 10);
        std::thread::sleep(StdDuration::from_millis(50));
        scheduler.stop();
        assert!(!scheduler.is_ticking());
        let after_stop = count.load(Ordering::SeqCst);
        std::thread::sleep(StdDuration::from_millis(60));
        // stop() joined the worker, so the count cannot advance afterwards
        assert_eq!(count.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn test_stop_is_idempotent_when_idle() {
        let mut scheduler = RefreshScheduler::new();
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_ticking());
    }

    #[test]
    fn test_start_while_ticking_is_a_no_op() {
        Log::set_enabled(false);
        let mut scheduler = RefreshScheduler::new();
        let first = counted_start(&mut scheduler, 10);
        let second = counted_start(&mut scheduler, 10);
        std::thread::sleep(StdDuration::from_millis(50));
        scheduler.stop();
        Log::set_enabled(true);
        assert!(first.load(Ordering::SeqCst) >= 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_restart_replaces_the_stream() {
        // P6 shape: after a stop/start cycle exactly one stream advances
        let mut scheduler = RefreshScheduler::new();
        let old = counted_start(&mut scheduler, 10);
        std::thread::sleep(StdDuration::from_millis(40));
        scheduler.stop();
        let old_final = old.load(Ordering::SeqCst);

        let new = counted_start(&mut scheduler, 10);
        std::thread::sleep(StdDuration::from_millis(60));
        scheduler.stop();

        assert_eq!(old.load(Ordering::SeqCst), old_final);
        assert!(new.load(Ordering::SeqCst) >= 2);
    }
}
