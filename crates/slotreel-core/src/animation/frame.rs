//! Host side of the frame loop
//!
//! Plays the part of a browser's animation-frame queue: schedulers ask for
//! one frame at a time and the event loop calls [`FrameHost::run_frame`]
//! before each repaint.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::clock::FrameClock;
use super::scheduler::{FrameStatus, Scheduler};

/// Shared frame queue, cheap to clone
#[derive(Clone)]
pub struct FrameHost {
    clock: Rc<dyn FrameClock>,
    requested: Rc<RefCell<Vec<Scheduler>>>,
}

impl FrameHost {
    pub fn new(clock: Rc<dyn FrameClock>) -> Self {
        Self {
            clock,
            requested: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn clock(&self) -> Rc<dyn FrameClock> {
        self.clock.clone()
    }

    /// New scheduler reading this host's clock
    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.clock.clone())
    }

    /// Ask for `scheduler` to be ticked on the next frame
    pub fn request(&self, scheduler: Scheduler) {
        self.requested.borrow_mut().push(scheduler);
    }

    /// Whether any scheduler is waiting for a frame
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.requested.borrow().is_empty()
    }

    /// Number of schedulers waiting for the next frame
    pub fn pending(&self) -> usize {
        self.requested.borrow().len()
    }

    /// Run one frame stamped with the clock's current reading
    pub fn run_frame(&self) -> usize {
        self.run_frame_at(self.clock.now())
    }

    /// Run one frame at `timestamp`, returning how many schedulers ran
    ///
    /// Requests made while the frame runs, including a scheduler asking to
    /// continue, are served by the next frame.
    pub fn run_frame_at(&self, timestamp: Duration) -> usize {
        let batch = std::mem::take(&mut *self.requested.borrow_mut());
        let count = batch.len();

        for scheduler in batch {
            if scheduler.tick(timestamp) == FrameStatus::Pending {
                self.request(scheduler);
            }
        }

        count
    }
}

impl std::fmt::Debug for FrameHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameHost")
            .field("now", &self.clock.now())
            .field("requested", &self.requested.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::animation::clock::ManualClock;
    use crate::animation::scheduler::AnimationTask;

    fn host() -> (Rc<ManualClock>, FrameHost) {
        let clock = Rc::new(ManualClock::new());
        (clock.clone(), FrameHost::new(clock))
    }

    #[test]
    fn test_empty_scheduler_completes_on_next_frame() {
        let (_, host) = host();
        let done = Rc::new(Cell::new(false));
        let flag = done.clone();

        let scheduler = host.scheduler();
        scheduler.on_completion(move || flag.set(true));
        scheduler.start(&host);

        assert!(scheduler.is_running());
        assert!(!done.get());
        assert_eq!(host.run_frame(), 1);
        assert!(done.get());
        assert!(!scheduler.is_running());
        assert!(host.is_idle());
    }

    #[test]
    fn test_start_twice_requests_one_frame() {
        let (_, host) = host();
        let scheduler = host.scheduler();
        scheduler.start(&host).start(&host);
        assert_eq!(host.pending(), 1);
    }

    #[test]
    fn test_completion_registered_after_start_still_fires() {
        let (clock, host) = host();
        let done = Rc::new(Cell::new(0));

        let scheduler = host.scheduler();
        scheduler
            .schedule(AnimationTask::new(Duration::from_millis(32)).on_progress(|_| {}))
            .unwrap();
        scheduler.start(&host);

        clock.advance(Duration::from_millis(16));
        host.run_frame();

        let counter = done.clone();
        scheduler.on_completion(move || counter.set(counter.get() + 1));

        clock.advance(Duration::from_millis(16));
        host.run_frame();
        assert_eq!(done.get(), 1);

        host.run_frame();
        assert_eq!(done.get(), 1);
    }

    #[test]
    fn test_scheduler_started_from_completion_runs_next_frame() {
        let (_, host) = host();
        let second_done = Rc::new(Cell::new(false));

        let first = host.scheduler();
        let inner_host = host.clone();
        let flag = second_done.clone();
        first.on_completion(move || {
            let second = inner_host.scheduler();
            second.on_completion(move || flag.set(true));
            second.start(&inner_host);
        });
        first.start(&host);

        host.run_frame();
        assert!(!second_done.get());
        assert_eq!(host.pending(), 1);
        host.run_frame();
        assert!(second_done.get());
    }
}
