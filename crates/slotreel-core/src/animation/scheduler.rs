//! Frame-driven animation scheduler
//!
//! Holds a queue of in-flight tasks. Each frame the queue is drained once:
//! every task computes its eased progress, calls its callback and goes back
//! on the queue for the next frame until its duration has elapsed. When the
//! queue runs dry the completion callbacks fire, once, in registration order.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;

use super::clock::{normalized_time, FrameClock};
use super::easing::EasingCurve;
use super::frame::FrameHost;

/// Progress callback, receives eased progress in [0, 1]
pub type ProgressFn = Box<dyn FnMut(f64)>;
/// Runs once when a scheduler's queue empties
pub type CompletionFn = Box<dyn FnOnce()>;

/// Rejected registration
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("animation task has no progress callback")]
    MissingCallback,
}

/// Whether a scheduler needs another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Pending,
    Finished,
}

/// Description of an animation to schedule
pub struct AnimationTask {
    callback: Option<ProgressFn>,
    duration: Duration,
    easing: EasingCurve,
}

impl AnimationTask {
    /// Linear task with no callback yet
    pub fn new(duration: Duration) -> Self {
        Self {
            callback: None,
            duration,
            easing: EasingCurve::Linear,
        }
    }

    pub fn with_easing(mut self, easing: EasingCurve) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_progress(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn easing(&self) -> &EasingCurve {
        &self.easing
    }
}

impl fmt::Debug for AnimationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationTask")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// A task owned by the scheduler
struct ActiveTask {
    callback: ProgressFn,
    duration: Duration,
    easing: EasingCurve,
    /// Clock reading when the task was scheduled
    start: Duration,
}

impl ActiveTask {
    /// Run one frame. Returns true while the task still has time left.
    fn step(&mut self, timestamp: Duration) -> bool {
        let elapsed = timestamp.saturating_sub(self.start).min(self.duration);
        let t = normalized_time(elapsed, self.duration);
        (self.callback)(self.easing.progress(t));
        elapsed < self.duration
    }
}

#[derive(Default)]
struct SchedulerState {
    tasks: VecDeque<ActiveTask>,
    running: bool,
    completions: Vec<CompletionFn>,
}

/// Handle to one animation sequence
///
/// Clones share the same queue, so a caller can keep its handle after
/// passing the scheduler to a [`FrameHost`]. Not thread-safe by design of
/// the frame loop: everything runs on the thread that owns the host.
#[derive(Clone)]
pub struct Scheduler {
    state: Rc<RefCell<SchedulerState>>,
    clock: Rc<dyn FrameClock>,
}

impl Scheduler {
    pub fn new(clock: Rc<dyn FrameClock>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchedulerState::default())),
            clock,
        }
    }

    /// Queue a task; its start time is the clock reading now
    pub fn schedule(&self, task: AnimationTask) -> Result<&Self, ScheduleError> {
        let AnimationTask {
            callback,
            duration,
            easing,
        } = task;

        let Some(callback) = callback else {
            tracing::warn!(?duration, "Rejected animation task without callback");
            return Err(ScheduleError::MissingCallback);
        };

        let start = self.clock.now();
        tracing::debug!(?duration, %easing, ?start, "Scheduled animation task");

        self.state.borrow_mut().tasks.push_back(ActiveTask {
            callback,
            duration,
            easing,
            start,
        });
        Ok(self)
    }

    /// Register a callback for when every task has finished
    pub fn on_completion(&self, callback: impl FnOnce() + 'static) -> &Self {
        self.state.borrow_mut().completions.push(Box::new(callback));
        self
    }

    /// Mark running and ask the host for a frame. No-op while running.
    pub fn start(&self, host: &FrameHost) -> &Self {
        {
            let mut state = self.state.borrow_mut();
            if state.running {
                return self;
            }
            state.running = true;
        }
        host.request(self.clone());
        self
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /// Number of tasks waiting for the next frame
    pub fn pending_tasks(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Run one frame at `timestamp`
    ///
    /// Only tasks queued before the frame began are stepped. Tasks that still
    /// have time left run again next frame, followed by any task scheduled
    /// from inside a callback during this frame.
    ///
    /// A scheduler that was never started, or has already finished, is not
    /// stepped and fires no completions.
    pub fn tick(&self, timestamp: Duration) -> FrameStatus {
        if !self.state.borrow().running {
            return FrameStatus::Finished;
        }

        // The borrow is released before callbacks run so they may schedule
        // work or register completions on this same scheduler.
        let batch = std::mem::take(&mut self.state.borrow_mut().tasks);

        let mut carried = VecDeque::with_capacity(batch.len());
        for mut task in batch {
            if task.step(timestamp) {
                carried.push_back(task);
            }
        }

        let completions = {
            let mut state = self.state.borrow_mut();
            carried.append(&mut state.tasks);
            state.tasks = carried;

            if !state.tasks.is_empty() {
                return FrameStatus::Pending;
            }

            state.running = false;
            std::mem::take(&mut state.completions)
        };

        tracing::debug!(callbacks = completions.len(), "Animation sequence finished");
        for callback in completions {
            callback();
        }
        FrameStatus::Finished
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Scheduler")
            .field("tasks", &state.tasks.len())
            .field("running", &state.running)
            .field("completions", &state.completions.len())
            .finish()
    }
}
