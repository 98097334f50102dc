//! Time-based animation engine
//!
//! - `easing` - Bezier easing curves (linear, ease-in, ease-out, ease-in-out, custom)
//! - `clock` - Monotonic frame clocks and time helpers
//! - `scheduler` - Task queue drained once per frame
//! - `frame` - Frame request queue driven by the host event loop
//!
//! # Usage
//!
//! ```ignore
//! use std::rc::Rc;
//! use std::time::Duration;
//! use slotreel_core::animation::{AnimationTask, EasingCurve, FrameHost, MonotonicClock};
//!
//! let host = FrameHost::new(Rc::new(MonotonicClock::new()));
//! let scheduler = host.scheduler();
//! scheduler.schedule(
//!     AnimationTask::new(Duration::from_millis(800))
//!         .with_easing(EasingCurve::EaseOut)
//!         .on_progress(|p| println!("{p:.2}")),
//! )?;
//! scheduler.on_completion(|| println!("done")).start(&host);
//!
//! // In the event loop, once per repaint
//! host.run_frame();
//! ```

pub mod clock;
pub mod easing;
pub mod frame;
pub mod scheduler;

pub use clock::{FrameClock, ManualClock, MonotonicClock};
pub use easing::{evaluate, EasingCurve, Point};
pub use frame::FrameHost;
pub use scheduler::{AnimationTask, FrameStatus, ScheduleError, Scheduler};
