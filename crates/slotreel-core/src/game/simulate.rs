//! Headless play on a manual clock
//!
//! Runs spins frame by frame at a fixed frame interval without a terminal,
//! exactly as the interactive loop would.

use std::rc::Rc;
use std::time::Duration;

use super::machine::SlotMachine;
use super::session::SpinResult;
use crate::animation::clock::frame_interval;
use crate::animation::{FrameHost, ManualClock};
use crate::config::AppConfig;
use crate::error::{Error, Result};

/// Upper bound on frames for one spin, well past any sane spin length
const MAX_FRAMES_PER_SPIN: usize = 100_000;

pub struct Simulation {
    clock: Rc<ManualClock>,
    host: FrameHost,
    machine: SlotMachine,
    frame: Duration,
    frames: u64,
}

impl Simulation {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let machine = SlotMachine::new(config)?;
        Ok(Self::with_machine(machine, frame_interval(config.timing.animation_fps)))
    }

    pub fn with_machine(machine: SlotMachine, frame: Duration) -> Self {
        let clock = Rc::new(ManualClock::new());
        let host = FrameHost::new(clock.clone());
        Self {
            clock,
            host,
            machine,
            frame,
            frames: 0,
        }
    }

    pub fn machine(&self) -> &SlotMachine {
        &self.machine
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated time elapsed so far
    pub fn elapsed(&self) -> Duration {
        use crate::animation::FrameClock;
        self.clock.now()
    }

    /// Spin once and run frames until every animation has finished
    pub fn spin_once(&mut self) -> Result<SpinResult> {
        self.machine.spin(&self.host)?;

        let mut frames = 0;
        while !self.host.is_idle() {
            if frames >= MAX_FRAMES_PER_SPIN {
                return Err(Error::Other(format!(
                    "spin did not settle within {} frames",
                    MAX_FRAMES_PER_SPIN
                )));
            }
            self.clock.advance(self.frame);
            self.host.run_frame();
            frames += 1;
        }
        self.frames += frames as u64;

        self.machine
            .session()
            .last_result
            .clone()
            .ok_or_else(|| Error::Other("spin finished without a result".to_string()))
    }
}
