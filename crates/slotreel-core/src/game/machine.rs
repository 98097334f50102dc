//! Spin orchestration
//!
//! One spin debits the bet, fades the balance, runs the three reels on a
//! shared scheduler with staggered stop times and, once every reel has
//! settled, prices the line, credits the win and fades the balance again.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::combo::check_combo;
use super::paytable::Paytable;
use super::session::{GameSession, SpinResult};
use crate::animation::{AnimationTask, EasingCurve, FrameHost, Scheduler};
use crate::config::{AppConfig, StyleConfig, TimingConfig};
use crate::error::{Error, Result};
use crate::reel::{Reel, ReelSettings, ReelStyle, Symbol};
use crate::surface::DrawingSurface;

/// Number of reels on the machine
pub const REEL_COUNT: usize = 3;

/// Progress past which a reel counts as settled
const SETTLE_THRESHOLD: f64 = 0.99;

/// Share of the container taken by one reel
const REEL_WIDTH_RATIO: f64 = 0.25;
const REEL_HEIGHT_RATIO: f64 = 0.35;
const REEL_TOP_RATIO: f64 = 0.2;

impl From<&StyleConfig> for ReelStyle {
    fn from(style: &StyleConfig) -> Self {
        Self {
            glow: style.glow.clone(),
            fill: style.fill.clone(),
            glow_blur: style.glow_blur,
            line_width: style.line_width,
        }
    }
}

/// Reel geometry for a container of `width` x `height`
///
/// Reels sit side by side starting half a reel width in from the left, a
/// fifth of the way down plus half the height of the header above them.
pub fn layout_reels(width: f64, height: f64, header: f64) -> [ReelSettings; REEL_COUNT] {
    let w = width * REEL_WIDTH_RATIO;
    let h = height * REEL_HEIGHT_RATIO;
    let y = height * REEL_TOP_RATIO + header / 2.0;

    let mut x = w / 2.0;
    std::array::from_fn(|_| {
        let settings = ReelSettings::new().position(x, y).size(w, h);
        x += w;
        settings
    })
}

pub struct SlotMachine {
    session: Rc<RefCell<GameSession>>,
    reels: [Rc<RefCell<Reel>>; REEL_COUNT],
    paytable: Rc<Paytable>,
    timing: TimingConfig,
    rng: StdRng,
    /// Set by the spin's trailing render task, cleared by the host
    dirty: Rc<Cell<bool>>,
}

impl SlotMachine {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let rng = match config.game.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let paytable = config
            .paytable
            .as_ref()
            .map(Paytable::from_config)
            .unwrap_or_default();
        Self::with_parts(config, paytable, rng)
    }

    /// Build with an explicit paytable and RNG
    pub fn with_parts(config: &AppConfig, paytable: Paytable, rng: StdRng) -> Result<Self> {
        if config.game.bet == 0 {
            return Err(Error::Config("bet must be at least 1".to_string()));
        }

        let session = GameSession::new(&config.game);
        let style = ReelStyle::from(&config.style);

        let mut reels = Vec::with_capacity(REEL_COUNT);
        for _ in 0..REEL_COUNT {
            let reel = Reel::new(session.values.clone(), ReelSettings::new())?.with_style(style.clone());
            reels.push(Rc::new(RefCell::new(reel)));
        }
        let reels: [Rc<RefCell<Reel>>; REEL_COUNT] = reels
            .try_into()
            .map_err(|_| Error::Other("reel count mismatch".to_string()))?;

        Ok(Self {
            session: Rc::new(RefCell::new(session)),
            reels,
            paytable: Rc::new(paytable),
            timing: config.timing.clone(),
            rng,
            dirty: Rc::new(Cell::new(true)),
        })
    }

    pub fn session(&self) -> Ref<'_, GameSession> {
        self.session.borrow()
    }

    pub fn reel(&self, index: usize) -> Option<Ref<'_, Reel>> {
        self.reels.get(index).map(|reel| reel.borrow())
    }

    /// Outcome of the most recently settled spin
    pub fn last_result(&self) -> Option<SpinResult> {
        self.session.borrow().last_result.clone()
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    #[inline]
    pub fn is_spinning(&self) -> bool {
        self.session.borrow().spinning
    }

    /// Whether a redraw was requested since the last call
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Reposition the reels for a resized container, keeping their rotation
    pub fn layout(&self, width: f64, height: f64, header: f64) {
        for (reel, settings) in self.reels.iter().zip(layout_reels(width, height, header)) {
            reel.borrow_mut().setting(settings);
        }
        self.dirty.set(true);
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface) {
        for reel in &self.reels {
            reel.borrow().draw(surface);
        }
    }

    /// Start a spin on `host`
    ///
    /// Fails with [`Error::SpinInProgress`] until the previous spin has
    /// settled.
    pub fn spin(&mut self, host: &FrameHost) -> Result<()> {
        let reel_len = {
            let mut session = self.session.borrow_mut();
            if session.spinning {
                return Err(Error::SpinInProgress);
            }
            session.spinning = true;
            if session.debit_bet() {
                tracing::info!(cash = session.cash + session.bet, "Balance refilled");
            }
            tracing::debug!(cash = session.cash, bet = session.bet, "Spin started");
            session.values.len()
        };

        start_balance_fade(host, &self.session, self.timing.balance_fade())?;

        let scheduler = host.scheduler();
        let durations: [Duration; REEL_COUNT] = self.timing.reel_durations();

        for (i, (reel, duration)) in self.reels.iter().zip(durations).enumerate() {
            // At least one full revolution per reel position, more for later reels
            let target = (self.rng.gen_range(0..reel_len) + reel_len * (i + 1)) as f64;
            self.session.borrow_mut().targets[i] = target;

            let reel = reel.clone();
            scheduler.schedule(
                AnimationTask::new(duration)
                    .with_easing(self.timing.reel_easing.clone())
                    .on_progress(move |progress| {
                        let mut reel = reel.borrow_mut();
                        reel.turn(target * progress);
                        reel.set_stopped(progress > SETTLE_THRESHOLD);
                    }),
            )?;
        }

        let dirty = self.dirty.clone();
        let last = durations[REEL_COUNT - 1];
        scheduler.schedule(AnimationTask::new(last).on_progress(move |_| dirty.set(true)))?;

        let settle = SettleStep {
            host: host.clone(),
            session: self.session.clone(),
            reels: self.reels.clone(),
            paytable: self.paytable.clone(),
            fade: self.timing.balance_fade(),
        };
        scheduler.on_completion(move || settle.run());
        scheduler.start(host);

        Ok(())
    }
}

/// Work done once every reel has stopped
struct SettleStep {
    host: FrameHost,
    session: Rc<RefCell<GameSession>>,
    reels: [Rc<RefCell<Reel>>; REEL_COUNT],
    paytable: Rc<Paytable>,
    fade: Duration,
}

impl SettleStep {
    fn run(self) {
        let values: [Symbol; REEL_COUNT] = std::array::from_fn(|i| self.reels[i].borrow().current_value());
        let combo = check_combo(values);

        let result = {
            let mut session = self.session.borrow_mut();
            let winnings = self.paytable.payout(&combo, session.bet);
            let result = session.settle(values, combo, winnings);
            session.spinning = false;
            result
        };
        log_result(&result);

        if let Err(e) = start_balance_fade(&self.host, &self.session, self.fade) {
            tracing::warn!("Failed to start balance fade: {}", e);
        }
    }
}

fn log_result(result: &SpinResult) {
    if result.winnings > 0 {
        tracing::info!(
            values = ?result.values,
            weight = ?result.combo.weight,
            winnings = result.winnings,
            cash = result.cash,
            "Spin won"
        );
    } else {
        tracing::debug!(values = ?result.values, cash = result.cash, "Spin lost");
    }
}

/// Fade the displayed balance out and back in showing the current cash
fn start_balance_fade(
    host: &FrameHost,
    session: &Rc<RefCell<GameSession>>,
    duration: Duration,
) -> Result<Scheduler> {
    let scheduler = host.scheduler();
    let session = session.clone();
    scheduler.schedule(
        AnimationTask::new(duration)
            .with_easing(EasingCurve::Linear)
            .on_progress(move |progress| {
                let mut session = session.borrow_mut();
                let cash = session.cash;
                session.display.fade(progress, cash);
            }),
    )?;
    scheduler.start(host);
    Ok(scheduler)
}
