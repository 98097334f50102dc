use std::rc::Rc;

use anyhow::Result;
use ratatui::layout::Rect;
use slotreel_core::animation::{FrameClock, FrameHost, MonotonicClock};
use slotreel_core::game::SpinResult;
use slotreel_core::{AppConfig, Error, SlotMachine};

use crate::input::Action;
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Reels in front, spinning allowed
    Normal,
    /// Paytable overlay
    Paytable,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: AppConfig,
    pub machine: SlotMachine,
    /// Drives every animation from the terminal loop
    pub host: FrameHost,
    pub theme: Theme,
    /// Current application mode
    pub mode: Mode,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Transient warning shown in place of the last result
    pub status_message: Option<String>,
    /// Area the reels were last laid out in
    reel_area: Option<Rect>,
    was_spinning: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let clock: Rc<dyn FrameClock> = Rc::new(MonotonicClock::new());
        Self::with_host(config, FrameHost::new(clock))
    }

    /// Build on a caller-provided frame host, e.g. one on a manual clock
    pub fn with_host(config: AppConfig, host: FrameHost) -> Result<Self> {
        let machine = SlotMachine::new(&config)?;
        Ok(Self {
            config,
            machine,
            host,
            theme: Theme::default(),
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            reel_area: None,
            was_spinning: false,
        })
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Spin => self.spin(),
            Action::TogglePaytable => {
                self.mode = match self.mode {
                    Mode::Normal => Mode::Paytable,
                    Mode::Paytable => Mode::Normal,
                };
            }
            Action::ExitMode => self.mode = Mode::Normal,
            Action::None => {}
        }
    }

    /// Pull the lever
    pub fn spin(&mut self) {
        match self.machine.spin(&self.host) {
            Ok(()) => {
                self.was_spinning = true;
                self.clear_status();
            }
            Err(Error::SpinInProgress) => {
                self.set_status("Reels are still spinning");
            }
            Err(e) => {
                tracing::error!("Spin failed: {}", e);
                self.set_status(format!("Spin failed: {}", e));
            }
        }
    }

    /// Run one animation frame if anything is pending
    ///
    /// Returns true when the screen needs a redraw.
    pub fn update_animations(&mut self) -> bool {
        if self.host.is_idle() {
            return self.machine.take_dirty();
        }

        self.host.run_frame();

        // The status bar shows the settled result once warnings are cleared
        if self.was_spinning && !self.machine.is_spinning() {
            self.was_spinning = false;
            self.clear_status();
        }

        // Balance fades redraw every frame, reels flag themselves
        self.machine.take_dirty();
        true
    }

    /// Whether the loop should poll at the animation frame rate
    pub fn needs_animation_frame(&self) -> bool {
        !self.host.is_idle()
    }

    /// Lay the reels out for `area`, only when it changed
    pub fn ensure_layout(&mut self, area: Rect) {
        if self.reel_area == Some(area) {
            return;
        }
        self.reel_area = Some(area);
        self.machine
            .layout(f64::from(area.width), f64::from(area.height), 0.0);
    }

    /// Forget the last layout so the next draw recomputes it
    pub fn invalidate_layout(&mut self) {
        self.reel_area = None;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// One-line summary of a settled spin
pub fn describe_result(result: &SpinResult) -> String {
    let [a, b, c] = result.values;
    if result.combo.is_win() {
        format!("{} {} {}  {}  +{}", a, b, c, result.combo.weight, result.winnings)
    } else {
        format!("{} {} {}  no win", a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use slotreel_core::animation::ManualClock;

    use super::*;

    fn manual_app() -> (Rc<ManualClock>, App) {
        let clock = Rc::new(ManualClock::new());
        let mut config = AppConfig::default();
        config.game.seed = Some(5);
        let app = App::with_host(config, FrameHost::new(clock.clone())).unwrap();
        (clock, app)
    }

    #[test]
    fn test_toggle_paytable() {
        let (_, mut app) = manual_app();
        app.handle_action(Action::TogglePaytable);
        assert_eq!(app.mode, Mode::Paytable);
        app.handle_action(Action::TogglePaytable);
        assert_eq!(app.mode, Mode::Normal);
        app.handle_action(Action::TogglePaytable);
        app.handle_action(Action::ExitMode);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_spin_reports_result() {
        let (clock, mut app) = manual_app();
        app.ensure_layout(Rect::new(0, 0, 80, 20));
        app.handle_action(Action::Spin);
        assert!(app.needs_animation_frame());

        app.handle_action(Action::Spin);
        assert_eq!(app.status_message.as_deref(), Some("Reels are still spinning"));

        while app.needs_animation_frame() {
            clock.advance(Duration::from_millis(16));
            assert!(app.update_animations());
        }

        assert_eq!(app.status_message, None);
        let result = app.machine.last_result().unwrap();
        assert_eq!(result.values.len(), 3);
        assert!(!app.machine.is_spinning());
    }

    #[test]
    fn test_layout_only_on_change() {
        let (_, mut app) = manual_app();
        app.machine.take_dirty();
        let area = Rect::new(0, 0, 80, 20);

        app.ensure_layout(area);
        assert!(app.machine.take_dirty());
        app.ensure_layout(area);
        assert!(!app.machine.take_dirty());

        app.invalidate_layout();
        app.ensure_layout(area);
        assert!(app.machine.take_dirty());
        assert_eq!(app.machine.reel(0).unwrap().w, 20.0);
    }
}
