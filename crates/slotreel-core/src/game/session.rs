//! Per-player game state

use serde::Serialize;

use super::combo::ComboResult;
use crate::config::GameConfig;
use crate::reel::Symbol;

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: u64,
    pub total_win: u64,
    pub wins: u64,
    pub losses: u64,
    pub biggest_win: u64,
    /// Times the balance was topped back up
    pub refills: u64,
}

impl SessionStats {
    /// Return to player in percent
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_win as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Share of winning spins in percent
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record_bet(&mut self, bet: u64) {
        self.total_spins += 1;
        self.total_bet += bet;
    }

    fn record_result(&mut self, winnings: u64) {
        if winnings > 0 {
            self.wins += 1;
            self.total_win += winnings;
            self.biggest_win = self.biggest_win.max(winnings);
        } else {
            self.losses += 1;
        }
    }
}

/// Settled outcome of one spin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpinResult {
    pub values: [Symbol; 3],
    pub combo: ComboResult,
    pub winnings: u64,
    /// Balance after the payout
    pub cash: u64,
}

/// Displayed balance, animated separately from the real one
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceDisplay {
    /// Amount currently shown
    pub shown: u64,
    /// 1 fully visible, 0 hidden
    pub opacity: f64,
}

impl BalanceDisplay {
    pub fn new(cash: u64) -> Self {
        Self {
            shown: cash,
            opacity: 1.0,
        }
    }

    /// Fade the old amount out over the first half, then fade `cash` in
    pub fn fade(&mut self, progress: f64, cash: u64) {
        if progress <= 0.5 {
            self.opacity = 1.0 - progress * 2.0;
        } else {
            self.shown = cash;
            self.opacity = progress * 2.0 - 1.0;
        }
    }
}

/// Mutable state shared by the spin animations
#[derive(Debug, Clone)]
pub struct GameSession {
    pub cash: u64,
    pub default_cash: u64,
    pub bet: u64,
    pub values: Vec<Symbol>,
    /// Turn targets of the current or last spin
    pub targets: [f64; 3],
    /// Spin trigger disabled while true
    pub spinning: bool,
    pub display: BalanceDisplay,
    pub stats: SessionStats,
    pub last_result: Option<SpinResult>,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            cash: config.default_cash,
            default_cash: config.default_cash,
            bet: config.bet,
            values: config.values(),
            targets: [0.0; 3],
            spinning: false,
            display: BalanceDisplay::new(config.default_cash),
            stats: SessionStats::default(),
            last_result: None,
        }
    }

    /// Take the bet, refilling an empty balance first
    ///
    /// A balance that cannot cover the bet counts as empty. Returns whether
    /// the balance was refilled.
    pub fn debit_bet(&mut self) -> bool {
        let refilled = self.cash == 0 || self.cash < self.bet;
        if refilled {
            self.cash = self.default_cash;
            self.stats.refills += 1;
        }
        self.cash = self.cash.saturating_sub(self.bet);
        self.stats.record_bet(self.bet);
        refilled
    }

    /// Credit a settled spin and remember it
    pub fn settle(&mut self, values: [Symbol; 3], combo: ComboResult, winnings: u64) -> SpinResult {
        self.cash = self.cash.saturating_add(winnings);
        self.stats.record_result(winnings);

        let result = SpinResult {
            values,
            combo,
            winnings,
            cash: self.cash,
        };
        self.last_result = Some(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combo::check_combo;

    #[test]
    fn test_debit_takes_bet() {
        let mut session = GameSession::new(&GameConfig::default());
        assert!(!session.debit_bet());
        assert_eq!(session.cash, 90);
        assert_eq!(session.stats.total_spins, 1);
        assert_eq!(session.stats.total_bet, 10);
    }

    #[test]
    fn test_empty_balance_is_refilled() {
        let mut session = GameSession::new(&GameConfig::default());
        session.cash = 0;
        assert!(session.debit_bet());
        assert_eq!(session.cash, 90);
        assert_eq!(session.stats.refills, 1);

        session.cash = 4;
        assert!(session.debit_bet());
        assert_eq!(session.cash, 90);
    }

    #[test]
    fn test_settle_credits_and_records() {
        let mut session = GameSession::new(&GameConfig::default());
        session.debit_bet();
        let result = session.settle([3, 3, 5], check_combo([3, 3, 5]), 300);
        assert_eq!(result.cash, 390);
        assert_eq!(session.last_result, Some(result));
        assert_eq!(session.stats.wins, 1);
        assert_eq!(session.stats.biggest_win, 300);

        session.debit_bet();
        session.settle([1, 2, 3], check_combo([1, 2, 3]), 0);
        assert_eq!(session.stats.losses, 1);
        assert!((session.stats.hit_rate() - 50.0).abs() < 1e-9);
        assert!((session.stats.rtp() - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_balance_fade_swaps_amount_halfway() {
        let mut display = BalanceDisplay::new(100);

        display.fade(0.25, 90);
        assert_eq!(display.shown, 100);
        assert!((display.opacity - 0.5).abs() < 1e-12);

        display.fade(0.5, 90);
        assert_eq!(display.shown, 100);
        assert!(display.opacity.abs() < 1e-12);

        display.fade(0.75, 90);
        assert_eq!(display.shown, 90);
        assert!((display.opacity - 0.5).abs() < 1e-12);

        display.fade(1.0, 90);
        assert!((display.opacity - 1.0).abs() < 1e-12);
    }
}
