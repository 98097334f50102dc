//! Payout table

use std::collections::BTreeMap;

use serde::Serialize;

use super::combo::{check_combo, ComboResult, MatchWeight};
use crate::config::PaytableConfig;
use crate::reel::Symbol;

/// Multipliers per match weight and symbol
///
/// A payout is `multiplier * bet / 10`, i.e. the multiplier is paid per
/// tenth of the bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paytable {
    tiers: BTreeMap<MatchWeight, BTreeMap<Symbol, u64>>,
}

impl Default for Paytable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.set(MatchWeight::Jackpot, 7, 10);
        for (symbol, multiplier) in [(1, 100), (2, 200), (3, 300), (4, 400), (5, 500), (6, 750), (7, 1000)] {
            table.set(MatchWeight::Pair, symbol, multiplier);
        }
        for (symbol, multiplier) in [
            (1, 2500),
            (2, 5000),
            (3, 15000),
            (4, 25000),
            (5, 50000),
            (6, 75000),
            (7, 1_000_000),
        ] {
            table.set(MatchWeight::Triple, symbol, multiplier);
        }
        table
    }
}

impl Paytable {
    /// Table that pays nothing
    pub fn empty() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }

    /// Build from config, ignoring keys that are not symbols
    pub fn from_config(config: &PaytableConfig) -> Self {
        let mut table = Self::empty();
        for (weight, entries) in [
            (MatchWeight::Jackpot, &config.weight1),
            (MatchWeight::Pair, &config.weight2),
            (MatchWeight::Triple, &config.weight3),
        ] {
            for (key, &multiplier) in entries {
                match key.trim().parse::<Symbol>() {
                    Ok(symbol) => table.set(weight, symbol, multiplier),
                    Err(_) => tracing::warn!(key = %key, ?weight, "Ignoring non-numeric paytable key"),
                }
            }
        }
        table
    }

    pub fn set(&mut self, weight: MatchWeight, symbol: Symbol, multiplier: u64) {
        self.tiers.entry(weight).or_default().insert(symbol, multiplier);
    }

    pub fn multiplier(&self, weight: MatchWeight, symbol: Symbol) -> Option<u64> {
        self.tiers.get(&weight)?.get(&symbol).copied()
    }

    /// Credits won by `result` at `bet`
    pub fn payout(&self, result: &ComboResult, bet: u64) -> u64 {
        if !result.is_win() {
            return 0;
        }
        result
            .value
            .and_then(|symbol| self.multiplier(result.weight, symbol))
            .map(|multiplier| multiplier.saturating_mul(bet) / 10)
            .unwrap_or(0)
    }

    /// Check `combo` and price it
    pub fn winnings(&self, combo: [Symbol; 3], bet: u64) -> u64 {
        self.payout(&check_combo(combo), bet)
    }

    /// Rows for display, best tier first
    pub fn rows(&self) -> impl Iterator<Item = (MatchWeight, Symbol, u64)> + '_ {
        self.tiers.iter().rev().flat_map(|(&weight, entries)| {
            entries
                .iter()
                .rev()
                .map(move |(&symbol, &multiplier)| (weight, symbol, multiplier))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_jackpot() {
        assert_eq!(Paytable::default().winnings([7, 7, 7], 10), 1_000_000);
    }

    #[test]
    fn test_pair_and_single_seven() {
        let table = Paytable::default();
        assert_eq!(table.winnings([3, 3, 5], 10), 300);
        assert_eq!(table.winnings([7, 2, 5], 10), 10);
        assert_eq!(table.winnings([2, 4, 6], 10), 0);
    }

    #[test]
    fn test_symbol_without_entry_pays_nothing() {
        let table = Paytable::default();
        assert_eq!(table.winnings([0, 0, 0], 10), 0);
        assert_eq!(table.winnings([0, 0, 7], 10), 0);
    }

    #[test]
    fn test_payout_scales_with_bet() {
        let table = Paytable::default();
        assert_eq!(table.winnings([6, 6, 1], 20), 1500);
        assert_eq!(table.winnings([7, 1, 2], 5), 5);
    }

    #[test]
    fn test_from_config() {
        let mut config = PaytableConfig::default();
        config.weight1.insert("7".to_string(), 50);
        config.weight3.insert("seven".to_string(), 1);

        let table = Paytable::from_config(&config);
        assert_eq!(table.multiplier(MatchWeight::Jackpot, 7), Some(50));
        assert_eq!(table.winnings([7, 7, 7], 10), 0);
        assert_eq!(table.winnings([7, 1, 2], 10), 50);
    }

    #[test]
    fn test_rows_best_first() {
        let table = Paytable::default();
        let first = table.rows().next().unwrap();
        assert_eq!(first, (MatchWeight::Triple, 7, 1_000_000));
        assert_eq!(table.rows().count(), 15);
    }
}
