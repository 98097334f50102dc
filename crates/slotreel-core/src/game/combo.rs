//! Combination check for a settled spin

use serde::Serialize;

use crate::reel::Symbol;

/// Symbol that pays on its own
pub const JACKPOT_SYMBOL: Symbol = 7;

/// Match strength of a spin, indexes the paytable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchWeight {
    None = 0,
    /// A jackpot symbol anywhere, without a better match
    Jackpot = 1,
    /// One adjacent pair
    Pair = 2,
    /// All three equal
    Triple = 3,
}

impl MatchWeight {
    /// Numeric tier, 0 to 3
    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }

    /// Reel pattern a paytable row pays for, `-` for any value
    pub fn pattern(self, symbol: Symbol) -> String {
        match self {
            MatchWeight::Triple => format!("{0} {0} {0}", symbol),
            MatchWeight::Pair => format!("{0} {0} -", symbol),
            MatchWeight::Jackpot => format!("{} - -", JACKPOT_SYMBOL),
            MatchWeight::None => "- - -".to_string(),
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(MatchWeight::None),
            1 => Some(MatchWeight::Jackpot),
            2 => Some(MatchWeight::Pair),
            3 => Some(MatchWeight::Triple),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchWeight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchWeight::None => "no match",
            MatchWeight::Jackpot => "lucky seven",
            MatchWeight::Pair => "pair",
            MatchWeight::Triple => "triple",
        };
        f.pad(name)
    }
}

/// Outcome of [`check_combo`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComboResult {
    pub weight: MatchWeight,
    /// Symbol the payout is looked up with, `None` when nothing matched
    pub value: Option<Symbol>,
}

impl ComboResult {
    pub const LOSS: ComboResult = ComboResult {
        weight: MatchWeight::None,
        value: None,
    };

    #[inline]
    pub fn is_win(&self) -> bool {
        self.weight > MatchWeight::None
    }
}

/// Classify three settled reel values
///
/// Pairs only count between neighbours: `[3, 5, 3]` is not a pair.
pub fn check_combo(combo: [Symbol; 3]) -> ComboResult {
    let [a, b, c] = combo;

    if a == b && b == c {
        ComboResult {
            weight: MatchWeight::Triple,
            value: Some(b),
        }
    } else if a == b || b == c {
        ComboResult {
            weight: MatchWeight::Pair,
            value: Some(b),
        }
    } else if combo.contains(&JACKPOT_SYMBOL) {
        ComboResult {
            weight: MatchWeight::Jackpot,
            value: Some(JACKPOT_SYMBOL),
        }
    } else {
        ComboResult::LOSS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple() {
        assert_eq!(
            check_combo([3, 3, 3]),
            ComboResult { weight: MatchWeight::Triple, value: Some(3) }
        );
    }

    #[test]
    fn test_adjacent_pairs() {
        assert_eq!(
            check_combo([3, 3, 5]),
            ComboResult { weight: MatchWeight::Pair, value: Some(3) }
        );
        assert_eq!(
            check_combo([1, 4, 4]),
            ComboResult { weight: MatchWeight::Pair, value: Some(4) }
        );
    }

    #[test]
    fn test_pattern() {
        assert_eq!(MatchWeight::Triple.pattern(3), "3 3 3");
        assert_eq!(MatchWeight::Pair.pattern(5), "5 5 -");
        // The lucky seven row ignores its lookup symbol
        assert_eq!(MatchWeight::Jackpot.pattern(2), "7 - -");
        assert_eq!(MatchWeight::None.pattern(0), "- - -");
    }

    #[test]
    fn test_outer_pair_does_not_count() {
        assert_eq!(check_combo([3, 5, 3]), ComboResult::LOSS);
    }

    #[test]
    fn test_jackpot_symbol() {
        assert_eq!(
            check_combo([7, 2, 5]),
            ComboResult { weight: MatchWeight::Jackpot, value: Some(7) }
        );
        assert_eq!(
            check_combo([7, 2, 7]).weight,
            MatchWeight::Jackpot
        );
    }

    #[test]
    fn test_pair_beats_jackpot_symbol() {
        assert_eq!(
            check_combo([7, 2, 2]),
            ComboResult { weight: MatchWeight::Pair, value: Some(2) }
        );
    }

    #[test]
    fn test_no_match() {
        let result = check_combo([2, 4, 6]);
        assert_eq!(result.weight, MatchWeight::None);
        assert!(!result.is_win());
    }

    #[test]
    fn test_weight_levels() {
        for level in 0..=3 {
            assert_eq!(MatchWeight::from_level(level).map(MatchWeight::level), Some(level));
        }
        assert_eq!(MatchWeight::from_level(4), None);
    }
}
