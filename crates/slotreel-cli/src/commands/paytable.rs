use anyhow::Result;

use slotreel_core::game::MatchWeight;
use slotreel_core::{AppConfig, Paytable};

pub fn run(config: &AppConfig) -> Result<()> {
    let paytable = config
        .paytable
        .as_ref()
        .map(Paytable::from_config)
        .unwrap_or_default();
    let bet = config.game.bet;

    println!("Paytable (bet {}):\n", bet);
    println!("  {:<8}{:<14}{:>12}{:>12}", "combo", "match", "multiplier", "pays");

    for (weight, symbol, multiplier) in paytable.rows() {
        if weight == MatchWeight::None {
            continue;
        }
        println!(
            "  {:<8}{:<14}{:>12}{:>12}",
            weight.pattern(symbol),
            weight,
            multiplier,
            multiplier.saturating_mul(bet) / 10
        );
    }

    Ok(())
}
