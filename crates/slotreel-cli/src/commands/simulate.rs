use anyhow::Result;
use serde::Serialize;

use slotreel_core::game::{SessionStats, Simulation, SpinResult};
use slotreel_core::surface::DrawCommand;
use slotreel_core::{AppConfig, RecordingSurface};

/// Surface size the traced frame is laid out for, one unit per cell
const TRACE_WIDTH: f64 = 80.0;
const TRACE_HEIGHT: f64 = 24.0;

#[derive(Serialize)]
struct Report {
    spins: Vec<SpinResult>,
    stats: SessionStats,
    rtp: f64,
    hit_rate: f64,
    frames: u64,
    elapsed_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<Vec<DrawCommand>>,
}

pub fn run(mut config: AppConfig, spins: u32, seed: Option<u64>, json: bool, trace: bool) -> Result<()> {
    if seed.is_some() {
        config.game.seed = seed;
    }

    let mut sim = Simulation::new(&config)?;
    sim.machine().layout(TRACE_WIDTH, TRACE_HEIGHT, 0.0);

    let mut results = Vec::with_capacity(spins as usize);
    for i in 0..spins {
        let result = sim.spin_once()?;
        if !json {
            let [a, b, c] = result.values;
            let outcome = if result.combo.is_win() {
                format!("{} +{}", result.combo.weight, result.winnings)
            } else {
                "-".to_string()
            };
            println!("{:>5}  {} {} {}  {:<20} cash {}", i + 1, a, b, c, outcome, result.cash);
        }
        results.push(result);
    }

    let trace = trace.then(|| {
        let mut surface = RecordingSurface::new();
        sim.machine().draw(&mut surface);
        surface.commands().to_vec()
    });

    let stats = sim.machine().session().stats.clone();

    if json {
        let report = Report {
            spins: results,
            rtp: stats.rtp(),
            hit_rate: stats.hit_rate(),
            stats,
            frames: sim.frames(),
            elapsed_ms: sim.elapsed().as_millis(),
            trace,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("Spins: {}  Wins: {}  Losses: {}", stats.total_spins, stats.wins, stats.losses);
    println!("Bet: {}  Won: {}  Biggest win: {}", stats.total_bet, stats.total_win, stats.biggest_win);
    println!("RTP: {:.2}%  Hit rate: {:.2}%", stats.rtp(), stats.hit_rate());
    println!("Refills: {}", stats.refills);
    println!(
        "Simulated {} frames over {:.1}s",
        sim.frames(),
        sim.elapsed().as_secs_f64()
    );

    if let Some(commands) = trace {
        println!("\nFinal frame:");
        for command in commands {
            println!("  {}", serde_json::to_string(&command)?);
        }
    }

    Ok(())
}
