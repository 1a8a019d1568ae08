use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use itertools::Itertools;
use log::{info, warn};

use switchboard::graph::{reference_distance, CROSS_CHECK_MAX_WIDTH};
use switchboard::parse::parse_machines;
use switchboard::{Machine, SearchFailure};

/// Sum the fewest button presses needed to configure every machine in a puzzle input.
#[derive(Parser, Debug)]
struct Cli {
    /// Puzzle input, one machine diagram per line
    input: PathBuf,
    /// Leave out machines whose pattern cannot be reached instead of failing
    #[arg(long)]
    skip_unsolvable: bool,
    /// Confirm every answer with an independent shortest-path search (machines up to 16 lights)
    #[arg(long)]
    cross_check: bool,
    /// Print which buttons to press for each machine
    #[arg(long)]
    show_presses: bool,
    /// Log more; repeat for more detail. `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn cross_check(ordinal: usize, machine: &Machine, presses: usize) -> anyhow::Result<()> {
    if machine.width() > CROSS_CHECK_MAX_WIDTH {
        warn!("machine {ordinal} has {} lights, too many to cross-check", machine.width());
        return Ok(());
    }

    match reference_distance(machine.target(), machine.toggles()) {
        Some(expected) if expected == presses => Ok(()),
        other => bail!("machine {ordinal} ({machine}): search found {presses} presses, reference found {other:?}"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let text = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let machines = parse_machines(&text)
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;
    info!("read {} machines from {}", machines.len(), cli.input.display());

    let mut total = 0;
    let mut skipped = 0;
    for (index, machine) in machines.iter().enumerate() {
        let ordinal = index + 1;

        let presses = match machine.press_sequence() {
            Ok(presses) => presses,
            Err(failure @ SearchFailure::NotFound { .. }) if cli.skip_unsolvable => {
                warn!("skipping machine {ordinal} ({machine}): {failure}");
                skipped += 1;
                continue;
            }
            Err(failure) => return Err(failure).with_context(|| format!("Machine {ordinal} ({machine}) is unsolvable")),
        };

        if cli.cross_check {
            cross_check(ordinal, machine, presses.len())?;
        }
        if cli.show_presses {
            let buttons = presses.iter()
                .filter_map(|button| machine.wiring_of(*button))
                .map(|lights| format!("({})", lights.iter().join(",")))
                .join(" ");
            println!("{machine}: {} presses: {buttons}", presses.len());
        }

        total += presses.len();
    }

    if skipped > 0 {
        warn!("{skipped} of {} machines were unsolvable and left out", machines.len());
    }
    println!("{total}");
    Ok(())
}
