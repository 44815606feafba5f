use bjrtplib::save::backup::backup_path;
use bjrtplib::save::Disk;
use bjrtplib::*;
use clap::Parser;
use colored::Colorize;
use rayon::iter::IntoParallelIterator;
use rayon::iter::ParallelIterator;
use serde::Serialize;
use std::path::Path;

fn main() {
    bjrtplib::logs();
    let ref args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    match args.command {
        Command::Rtp {
            ref table,
            rounds,
            seed,
            backup,
        } => rtp(args, table, rounds, seed, backup),
        Command::Bust {
            decks,
            hands,
            seed,
            target,
        } => bust(args, Model::from(decks), hands, seed, target),
        Command::Decks {
            from,
            to,
            hands,
            seed,
            target,
        } => decks(args, DeckSweep::new(from..=to, hands, target).seed(seed)),
        Command::Delta {
            ref table,
            ref observed,
            target,
            rounds,
            seed,
            min,
            max,
            refine,
            dry_run,
        } => {
            let calibration = Calibration {
                target,
                rounds,
                seed,
                bounds: Bounds { min, max },
            };
            delta(args, table, observed, calibration, refine, dry_run)
        }
        Command::Scale {
            ref table,
            target,
            rounds,
            seed,
            min,
            max,
            tolerance,
            iterations,
            tie_break,
            verify,
            dry_run,
        } => {
            let calibration = Calibration {
                target,
                rounds,
                seed,
                bounds: Bounds { min, max },
            };
            let ref base = PayoutTable::load(table)?;
            let search = Bisection::new(calibration, base)
                .tolerance(tolerance)
                .iterations(iterations)
                .tie_break(tie_break)
                .verify(verify);
            scale(args, table, search, dry_run)
        }
        Command::Estimate {
            total,
            upcard,
            soft,
            ref out,
            min,
            max,
        } => estimated(args, total, upcard, soft, out.as_deref(), Bounds { min, max }),
    }
}

/// deviation from target, red when the house gives back more than published
fn deviation(rtp: Percent, target: Percent) -> String {
    let text = format!("{:+.4}", rtp - target);
    if rtp > target {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

fn json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[derive(Serialize)]
struct RtpRow {
    table: String,
    strategy: Strategy,
    rtp: Percent,
    tally: Tally,
}

fn rtp(args: &Args, path: &Path, rounds: usize, seed: Option<u64>, backup: bool) -> Result<()> {
    let mut tables = vec![(path.display().to_string(), PayoutTable::load(path)?)];
    if backup {
        let ref path = backup_path(path);
        match PayoutTable::load(path) {
            Ok(table) => tables.push((path.display().to_string(), table)),
            Err(e) => log::warn!("skipping backup table {}: {}", path.display(), e),
        }
    }
    let bars = indicatif::MultiProgress::new();
    let jobs = tables
        .iter()
        .flat_map(|(name, table)| Strategy::all().map(|strategy| (name, table, strategy)))
        .map(|(name, table, strategy)| (name, table, strategy, bars.add(progress(rounds))))
        .collect::<Vec<_>>();
    let rows = jobs
        .into_par_iter()
        .map(|(name, table, strategy, bar)| {
            let tally = Simulation::new(table, strategy, rounds)
                .seed(seed)
                .progress(bar)
                .run();
            log::info!(
                "{:<32}{:<32}",
                format!("strategy {} {}", strategy, name),
                format!("rtp {:.4}%", tally.rtp())
            );
            RtpRow {
                table: name.clone(),
                strategy,
                rtp: tally.rtp(),
                tally,
            }
        })
        .collect::<Vec<RtpRow>>();
    if args.json {
        return json(&rows);
    }
    println!(
        "{:<40} {:>8} {:>12} {:>10} {:>12}",
        "table", "strategy", "rounds", "rtp", "vs target"
    );
    for row in rows.iter() {
        println!(
            "{:<40} {:>8} {:>12} {:>9.4}% {:>12}",
            row.table,
            row.strategy.to_string(),
            row.tally.rounds,
            row.rtp,
            deviation(row.rtp, TARGET_CASHOUT_RTP)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct BustReport {
    model: Model,
    target: Percent,
    rtp: Percent,
    tally: BustTally,
    exact: Exact,
}

fn bust(args: &Args, model: Model, hands: usize, seed: Option<u64>, target: Percent) -> Result<()> {
    let (tally, exact) = rayon::join(
        || BustSimulation::new(model, hands).seed(seed).verbose(true).run(),
        Exact::infinite,
    );
    let report = BustReport {
        model,
        target,
        rtp: tally.rtp(),
        tally,
        exact,
    };
    if args.json {
        return json(&report);
    }
    println!("{} over {} hands", model, report.tally.hands);
    println!(
        "rtp {:.5}%  target {:.2}%  deviation {}",
        report.rtp,
        target,
        deviation(report.rtp, target)
    );
    println!(
        "infinite deck exact rtp {:.5}%  deviation {}",
        report.exact.rtp,
        deviation(report.exact.rtp, target)
    );
    println!("{:>6} {:>12} {:>12}", "cards", "simulated", "exact");
    for (cards, (label, p)) in (3..).zip(report.tally.histogram()) {
        println!("{:>6} {:>12.6} {:>12.6}", label, p, report.exact.probability(cards));
    }
    Ok(())
}

fn decks(args: &Args, sweep: DeckSweep) -> Result<()> {
    let outcome = sweep.run();
    if args.json {
        return json(&outcome);
    }
    println!("{:>6} {:>12} {:>12}", "decks", "rtp", "deviation");
    for point in outcome.points.iter() {
        let line = format!(
            "{:>6} {:>11.5}% {:>12}",
            point.decks,
            point.rtp,
            deviation(point.rtp, outcome.target)
        );
        match outcome.best {
            Some(best) if best.decks == point.decks => println!("{}", line.bold()),
            _ => println!("{}", line),
        }
    }
    match outcome.best {
        Some(best) => println!(
            "closest to {:.2}%: {} decks at {:.5}%",
            outcome.target, best.decks, best.rtp
        ),
        None => println!("no deck counts in range"),
    }
    Ok(())
}

fn delta(
    args: &Args,
    path: &Path,
    observed: &Path,
    calibration: Calibration,
    refine: usize,
    dry_run: bool,
) -> Result<()> {
    let table = PayoutTable::load(path)?;
    let mask = Mask::from(&PayoutTable::load(observed)?);
    let (calibrated, outcome) = DeltaSearch::new(calibration, &table, &mask)
        .refine(refine)
        .run();
    if !dry_run {
        calibrated.save(path)?;
    }
    if args.json {
        return json(&outcome);
    }
    println!("masked cells      {}", outcome.masked);
    println!("p_filled          {:.4}", outcome.p_filled);
    println!("rtp before        {:.4}%", outcome.before.rtp());
    println!("delta             {:.2} ({} steps)", outcome.delta, outcome.steps);
    println!(
        "rtp after         {:.4}%  {}",
        outcome.after.rtp(),
        deviation(outcome.after.rtp(), outcome.target)
    );
    if outcome.leverage == Leverage::Insufficient {
        println!("{}", "masked cells are hit too rarely to reach the target".yellow());
    }
    Ok(())
}

fn scale(args: &Args, path: &Path, search: Bisection, dry_run: bool) -> Result<()> {
    let (calibrated, outcome) = search.run();
    match outcome.state {
        Search::Degenerate => log::warn!("search degenerated, leaving {} untouched", path.display()),
        _ if dry_run => {}
        _ => calibrated.save(path)?,
    }
    if args.json {
        return json(&outcome);
    }
    println!("{:>10} {:>12} {:>12}", "scale", "rtp", "error");
    for candidate in outcome.candidates.iter() {
        println!(
            "{:>10.5} {:>11.4}% {:>12}",
            candidate.scale,
            candidate.rtp,
            deviation(candidate.rtp, outcome.target)
        );
    }
    println!("state             {:?}", outcome.state);
    if let Some(best) = outcome.best {
        println!("best              scale {:.5} at {:.4}%", best.scale, best.rtp);
    }
    if let Some(verification) = outcome.verification {
        println!(
            "verified          {:.4}% over {} rounds (seed {})",
            verification.rtp, verification.rounds, verification.seed
        );
        if let Some(corrected) = verification.corrected {
            println!(
                "corrected         scale {:.5} at {:.4}%",
                corrected.scale, corrected.rtp
            );
        }
    }
    println!("applied scale     {:.5}", outcome.scale);
    Ok(())
}

#[derive(Serialize)]
struct EstimateReport {
    total: u8,
    upcard: u8,
    soft: bool,
    estimate: Chips,
    clamped: Chips,
}

fn estimated(
    args: &Args,
    total: Option<u8>,
    upcard: Option<u8>,
    soft: bool,
    out: Option<&Path>,
    bounds: Bounds,
) -> Result<()> {
    match (out, total, upcard) {
        (Some(path), _, _) => {
            let table = PayoutTable::estimated(bounds);
            table.save(path)?;
            log::info!("{:<32}{:<32}", "generated   table", format!("mean cell {:.2}", table.mean()));
            Ok(())
        }
        (None, Some(total), Some(upcard)) => {
            let upcard = if upcard == 1 { 11 } else { upcard };
            let estimate = estimate(total, upcard, soft);
            let report = EstimateReport {
                total,
                upcard,
                soft,
                estimate,
                clamped: bounds.clamp(estimate),
            };
            if args.json {
                return json(&report);
            }
            let kind = if soft { "soft" } else { "hard" };
            println!(
                "{} {} vs {}: {} (clamped to {} in {})",
                kind, total, upcard, report.estimate, report.clamped, bounds
            );
            Ok(())
        }
        _ => {
            log::warn!("nothing to estimate: give --total and --upcard, or --out");
            Ok(())
        }
    }
}
