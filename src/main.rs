use std::{fs, fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use fairlink::{
    config::SimulationConfig,
    discipline::{Discipline, Fcfs, Wfq},
    logging::{NothingLogger, PrintLogger},
    report,
    sim::Simulator,
    stats::SimulationResults,
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DisciplineArg {
    /// First-come-first-serve with tail-drop buffering
    Fcfs,
    /// Weighted fair queuing with smallest-VFT drop
    Wfq,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate a shared link fed by stochastic sources under FCFS or WFQ scheduling.", long_about = None)]
struct Args {
    /// Simulation config file: a `numSources simulationTime linkCapacity
    /// bufferSize` header followed by one source line each
    input: PathBuf,

    /// Scheduling discipline for the link
    #[arg(short, long, value_enum, default_value_t = DisciplineArg::Fcfs)]
    discipline: DisciplineArg,

    /// RNG seed; runs with the same config and seed are identical
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Echo per-event trace lines
    #[arg(long)]
    trace: bool,

    /// Also dump the structured results as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn simulate<D: Discipline>(config: &SimulationConfig, args: &Args) -> SimulationResults {
    if args.trace {
        Simulator::<D, _>::new(config, args.seed, PrintLogger::new(D::NAME.to_owned())).run()
    } else {
        Simulator::<D, _>::new(config, args.seed, NothingLogger::new()).run()
    }
}

fn write_reports(results: &SimulationResults, args: &Args) -> Result<()> {
    let report = report::render(results);

    let file_name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .context("input path has no file name")?;
    let output = args
        .input
        .with_file_name(format!("{}_output_{}", results.discipline, file_name));
    fs::write(&output, &report)
        .with_context(|| format!("could not create output file {}", output.display()))?;

    println!(
        "\n--- {} Results for {} ---",
        results.discipline.to_uppercase(),
        file_name
    );
    print!("{report}");
    println!("\nFull results written to {}", output.display());

    if let Some(path) = &args.json {
        let file = File::create(path)
            .with_context(|| format!("could not create JSON output {}", path.display()))?;
        serde_json::to_writer_pretty(file, results)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = SimulationConfig::load(&args.input)?;
    let results = match args.discipline {
        DisciplineArg::Fcfs => simulate::<Fcfs>(&config, &args),
        DisciplineArg::Wfq => simulate::<Wfq>(&config, &args),
    };
    write_reports(&results, &args)
}
