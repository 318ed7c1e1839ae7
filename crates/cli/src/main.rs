mod commands;
mod config;
mod telemetry;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use types::{Gene, Instance};

use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "timetable", version, about = "Weekly class timetables by genetic search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a timetable and print the best one found.
    Solve {
        instance: PathBuf,
        /// JSON file with `SolveParams`; missing fields take their defaults.
        #[arg(long)]
        params: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        generations: Option<usize>,
        #[arg(long)]
        population: Option<usize>,
        #[arg(long)]
        mutation_rate: Option<f64>,
        #[arg(long)]
        time_limit_sec: Option<u64>,
        /// Breed children on the calling thread only.
        #[arg(long)]
        sequential: bool,
    },
    /// Check reference data without solving.
    Validate { instance: PathBuf },
    /// Score a gene list against an instance.
    Explain { instance: PathBuf, genes: PathBuf },
    /// Print the JSON schemas of the input documents.
    Schema,
}

fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Solve {
            instance,
            params,
            seed,
            generations,
            population,
            mutation_rate,
            time_limit_sec,
            sequential,
        } => {
            let flags = Overrides {
                population,
                generations,
                mutation_rate,
                seed,
                time_limit_sec,
                sequential,
            };
            let res = commands::solve::run(&instance, params.as_deref(), &flags)?;
            print_json(&res)
        }
        Command::Validate { instance } => {
            let inst: Instance = config::read_json(&instance)?;
            let report = commands::validate::run(&inst);
            print_json(&report)?;
            if !report.ok {
                std::process::exit(2);
            }
            Ok(())
        }
        Command::Explain {
            instance,
            genes: genes_path,
        } => {
            let inst: Instance = config::read_json(&instance)?;
            let genes: Vec<Gene> = config::read_json(&genes_path)?;
            let explanation = commands::explain::run(&inst, &genes)
                .with_context(|| format!("explaining {}", genes_path.display()))?;
            print_json(&explanation)
        }
        Command::Schema => print_json(&commands::schema::run()?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("writing output")?;
    writeln!(out).context("writing output")?;
    Ok(())
}
