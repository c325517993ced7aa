use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use samarth::dataset::Dataset;
use samarth::engine::Engine;
use std::io::{self, Write};

/// Ask questions about crop production and rainfall
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input file (CSV)
    infile: String,
    /// Question; without one, ask interactively
    question: Option<String>,
    /// Show how the question is understood instead of answering it
    #[arg(long)]
    explain: bool,
    /// Produce compact JSON
    #[arg(long)]
    compact: bool,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn explain(args: &Args, engine: &Engine, question: &str) -> Result<()> {
    let explained = engine.explain(question);
    let stdout = io::stdout().lock();
    if args.compact {
        serde_json::to_writer(stdout, &explained)?;
    } else {
        serde_json::to_writer_pretty(stdout, &explained)?;
    }
    println!();
    Ok(())
}

fn interactive(args: &Args, engine: &Engine) -> Result<()> {
    cliclack::intro("samarth")?;
    let d = engine.dataset();
    cliclack::log::info(format!("{} records from {}", d.len(), d.name()))?;
    let options = textwrap::Options::new(70).subsequent_indent(" ");
    loop {
        let question: String = cliclack::input("Question? (empty to quit)")
            .placeholder("Highest rice production. Also show trend")
            .required(false)
            .interact()?;
        if question.trim().is_empty() {
            break;
        }
        let title = textwrap::fill(question.trim(), &options);
        if args.explain {
            let explained = serde_json::to_string_pretty(&engine.explain(&question))?;
            cliclack::note(title, explained)?;
        } else {
            cliclack::note(title, engine.answer(&question))?;
        }
    }
    cliclack::outro("Bye!")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    let dataset = Dataset::from_path(&args.infile)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("cannot read {}", args.infile))?;
    let engine = Engine::new(dataset);
    match &args.question {
        Some(question) if args.explain => explain(&args, &engine, question)?,
        Some(question) => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", engine.answer(question))?;
        }
        None => interactive(&args, &engine)?,
    }
    Ok(())
}
