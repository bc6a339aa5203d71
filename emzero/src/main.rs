mod pipeline;
mod report;
mod xtsv;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use emzero_core::Schema;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use report::{Report, Summary};
use xtsv::{XtsvReader, XtsvWriter};

/// Restores dropped pronouns in dependency parsed Hungarian xtsv.
#[derive(Debug, Parser)]
#[command(name = "emzero", version, about)]
struct Args {
    /// xtsv to read, stdin if omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the augmented xtsv, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write every diagnostic to this file as a JSON line
    #[arg(long)]
    report: Option<PathBuf>,

    /// Stop at the first diagnostic instead of reporting it and carrying on
    #[arg(long)]
    strict: bool,

    /// Number of sentences processed in parallel
    #[arg(short, long, default_value_t = default_jobs())]
    jobs: usize,

    /// Show a spinner on stderr
    #[arg(long)]
    progress: bool,
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(std::io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    let report = args.report.as_deref().map(Report::create).transpose()?;

    let summary = run(&args, input, output, report).await?;
    log::info!("Done: {summary}");
    Ok(())
}

async fn run<R: BufRead, W: Write, D: Write>(
    args: &Args,
    input: R,
    output: W,
    mut report: Option<Report<D>>,
) -> anyhow::Result<Summary> {
    let reader = XtsvReader::new(input)?;
    let schema = Arc::new(Schema::from_header(reader.header())?);
    log::debug!("Columns: {:?}", schema.columns());

    let mut writer = XtsvWriter::new(output);
    writer.write_header(schema.columns())?;

    let pb = if args.progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} sentences ({per_sec}) {msg}")?,
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut results = futures::stream::iter(reader)
        .map(|raw| {
            let schema = Arc::clone(&schema);
            async move {
                let raw = raw.context("Failed to read input")?;
                let nr = raw.nr;
                let processed = tokio::task::spawn_blocking(move || pipeline::process(raw, &schema))
                    .await
                    .with_context(|| format!("Worker for sentence {nr} failed"))?;
                anyhow::Ok(processed)
            }
        })
        .buffered(args.jobs.max(1));

    let mut summary = Summary::default();
    while let Some(processed) = results.next().await {
        let processed = processed?;

        for diagnostic in &processed.diagnostics {
            if args.strict {
                bail!("{diagnostic}");
            }
            log::warn!("{diagnostic}");
            if let Some(report) = &mut report {
                report.write(diagnostic)?;
            }
        }

        writer
            .write_sentence(&processed.rows)
            .with_context(|| format!("Failed to write sentence {}", processed.nr))?;

        summary.sentences += 1;
        summary.tokens += processed.tokens;
        summary.diagnostics += processed.diagnostics.len();
        for (role, count) in processed.zeros {
            summary.add_zeros(role, count);
        }
        pb.inc(1);
    }

    writer.flush().context("Failed to flush output")?;
    if let Some(report) = report {
        report.finish()?;
    }
    pb.finish_with_message(format!("{} zeros", summary.zeros()));

    Ok(summary)
}
