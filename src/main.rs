use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use doctitle::convert::source_format;
use doctitle::{batch, paths, text, Converter, DocumentReport, Engine, Settings};

#[derive(Parser)]
#[command(name = "doctitle", about = "Pull titles and running headers out of documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the title of every document matching a glob pattern
    Title {
        /// Glob pattern, e.g. "./data/**/*.docx"
        pattern: String,
        /// How to read the documents (default: from settings)
        #[arg(short, long, value_enum)]
        engine: Option<Engine>,
    },
    /// Print the running header of each section (DOCX only)
    Headers {
        /// Glob pattern, e.g. "./data/**/*.docx"
        pattern: String,
    },
    /// Title and headers for every matching document
    Extract {
        /// Glob pattern, e.g. "./data/**"
        pattern: String,
        #[arg(short, long, value_enum)]
        engine: Option<Engine>,
        /// One JSON object per document instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Print a document's converted markdown with markup stripped
    Strip {
        file: PathBuf,
        /// Also drop non-ASCII characters (non-breaking spaces become spaces)
        #[arg(long)]
        ascii: bool,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    let settings = Settings::load().context("Failed to load settings")?;
    info!(settings = ?settings, "Starting doctitle");

    let t0 = Instant::now();
    let pandoc = settings.pandoc();

    let result = match cli.command {
        Commands::Title { pattern, engine } => {
            let engine = engine.unwrap_or(settings.engine);
            let reports = process(&pattern, engine, &pandoc)?;
            for r in &reports {
                match (&r.error, &r.title) {
                    (Some(e), _) => println!("{} ::: ERROR {}", r.path.display(), e),
                    (None, Some(title)) => println!("{} ::: {}", r.path.display(), title),
                    (None, None) => println!("{} ::: -", r.path.display()),
                }
            }
            summarize(&reports)
        }
        Commands::Headers { pattern } => {
            let reports = process(&pattern, Engine::Docx, &pandoc)?;
            for r in &reports {
                if let Some(e) = &r.error {
                    println!("{} ::: ERROR {}", r.path.display(), e);
                    continue;
                }
                println!("{} ::: {} header(s)", r.path.display(), r.headers.len());
                for h in &r.headers {
                    println!("  {}", h);
                }
            }
            summarize(&reports)
        }
        Commands::Extract {
            pattern,
            engine,
            json,
        } => {
            let engine = engine.unwrap_or(settings.engine);
            let reports = process(&pattern, engine, &pandoc)?;
            for r in &reports {
                if json {
                    println!("{}", serde_json::to_string(r)?);
                } else {
                    println!("{}", r.path.display());
                    if let Some(e) = &r.error {
                        println!("  error:  {}", e);
                        continue;
                    }
                    println!("  title:  {}", r.title.as_deref().unwrap_or("-"));
                    for h in &r.headers {
                        println!("  header: {}", h);
                    }
                }
            }
            summarize(&reports)
        }
        Commands::Strip { file, ascii } => {
            let path = paths::filepath(&file)?;
            let format = source_format(&path)?;
            let markdown = pandoc.to_markdown(&path, &format)?;
            let stripped = text::strip_markup(&markdown);
            if ascii {
                print!("{}", text::remove_unicode(&stripped));
            } else {
                print!("{}", stripped);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn process(
    pattern: &str,
    engine: Engine,
    converter: &dyn Converter,
) -> anyhow::Result<Vec<DocumentReport>> {
    let files = paths::filepaths(pattern).with_context(|| format!("Bad pattern {:?}", pattern))?;
    if files.is_empty() {
        println!("No files match {}", pattern);
        return Ok(Vec::new());
    }
    info!(files = files.len(), %engine, "Processing documents");

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );
    let reports = batch::run(&files, engine, converter, &pb);
    pb.finish_and_clear();
    Ok(reports)
}

fn summarize(reports: &[DocumentReport]) -> anyhow::Result<()> {
    let failed = reports.iter().filter(|r| r.failed()).count();
    let titled = reports.iter().filter(|r| r.title.is_some()).count();
    eprintln!(
        "\n{} documents: {} with a title, {} failed.",
        reports.len(),
        titled,
        failed
    );
    if !reports.is_empty() && failed == reports.len() {
        bail!("every document failed");
    }
    Ok(())
}
