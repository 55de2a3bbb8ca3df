use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use refscore::assessment::{AssessmentMode, AssessmentRecord, DetailedForm, HolisticForm};
use refscore::config::{ColorMode, Config};
use refscore::rubric::ScoringError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_VALIDATION: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

/// Rubric selector for the command line
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Holistic,
    Detailed,
}

impl From<ModeArg> for AssessmentMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Holistic => AssessmentMode::Holistic,
            ModeArg::Detailed => AssessmentMode::Detailed,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show both rubrics and the rating scale (default if no subcommand)
    Criteria,
    /// Score assessment snapshots and list them best first
    Score {
        /// YAML or JSON snapshot files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Show per-criterion points under each assessment
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Validate a snapshot and write the finalized record as JSON
    Finalize {
        /// YAML or JSON snapshot file
        file: PathBuf,

        /// Where to write the record
        #[arg(short, long)]
        out: PathBuf,

        /// Replace the output file if it exists
        #[arg(long)]
        force: bool,
    },
    /// Print a snapshot template to fill in
    Template {
        mode: ModeArg,

        /// Leave every field empty instead of pre-populating defaults
        #[arg(long)]
        blank: bool,
    },
    /// Show which display band a score falls into
    Band {
        score: f64,

        #[arg(long, default_value_t = 100.0)]
        max: f64,
    },
}

#[derive(Parser, Debug)]
#[command(name = "refscore")]
#[command(about = "Score project assessments against the referee rubric", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/refscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Criteria);

    let mut config = match refscore::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = refscore::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.no_color {
        config.display.color = ColorMode::Never;
    }

    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config
            .log_level
            .clone()
            .unwrap_or_else(|| refscore::telemetry::DEFAULT_LOG_LEVEL.to_string())
    };
    let stderr_ansi = config.display.color != ColorMode::Never
        && std::io::IsTerminal::is_terminal(&std::io::stderr());
    if let Err(e) = refscore::telemetry::init(&log_level, stderr_ansi) {
        eprintln!("Logging error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }

    let use_colors = refscore::output::should_use_colors(config.display.color);
    debug!(?command, use_colors, "starting");

    let code = match command {
        Commands::Criteria => {
            println!("{}", refscore::output::format_rubric(use_colors));
            EXIT_SUCCESS
        }
        Commands::Score { files, breakdown } => run_score(&files, breakdown, &config, use_colors),
        Commands::Finalize { file, out, force } => {
            match run_finalize(&file, &out, force, &config, use_colors) {
                Ok(()) => EXIT_SUCCESS,
                Err(e) => {
                    eprintln!("{}: {:#}", file.display(), e);
                    exit_code_for(&e)
                }
            }
        }
        Commands::Template { mode, blank } => {
            let prefill = config.form.prefill && !blank;
            let mode = AssessmentMode::from(mode);
            let entries = match (mode, prefill) {
                (AssessmentMode::Holistic, true) => HolisticForm::prefilled().entries(),
                (AssessmentMode::Holistic, false) => HolisticForm::new().entries(),
                (AssessmentMode::Detailed, true) => DetailedForm::prefilled().entries(),
                (AssessmentMode::Detailed, false) => DetailedForm::new().entries(),
            };
            println!("{}", refscore::output::format_template(mode, &entries));
            EXIT_SUCCESS
        }
        Commands::Band { score, max } => match refscore::rubric::score_band(score, max) {
            Ok(band) => {
                println!(
                    "{} / {}  {}",
                    refscore::output::format_score(score, config.display.decimals),
                    refscore::output::format_score(max, config.display.decimals),
                    refscore::output::format_band(band, use_colors).trim_end()
                );
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                EXIT_VALIDATION
            }
        },
    };

    std::process::exit(code);
}

/// Score every file, print the successful ones, and report the rest.
/// Keeps going after a bad file so one typo does not hide the other results.
fn run_score(files: &[PathBuf], breakdown: bool, config: &Config, use_colors: bool) -> i32 {
    let mut scored: Vec<(String, AssessmentRecord)> = Vec::new();
    let mut code = EXIT_SUCCESS;

    for path in files {
        let source = path.display().to_string();
        match score_file(path) {
            Ok(record) => scored.push((source, record)),
            Err(e) => {
                eprintln!("{}: {:#}", source, e);
                let file_code = exit_code_for(&e);
                // I/O problems outrank validation problems
                if code == EXIT_SUCCESS || file_code == EXIT_IO {
                    code = file_code;
                }
            }
        }
    }

    // Score descending, then source name for ties
    scored.sort_by(|a, b| {
        b.1.score()
            .partial_cmp(&a.1.score())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let decimals = config.display.decimals;
    if breakdown {
        for (source, record) in &scored {
            let rows = [refscore::output::ScoredAssessment { source, record }];
            println!("{}", refscore::output::format_scored_table(&rows, decimals, use_colors));
            match record.breakdown() {
                Ok(b) => println!(
                    "{}",
                    refscore::output::format_breakdown(&b, decimals, use_colors)
                ),
                Err(e) => warn!(source = %source, error = %e, "could not build breakdown"),
            }
            if !record.description().is_empty() {
                println!("  \"{}\"", record.description());
            }
            println!();
        }
    } else if !scored.is_empty() || code == EXIT_SUCCESS {
        let rows: Vec<refscore::output::ScoredAssessment> = scored
            .iter()
            .map(|(source, record)| refscore::output::ScoredAssessment { source, record })
            .collect();
        println!("{}", refscore::output::format_scored_table(&rows, decimals, use_colors));
    }

    code
}

fn score_file(path: &Path) -> Result<AssessmentRecord> {
    let snapshot = refscore::storage::load_snapshot(path)?;
    Ok(AssessmentRecord::from_snapshot(&snapshot)?)
}

fn run_finalize(
    file: &Path,
    out: &Path,
    force: bool,
    config: &Config,
    use_colors: bool,
) -> Result<()> {
    let record = score_file(file)?;
    refscore::storage::save_record(out, &record, force)?;
    println!(
        "Saved {} assessment to {} (score {}, {})",
        record.mode(),
        out.display(),
        refscore::output::format_score(record.score(), config.display.decimals),
        refscore::output::format_band(record.band(), use_colors).trim_end()
    );
    Ok(())
}

/// Scoring problems are the referee's to fix; everything else is I/O.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ScoringError>().is_some() {
        EXIT_VALIDATION
    } else {
        EXIT_IO
    }
}
