use anyhow::{Context as AnyhowContext, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use guext_core::{GuextConfig, Pipeline, RunOutcome, CONFIG_ENV_VAR};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

mod args;
mod build_info;
mod report;

pub use build_info::BuildInfo;

const EXIT_FAILURE: u8 = 1;
const EXIT_MISSING_DIR: u8 = 2;
const EXIT_NO_PROJECTS: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "guext")]
#[command(about = "Moves C# using directives into a per-project GlobalUsings.cs", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Show version information
    #[arg(
        short = 'v',
        long = "version",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    version: bool,

    /// Project or solution directory
    #[arg(short = 'd', value_name = "DIR")]
    dir: Option<String>,

    /// (DANGEROUS, not recommended!) Rewrite the target in place instead of a temporary copy
    #[arg(
        long = "disable-isolation",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    disable_isolation: bool,

    /// TOML file overriding file names and patterns (overrides GUEXT_CONFIG)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,
}

pub fn main_entry() -> Result<ExitCode> {
    let cli = Cli::parse_from(args::normalize_args(env::args_os()));

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet || cli.json {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if cli.version {
        // JSON mode keeps stdout to the envelope alone.
        if cli.json {
            eprintln!("{}", BuildInfo::CURRENT);
        } else {
            println!("{}", BuildInfo::CURRENT);
        }
    }

    let dir = match cli.dir.as_deref() {
        Some(dir) if !dir.is_empty() => dir,
        _ if cli.version => return Ok(ExitCode::SUCCESS),
        _ => {
            println!("You need to specify a project or solution directory.");
            return Ok(ExitCode::from(EXIT_MISSING_DIR));
        }
    };

    let code = match run(&cli, dir) {
        Ok(code) => code,
        Err(err) => {
            if cli.json {
                report::print_json_error(&err)?;
            } else {
                println!("Error: {err:#}");
            }
            ExitCode::from(EXIT_FAILURE)
        }
    };
    Ok(code)
}

fn run(cli: &Cli, dir: &str) -> Result<ExitCode> {
    let config = load_config(cli.config.as_ref())?;
    let pipeline = Pipeline::new(config).with_isolation(!cli.disable_isolation);

    let outcome = pipeline
        .run_with(dir, |root| {
            if !cli.json {
                println!("Processing '{}'...", root.display());
            }
        })
        .with_context(|| format!("Failed to process {dir}"))?;

    match outcome {
        RunOutcome::NoProjectRoots { target } => {
            if cli.json {
                report::print_json_no_projects(&target)?;
            } else {
                println!(
                    "The specified directory does not contain any {} files.",
                    descriptor_label(pipeline.config())
                );
            }
            Ok(ExitCode::from(EXIT_NO_PROJECTS))
        }
        RunOutcome::Completed(run) => {
            if cli.json {
                report::print_json_report(&run)?;
            } else {
                report::print_summary(&run);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(flag: Option<&PathBuf>) -> Result<GuextConfig> {
    let path = flag
        .cloned()
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
    match path {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            GuextConfig::from_file(&path).context("Failed to load configuration")
        }
        None => Ok(GuextConfig::default()),
    }
}

/// `*.csproj` reads as `.csproj` in user-facing messages.
fn descriptor_label(config: &GuextConfig) -> &str {
    config
        .descriptor_glob()
        .strip_prefix('*')
        .unwrap_or(config.descriptor_glob())
}
