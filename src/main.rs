//! seqcompare - Grouped Sequence Comparison
//!
//! ## Usage
//!
//! ```bash
//! seqcompare dataset.json                      # interactive viewer
//! seqcompare 3C.2a=a.fasta 3C.3a=b.fasta       # one FASTA file per group
//! seqcompare dataset.json -o -                 # text output to stdout
//! ```
//!
//! ## Navigation (Vim-style)
//!
//! - `h/j/k/l`: Scroll left/down/up/right
//! - `Tab`/`Shift-Tab`: Next/previous view
//! - `:q`: Quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use seqcompare::config::{load_config, save_config, ConfigError, RenderConfig};
use seqcompare::consensus::Rearranged;
use seqcompare::controller::run_app;
use seqcompare::formats::{json, load_dataset, FileFormat, FormatError, GroupInput};
use seqcompare::model::{CompareError, ViewerState};
use seqcompare::text::render_all;
use seqcompare::views::{render, Rendered};

/// File format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Summarized JSON dataset
    Json,
    /// One FASTA file per group
    Fasta,
    /// Detect from the file extension
    Auto,
}

impl From<FormatArg> for Option<FileFormat> {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Some(FileFormat::Json),
            FormatArg::Fasta => Some(FileFormat::Fasta),
            FormatArg::Auto => None,
        }
    }
}

/// seqcompare - Compare aligned sequences group by group
///
/// When run without -o/--output, opens an interactive viewer.
/// With -o/--output, writes the four views as text to a file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// A JSON dataset, or FASTA files as `path` or `NAME=path` (one per group)
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<GroupInput>,

    /// Force a specific input format (overrides auto-detection)
    #[arg(short = 'f', long = "format", value_enum, default_value = "auto")]
    format: FormatArg,

    /// Rendering configuration (TOML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Last position covered by the full-sequences ruler
    #[arg(short = 'm', long = "max-position", value_parser = clap::value_parser!(u64).range(1..))]
    max_position: Option<u64>,

    /// Plain ASCII glyphs
    #[arg(long = "ascii")]
    ascii: bool,

    /// Output file (enables CLI mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Write the loaded dataset as JSON. Use "-" for stdout.
    #[arg(long = "dump-json")]
    dump_json: Option<String>,

    /// Write the effective rendering configuration (TOML)
    #[arg(long = "save-config")]
    save_config: Option<PathBuf>,
}

/// Sends logs to stderr, or to a file in the temp dir while the viewer owns the terminal.
fn init_logging(viewer: bool) -> Result<Option<PathBuf>> {
    let log_level = std::env::var("SEQCOMPARE_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if viewer {
        let path = std::env::temp_dir().join(format!("seqcompare-{:08x}.log", rand::random::<u32>()));
        let file = File::create(&path).with_context(|| format!("cannot create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
        Ok(Some(path))
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        Ok(None)
    }
}

fn build_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path).with_context(|| format!("cannot load config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(max_position) = args.max_position {
        config.max_position = usize::try_from(max_position).context("max position out of range")?;
    }
    if args.ascii {
        config.fancy_glyphs = false;
    }
    config.validate()?;
    Ok(config)
}

fn consensus_message(rendered: &Rendered) -> Option<String> {
    let group = &rendered.dataset.groups.first()?.name;
    match rendered.consensus {
        Rearranged::NoExactMatch => Some(format!("No sequence of {} matches its consensus", group)),
        Rearranged::MovedToFront { .. } | Rearranged::AlreadyFirst => None,
    }
}

/// Writes every view as text.
fn run_cli_mode(rendered: &Rendered, output: &str) -> Result<()> {
    let text = render_all(rendered);
    if output == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
    } else {
        let mut file = File::create(output).with_context(|| format!("cannot create {}", output))?;
        file.write_all(text.as_bytes())?;
        info!("wrote {} views to {}", rendered.views.len(), output);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    if let Some(path) = &args.save_config {
        save_config(path, &config).with_context(|| format!("cannot write config {}", path.display()))?;
        info!("config written to {}", path.display());
    }

    let dataset = load_dataset(&args.inputs, args.format.into())?;
    if let Some(target) = &args.dump_json {
        if target == "-" {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json::to_json_string(&dataset)?)?;
        } else {
            json::save_dataset_json(target, &dataset)?;
            info!("dataset written to {}", target);
        }
    }

    let rendered = render(dataset, &config)?;

    match &args.output {
        Some(output) => run_cli_mode(&rendered, output),
        None => {
            let status = consensus_message(&rendered);
            run_app(ViewerState::new(rendered, config.glyphs(), status))
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_file = match init_logging(args.output.is_none()) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        if let Some(path) = log_file {
            eprintln!("Log: {}", path.display());
        }

        let exit_code = if e.downcast_ref::<CompareError>().is_some() {
            2
        } else if e.downcast_ref::<FormatError>().is_some() {
            3
        } else if e.downcast_ref::<ConfigError>().is_some() {
            4
        } else {
            1
        };
        process::exit(exit_code);
    }
}
