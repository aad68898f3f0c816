//! Command-line interface implementation

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, AimgConfig, CliOverrides, OutputFormat};
use crate::error::RenderError;
use crate::models::DisplayOptions;
use crate::parser::{parse_stream, ParseResult};
use crate::rarity::Rarity;
use crate::render::{render, RenderSpec};
use crate::resolve::DefaultResolver;

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// aimg - compute render parameters for marketplace asset thumbnails
#[derive(Parser)]
#[command(name = "aimg")]
#[command(about = "Compute render parameters for marketplace asset thumbnails")]
#[command(version)]
pub struct Cli {
    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Display flags shared by commands that render
#[derive(clap::Args, Debug, Default)]
pub struct DisplayArgs {
    /// Allow dragging the map
    #[arg(long)]
    pub draggable: bool,

    /// Show map navigation controls
    #[arg(long)]
    pub navigation: bool,

    /// Show a popup when hovering map cells
    #[arg(long)]
    pub popup: bool,

    /// Map zoom level
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Compact rendering: truncate name labels to two characters
    #[arg(long)]
    pub small: bool,

    /// Layer a monospace copy of name labels
    #[arg(long)]
    pub monospace: bool,

    /// Path to aimg.toml (discovered from the current directory if omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every asset record in a JSONL/JSON5 file and print its parameters
    Render {
        /// Input file with one asset record per entry ("-" for stdin)
        input: PathBuf,

        #[command(flatten)]
        display: DisplayArgs,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Strict mode: stop at the first parse warning or render error
        #[arg(long)]
        strict: bool,
    },
    /// Render every asset record without printing, reporting failures only
    Check {
        /// Input file with one asset record per entry ("-" for stdin)
        input: PathBuf,

        #[command(flatten)]
        display: DisplayArgs,
    },
    /// Print the rarity gradient table
    Gradients,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render { input, display, format, pretty, strict } => {
            let overrides = CliOverrides {
                format,
                pretty: pretty.then_some(true),
                ..display_overrides(&display)
            };
            let config = match resolve_config(display.config.as_deref(), &overrides) {
                Ok(config) => config,
                Err(code) => return code,
            };
            run_render(&input, &config, strict)
        }
        Commands::Check { input, display } => {
            let config = match resolve_config(display.config.as_deref(), &display_overrides(&display)) {
                Ok(config) => config,
                Err(code) => return code,
            };
            run_check(&input, &config.display)
        }
        Commands::Gradients => run_gradients(),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when embedded in another process
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

fn display_overrides(display: &DisplayArgs) -> CliOverrides {
    CliOverrides {
        draggable: display.draggable.then_some(true),
        navigation: display.navigation.then_some(true),
        popup: display.popup.then_some(true),
        zoom: display.zoom,
        small: display.small.then_some(true),
        monospace: display.monospace.then_some(true),
        ..Default::default()
    }
}

fn resolve_config(path: Option<&Path>, overrides: &CliOverrides) -> Result<AimgConfig, ExitCode> {
    let mut config = load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    merge_cli_overrides(&mut config, overrides);

    if let Err(e) = config.display.checked_zoom() {
        eprintln!("Error: {}", e);
        return Err(ExitCode::from(EXIT_INVALID_ARGS));
    }
    debug!(?config, "resolved configuration");
    Ok(config)
}

fn open_input(input: &Path) -> Result<Box<dyn Read>, ExitCode> {
    if input == Path::new("-") {
        return Ok(Box::new(io::stdin()));
    }
    match File::open(input) {
        Ok(f) => Ok(Box::new(f)),
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
    }
}

/// Parse the input and render every record, keeping input order.
fn render_all(
    input: &Path,
    options: &DisplayOptions,
) -> Result<(ParseResult, Vec<(usize, Result<RenderSpec, RenderError>)>), ExitCode> {
    let reader = open_input(input)?;
    let parsed = parse_stream(reader);
    info!(assets = parsed.assets.len(), warnings = parsed.warnings.len(), "parsed input");

    let rendered = parsed
        .assets
        .par_iter()
        .map(|record| (record.line, render(&record.asset, options, &DefaultResolver)))
        .collect();
    Ok((parsed, rendered))
}

fn run_render(input: &Path, config: &AimgConfig, strict: bool) -> ExitCode {
    let (parsed, rendered) = match render_all(input, &config.display) {
        Ok(result) => result,
        Err(code) => return code,
    };

    for warning in &parsed.warnings {
        eprintln!("Error: line {}: {}", warning.line, warning.message);
        if strict {
            return ExitCode::from(EXIT_ERROR);
        }
    }

    let mut failed = !parsed.warnings.is_empty();
    for (line, result) in rendered {
        match result {
            Ok(spec) => match format_spec(&spec, config) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: line {}: cannot serialize render spec: {}", line, e);
                    return ExitCode::from(EXIT_ERROR);
                }
            },
            Err(e) => {
                eprintln!("Error: line {}: {}", line, e);
                if strict {
                    return ExitCode::from(EXIT_ERROR);
                }
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

fn run_check(input: &Path, options: &DisplayOptions) -> ExitCode {
    let (parsed, rendered) = match render_all(input, options) {
        Ok(result) => result,
        Err(code) => return code,
    };

    let mut problems = 0;
    for warning in &parsed.warnings {
        eprintln!("Error: line {}: {}", warning.line, warning.message);
        problems += 1;
    }
    for (line, result) in &rendered {
        if let Err(e) = result {
            eprintln!("Error: line {}: {} ({})", line, e, e.kind());
            problems += 1;
        }
    }

    if problems == 0 {
        println!("OK: {} assets", rendered.len());
        ExitCode::from(EXIT_SUCCESS)
    } else {
        println!("{} of {} records failed", problems, rendered.len() + parsed.warnings.len());
        ExitCode::from(EXIT_ERROR)
    }
}

fn run_gradients() -> ExitCode {
    for tier in Rarity::ALL {
        let gradient = tier.gradient();
        println!(
            "{:<10} {} {}  max supply {}",
            tier,
            gradient.light,
            gradient.dark,
            tier.max_supply()
        );
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn format_spec(spec: &RenderSpec, config: &AimgConfig) -> Result<String, serde_json::Error> {
    match config.output.format {
        OutputFormat::Json if config.output.pretty => serde_json::to_string_pretty(spec),
        OutputFormat::Json => serde_json::to_string(spec),
        OutputFormat::Text => Ok(describe(spec)),
    }
}

/// One-line human-readable summary of a render spec
pub fn describe(spec: &RenderSpec) -> String {
    match spec {
        RenderSpec::Parcel(p) | RenderSpec::Estate(p) => format!(
            "{} center={} cells={} zoom={}",
            spec.kind(),
            p.center,
            p.selection.len(),
            p.zoom
        ),
        RenderSpec::Wearable(w) => {
            format!("wearable background={} image={} alt={}", w.background, w.image, w.alt)
        }
        RenderSpec::Ens(e) => match &e.monospace {
            Some(mono) => format!("ens label={} monospace={}", e.label, mono),
            None => format!("ens label={}", e.label),
        },
        RenderSpec::Other(d) => {
            format!("other src={} alt={} debounce={}ms", d.src, d.alt, d.debounce_ms)
        }
    }
}
