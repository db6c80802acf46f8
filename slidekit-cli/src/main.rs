//! slidekit CLI — slider math and headless drag replays from the shell.
//!
//! Commands:
//! - `sanitize` — clamp and step-snap a value into a domain
//! - `map` — value → ratio → rendered offset for a draggable range
//! - `check` — validate a TOML slider set and print each slider's view
//! - `drag` — replay a scripted pointer sequence against one mounted slider

mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slidekit_core::mapper;
use slidekit_core::{FixedGeometry, SliderSet, SliderSpec, SliderView};

#[derive(Parser)]
#[command(name = "slidekit", about = "slidekit CLI — slider value mapping and drag replay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the allowable value for a raw value (clamped, then snapped to step).
    Sanitize {
        /// Raw value.
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Lower bound of the domain.
        #[arg(long, allow_negative_numbers = true)]
        min: f64,

        /// Upper bound of the domain.
        #[arg(long, allow_negative_numbers = true)]
        max: f64,

        /// Step in domain units. 0 means continuous.
        #[arg(long, default_value_t = 0.0)]
        step: f64,
    },
    /// Print the ratio and rendered offset of a value.
    Map {
        /// Domain value.
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Lower bound of the domain.
        #[arg(long, allow_negative_numbers = true)]
        min: f64,

        /// Upper bound of the domain.
        #[arg(long, allow_negative_numbers = true)]
        max: f64,

        /// Draggable range in pixels (track width minus handle width).
        #[arg(long)]
        range: f64,
    },
    /// Validate a slider set and print each slider's derived view.
    Check {
        /// Path to a TOML file with [[slider]] tables.
        config: std::path::PathBuf,

        /// Draggable range used to compute offsets.
        #[arg(long, default_value_t = 100.0)]
        range: f64,
    },
    /// Replay a pointer script against one slider and print every reported value.
    Drag {
        #[arg(long, allow_negative_numbers = true)]
        min: f64,

        #[arg(long, allow_negative_numbers = true)]
        max: f64,

        #[arg(long, default_value_t = 0.0)]
        step: f64,

        /// The owner's initial value.
        #[arg(long, allow_negative_numbers = true)]
        value: f64,

        /// Track left edge in viewport coordinates.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        origin: f64,

        #[arg(long)]
        track_width: f64,

        #[arg(long)]
        handle_width: f64,

        /// Tokens: down:X move:X frame up up:X resize:W (space or comma separated).
        #[arg(required = true, allow_hyphen_values = true)]
        script: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sanitize {
            value,
            min,
            max,
            step,
        } => run_sanitize(value, min, max, step),
        Commands::Map {
            value,
            min,
            max,
            range,
        } => run_map(value, min, max, range),
        Commands::Check { config, range } => run_check(&config, range),
        Commands::Drag {
            min,
            max,
            step,
            value,
            origin,
            track_width,
            handle_width,
            script,
        } => {
            let spec = SliderSpec::new("drag", min, max, value).with_step(step);
            let geometry = FixedGeometry::new(origin, track_width, handle_width);
            run_drag(spec, geometry, &script)
        }
    }
}

/// Diagnostics go to stderr so stdout stays pipeable.
/// Filter from `SLIDEKIT_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("SLIDEKIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_sanitize(value: f64, min: f64, max: f64, step: f64) -> Result<()> {
    let spec = SliderSpec::new("sanitize", min, max, value).with_step(step);
    spec.validate()?;
    println!("{}", spec.allowable(value));
    Ok(())
}

fn run_map(value: f64, min: f64, max: f64, range: f64) -> Result<()> {
    let ratio = mapper::normalize(value, min, max)?;
    let offset = mapper::offset_from_ratio(mapper::clamp_ratio(ratio), range.max(0.0));
    println!("ratio  {ratio:.6}");
    println!("offset {offset}");
    Ok(())
}

fn run_check(path: &Path, range: f64) -> Result<()> {
    let set = SliderSet::load(path).with_context(|| format!("checking {}", path.display()))?;

    println!("{}: {} slider(s) ok", path.display(), set.len());
    println!();
    println!(
        "{:<20} {:>10} {:>8} {:>8}  {}",
        "Label", "Value", "Handle", "Offset", "Range"
    );
    println!("{}", "-".repeat(64));
    for spec in &set.sliders {
        let offset = mapper::offset_from_ratio(spec.ratio(), range.max(0.0));
        let view = SliderView::derive(spec, offset, false);
        let corrected = if spec.allowable(spec.value).to_bits() == spec.value.to_bits() {
            ""
        } else {
            "  (corrected)"
        };
        println!(
            "{:<20} {:>10} {:>8} {:>8}  {} ‥ {} ‥ {}{corrected}",
            view.label,
            view.text,
            view.min_handle_chars,
            view.offset,
            view.aria.value_min,
            view.aria.value_now,
            view.aria.value_max,
        );
    }
    Ok(())
}

fn run_drag(spec: SliderSpec, geometry: FixedGeometry, script: &[String]) -> Result<()> {
    spec.validate()?;
    let steps = replay::parse_script(script)?;
    let run = replay::replay(spec, geometry, &steps);

    for emitted in &run.emitted {
        println!("{:<14} onChange({})", emitted.cause, emitted.value);
    }
    for token in &run.missed {
        eprintln!("{token}: pointer is not on the handle, no drag started");
    }
    println!("final value {} at offset {}", run.final_value, run.final_offset);
    Ok(())
}
