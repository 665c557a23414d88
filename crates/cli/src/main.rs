#![deny(unsafe_code)]
//! CLI host for the terrain-fbm height field generator.
//!
//! Subcommands:
//! - `generate` — synthesize an fBm field, blend it over a base heightmap, write PNG
//! - `sample <x> <y>` — print one simplex noise value
//! - `schema` — print the recipe parameter schema

mod error;
mod pixel;
mod snapshot;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use terrain_fbm_core::{evaluate, generate, Field, Recipe};
use tracing::{debug, Level};

/// Grid size used when neither `-W/-H` nor `--base` fixes one.
const DEFAULT_SIZE: usize = 256;

#[derive(Parser)]
#[command(name = "terrain-fbm", about = "Fractal simplex height field generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log pipeline stages to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a height field and write it as a 16-bit grayscale PNG.
    Generate {
        /// Grid width in cells (defaults to the base heightmap's width).
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Grid height in cells (defaults to the base heightmap's height).
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Existing heightmap to blend over. A flat zero field when omitted.
        #[arg(short, long)]
        base: Option<PathBuf>,

        /// Output file path.
        #[arg(short, long, default_value = "heightmap.png")]
        output: PathBuf,

        /// Recipe parameters as a JSON string (see `schema`).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// Print the simplex noise value at one point.
    Sample {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },
    /// Print the parameter schema accepted by `--params`.
    Schema,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(level)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&Recipe::param_schema())?);
        }
        Command::Sample { x, y } => {
            let value = evaluate(x, y);
            if cli.json {
                let info = serde_json::json!({"x": x, "y": y, "value": value});
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{value}");
            }
        }
        Command::Generate {
            width,
            height,
            base,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(CliError::Params)?;

            let base_field = base
                .as_deref()
                .map(snapshot::read_png)
                .transpose()?;
            let width = width
                .or(base_field.as_ref().map(Field::width))
                .unwrap_or(DEFAULT_SIZE);
            let height = height
                .or(base_field.as_ref().map(Field::height))
                .unwrap_or(DEFAULT_SIZE);
            let existing = match base_field {
                Some(field) => field,
                None => Field::new(width, height)?,
            };
            debug!(width, height, base = ?base, "resolved grid");

            let recipe = Recipe::from_json(width, height, &params)?;
            let field = generate(&recipe, &existing)?;
            snapshot::write_png(&field, recipe.range.min, recipe.range.max, &output)?;

            let (min, max) = field.value_range().unwrap_or((f64::NAN, f64::NAN));
            if cli.json {
                let info = serde_json::json!({
                    "recipe": recipe,
                    "min": min,
                    "max": max,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "generated {width}x{height} ({} octaves, blend {}) range [{min:.4}, {max:.4}] -> {}",
                    recipe.fractal.octaves,
                    recipe.blend,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({
                "error": e.to_string(),
                "kind": e.kind(),
                "exit_code": e.exit_code(),
            });
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
