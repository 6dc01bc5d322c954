use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use neo_orbit_kernel::config::{self, KernelSettings, ObjectConfig};
use neo_orbit_kernel::export::{self, Format};
use neo_orbit_kernel::orbits::{OrbitalElements, Propagator};
use neo_orbit_kernel::time;
use neo_orbit_kernel::units::{au_to_km, rad_to_deg};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Evaluate and sample two-body orbits of small bodies from classical elements.
#[derive(Parser)]
#[command(author, version, about = "Small-body orbit kernel CLI")]
struct Cli {
    /// Object catalog: YAML list, TOML file, or directory of TOML files
    #[arg(long, global = true, default_value = "configs/objects")]
    catalog: PathBuf,

    /// Kernel settings TOML (solver tolerance, iteration budget, sampling defaults)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a calendar date (YYYY-MM-DD[THH:MM:SS]) to a Julian Date
    Jd {
        date: String,

        /// Print the Modified Julian Date instead
        #[arg(long, default_value_t = false)]
        mjd: bool,
    },

    /// Heliocentric ecliptic position at a single epoch
    Evaluate {
        #[command(flatten)]
        source: ElementSource,

        /// Target epoch (calendar date or Julian Date)
        #[arg(long)]
        at: String,

        /// Also print mean, eccentric, and true anomalies
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },

    /// Positions over an evenly spaced grid of epochs
    Sample {
        #[command(flatten)]
        source: ElementSource,

        /// First epoch (calendar date or Julian Date)
        #[arg(long)]
        start: String,

        /// Step between samples in days (negative walks backwards)
        #[arg(long, allow_negative_numbers = true)]
        step_days: Option<f64>,

        /// Number of samples
        #[arg(long)]
        steps: Option<usize>,

        /// Spread the samples over exactly one orbital period
        #[arg(long, default_value_t = false, conflicts_with = "step_days")]
        full_period: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Output path (`-` for stdout)
        #[arg(long, default_value = "-")]
        output: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct ElementSource {
    /// Object name or designation from the catalog (case-insensitive)
    #[arg(long)]
    object: Option<String>,

    /// Standalone object file (TOML) with an `[elements]` table
    #[arg(long)]
    elements: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum OutputFormat {
    Csv,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Csv => Format::Csv,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => config::load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => KernelSettings::default(),
    };

    match cli.command {
        Command::Jd { date, mjd } => {
            let jd = time::parse_julian_date(&date)?;
            if mjd {
                println!("{:.6}", time::to_modified_julian_date(jd));
            } else {
                println!("{:.6}", jd);
            }
        }
        Command::Evaluate {
            source,
            at,
            verbose,
        } => {
            let object = resolve_object(&cli.catalog, &source)?;
            let elements = object.elements()?;
            let jd = time::parse_julian_date(&at)?;
            let state = propagator(&elements, &settings).state_at(jd)?;

            println!("{} @ JD {:.6}", object.name, jd);
            println!("  X = {:>18.12} AU", state.position.x);
            println!("  Y = {:>18.12} AU", state.position.y);
            println!("  Z = {:>18.12} AU", state.position.z);
            println!(
                "  r = {:>18.12} AU ({:.1} km)",
                state.radius_au,
                au_to_km(state.radius_au)
            );
            if verbose {
                println!("  M = {:>18.12} deg", rad_to_deg(state.mean_anomaly));
                println!("  E = {:>18.12} deg", rad_to_deg(state.eccentric_anomaly));
                println!("  ν = {:>18.12} deg", rad_to_deg(state.true_anomaly));
            }
        }
        Command::Sample {
            source,
            start,
            step_days,
            steps,
            full_period,
            format,
            output,
        } => {
            let object = resolve_object(&cli.catalog, &source)?;
            let elements = object.elements()?;
            let start_jd = time::parse_julian_date(&start)?;
            let propagator = propagator(&elements, &settings);
            let step_count = steps.unwrap_or(settings.sampling.step_count);
            let step_days = if full_period {
                if step_count == 0 {
                    0.0
                } else {
                    propagator.period_days() / step_count as f64
                }
            } else {
                step_days.unwrap_or(settings.sampling.step_days)
            };

            let path = propagator.sample(start_jd, step_days, step_count)?;
            info!(
                object = %object.name,
                samples = path.len(),
                "writing orbit path to {}",
                output.display()
            );
            export::write_path(&output, format.into(), Some(&object.name), &path)?;
        }
    }

    Ok(())
}

fn propagator(elements: &OrbitalElements, settings: &KernelSettings) -> Propagator {
    Propagator::new(elements).with_settings(settings.solver)
}

fn resolve_object(catalog: &Path, source: &ElementSource) -> anyhow::Result<ObjectConfig> {
    if let Some(path) = &source.elements {
        let objects = config::load_objects(path)
            .with_context(|| format!("loading elements from {}", path.display()))?;
        return objects
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no object found in {}", path.display()));
    }

    let name = source
        .object
        .as_deref()
        .ok_or_else(|| anyhow!("either --object or --elements is required"))?;
    let objects = config::load_objects(catalog)
        .with_context(|| format!("loading catalog from {}", catalog.display()))?;
    Ok(config::find_object(&objects, name)?.clone())
}
