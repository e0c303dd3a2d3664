use crate::commands::{self, CompareArgs, CountyArgs, MapArgs, OutputFormat};
use crate::infra;
use av_readiness::config::AppConfig;
use av_readiness::error::AppError;
use av_readiness::telemetry;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "av-readiness",
    about = "Score and compare autonomous-vehicle readiness across census tracts and counties",
    version
)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) shared: SharedArgs,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Dataset overview and statewide averages (default command)
    Summary,
    /// List the counties present in the dataset
    Counties,
    /// Values for one choropleth layer, optionally focused on a county
    Map(MapArgs),
    /// Side-by-side comparison of two counties or the state average
    Compare(CompareArgs),
    /// Sub-index and input-metric percentages for one county
    County(CountyArgs),
    /// Validate a weight triple given with --pi/--di/--svi
    Weights,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SharedArgs {
    /// Metric table to load (.geojson, .json or .csv); overrides AV_DATA_PATH
    #[arg(long, global = true)]
    pub(crate) data: Option<PathBuf>,
    /// Physical infrastructure weight
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub(crate) pi: Option<f64>,
    /// Digital infrastructure weight
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub(crate) di: Option<f64>,
    /// Social vulnerability weight
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub(crate) svi: Option<f64>,
    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

impl SharedArgs {
    pub(crate) fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let weights = infra::resolve_weights(&config, &cli.shared)?;
    let format = cli.shared.format();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let command = cli.command.unwrap_or(Command::Summary);
    if let Command::Weights = command {
        commands::weights(&mut out, &weights, format)?;
        return Ok(out.flush()?);
    }

    let path = cli.shared.data.unwrap_or(config.data.path);
    let engine = infra::load_engine(&path)?;

    match command {
        Command::Summary => commands::summary(&mut out, &engine, &weights, format)?,
        Command::Counties => commands::counties(&mut out, &engine, format)?,
        Command::Map(args) => commands::map(&mut out, &engine, &weights, &args, format)?,
        Command::Compare(args) => commands::compare(&mut out, &engine, &weights, &args, format)?,
        Command::County(args) => commands::county(&mut out, &engine, &weights, &args, format)?,
        Command::Weights => {}
    }

    Ok(out.flush()?)
}
