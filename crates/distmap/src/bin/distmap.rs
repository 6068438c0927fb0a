use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use distmap::chamfer::{BinaryMask, ProgressObserver, ScanPhase};
use distmap::io::{DistanceMapConfig, DistanceMapReport, DistmapIoError};
use distmap::raster::{self, RasterError};
use distmap::{ChamferDistanceTransform, ChamferPreset, ChamferWeights, DistanceMapError};
use log::{debug, info};
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

/// Compute a chamfer distance map of a binary mask image.
#[derive(Debug, Parser)]
#[command(name = "distmap", version)]
struct Cli {
    /// Input mask image (any format the `image` crate decodes).
    input: Option<PathBuf>,
    /// Output 16-bit PNG; defaults to `<input>_distmap.png`.
    output: Option<PathBuf>,
    /// JSON config; command line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Preset name (`borgefors`, `chessboard`, ...) or `orthogonal,diagonal`.
    #[arg(short, long)]
    weights: Option<ChamferWeights>,
    /// Keep distances in weight units instead of dividing by the orthogonal weight.
    #[arg(long)]
    no_normalize: bool,
    /// Mask value treated as foreground.
    #[arg(long)]
    label: Option<u8>,
    /// Write a JSON report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
    /// List weight presets and exit.
    #[arg(long)]
    list_presets: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("no input image given")]
    MissingInput,
    #[error("cannot derive an output path from {0}")]
    MissingOutput(PathBuf),
    #[error(transparent)]
    Io(#[from] DistmapIoError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    DistanceMap(#[from] DistanceMapError),
}

/// Logs every tenth of each scan.
struct LogProgress;

impl ProgressObserver for LogProgress {
    fn row_done(&mut self, phase: ScanPhase, rows_done: usize, total_rows: usize) {
        let stride = (total_rows / 10).max(1);
        if rows_done % stride == 0 || rows_done == total_rows {
            debug!("{phase}: {rows_done}/{total_rows} rows");
        }
    }
}

fn init_logging(verbosity: u8) {
    #[cfg(feature = "tracing")]
    {
        let _ = verbosity;
        let _ = LogTracer::init();
        distmap::core::init_tracing(false);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = distmap::core::init_with_level(distmap::core::level_from_verbosity(verbosity));
    }
}

fn resolve_config(cli: &Cli) -> Result<DistanceMapConfig, CliError> {
    let mut cfg = match &cli.config {
        Some(path) => DistanceMapConfig::load_json(path)?,
        None => DistanceMapConfig::default(),
    };
    if let Some(input) = &cli.input {
        cfg.input_path = Some(input.display().to_string());
    }
    if let Some(output) = &cli.output {
        cfg.output_path = Some(output.display().to_string());
    }
    if let Some(report) = &cli.report {
        cfg.report_path = Some(report.display().to_string());
    }
    if let Some(weights) = cli.weights {
        cfg.preset = None;
        cfg.params.weights = weights;
    }
    if cli.no_normalize {
        cfg.params.normalize = false;
    }
    if let Some(label) = cli.label {
        cfg.params.foreground_label = label;
    }
    Ok(cfg)
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if cli.list_presets {
        for preset in ChamferPreset::ALL {
            println!("{:<16} {}", preset.name(), preset.weights());
        }
        return Ok(());
    }

    let cfg = resolve_config(cli)?;
    let input = cfg
        .input_path
        .as_deref()
        .map(PathBuf::from)
        .ok_or(CliError::MissingInput)?;
    let output = cfg
        .output_path()
        .ok_or_else(|| CliError::MissingOutput(input.clone()))?;
    let params = cfg.build_params();
    info!(
        "weights {} normalize {} label {}",
        params.weights, params.normalize, params.foreground_label
    );

    let started = Instant::now();
    let img = image::open(&input).map_err(RasterError::from)?.to_luma8();
    let mask = BinaryMask::with_label(raster::gray_view(&img), params.foreground_label)?;
    let dt = ChamferDistanceTransform::from_params(&params)?;
    let map = dt.distance_map_observed(&mask, &mut LogProgress, None)?;
    raster::to_luma16(&map)?
        .save(&output)
        .map_err(RasterError::from)?;
    info!("computed in {:.1} ms", started.elapsed().as_secs_f64() * 1e3);

    if let Some(report_path) = &cfg.report_path {
        let mut report = DistanceMapReport::new(&map, &params);
        report.input_path = Some(input.display().to_string());
        report.output_path = Some(output.display().to_string());
        report.write_json(report_path)?;
        info!("wrote report to {report_path}");
    }

    println!(
        "{} -> {} ({}x{}, max distance {}, unreachable {})",
        input.display(),
        output.display(),
        map.width(),
        map.height(),
        map.max_distance,
        map.unreachable
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
