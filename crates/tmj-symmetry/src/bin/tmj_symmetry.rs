//! tmj-symmetry CLI: left/right TMJ symmetry assessment from detector boxes.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;

use tmj_symmetry::detect::{self, PrecomputedDetections};
use tmj_symmetry::engine::SymmetryAnalyzeConfig;
use tmj_symmetry::render::{self, RenderStyle, DEFAULT_JPEG_QUALITY};
use tmj_symmetry::{BoundingBox, DetectionSet, SymmetryAnalyzer, SymmetryParams};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;
#[cfg(not(feature = "tracing"))]
use std::str::FromStr;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "tmj-symmetry")]
#[command(about = "Assess left/right temporomandibular joint symmetry from detected bounding boxes")]
#[command(version)]
struct Cli {
    /// Default log level (error, warn, info, debug, trace). `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an image with detector output stored as JSON.
    Analyze(AnalyzeArgs),

    /// Analyze using a JSON config file.
    Run {
        /// Path to the config JSON.
        #[arg(long)]
        config: PathBuf,
    },

    /// Compute metrics for two boxes given on the command line.
    Classify(ClassifyArgs),
}

#[derive(Debug, Clone, Args)]
struct PolicyArgs {
    /// Asymmetry percentage above which a deformation is suspected.
    #[arg(long)]
    threshold: Option<f64>,

    /// Drop detections scoring below this confidence.
    #[arg(long)]
    min_confidence: Option<f32>,
}

impl PolicyArgs {
    fn apply(&self, mut params: SymmetryParams) -> SymmetryParams {
        if let Some(threshold) = self.threshold {
            params.asymmetry_threshold_percent = threshold;
        }
        if let Some(min_confidence) = self.min_confidence {
            params.min_confidence = min_confidence;
        }
        params
    }
}

#[derive(Debug, Clone, Args)]
struct AnalyzeArgs {
    /// Path to the radiograph.
    #[arg(long)]
    image: PathBuf,

    /// Path to the detector output (JSON array of {bbox, confidence}).
    #[arg(long)]
    detections: PathBuf,

    /// Where to write the JSON report.
    #[arg(long, default_value = "tmj_report.json")]
    report: PathBuf,

    /// Where to write the annotated JPEG. Skipped when metrics are not computed.
    #[arg(long, default_value = "tmj_result.jpg")]
    annotated: PathBuf,

    /// JPEG quality for the annotated image (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    jpeg_quality: u8,

    #[command(flatten)]
    policy: PolicyArgs,
}

#[derive(Debug, Clone, Args)]
struct ClassifyArgs {
    /// Image width in pixels.
    #[arg(long)]
    image_width: f64,

    /// First box as x_min,y_min,x_max,y_max.
    #[arg(long, value_parser = parse_box)]
    left: BoundingBox,

    /// Second box as x_min,y_min,x_max,y_max.
    #[arg(long, value_parser = parse_box)]
    right: BoundingBox,

    #[command(flatten)]
    policy: PolicyArgs,
}

struct Job {
    image: PathBuf,
    detections: PathBuf,
    report: PathBuf,
    annotated: PathBuf,
    jpeg_quality: u8,
    analyzer: SymmetryAnalyzer,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Analyze(args) => run_job(Job {
            analyzer: SymmetryAnalyzer::new(args.policy.apply(SymmetryParams::default())),
            image: args.image,
            detections: args.detections,
            report: args.report,
            annotated: args.annotated,
            jpeg_quality: args.jpeg_quality,
        }),
        Commands::Run { config } => run_config(&config),
        Commands::Classify(args) => run_classify(&args),
    }
}

/// `--log-level` sets the default; `RUST_LOG` overrides it per module.
#[cfg(not(feature = "tracing"))]
fn init_logging(level: &str) -> CliResult<()> {
    let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(level: &str) -> CliResult<()> {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // the subscriber also forwards `log` records
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn run_config(path: &Path) -> CliResult<()> {
    let cfg = SymmetryAnalyzeConfig::load_json(path)?;
    info!("loaded config {}", path.display());
    run_job(Job {
        image: PathBuf::from(&cfg.image_path),
        detections: PathBuf::from(&cfg.detections_path),
        report: cfg.report_path(),
        annotated: cfg.annotated_path(),
        jpeg_quality: DEFAULT_JPEG_QUALITY,
        analyzer: cfg.build_analyzer(),
    })
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip(job)))]
fn run_job(job: Job) -> CliResult<()> {
    let detector = PrecomputedDetections::load_json(&job.detections)?;
    let (image, result) = detect::analyze_image_path(&detector, &job.image, &job.analyzer)?;

    let report = result.report(job.image.to_string_lossy());
    write_report(&job.report, &report)?;

    if let Ok(analysis) = &result.outcome {
        let annotated = render::annotate(&image, &analysis.regions, &RenderStyle::default());
        render::save_jpeg(&annotated, &job.annotated, job.jpeg_quality)?;
        info!("wrote annotated image to {}", job.annotated.display());
    }

    if let Some(status) = &report.status {
        println!("{status}");
    }
    Ok(())
}

fn write_report(path: &Path, report: &tmj_symmetry::engine::SymmetryReport) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    report.write_json(path)?;
    info!("wrote report JSON to {}", path.display());
    Ok(())
}

fn run_classify(args: &ClassifyArgs) -> CliResult<()> {
    let analyzer = SymmetryAnalyzer::new(args.policy.apply(SymmetryParams::default()));
    let detections = DetectionSet::new(vec![args.left, args.right]);
    let analysis = analyzer
        .analyze(&detections, args.image_width)
        .map_err(|e| e.to_string())?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

fn parse_box(s: &str) -> Result<BoundingBox, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate: {e}"))?;
    let &[x_min, y_min, x_max, y_max] = values.as_slice() else {
        return Err(format!("expected 4 comma-separated values, got {}", values.len()));
    };
    BoundingBox::try_new(x_min, y_min, x_max, y_max).map_err(|e| e.to_string())
}
