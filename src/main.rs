use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pnm_core::{
    Axis, ColorSpace, DitherAlgorithm, DitherOptions, Gamma, Point, Rotation, ScanStrategy,
};
use pnmlab::files::ColorFiles;
use pnmlab::models::{AppConfig, DitherKind};
use pnmlab::services::{self, DitherJob, ImageSummary, LineJob};

#[derive(Parser)]
#[command(name = "pnmlab")]
#[command(about = "Process binary PNM images: transforms, lines, dithering, color spaces")]
struct Cli {
    /// YAML file with default option values (falls back to $PNMLAB_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output from every stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace every sample with its complement
    Invert { input: PathBuf, output: PathBuf },
    /// Flip the image across an axis
    Mirror {
        input: PathBuf,
        output: PathBuf,

        /// Horizontal swaps left and right; vertical swaps top and bottom
        #[arg(long, value_enum, default_value = "horizontal")]
        axis: AxisArg,
    },
    /// Rotate the image by 90 degrees
    Rotate {
        input: PathBuf,
        output: PathBuf,

        #[arg(long, value_enum, default_value = "cw")]
        direction: DirectionArg,
    },
    /// Draw an anti-aliased thick line on a grey image
    Line {
        input: PathBuf,
        output: PathBuf,

        /// Start point as X,Y in pixel coordinates
        #[arg(long, value_parser = parse_point)]
        from: Point,

        /// End point as X,Y in pixel coordinates
        #[arg(long, value_parser = parse_point)]
        to: Point,

        /// Line brightness (0-255)
        #[arg(long)]
        color: Option<u8>,

        /// Line width in pixels
        #[arg(long)]
        thickness: Option<f64>,

        /// Gamma exponent; 0 selects sRGB
        #[arg(long)]
        gamma: Option<f64>,

        /// Enumerate pixels by walking the line instead of its bounding box
        #[arg(long)]
        octant: bool,
    },
    /// Reduce the image to fewer bits per sample
    Dither {
        input: PathBuf,
        output: PathBuf,

        #[arg(long, value_enum)]
        algorithm: Option<DitherKind>,

        /// Bits kept per sample (1-8)
        #[arg(long)]
        bits: Option<u8>,

        /// Gamma exponent; 0 selects sRGB
        #[arg(long)]
        gamma: Option<f64>,

        /// Dither a horizontal gradient instead of the input's content
        #[arg(long)]
        gradient: bool,
    },
    /// Convert a color image between color spaces
    Convert {
        /// Source color space (RGB, HSL, HSV, YCbCr.601, YCbCr.709, YCoCg, CMY)
        #[arg(long)]
        from: ColorSpace,

        /// Target color space
        #[arg(long)]
        to: ColorSpace,

        /// 1 for a single .ppm/.pnm file, 3 for name_1/_2/_3.pgm planes
        #[arg(long, default_value_t = 1)]
        input_count: u8,

        input: PathBuf,

        /// 1 for a single .ppm/.pnm file, 3 for name_1/_2/_3.pgm planes
        #[arg(long, default_value_t = 1)]
        output_count: u8,

        output: PathBuf,
    },
    /// Print the header of an image
    Info { input: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AxisArg {
    Horizontal,
    Vertical,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Horizontal => Axis::Horizontal,
            AxisArg::Vertical => Axis::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Cw,
    Ccw,
}

impl From<DirectionArg> for Rotation {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Cw => Rotation::Clockwise,
            DirectionArg::Ccw => Rotation::CounterClockwise,
        }
    }
}

/// Parse "X,Y" into a point.
fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|e| format!("invalid X '{x}': {e}"))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|e| format!("invalid Y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = AppConfig::load(AppConfig::resolve_path(cli.config).as_deref());

    match cli.command {
        Commands::Invert { input, output } => {
            let summary = services::invert_file(&input, &output)?;
            report(&output, &summary);
        }
        Commands::Mirror {
            input,
            output,
            axis,
        } => {
            let summary = services::mirror_file(&input, &output, axis.into())?;
            report(&output, &summary);
        }
        Commands::Rotate {
            input,
            output,
            direction,
        } => {
            let summary = services::rotate_file(&input, &output, direction.into())?;
            report(&output, &summary);
        }
        Commands::Line {
            input,
            output,
            from,
            to,
            color,
            thickness,
            gamma,
            octant,
        } => run_line_command(
            &config, &input, &output, from, to, color, thickness, gamma, octant,
        )?,
        Commands::Dither {
            input,
            output,
            algorithm,
            bits,
            gamma,
            gradient,
        } => run_dither_command(
            &config, &input, &output, algorithm, bits, gamma, gradient,
        )?,
        Commands::Convert {
            from,
            to,
            input_count,
            input,
            output_count,
            output,
        } => run_convert_command(from, to, input_count, &input, output_count, &output)?,
        Commands::Info { input } => {
            let summary = services::describe_file(&input)?;
            println!("{}: {summary}", input.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "pnmlab=debug,pnm_core=debug"
    } else {
        "pnmlab=info,pnm_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn report(output: &Path, summary: &ImageSummary) {
    println!("Wrote {} ({summary})", output.display());
}

fn gamma_or_config(flag: Option<f64>, config: &AppConfig) -> Gamma {
    flag.map(Gamma::from_param).unwrap_or_else(|| config.gamma())
}

/// Draw one line; unset flags come from the config file.
#[allow(clippy::too_many_arguments)]
fn run_line_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    from: Point,
    to: Point,
    color: Option<u8>,
    thickness: Option<f64>,
    gamma: Option<f64>,
    octant: bool,
) -> anyhow::Result<()> {
    let strategy = if octant {
        ScanStrategy::OctantWalk
    } else {
        config.scan.into()
    };
    let job = LineJob {
        from,
        to,
        color: color.unwrap_or(config.line.color),
        thickness: thickness.unwrap_or(config.line.thickness),
        gamma: gamma_or_config(gamma, config),
        strategy,
    };

    let summary = services::draw_line_file(input, output, &job)?;
    report(output, &summary);
    Ok(())
}

fn run_dither_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    algorithm: Option<DitherKind>,
    bits: Option<u8>,
    gamma: Option<f64>,
    gradient: bool,
) -> anyhow::Result<()> {
    let algorithm: DitherAlgorithm = algorithm.unwrap_or(config.dither).into();
    let options = DitherOptions::new()
        .bit_rate(bits.unwrap_or(config.bits))
        .gamma(gamma_or_config(gamma, config));
    let job = DitherJob {
        algorithm,
        options,
        gradient,
    };

    let summary = services::dither_file(input, output, &job)?;
    println!(
        "Dithered with {algorithm} at {} bit(s)",
        job.options.bit_rate
    );
    report(output, &summary);
    Ok(())
}

fn run_convert_command(
    from: ColorSpace,
    to: ColorSpace,
    input_count: u8,
    input: &Path,
    output_count: u8,
    output: &Path,
) -> anyhow::Result<()> {
    let inputs = ColorFiles::new(input, input_count)?;
    let outputs = ColorFiles::new(output, output_count)?;

    let summary = services::convert_files(&inputs, &outputs, from, to)?;
    for path in outputs.paths() {
        println!("Wrote {} ({from} -> {to}, {summary})", path.display());
    }
    Ok(())
}
