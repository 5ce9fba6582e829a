//! Area-weighted raster summation tool.
//!
//! Sums the cells of a raster map, optionally weighting each cell by
//! its true ground area and gating inclusion through an integer mask
//! raster. Prints the scaled total on stdout; optionally writes a
//! per-cell contribution raster. Logs and progress go to stderr; the
//! result is the only line on stdout.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use raster_store::RasterStore;
use raster_sum::{OutputKind, RowDriver, SumConfig};

#[derive(Parser, Debug)]
#[command(name = "rsum")]
#[command(about = "Area-weighted summation of raster gridcells")]
#[command(version)]
struct Args {
    /// Input raster map to sum
    #[arg(short, long, value_name = "NAME")]
    input: String,

    /// Write per-cell weighted values to this raster map
    #[arg(short, long, value_name = "NAME")]
    output: Option<String>,

    /// Integer raster map gating which cells are included
    #[arg(long, value_name = "NAME")]
    mask: Option<String>,

    /// Mask value marking included cells (required with --mask)
    #[arg(long, value_name = "VALUE")]
    field: Option<i32>,

    /// Scaling factor applied to the total before reporting
    #[arg(long, value_name = "FACTOR", default_value = "1")]
    scale: f64,

    /// Suppress progress reporting
    #[arg(short, long)]
    quiet: bool,

    /// Write single-precision output cells instead of double
    #[arg(short = 'f', long)]
    single_precision: bool,

    /// Fill excluded output cells with NaN instead of 0.0
    #[arg(short = 'n', long)]
    null_default: bool,

    /// Weight each cell value by its ground area in m²
    #[arg(short = 'a', long)]
    area_weight: bool,

    /// Data directory holding the raster maps
    #[arg(long, env = "RSUM_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing; logs go to stderr, the result to stdout.
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // The invoking command line becomes the output raster's history.
    let command = std::env::args().collect::<Vec<_>>().join(" ");

    let config = SumConfig {
        input: args.input,
        output: args.output,
        mask: args.mask,
        field: args.field,
        scale: args.scale,
        output_kind: if args.single_precision {
            OutputKind::Single
        } else {
            OutputKind::Double
        },
        null_fill: args.null_default,
        area_weight: args.area_weight,
        quiet: args.quiet,
        command: Some(command),
    };

    let store = RasterStore::open(&args.data_dir);
    let outcome = RowDriver::new(&store, &config).run()?;

    info!(
        rows = outcome.rows,
        cols = outcome.cols,
        cells_counted = outcome.cells_counted,
        "row scan complete"
    );

    println!("{:.6}", outcome.scaled(config.scale));
    Ok(())
}
