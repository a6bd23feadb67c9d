//! Converts Matrix Market text files to BMTX and back
//!
//! A `.bmtx` input is written as `.mtx` text; any other input is written as
//! BMTX. The output lands next to the input with its extension replaced
//! unless `--output` is given.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use sparse_mmio::constants::DEFAULT_TOOL_VALUE_BYTES;
use sparse_mmio::{read_coo_with_metadata, write_coo, FileFormat, ReadOptions};

#[derive(Parser)]
#[command(name = "mtx2bmtx")]
#[command(about = "Convert between Matrix Market text and binary BMTX files")]
#[command(version)]
struct Cli {
    /// Input .mtx or .bmtx file
    input: PathBuf,

    /// Store values as 8-byte doubles instead of 4-byte floats
    #[arg(short = 'd', long = "double-val")]
    double_val: bool,

    /// Index width in bytes (1, 2, 4 or 8); defaults to the minimal width
    #[arg(long = "idx-bytes")]
    idx_bytes: Option<u8>,

    /// Output path; defaults to the input with its extension replaced
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {}", cli.input.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> sparse_mmio::Result<()> {
    let input_format = FileFormat::from_path(&cli.input);
    let output_format = match input_format {
        FileFormat::Bmtx => FileFormat::MatrixMarket,
        FileFormat::MatrixMarket => FileFormat::Bmtx,
    };

    let (coo, meta) = read_coo_with_metadata::<u64, f64, _>(&cli.input, &ReadOptions::default())?;
    info!(
        "Read {} matrix {}x{} with {} entries",
        meta.typecode,
        coo.n_rows,
        coo.n_cols,
        coo.nnz()
    );

    let val_bytes = if cli.double_val {
        8
    } else {
        DEFAULT_TOOL_VALUE_BYTES
    };
    let mut meta = meta.with_val_bytes(val_bytes);
    if cli.idx_bytes.is_some() {
        meta = meta.with_idx_bytes(cli.idx_bytes);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension(output_format.extension()));

    info!(
        "Converting {} to {}",
        input_format.extension(),
        output_format.extension()
    );
    write_coo(&coo, &output, output_format.is_binary(), &meta)?;
    println!("{} file written to {}", output_format.extension().to_uppercase(), output.display());

    report_sizes(&cli.input, &output)
}

fn report_sizes(input: &Path, output: &Path) -> sparse_mmio::Result<()> {
    let size_in = fs::metadata(input)?.len();
    let size_out = fs::metadata(output)?.len();

    println!(
        "Size of input  file ({}): {:.3} MB",
        input.display(),
        size_in as f64 / 1_000_000.0
    );
    println!(
        "Size of output file ({}): {:.3} MB",
        output.display(),
        size_out as f64 / 1_000_000.0
    );
    if size_in > 0 {
        println!("Ratio: {:.2}%", size_out as f64 / size_in as f64 * 100.0);
    }
    Ok(())
}
