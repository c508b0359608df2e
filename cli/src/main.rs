use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use bej::{load_file, BejError, DecodeOptions, Decoder, OutputBuffer};

#[derive(Parser)]
#[command(name = "bej")]
#[command(about = "Decode a BEJ payload to JSON using a schema dictionary", long_about = None)]
struct Cli {
    /// Schema dictionary file
    dictionary: PathBuf,

    /// BEJ payload file
    payload: PathBuf,

    /// Output JSON file
    #[arg(default_value = "decoded.json")]
    output: PathBuf,

    /// Print the JSON to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// JSON file with decode limits
    #[arg(long)]
    config: Option<PathBuf>,

    /// Deepest container nesting accepted
    #[arg(long)]
    max_depth: Option<usize>,

    /// Bytes of JSON text the output buffer accepts
    #[arg(long)]
    output_capacity: Option<usize>,

    /// Show informational logs (honours RUST_LOG when set)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all logs
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> Result<DecodeOptions, BejError> {
    let mut options = match &cli.config {
        Some(path) => DecodeOptions::from_json_file(path)?,
        None => DecodeOptions::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        options.max_depth = max_depth;
    }
    if let Some(capacity) = cli.output_capacity {
        options.output_capacity = capacity;
    }
    options.validate()?;
    Ok(options)
}

fn decode(cli: &Cli, options: &DecodeOptions) -> Result<OutputBuffer, BejError> {
    let dictionary = load_file(&cli.dictionary)?;
    let payload = load_file(&cli.payload)?;

    let decoder = Decoder::with_options(&dictionary, options.clone())?;
    let mut out = OutputBuffer::new(options.output_capacity);
    decoder.decode(&payload, &mut out)?;
    Ok(out)
}

fn main() -> Result<(), BejError> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let options = load_options(&cli)?;
    let out = decode(&cli, &options)?;

    if cli.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(out.as_bytes())?;
        writeln!(stdout)?;
    } else {
        out.flush_to_file(&cli.output)?;
        println!("Decoded JSON written to {}", cli.output.display());
    }
    Ok(())
}
