use clap::{Parser, Subcommand};
use rotating_bloom::{
    BloomFilterConfig, BloomFilterConfigBuilder, BloomFilterStats, BloomParams,
    RotatingBloomFilter, common::bits2hr,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Load filter configuration from a JSON file (flags below are ignored)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Expected number of items per generation
    #[arg(short, long, global = true, default_value = "100000")]
    capacity: usize,

    /// False positive rate (between 0 and 1)
    #[arg(short, long, global = true, default_value = "0.00001")]
    fpr: f64,

    /// Rotate between two filters so old items expire
    #[arg(short, long, global = true)]
    expire: bool,

    /// Fraction of capacity at which inserts are mirrored
    #[arg(long, global = true, default_value = "0.5")]
    double_write: f64,

    /// Fraction of capacity at which filters rotate
    #[arg(long, global = true, default_value = "0.8")]
    rotate: f64,

    /// Do not log construction and rotation events
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the sizing derived from the configuration
    Params,

    /// Print every input line not seen recently
    Dedup {
        /// Input file, stdin if omitted
        input: Option<PathBuf>,
    },

    /// Insert every input line and print the resulting filter state
    Stats {
        /// Input file, stdin if omitted
        input: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn filter_config(&self) -> Result<BloomFilterConfig, Box<dyn std::error::Error>> {
        if let Some(path) = &self.config {
            let file = File::open(path)?;
            let mut config: BloomFilterConfig =
                serde_json::from_reader(BufReader::new(file))?;
            if self.quiet {
                config.verbose = false;
            }
            return Ok(config);
        }

        Ok(BloomFilterConfigBuilder::default()
            .capacity(self.capacity)
            .false_positive_rate(self.fpr)
            .expire(self.expire)
            .double_write_threshold(self.double_write)
            .rotation_threshold(self.rotate)
            .verbose(!self.quiet)
            .build()?)
    }
}

fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Splits input into raw byte lines. Lines need not be UTF-8; a trailing
/// `\r` is dropped so CRLF input dedups the same as LF input.
fn byte_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<Vec<u8>>> {
    reader.split(b'\n').map(|line| {
        line.map(|mut line| {
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            line
        })
    })
}

/// Writes every line not reported by `filter`, inserting all of them.
/// Returns `(total, emitted)`.
fn dedup_lines<R: BufRead, W: Write>(
    filter: &mut RotatingBloomFilter,
    reader: R,
    out: &mut W,
) -> io::Result<(usize, usize)> {
    let (mut total, mut emitted) = (0usize, 0usize);
    for line in byte_lines(reader) {
        let line = line?;
        total += 1;
        if !filter.contains(&line) {
            out.write_all(&line)?;
            out.write_all(b"\n")?;
            emitted += 1;
        }
        filter.insert(&line);
    }
    Ok((total, emitted))
}

/// Bits held by `filters` slots, saturating for absurd capacities.
fn total_bits(params: &BloomParams, filters: usize) -> usize {
    params.bit_vector_size.saturating_mul(filters)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.filter_config()?;
    debug!(?config, "Resolved configuration");

    match &cli.command {
        Commands::Params => {
            config.validate()?;
            let params = BloomParams::from(&config);
            let filters = if config.expire { 2 } else { 1 };

            println!("Bloom filter parameters:");
            println!("  Capacity: {}", config.capacity);
            println!("  False positive rate: {}", config.false_positive_rate);
            println!("  Bits per filter: {}", params.bit_vector_size);
            println!("  Size per filter: {}", bits2hr(params.bit_vector_size));
            println!("  Total size: {}", bits2hr(total_bits(&params, filters)));
            println!("  Hash probes per item: {}", params.num_hashes);
            println!("  Double-write at: {} items", params.double_write_at);
            println!("  Rotate at: {} items", params.rotate_at);
        }
        Commands::Dedup { input } => {
            let mut filter = RotatingBloomFilter::new(config)?;
            let reader = open_input(input.as_deref())?;
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());

            let (total, emitted) = dedup_lines(&mut filter, reader, &mut out)?;
            out.flush()?;

            info!(
                total,
                emitted,
                suppressed = total - emitted,
                rotations = filter.rotations(),
                "Dedup finished"
            );
        }
        Commands::Stats { input, json } => {
            let mut filter = RotatingBloomFilter::new(config)?;
            let reader = open_input(input.as_deref())?;
            for line in byte_lines(reader) {
                filter.insert(&line?);
            }

            let snapshot = filter.snapshot();
            if *json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{snapshot}");
                println!("  Load factor: {:.2}%", filter.load_factor() * 100.0);
            }
        }
    }

    Ok(())
}
