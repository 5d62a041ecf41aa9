//! QRAM command-line driver.
//!
//! Encodes a file into an LT fountain stream, pushes it through a simulated
//! lossy/duplicating channel, and decodes it back to disk. Useful for
//! exercising the codec without a camera or barcode renderer in the loop.
//!
//! # Usage
//!
//! ```bash
//! # Encode and decode a.txt through a channel that drops 10% of packets
//! qram --input a.txt --output a.out.txt --loss-rate 0.1
//!
//! # Wrap a filename envelope and compress before fountain-encoding
//! qram --input a.txt --output a.out.txt --name a.txt --compress
//! ```

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use qram_core::{LtDecoder, LtEncoder};

/// Drive the QRAM fountain codec over a simulated channel.
#[derive(Parser, Debug)]
#[command(name = "qram")]
#[command(about = "QRAM fountain codec driver")]
#[command(version)]
struct Args {
    /// Path to the file to encode
    #[arg(short, long)]
    input: PathBuf,

    /// Path to write the decoded file to
    #[arg(short, long)]
    output: PathBuf,

    /// Block size in bytes
    #[arg(long, default_value_t = 512)]
    block_size: u32,

    /// Session identifier. Random when omitted.
    #[arg(long)]
    run_id: Option<u32>,

    /// Fraction of packets dropped by the simulated channel, in `[0, 1)`
    #[arg(long, default_value_t = 0.0)]
    loss_rate: f64,

    /// Fraction of delivered packets that are additionally duplicated
    #[arg(long, default_value_t = 0.0)]
    duplicate_rate: f64,

    /// Seed for the channel's loss/duplication randomness. Random when
    /// omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound on packets sent before giving up
    #[arg(long, default_value_t = 10_000)]
    max_packets: u32,

    /// Wrap the payload in a filename envelope under this name before
    /// fountain-encoding
    #[arg(long)]
    name: Option<String>,

    /// Wrap the payload in a gzip envelope (skipped automatically if it
    /// would not help) before fountain-encoding
    #[arg(long, default_value_t = false)]
    compress: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let run_id = args.run_id.unwrap_or_else(rand::random);
    let mut channel_rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    tracing::info!(
        input = %args.input.display(),
        run_id,
        block_size = args.block_size,
        "reading input"
    );
    let raw = tokio::fs::read(&args.input).await?;

    let named = match &args.name {
        Some(name) => qram_core::file_envelope::wrap_file(name, &raw),
        None => raw,
    };
    let (payload, was_compressed) =
        if args.compress { qram_core::compression::maybe_compress(&named) } else { (named, false) };
    tracing::info!(compressed = was_compressed, payload_len = payload.len(), "payload ready");

    let mut encoder = LtEncoder::new(&payload, args.block_size, run_id);
    let mut decoder = LtDecoder::new(encoder.block_count(), encoder.block_size(), run_id);

    let mut sent = 0u32;
    let mut delivered = 0u32;
    let mut done = false;
    while sent < args.max_packets {
        let packet = encoder.next_packet();
        sent += 1;

        if channel_rng.gen_bool(args.loss_rate.clamp(0.0, 1.0)) {
            continue;
        }
        delivered += 1;
        if decoder.push_packet(&packet) {
            done = true;
            break;
        }

        if channel_rng.gen_bool(args.duplicate_rate.clamp(0.0, 1.0))
            && decoder.push_packet(&packet)
        {
            done = true;
            break;
        }
    }

    if !done {
        tracing::warn!(sent, delivered, "gave up before the session completed");
        return Err("decoder did not converge within max_packets".into());
    }

    tracing::info!(
        sent,
        delivered,
        overhead_pct = 100.0 * (f64::from(sent) / f64::from(encoder.block_count()) - 1.0),
        "session complete"
    );

    let reconstructed = decoder.get_result(encoder.original_len());
    let (decompressed, _) = qram_core::compression::maybe_decompress(&reconstructed)?;
    let final_bytes = match qram_core::file_envelope::unwrap_file(&decompressed) {
        Some((name, body)) => {
            tracing::info!(recovered_name = %name, "unwrapped file envelope");
            body
        }
        None => decompressed,
    };

    tokio::fs::write(&args.output, &final_bytes).await?;
    tracing::info!(output = %args.output.display(), bytes = final_bytes.len(), "wrote output");

    Ok(())
}
