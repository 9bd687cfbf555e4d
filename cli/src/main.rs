use clap::{Parser, Subcommand, ValueEnum};
use hound::WavSpec;
use std::fs::File;
use std::path::PathBuf;
use tonewire_core::{
    digest, first_channel, Decoder, DtmfError, Encoder, SegmentStrategy, DEFAULT_SAMPLE_RATE,
    DEFAULT_TONE_SECONDS, PEAK_MAGNITUDE_RATIO,
};

#[derive(Parser)]
#[command(name = "tonewire")]
#[command(about = "DTMF audio codec for symbol strings and byte payloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Strategy {
    /// Split on silence gaps between tones
    Gaps,
    /// Half-overlapping fixed windows with duplicate suppression
    Windows,
}

impl From<Strategy> for SegmentStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Gaps => SegmentStrategy::SilenceGaps,
            Strategy::Windows => SegmentStrategy::SlidingWindows,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a symbol string to a WAV audio file
    Encode {
        /// Symbols to encode (0-9, A-D, *, #)
        #[arg(value_name = "SYMBOLS")]
        symbols: String,

        /// Output WAV file
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Tone duration in seconds (the gap after each tone matches it)
        #[arg(long, default_value_t = DEFAULT_TONE_SECONDS)]
        tone_seconds: f32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },

    /// Decode a WAV audio file and print the symbol string
    Decode {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// How to split the recording into analysis frames
        #[arg(long, value_enum, default_value_t = Strategy::Gaps)]
        strategy: Strategy,

        /// Log every analysis frame at debug level
        #[arg(long)]
        trace_frames: bool,
    },

    /// Encode a binary file as a hex digest carried in WAV audio
    Pack {
        /// Input binary file
        #[arg(value_name = "INPUT.BIN")]
        input: PathBuf,

        /// Output WAV file
        #[arg(value_name = "OUTPUT.WAV")]
        output: PathBuf,

        /// Tone duration in seconds (the gap after each tone matches it)
        #[arg(long, default_value_t = DEFAULT_TONE_SECONDS)]
        tone_seconds: f32,

        /// Sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,
    },

    /// Decode a WAV audio file back into the binary payload
    Unpack {
        /// Input WAV file
        #[arg(value_name = "INPUT.WAV")]
        input: PathBuf,

        /// Output binary file
        #[arg(value_name = "OUTPUT.BIN")]
        output: PathBuf,

        /// How to split the recording into analysis frames
        #[arg(long, value_enum, default_value_t = Strategy::Gaps)]
        strategy: Strategy,

        /// Log every analysis frame at debug level
        #[arg(long)]
        trace_frames: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            symbols,
            output,
            tone_seconds,
            sample_rate,
        } => encode_command(&symbols, &output, tone_seconds, sample_rate)?,
        Commands::Decode {
            input,
            strategy,
            trace_frames,
        } => decode_command(&input, strategy, trace_frames)?,
        Commands::Pack {
            input,
            output,
            tone_seconds,
            sample_rate,
        } => pack_command(&input, &output, tone_seconds, sample_rate)?,
        Commands::Unpack {
            input,
            output,
            strategy,
            trace_frames,
        } => unpack_command(&input, &output, strategy, trace_frames)?,
    }

    Ok(())
}

fn encode_command(
    symbols: &str,
    output_path: &PathBuf,
    tone_seconds: f32,
    sample_rate: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let encoder = Encoder::new(sample_rate, tone_seconds);
    let samples = encoder.encode(symbols);
    log::info!("encoded {:?} to {} samples", symbols, samples.len());

    write_wav(output_path, &samples, sample_rate)?;
    println!("Wrote {} samples to {}", samples.len(), output_path.display());
    Ok(())
}

fn decode_command(
    input_path: &PathBuf,
    strategy: Strategy,
    trace_frames: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (samples, sample_rate) = read_wav_mono(input_path)?;
    log::info!(
        "read {} mono samples at {} Hz from {}",
        samples.len(),
        sample_rate,
        input_path.display()
    );

    let mut decoder = Decoder::with_strategy(sample_rate, strategy.into());
    if trace_frames {
        decoder.set_observer(Box::new(|interval, spectrum, matched| {
            log::debug!(
                "frame [{}..{}): peaks {:?} -> {:?}",
                interval.start,
                interval.end,
                spectrum.peak_frequencies(PEAK_MAGNITUDE_RATIO),
                matched
            );
        }));
    }

    let decoded = decoder.decode(&samples)?;
    println!("{}", decoded);
    Ok(())
}

fn pack_command(
    input_path: &PathBuf,
    output_path: &PathBuf,
    tone_seconds: f32,
    sample_rate: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input_path)?;
    let digest_text = digest::digest_from_bytes(&data);
    log::info!("packing {} bytes as {} symbols", data.len(), digest_text.len());

    let encoder = Encoder::new(sample_rate, tone_seconds);
    let samples = encoder.encode(&digest_text);

    write_wav(output_path, &samples, sample_rate)?;
    println!(
        "Packed {} bytes into {} samples at {}",
        data.len(),
        samples.len(),
        output_path.display()
    );
    Ok(())
}

fn unpack_command(
    input_path: &PathBuf,
    output_path: &PathBuf,
    strategy: Strategy,
    trace_frames: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (samples, sample_rate) = read_wav_mono(input_path)?;

    let mut decoder = Decoder::with_strategy(sample_rate, strategy.into());
    if trace_frames {
        decoder.set_observer(Box::new(|interval, spectrum, matched| {
            log::debug!(
                "frame [{}..{}): peaks {:?} -> {:?}",
                interval.start,
                interval.end,
                spectrum.peak_frequencies(PEAK_MAGNITUDE_RATIO),
                matched
            );
        }));
    }

    let decoded = decoder.decode(&samples)?;
    log::info!("decoded {} symbols", decoded.len());

    let data = digest::bytes_from_digest(&decoded)?;
    std::fs::write(output_path, &data)?;
    println!("Wrote {} bytes to {}", data.len(), output_path.display());
    Ok(())
}

/// Read a WAV file as f32 samples, keeping only the first channel
fn read_wav_mono(path: &PathBuf) -> Result<(Vec<f32>, u32), Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut reader = hound::WavReader::new(file)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => {
            let int_samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
            int_samples?
                .into_iter()
                .map(|s| s as f32 / 32768.0)
                .collect()
        }
        (hound::SampleFormat::Float, 32) => {
            let float_samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            float_samples?
        }
        (format, bits) => {
            return Err(DtmfError::InvalidAudioFormat(format!(
                "unsupported WAV format: {:?} at {} bits",
                format, bits
            ))
            .into());
        }
    };

    Ok((first_channel(&interleaved, spec.channels as usize), spec.sample_rate))
}

/// Write mono 16-bit PCM
fn write_wav(
    path: &PathBuf,
    samples: &[i16],
    sample_rate: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let file = File::create(path)?;
    let mut writer = hound::WavWriter::new(file, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
