//! Generates a synthetic spike raster and writes it as JSON for a raster viewer.

use clap::Parser;
use log::{info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rusty_raster::error::RasterError;
use rusty_raster::synthesizer::RasterSynthesizer;

#[derive(Parser, Debug)]
struct Args {
    /// The seed used for population and spike train sampling
    #[arg(long, default_value = "0")]
    seed: u64,
    /// The number of units
    #[arg(short = 'N', long, default_value = "400")]
    num_units: usize,
    /// The recording length in seconds
    #[arg(short = 'T', long, default_value = "100.0")]
    rec_len_secs: f64,
    /// The minimum firing rate in spikes per second
    #[arg(long, default_value = "5")]
    min_rate: u32,
    /// The maximum firing rate in spikes per second
    #[arg(long, default_value = "80")]
    max_rate: u32,
    /// The per-spike amplitude noise deviation in volts
    #[arg(long, default_value = "0.0")]
    amplitude_noise: f64,
    /// The depth drift amplitude in micrometers
    #[arg(long, default_value = "50.0")]
    drift_amplitude: f64,
    /// The number of drift cycles over the recording
    #[arg(long, default_value = "2.0")]
    drift_cycles: f64,
    /// The output path of the recording
    #[arg(short = 'o', long, default_value = "recording.json")]
    output: String,
}

fn main() -> Result<(), RasterError> {
    let args = Args::parse();

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        .map_err(|e| RasterError::IOError(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| RasterError::IOError(e.to_string()))?;

    if args.max_rate <= args.min_rate {
        return Err(RasterError::InvalidFiringRate);
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let firing_rates: Vec<f64> = (0..args.num_units)
        .map(|_| rng.gen_range(args.min_rate..args.max_rate) as f64)
        .collect();

    let synthesizer =
        RasterSynthesizer::new(args.rec_len_secs)?.with_amplitude_noise(args.amplitude_noise)?;
    let mut recording = synthesizer.par_sample(&firing_rates, &mut rng)?;
    recording.apply_sinusoidal_drift(args.rec_len_secs, args.drift_cycles, args.drift_amplitude)?;

    recording.save_to(&args.output)?;
    info!("{} spikes written to {}", recording.len(), args.output);

    Ok(())
}
