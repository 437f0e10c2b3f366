//! This crate provides tools for generating synthetic extracellular spike recordings in Rust.
//!
//! A population of simulated units fires as independent homogeneous Poisson processes.
//! Every unit carries an amplitude and a depth along the recording probe; every spike
//! inherits them, with independent per-spike depth jitter. All units are merged into a
//! single time-ordered [`recording::Recording`] exposing the spike times, amplitudes,
//! cluster IDs and depths as parallel columns, the layout downstream raster viewers
//! consume.
//!
//! # Generating a Recording
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rusty_raster::synthesizer::RasterSynthesizer;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let synthesizer = RasterSynthesizer::new(10.0).unwrap();
//! let recording = synthesizer.sample(&[20.0, 50.0, 80.0], &mut rng).unwrap();
//!
//! assert!(!recording.is_empty());
//! assert!(recording.times().windows(2).all(|ts| ts[0] <= ts[1]));
//! ```
//!
//! # Parallel Generation and Depth Drift
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rusty_raster::synthesizer::RasterSynthesizer;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let synthesizer = RasterSynthesizer::new(100.0)
//!     .unwrap()
//!     .with_amplitude_noise(20e-6)
//!     .unwrap();
//! let mut recording = synthesizer.par_sample(&[5.0; 40], &mut rng).unwrap();
//!
//! // slow sinusoidal probe drift, two cycles over the session
//! recording.apply_sinusoidal_drift(100.0, 2.0, 50.0).unwrap();
//! assert_eq!(recording.depths().len(), recording.times().len());
//! ```

pub mod drift;
pub mod error;
pub mod recording;
pub mod spike_train;
pub mod synthesizer;
pub mod unit;

/// The mean of the log-amplitude of a unit, over the microvolt range.
pub const AMP_LOG_MEAN: f64 = 5.5;
/// The deviation of the log-amplitude of a unit.
pub const AMP_LOG_STD: f64 = 0.5;
/// The scale from the sampled microvolt-range amplitude to volts.
pub const AMP_TO_VOLTS: f64 = 1e-6;
/// The shallowest position of a unit along the probe, in micrometers.
pub const DEPTH_MIN_UM: u32 = 40;
/// The deepest position of a unit along the probe, in micrometers.
pub const DEPTH_MAX_UM: u32 = 3600;
/// The deviation of the per-spike depth jitter, in micrometers.
pub const DEPTH_JITTER_STD_UM: f64 = 10.0;
