//! Module implementing the population-level synthesizer.
//!
//! The synthesizer turns a collection of firing rates into a full [`Recording`]: one
//! unit per rate, each firing as an independent Poisson process, merged into a single
//! time-ordered event stream.

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;

use crate::error::RasterError;
use crate::recording::Recording;
use crate::spike_train::Spike;
use crate::unit::Unit;

/// Generates synthetic multi-unit recordings over a fixed time window.
#[derive(Debug, PartialEq, Clone)]
pub struct RasterSynthesizer {
    /// The length of the recording window, in seconds.
    rec_len_secs: f64,
    /// The deviation of the per-spike amplitude perturbation, in volts. Zero disables it.
    amplitude_noise: f64,
}

impl RasterSynthesizer {
    /// Create a new synthesizer for the given recording length, without amplitude noise.
    pub fn new(rec_len_secs: f64) -> Result<Self, RasterError> {
        if !rec_len_secs.is_finite() || rec_len_secs <= 0.0 {
            return Err(RasterError::InvalidRecordingLength);
        }

        Ok(RasterSynthesizer {
            rec_len_secs,
            amplitude_noise: 0.0,
        })
    }

    /// Set the deviation of the per-spike amplitude perturbation, in volts.
    pub fn with_amplitude_noise(mut self, amplitude_noise: f64) -> Result<Self, RasterError> {
        if !amplitude_noise.is_finite() || amplitude_noise < 0.0 {
            return Err(RasterError::InvalidAmplitudeNoise);
        }

        self.amplitude_noise = amplitude_noise;
        Ok(self)
    }

    /// Returns the length of the recording window, in seconds.
    pub fn rec_len_secs(&self) -> f64 {
        self.rec_len_secs
    }

    /// Returns the deviation of the per-spike amplitude perturbation, in volts.
    pub fn amplitude_noise(&self) -> f64 {
        self.amplitude_noise
    }

    /// Sample a full recording, one unit per firing rate.
    ///
    /// The unit with index i is assigned cluster ID i. All units are merged into a
    /// single time-ordered recording.
    ///
    /// # Example
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use rusty_raster::synthesizer::RasterSynthesizer;
    ///
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let synthesizer = RasterSynthesizer::new(10.0).unwrap();
    /// let recording = synthesizer.sample(&[20.0, 50.0, 80.0], &mut rng).unwrap();
    /// assert!(!recording.is_empty());
    /// ```
    pub fn sample<R: Rng>(
        &self,
        firing_rates: &[f64],
        rng: &mut R,
    ) -> Result<Recording, RasterError> {
        if firing_rates.is_empty() {
            return Err(RasterError::EmptyPopulation);
        }

        let mut spikes: Vec<Spike> = Vec::with_capacity(self.num_spikes_hint(firing_rates));
        for (cluster_id, &firing_rate) in firing_rates.iter().enumerate() {
            let unit = Unit::sample(cluster_id, firing_rate, rng)?;
            spikes.extend(unit.sample_spikes(self.rec_len_secs, self.amplitude_noise, rng)?);
        }

        info!(
            "Sampled {} spikes from {} units over {} secs",
            spikes.len(),
            firing_rates.len(),
            self.rec_len_secs
        );
        Ok(Recording::from_spikes(spikes))
    }

    /// Sample a full recording, generating the units in parallel.
    ///
    /// The unit parameters are drawn from the provided generator, then every unit
    /// samples its spikes on a private generator seeded from it. The result is
    /// deterministic for a seeded generator, whatever the number of worker threads.
    pub fn par_sample<R: Rng>(
        &self,
        firing_rates: &[f64],
        rng: &mut R,
    ) -> Result<Recording, RasterError> {
        if firing_rates.is_empty() {
            return Err(RasterError::EmptyPopulation);
        }

        let units = firing_rates
            .iter()
            .enumerate()
            .map(|(cluster_id, &firing_rate)| Unit::sample(cluster_id, firing_rate, rng))
            .collect::<Result<Vec<Unit>, RasterError>>()?;
        let seeds: Vec<u64> = (0..units.len()).map(|_| rng.gen()).collect();

        let per_unit_spikes = units
            .par_iter()
            .zip(seeds)
            .map(|(unit, seed)| {
                let mut unit_rng = ChaCha12Rng::seed_from_u64(seed);
                unit.sample_spikes(self.rec_len_secs, self.amplitude_noise, &mut unit_rng)
            })
            .collect::<Result<Vec<Vec<Spike>>, RasterError>>()?;

        let spikes: Vec<Spike> = per_unit_spikes.into_iter().flatten().collect();
        info!(
            "Sampled {} spikes from {} units over {} secs",
            spikes.len(),
            firing_rates.len(),
            self.rec_len_secs
        );
        Ok(Recording::from_spikes(spikes))
    }

    // Expected total number of spikes, used as an allocation hint only.
    fn num_spikes_hint(&self, firing_rates: &[f64]) -> usize {
        firing_rates
            .iter()
            .map(|firing_rate| firing_rate * self.rec_len_secs)
            .sum::<f64>()
            .ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    const SEED: u64 = 42;

    #[test]
    fn test_synthesizer_new() {
        assert!(RasterSynthesizer::new(10.0).is_ok());
        assert_eq!(
            RasterSynthesizer::new(0.0),
            Err(RasterError::InvalidRecordingLength)
        );
        assert_eq!(
            RasterSynthesizer::new(-10.0),
            Err(RasterError::InvalidRecordingLength)
        );
        assert_eq!(
            RasterSynthesizer::new(f64::NAN),
            Err(RasterError::InvalidRecordingLength)
        );
    }

    #[test]
    fn test_synthesizer_with_amplitude_noise() {
        let synthesizer = RasterSynthesizer::new(10.0)
            .unwrap()
            .with_amplitude_noise(20e-6)
            .unwrap();
        assert_eq!(synthesizer.amplitude_noise(), 20e-6);

        assert_eq!(
            RasterSynthesizer::new(10.0).unwrap().with_amplitude_noise(-1.0),
            Err(RasterError::InvalidAmplitudeNoise)
        );
    }

    #[test]
    fn test_sample_empty_population() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();

        assert_eq!(
            synthesizer.sample(&[], &mut rng),
            Err(RasterError::EmptyPopulation)
        );
        assert_eq!(
            synthesizer.par_sample(&[], &mut rng),
            Err(RasterError::EmptyPopulation)
        );
    }

    #[test]
    fn test_sample_invalid_firing_rate() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();

        assert_eq!(
            synthesizer.sample(&[50.0, -1.0], &mut rng),
            Err(RasterError::InvalidFiringRate)
        );
    }

    #[test]
    fn test_sample_columns_and_order() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();
        let recording = synthesizer.sample(&[20.0, 50.0, 80.0], &mut rng).unwrap();

        assert_eq!(recording.amps().len(), recording.times().len());
        assert_eq!(recording.clusters().len(), recording.times().len());
        assert_eq!(recording.depths().len(), recording.times().len());

        assert!(recording.times().windows(2).all(|ts| ts[0] <= ts[1]));
        assert!(recording.times().iter().all(|&t| (0.0..10.0).contains(&t)));
        assert!(recording.amps().iter().all(|&a| a > 0.0));
        assert!(recording.clusters().iter().all(|&c| c < 3));
    }

    #[test]
    fn test_sample_zero_rate_unit() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();

        let recording = synthesizer.sample(&[0.0], &mut rng).unwrap();
        assert!(recording.is_empty());

        // the silent unit contributes no spike, all events come from the active one
        let recording = synthesizer.sample(&[0.0, 50.0], &mut rng).unwrap();
        assert!(!recording.is_empty());
        assert!(recording.clusters().iter().all(|&c| c == 1));
    }

    #[test]
    fn test_sample_cluster_amplitude_constant() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();
        let recording = synthesizer.sample(&[20.0, 50.0, 80.0], &mut rng).unwrap();

        for cluster_id in 0..3 {
            let amps: Vec<f64> = recording
                .spikes()
                .filter(|spike| spike.cluster_id() == cluster_id)
                .map(|spike| spike.amplitude())
                .collect();
            assert!(amps.windows(2).all(|amps| amps[0] == amps[1]));
        }
    }

    #[test]
    fn test_sample_amplitude_noise_applied() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let synthesizer = RasterSynthesizer::new(10.0)
            .unwrap()
            .with_amplitude_noise(20e-6)
            .unwrap();
        let recording = synthesizer.sample(&[50.0], &mut rng).unwrap();

        let amps = recording.amps();
        assert!(amps.windows(2).any(|amps| amps[0] != amps[1]));
    }

    #[test]
    fn test_sample_deterministic() {
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();

        let mut rng_1 = StdRng::seed_from_u64(SEED);
        let mut rng_2 = StdRng::seed_from_u64(SEED);
        let recording_1 = synthesizer.sample(&[20.0, 50.0], &mut rng_1).unwrap();
        let recording_2 = synthesizer.sample(&[20.0, 50.0], &mut rng_2).unwrap();

        assert_eq!(recording_1, recording_2);
    }

    #[test]
    fn test_par_sample_deterministic() {
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();

        let mut rng_1 = StdRng::seed_from_u64(SEED);
        let mut rng_2 = StdRng::seed_from_u64(SEED);
        let recording_1 = synthesizer.par_sample(&[20.0, 50.0, 80.0], &mut rng_1).unwrap();
        let recording_2 = synthesizer.par_sample(&[20.0, 50.0, 80.0], &mut rng_2).unwrap();

        assert_eq!(recording_1, recording_2);
    }

    #[test]
    fn test_par_sample_columns_and_order() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let synthesizer = RasterSynthesizer::new(10.0).unwrap();
        let recording = synthesizer.par_sample(&[20.0, 50.0, 80.0], &mut rng).unwrap();

        assert_eq!(recording.amps().len(), recording.times().len());
        assert_eq!(recording.clusters().len(), recording.times().len());
        assert_eq!(recording.depths().len(), recording.times().len());
        assert!(recording.times().windows(2).all(|ts| ts[0] <= ts[1]));
        assert!(recording.times().iter().all(|&t| (0.0..10.0).contains(&t)));
    }
}
