//! Module implementing the concept of a simulated unit.
//!
//! A unit is one putative neuron on the probe. Its firing rate parameterizes a Poisson
//! process, its amplitude is shared by all its spikes and its depth is the position
//! around which its spikes scatter.

use log::debug;
use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};
use serde::{Deserialize, Serialize};

use crate::error::RasterError;
use crate::spike_train::{sample_unit_train, Spike};
use crate::{
    AMP_LOG_MEAN, AMP_LOG_STD, AMP_TO_VOLTS, DEPTH_JITTER_STD_UM, DEPTH_MAX_UM, DEPTH_MIN_UM,
};

/// Represents a simulated unit firing as a homogeneous Poisson process.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// The ID of the cluster grouping all spikes of the unit.
    cluster_id: usize,
    /// The mean number of spikes per second.
    firing_rate: f64,
    /// The amplitude shared by all spikes of the unit, in volts.
    base_amplitude: f64,
    /// The depth of the unit along the probe, in micrometers.
    base_depth: f64,
}

impl Unit {
    /// Create a new unit with the specified parameters.
    /// The function returns an error for an invalid firing rate or amplitude.
    pub fn new(
        cluster_id: usize,
        firing_rate: f64,
        base_amplitude: f64,
        base_depth: f64,
    ) -> Result<Self, RasterError> {
        if !firing_rate.is_finite() || firing_rate < 0.0 {
            return Err(RasterError::InvalidFiringRate);
        }
        if !base_amplitude.is_finite() || base_amplitude <= 0.0 {
            return Err(RasterError::InvalidAmplitude);
        }

        Ok(Unit {
            cluster_id,
            firing_rate,
            base_amplitude,
            base_depth,
        })
    }

    /// Sample a new unit with the specified firing rate.
    ///
    /// The amplitude is drawn from a lognormal distribution over the microvolt range and
    /// expressed in volts. The depth is drawn uniformly over the probe span.
    pub fn sample<R: Rng>(
        cluster_id: usize,
        firing_rate: f64,
        rng: &mut R,
    ) -> Result<Self, RasterError> {
        if !firing_rate.is_finite() || firing_rate < 0.0 {
            return Err(RasterError::InvalidFiringRate);
        }

        let amplitudes = LogNormal::new(AMP_LOG_MEAN, AMP_LOG_STD)
            .map_err(|e| RasterError::InvalidDistribution(e.to_string()))?;
        let base_amplitude = amplitudes.sample(rng) * AMP_TO_VOLTS;
        let base_depth = rng.gen_range(DEPTH_MIN_UM..DEPTH_MAX_UM) as f64;

        Ok(Unit {
            cluster_id,
            firing_rate,
            base_amplitude,
            base_depth,
        })
    }

    /// Returns the ID of the cluster grouping all spikes of the unit.
    pub fn cluster_id(&self) -> usize {
        self.cluster_id
    }

    /// Returns the firing rate of the unit.
    pub fn firing_rate(&self) -> f64 {
        self.firing_rate
    }

    /// Returns the amplitude shared by all spikes of the unit.
    pub fn base_amplitude(&self) -> f64 {
        self.base_amplitude
    }

    /// Returns the depth of the unit along the probe.
    pub fn base_depth(&self) -> f64 {
        self.base_depth
    }

    /// Samples all spikes of the unit over a recording window.
    ///
    /// Every spike carries the unit's amplitude, perturbed by an independent Gaussian
    /// draw with deviation `amplitude_noise` when it is non-zero (truncated at zero so
    /// amplitudes stay non-negative). The depth of every spike is the unit's depth plus
    /// independent jitter.
    pub fn sample_spikes<R: Rng>(
        &self,
        rec_len_secs: f64,
        amplitude_noise: f64,
        rng: &mut R,
    ) -> Result<Vec<Spike>, RasterError> {
        if !amplitude_noise.is_finite() || amplitude_noise < 0.0 {
            return Err(RasterError::InvalidAmplitudeNoise);
        }

        let times = sample_unit_train(self.firing_rate, rec_len_secs, rng)?;
        let depth_jitter = Normal::new(0.0, DEPTH_JITTER_STD_UM)
            .map_err(|e| RasterError::InvalidDistribution(e.to_string()))?;
        let amp_noise = if amplitude_noise > 0.0 {
            Some(
                Normal::new(0.0, amplitude_noise)
                    .map_err(|e| RasterError::InvalidDistribution(e.to_string()))?,
            )
        } else {
            None
        };

        debug!(
            "Unit {}: {} spikes over {} secs",
            self.cluster_id,
            times.len(),
            rec_len_secs
        );

        Ok(times
            .into_iter()
            .map(|t| {
                let amplitude = match &amp_noise {
                    Some(noise) => (self.base_amplitude + noise.sample(rng)).max(0.0),
                    None => self.base_amplitude,
                };
                let depth = self.base_depth + depth_jitter.sample(rng);
                Spike::new(self.cluster_id, t, amplitude, depth)
            })
            .collect())
    }
}
