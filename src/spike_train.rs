//! Module implementing the concept of a spike and the per-unit spike train sampler.

use rand::Rng;
use rand_distr::{Distribution, Exp};
use serde::{Deserialize, Serialize};

use crate::error::RasterError;

/// Represents a single event detected on the probe.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Spike {
    /// The ID of the cluster grouping all spikes of the producing unit.
    cluster_id: usize,
    /// The time at which the spike occurs, in seconds.
    time: f64,
    /// The amplitude of the spike, in volts.
    amplitude: f64,
    /// The depth of the spike along the probe, in micrometers.
    depth: f64,
}

impl Spike {
    /// Create a new spike with the specified parameters.
    pub fn new(cluster_id: usize, time: f64, amplitude: f64, depth: f64) -> Self {
        Spike {
            cluster_id,
            time,
            amplitude,
            depth,
        }
    }

    /// Returns the ID of the cluster the spike belongs to.
    pub fn cluster_id(&self) -> usize {
        self.cluster_id
    }

    /// Returns the time at which the spike occurs.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the amplitude of the spike.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Returns the depth of the spike along the probe.
    pub fn depth(&self) -> f64 {
        self.depth
    }
}

/// Samples the firing times of a single unit over a recording window.
///
/// The unit fires as a homogeneous Poisson process: the inter-spike intervals are
/// independent exponential draws with rate `firing_rate`, accumulated into absolute
/// times until the cumulative time leaves `[0, rec_len_secs)`. A zero firing rate
/// produces an empty train.
///
/// # Parameters
/// - `firing_rate`: The mean number of spikes per second.
/// - `rec_len_secs`: The length of the recording window, in seconds.
/// - `rng`: A mutable reference to a random number generator implementing the `Rng` trait.
///
/// # Returns
/// The firing times in ascending order, all within `[0, rec_len_secs)`.
pub fn sample_unit_train<R: Rng>(
    firing_rate: f64,
    rec_len_secs: f64,
    rng: &mut R,
) -> Result<Vec<f64>, RasterError> {
    if !firing_rate.is_finite() || firing_rate < 0.0 {
        return Err(RasterError::InvalidFiringRate);
    }
    if !rec_len_secs.is_finite() || rec_len_secs <= 0.0 {
        return Err(RasterError::InvalidRecordingLength);
    }
    if firing_rate == 0.0 {
        return Ok(vec![]);
    }

    let intervals =
        Exp::new(firing_rate).map_err(|e| RasterError::InvalidDistribution(e.to_string()))?;

    // The expected count is an allocation hint only, the train grows as needed.
    let mut times = Vec::with_capacity((firing_rate * rec_len_secs).ceil() as usize);
    let mut t = intervals.sample(rng);
    while t < rec_len_secs {
        times.push(t);
        t += intervals.sample(rng);
    }

    Ok(times)
}
