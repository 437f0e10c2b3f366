//! Module implementing the slow depth drift of a recording.
//!
//! The drift mimics the slow relative motion between the probe and the tissue over a
//! session. It is a post-processing step on a finished [`Recording`], not part of the
//! synthesizer: the caller decides whether to apply it.

use std::f64::consts::PI;

use crate::error::RasterError;
use crate::recording::Recording;

impl Recording {
    /// Apply a sinusoidal depth drift to the recording in place.
    ///
    /// Every spike at time t is shifted in depth by
    /// `amplitude * sin(2 * pi * num_cycles * t / period_secs)`.
    ///
    /// # Parameters
    /// - `period_secs`: The time span over which `num_cycles` full oscillations occur,
    ///   typically the recording length.
    /// - `num_cycles`: The number of oscillations over the period.
    /// - `amplitude`: The peak depth excursion, in micrometers.
    pub fn apply_sinusoidal_drift(
        &mut self,
        period_secs: f64,
        num_cycles: f64,
        amplitude: f64,
    ) -> Result<(), RasterError> {
        if !period_secs.is_finite() || period_secs <= 0.0 {
            return Err(RasterError::InvalidRecordingLength);
        }

        let omega = 2.0 * PI * num_cycles / period_secs;
        let (times, depths) = self.times_and_depths_mut();
        for (t, depth) in times.iter().zip(depths.iter_mut()) {
            *depth += amplitude * (omega * t).sin();
        }

        Ok(())
    }
}
