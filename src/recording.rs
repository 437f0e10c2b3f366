//! Module implementing the merged recording of all units.
//!
//! A recording stores all spikes of a session as four parallel columns, sorted by time.
//! The column layout is what downstream viewers consume, keyed as `times`, `amps`,
//! `clusters` and `depths` in the serialized form.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::error::RasterError;
use crate::spike_train::Spike;

/// The merged, time-ordered recording of all units.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Recording {
    /// The spike times, in seconds, in ascending order.
    times: Vec<f64>,
    /// The spike amplitudes, in volts.
    amps: Vec<f64>,
    /// The cluster IDs of the units producing the spikes.
    clusters: Vec<usize>,
    /// The spike depths along the probe, in micrometers.
    depths: Vec<f64>,
}

impl Recording {
    /// Create a recording from a collection of spikes.
    /// The spikes are sorted by time, each one carrying its amplitude, cluster and depth.
    pub fn from_spikes(mut spikes: Vec<Spike>) -> Self {
        spikes.sort_by(|spike_1, spike_2| {
            spike_1
                .time()
                .partial_cmp(&spike_2.time())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut recording = Recording {
            times: Vec::with_capacity(spikes.len()),
            amps: Vec::with_capacity(spikes.len()),
            clusters: Vec::with_capacity(spikes.len()),
            depths: Vec::with_capacity(spikes.len()),
        };
        for spike in spikes {
            recording.times.push(spike.time());
            recording.amps.push(spike.amplitude());
            recording.clusters.push(spike.cluster_id());
            recording.depths.push(spike.depth());
        }

        recording
    }

    /// Create a recording from its four columns.
    /// The function returns an error if the columns have mismatched lengths or if the
    /// times are not in ascending order.
    pub fn build(
        times: Vec<f64>,
        amps: Vec<f64>,
        clusters: Vec<usize>,
        depths: Vec<f64>,
    ) -> Result<Self, RasterError> {
        if amps.len() != times.len() || clusters.len() != times.len() || depths.len() != times.len()
        {
            return Err(RasterError::InvalidRecording(format!(
                "Mismatched column lengths: {} times, {} amps, {} clusters, {} depths",
                times.len(),
                amps.len(),
                clusters.len(),
                depths.len()
            )));
        }
        if times.windows(2).any(|ts| !(ts[0] <= ts[1])) {
            return Err(RasterError::InvalidRecording(
                "Times must be in ascending order".to_string(),
            ));
        }

        Ok(Recording {
            times,
            amps,
            clusters,
            depths,
        })
    }

    /// Returns the number of spikes in the recording.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the recording contains no spike.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the spike times, in ascending order.
    pub fn times(&self) -> &[f64] {
        &self.times[..]
    }

    /// Returns the spike amplitudes.
    pub fn amps(&self) -> &[f64] {
        &self.amps[..]
    }

    /// Returns the cluster IDs of the spikes.
    pub fn clusters(&self) -> &[usize] {
        &self.clusters[..]
    }

    /// Returns the spike depths.
    pub fn depths(&self) -> &[f64] {
        &self.depths[..]
    }

    /// Returns an iterator over the spikes of the recording, in time order.
    pub fn spikes(&self) -> impl Iterator<Item = Spike> + '_ {
        izip!(&self.times, &self.amps, &self.clusters, &self.depths).map(
            |(&time, &amplitude, &cluster_id, &depth)| {
                Spike::new(cluster_id, time, amplitude, depth)
            },
        )
    }

    pub(crate) fn times_and_depths_mut(&mut self) -> (&[f64], &mut [f64]) {
        (&self.times, &mut self.depths)
    }

    /// Save the recording to a file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), RasterError> {
        let file = File::create(path).map_err(|e| RasterError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| RasterError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| RasterError::IOError(e.to_string()))
    }

    /// Load a recording from a file.
    /// The function returns an error if the file does not hold consistent columns.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let file = File::open(path).map_err(|e| RasterError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        let recording: Recording =
            serde_json::from_reader(reader).map_err(|e| RasterError::IOError(e.to_string()))?;

        Recording::build(
            recording.times,
            recording.amps,
            recording.clusters,
            recording.depths,
        )
    }
}
