use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rusty_raster::synthesizer::RasterSynthesizer;

const SEED: u64 = 42;
const NUM_UNITS: usize = 40;
const REC_LEN_SECS: f64 = 30.0;

#[test]
fn test_full_synthesis_pipeline() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let firing_rates: Vec<f64> = (0..NUM_UNITS)
        .map(|_| rng.gen_range(5..80) as f64)
        .collect();

    let synthesizer = RasterSynthesizer::new(REC_LEN_SECS).unwrap();
    let mut recording = synthesizer.par_sample(&firing_rates, &mut rng).unwrap();

    // all columns have the same length
    assert_eq!(recording.amps().len(), recording.times().len());
    assert_eq!(recording.clusters().len(), recording.times().len());
    assert_eq!(recording.depths().len(), recording.times().len());

    // times are sorted and within the recording window
    assert!(recording.times().windows(2).all(|ts| ts[0] <= ts[1]));
    assert!(recording
        .times()
        .iter()
        .all(|&t| (0.0..REC_LEN_SECS).contains(&t)));

    // amplitudes are positive and constant within each cluster
    assert!(recording.amps().iter().all(|&a| a > 0.0));
    let mut cluster_amps: HashMap<usize, f64> = HashMap::new();
    for spike in recording.spikes() {
        let amp = cluster_amps.entry(spike.cluster_id()).or_insert(spike.amplitude());
        assert_eq!(*amp, spike.amplitude());
    }

    // every cluster ID maps back to a unit of the population
    assert!(recording.clusters().iter().all(|&c| c < NUM_UNITS));

    // the total count is within a few deviations of the expected one
    let expected = firing_rates.iter().sum::<f64>() * REC_LEN_SECS;
    assert!((recording.len() as f64 - expected).abs() < 0.1 * expected);

    // the drift moves depths by at most its amplitude
    let depths_before = recording.depths().to_vec();
    recording
        .apply_sinusoidal_drift(REC_LEN_SECS, 2.0, 50.0)
        .unwrap();
    assert!(recording
        .depths()
        .iter()
        .zip(&depths_before)
        .all(|(after, before)| (after - before).abs() <= 50.0 + 1e-9));
}

#[test]
fn test_single_unit_spike_count() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let synthesizer = RasterSynthesizer::new(10.0).unwrap();
    let recording = synthesizer.sample(&[50.0], &mut rng).unwrap();

    // Poisson count with mean 500, asserted within a generous statistical bound
    assert!((350..=650).contains(&recording.len()));
}

#[test]
fn test_sequential_and_parallel_agree_on_shape() {
    let synthesizer = RasterSynthesizer::new(10.0).unwrap();
    let firing_rates = [20.0, 50.0, 80.0];

    let mut rng = StdRng::seed_from_u64(SEED);
    let sequential = synthesizer.sample(&firing_rates, &mut rng).unwrap();
    let mut rng = StdRng::seed_from_u64(SEED);
    let parallel = synthesizer.par_sample(&firing_rates, &mut rng).unwrap();

    // the two paths draw in different orders, only the structure is comparable
    assert_eq!(sequential.amps().len(), sequential.times().len());
    assert_eq!(parallel.amps().len(), parallel.times().len());
    assert!(parallel.times().windows(2).all(|ts| ts[0] <= ts[1]));

    let expected = firing_rates.iter().sum::<f64>() * 10.0;
    assert!((sequential.len() as f64 - expected).abs() < 0.3 * expected);
    assert!((parallel.len() as f64 - expected).abs() < 0.3 * expected);
}
