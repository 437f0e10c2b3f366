//! Error module for the Rusty Raster library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum RasterError {
    /// Error for a strictly negative or non-finite firing rate.
    InvalidFiringRate,
    /// Error for a non-positive or non-finite recording length or drift period.
    InvalidRecordingLength,
    /// Error for a non-positive or non-finite unit amplitude.
    InvalidAmplitude,
    /// Error for a negative or non-finite amplitude noise deviation.
    InvalidAmplitudeNoise,
    /// Error for an empty collection of firing rates.
    EmptyPopulation,
    /// Error while building a sampling distribution.
    InvalidDistribution(String),
    /// Error for inconsistent recording columns, e.g., mismatched lengths or unsorted times.
    InvalidRecording(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RasterError::InvalidFiringRate => {
                write!(f, "The firing rate must be finite and non-negative")
            }
            RasterError::InvalidRecordingLength => {
                write!(f, "The recording length must be finite and positive")
            }
            RasterError::InvalidAmplitude => {
                write!(f, "The unit amplitude must be finite and positive")
            }
            RasterError::InvalidAmplitudeNoise => {
                write!(f, "The amplitude noise deviation must be finite and non-negative")
            }
            RasterError::EmptyPopulation => {
                write!(f, "At least one firing rate is required")
            }
            RasterError::InvalidDistribution(e) => {
                write!(f, "Error while building a sampling distribution: {}", e)
            }
            RasterError::InvalidRecording(e) => write!(f, "Invalid recording: {}", e),
            RasterError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for RasterError {}
