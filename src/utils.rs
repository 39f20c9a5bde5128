//! Audio utilities
//!
//! This module provides reading and writing of WAV files and the transforms
//! applied before detection: downmixing to mono, squeezing to one dimension
//! and the combined speed change and resample to 16kHz.

use crate::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayViewD, Axis};
use rayon::prelude::*;
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use std::path::Path;

/// Frames handed to the resampler per call
const RESAMPLE_CHUNK: usize = 1024;

/// Decoded audio, one row per channel
#[derive(Debug, Clone)]
pub struct AudioData {
    pub samples: Array2<f32>,
    pub sample_rate: u32,
}

impl AudioData {
    pub fn channels(&self) -> usize {
        self.samples.nrows()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.ncols() as f64 / self.sample_rate as f64
    }
}

/// Read audio from a WAV file
///
/// Integer samples of any bit depth are scaled to `[-1, 1)`; float samples
/// are taken as-is.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded.
pub fn read_audio<P: AsRef<Path>>(path: P) -> Result<AudioData> {
    let mut reader = hound::WavReader::open(path).map_err(|e| Error::AudioProcessing(e.to_string()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(Error::AudioProcessing("WAV file declares zero channels".into()));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            let raw = reader
                .samples::<i32>()
                .collect::<std::result::Result<Vec<i32>, _>>()
                .map_err(|e| Error::AudioProcessing(e.to_string()))?;
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            raw.par_iter().map(|&v| v as f32 / scale).collect()
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| Error::AudioProcessing(e.to_string()))?,
    };

    let frames = interleaved.len() / channels;
    let samples = Array2::from_shape_vec((frames, channels), interleaved[..frames * channels].to_vec())
        .map_err(|e| Error::AudioProcessing(e.to_string()))?
        .reversed_axes()
        .as_standard_layout()
        .into_owned();

    Ok(AudioData {
        samples,
        sample_rate: spec.sample_rate,
    })
}

/// Average all channels into one, keeping the channel axis
pub fn downmix(samples: &Array2<f32>) -> Array2<f32> {
    if samples.nrows() <= 1 {
        return samples.clone();
    }
    match samples.mean_axis(Axis(0)) {
        Some(mono) => mono.insert_axis(Axis(0)),
        None => Array2::zeros((1, 0)),
    }
}

/// Drop every length-one axis, leaving a one-dimensional buffer
///
/// # Errors
///
/// Returns [`Error::InvalidAudioShape`] if more than one axis is longer than one.
pub fn squeeze_audio(audio: ArrayViewD<f32>) -> Result<Array1<f32>> {
    let remaining: Vec<usize> = audio.shape().iter().copied().filter(|&d| d != 1).collect();
    if remaining.len() > 1 {
        return Err(Error::InvalidAudioShape(format!(
            "more than one dimension in audio {:?}, are you trying to process audio with 2 channels?",
            audio.shape()
        )));
    }
    Ok(audio.iter().copied().collect())
}

/// Change playback speed and resample to `target_rate` in one pass
///
/// Speeding up by `speed` is resampling from `sample_rate * speed`, so pitch
/// and tempo change together. The output has
/// `ceil(len * target_rate / (sample_rate * speed))` samples.
///
/// # Errors
///
/// Returns an error if `speed` is not positive or the resampler fails.
pub fn change_speed_and_resample(
    audio: &ArrayView1<f32>,
    sample_rate: u32,
    speed: f64,
    target_rate: u32,
) -> Result<(Array1<f32>, u32)> {
    if !speed.is_finite() || speed <= 0.0 || sample_rate == 0 {
        return Err(Error::InvalidInput(format!(
            "cannot change speed by {} at {} Hz",
            speed, sample_rate
        )));
    }

    let source_rate = sample_rate as f64 * speed;
    let ratio = target_rate as f64 / source_rate;
    if (ratio - 1.0).abs() < 1e-9 || audio.is_empty() {
        return Ok((audio.to_owned(), target_rate));
    }

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    let mut resampler = SincFixedIn::<f32>::new(ratio, 1.0, params, RESAMPLE_CHUNK, 1)
        .map_err(|e| Error::Resample(e.to_string()))?;

    let input = audio.to_vec();
    let expected = (input.len() as f64 * target_rate as f64 / source_rate).ceil() as usize;
    // SincFixedIn output is already aligned with its input, so no leading
    // samples are dropped; flushing only recovers the tail.
    let mut output = Vec::with_capacity(expected + RESAMPLE_CHUNK);

    for chunk in input.chunks(RESAMPLE_CHUNK) {
        let wave_in: [&[f32]; 1] = [chunk];
        let out = if chunk.len() == RESAMPLE_CHUNK {
            resampler.process(&wave_in[..], None)
        } else {
            resampler.process_partial(Some(&wave_in[..]), None)
        }
        .map_err(|e| Error::Resample(e.to_string()))?;
        output.extend_from_slice(&out[0]);
    }

    while output.len() < expected {
        let out = resampler
            .process_partial(None::<&[&[f32]]>, None)
            .map_err(|e| Error::Resample(e.to_string()))?;
        if out[0].is_empty() {
            break;
        }
        output.extend_from_slice(&out[0]);
    }

    output.resize(expected, 0.0);

    Ok((Array1::from_vec(output), target_rate))
}

/// Save audio to a 16-bit mono WAV file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_audio<P: AsRef<Path>>(path: P, audio: &ArrayView1<f32>, sampling_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sampling_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| Error::AudioProcessing(e.to_string()))?;

    for &sample in audio.iter() {
        let sample = (sample * 32768.0).clamp(-32768.0, 32767.0) as i16;
        writer
            .write_sample(sample)
            .map_err(|e| Error::AudioProcessing(e.to_string()))?;
    }

    writer
        .finalize()
        .map_err(|e| Error::AudioProcessing(e.to_string()))?;

    Ok(())
}
