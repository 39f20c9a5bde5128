//! Repeat-after-me generation
//!
//! [`SegmentRunner`] wires the stages together: load, downmix, change speed
//! and resample to 16kHz, detect and pad speech, smooth the boundaries, then
//! lay every segment out followed by a pause long enough to repeat it.

use crate::utils::{self, AudioData};
use crate::vad::{get_speech_timestamps, Segment, SpeechTimestamps, VadParameters};
use crate::{smooth, Level, Profile, Result, SileroVAD, SpeechModel};
use log::{debug, info, warn};
use ndarray::{s, Array1, ArrayView1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Rate the detector and the generated audio run at
pub const TARGET_SAMPLE_RATE: u32 = 16000;

/// Summary of one generated track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub level: Level,
    pub speed: f64,
    pub pause: f64,
    pub sample_rate: u32,
    /// Smoothed segments, in seconds of the speed-adjusted audio
    pub segments: Vec<SpeechTimestamps>,
    /// Length of the generated track in samples
    pub output_samples: usize,
}

impl SegmentReport {
    /// Write the report as pretty-printed JSON
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Drives a speech model through the whole generation pipeline
pub struct SegmentRunner<M: SpeechModel> {
    model: M,
}

impl SegmentRunner<SileroVAD> {
    /// Load the Silero model once and build a runner around it
    pub fn from_model_path(model_path: &Path) -> Result<Self> {
        Ok(Self::new(SileroVAD::new(model_path)?))
    }
}

impl<M: SpeechModel> SegmentRunner<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Generate a repeat-after-me track from `input_audio` into `output_audio`
    ///
    /// # Errors
    ///
    /// Fails on any decoding, detection or encoding error. Nothing is
    /// written on failure.
    pub fn run(&mut self, input_audio: &Path, output_audio: &Path, level: Level) -> Result<SegmentReport> {
        let profile = Profile::for_level(level);

        debug!("load audio from {}.", input_audio.display());
        let audio = utils::read_audio(input_audio)?;
        debug!(
            "{} channel(s) at {} Hz, {:.2}s",
            audio.channels(),
            audio.sample_rate,
            audio.duration_secs()
        );

        let (generated, report) = self.process(&audio, &profile)?;

        info!("save generated audio to {}.", output_audio.display());
        utils::save_audio(output_audio, &generated.view(), TARGET_SAMPLE_RATE)?;

        Ok(report)
    }

    /// Generate the track from decoded audio
    pub fn process(&mut self, audio: &AudioData, profile: &Profile) -> Result<(Array1<f32>, SegmentReport)> {
        let mono = utils::squeeze_audio(utils::downmix(&audio.samples).view().into_dyn())?;

        debug!("adjust the speed and sampling rate.");
        let (resampled, sample_rate) = utils::change_speed_and_resample(
            &mono.view(),
            audio.sample_rate,
            profile.speed,
            TARGET_SAMPLE_RATE,
        )?;

        debug!("generate the repeat-after-me audio.");
        let params = VadParameters {
            sampling_rate: sample_rate,
            ..VadParameters::for_profile(profile)
        };
        let speeches = get_speech_timestamps(&resampled.view(), &mut self.model, &params)?;

        let timestamps: Vec<SpeechTimestamps> =
            speeches.iter().map(|s| s.to_seconds(sample_rate)).collect();
        let smoothed = smooth(&timestamps);
        let segments: Vec<Segment> = smoothed
            .iter()
            .map(|ts| ts.to_samples(sample_rate, resampled.len()))
            .filter(|segment| !segment.is_empty())
            .collect();

        for (i, ts) in smoothed.iter().enumerate() {
            debug!("segment {}: {:.3}s - {:.3}s", i + 1, ts.start, ts.end);
        }
        if segments.is_empty() {
            warn!("No speech detected, the generated audio is empty");
        }

        let generated = assemble(&resampled.view(), &segments, profile);

        let report = SegmentReport {
            level: profile.level,
            speed: profile.speed,
            pause: profile.pause,
            sample_rate,
            segments: smoothed,
            output_samples: generated.len(),
        };
        Ok((generated, report))
    }
}

/// Length of the silence inserted after a segment of `segment_samples`
pub fn pause_samples(segment_samples: usize, profile: &Profile) -> usize {
    (segment_samples as f64 * profile.pause / profile.speed) as usize
}

/// Concatenate each segment followed by its pause
pub fn assemble(audio: &ArrayView1<f32>, segments: &[Segment], profile: &Profile) -> Array1<f32> {
    let pieces: Vec<Vec<f32>> = segments
        .par_iter()
        .map(|segment| {
            let speech = audio.slice(s![segment.start..segment.end]);
            let pause = pause_samples(segment.len(), profile);
            let mut piece = Vec::with_capacity(speech.len() + pause);
            piece.extend(speech.iter().copied());
            piece.resize(speech.len() + pause, 0.0);
            piece
        })
        .collect();

    Array1::from_vec(pieces.concat())
}
