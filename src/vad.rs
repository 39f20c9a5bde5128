//! Speech segment detection
//!
//! Turns a mono audio buffer into padded speech segments in three passes:
//! [`probe`] asks the model for one probability per frame, [`detect`] runs
//! the hysteresis state machine over that trace, and [`pad`] widens the
//! resulting segments without letting neighbours overlap.

use crate::{Error, Result, SpeechModel};
use log::{debug, trace, warn};
use ndarray::{s, Array1, ArrayView1};
use serde::{Deserialize, Serialize};

const SUPPORTED_WINDOW_SIZES: [usize; 5] = [256, 512, 768, 1024, 1536];

/// Gap between the speech threshold and the threshold that starts a silence
const NEG_THRESHOLD_OFFSET: f32 = 0.15;

/// A closed speech segment, in sample offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert to seconds, rounded to the millisecond
    pub fn to_seconds(&self, sampling_rate: u32) -> SpeechTimestamps {
        let sr = sampling_rate as f64;
        SpeechTimestamps {
            start: round_ms(self.start as f64 / sr),
            end: round_ms(self.end as f64 / sr),
        }
    }
}

/// A segment whose end has not been seen yet
#[derive(Debug, Clone, Copy)]
struct OpenSegment {
    start: usize,
}

impl OpenSegment {
    fn close(self, end: usize) -> Segment {
        Segment {
            start: self.start,
            end,
        }
    }
}

/// Speech timestamp information
///
/// Times are in seconds from the start of the audio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechTimestamps {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl SpeechTimestamps {
    /// Convert back to sample offsets, clamped to `audio_length_samples`
    pub fn to_samples(&self, sampling_rate: u32, audio_length_samples: usize) -> Segment {
        let to_sample = |secs: f64| -> usize {
            let sample = (secs.max(0.0) * sampling_rate as f64).round() as usize;
            sample.min(audio_length_samples)
        };
        Segment {
            start: to_sample(self.start),
            end: to_sample(self.end),
        }
    }
}

pub(crate) fn round_ms(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

/// Tuning knobs for speech detection
#[derive(Debug, Clone, PartialEq)]
pub struct VadParameters {
    /// Frames with a probability at or above this value are speech
    pub threshold: f32,
    pub sampling_rate: u32,
    /// Segments closed by silence must be longer than this to be kept
    pub min_speech_duration_ms: u32,
    /// Silence needed before a segment may be closed
    pub min_silence_duration_ms: u32,
    /// Silence shorter than this never closes a segment; must not be less
    /// than `min_speech_duration_ms`
    pub preferred_min_speech_duration_ms: u32,
    /// Segments reaching this length are split at the quietest recent frame
    pub preferred_speech_duration_ms: u32,
    pub window_size_samples: usize,
    /// Padding added to both sides of every segment
    pub speech_pad_ms: u32,
    pub look_back_frames: usize,
    pub look_forward_frames: usize,
}

impl Default for VadParameters {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            sampling_rate: 16000,
            min_speech_duration_ms: 250,
            min_silence_duration_ms: 100,
            preferred_min_speech_duration_ms: 250,
            preferred_speech_duration_ms: 6000,
            window_size_samples: 1536,
            speech_pad_ms: 30,
            look_back_frames: 10,
            look_forward_frames: 10,
        }
    }
}

impl VadParameters {
    /// Defaults with the segment length and silence settings of `profile`
    pub fn for_profile(profile: &crate::Profile) -> Self {
        Self {
            preferred_speech_duration_ms: profile.preferred_speech_duration_ms,
            min_silence_duration_ms: profile.min_silence_duration_ms(),
            ..Default::default()
        }
    }

    /// Check the duration settings against each other
    pub fn validate(&self) -> Result<()> {
        if self.preferred_min_speech_duration_ms < self.min_speech_duration_ms {
            return Err(Error::InvalidDurationConfig(format!(
                "preferred_min_speech_duration_ms ({}) must not be less than min_speech_duration_ms ({})",
                self.preferred_min_speech_duration_ms, self.min_speech_duration_ms
            )));
        }
        if self.preferred_speech_duration_ms <= self.min_speech_duration_ms {
            return Err(Error::InvalidDurationConfig(format!(
                "preferred_speech_duration_ms ({}) must be larger than min_speech_duration_ms ({})",
                self.preferred_speech_duration_ms, self.min_speech_duration_ms
            )));
        }
        if self.window_size_samples == 0 {
            return Err(Error::InvalidInput("window_size_samples must be positive".into()));
        }
        Ok(())
    }

    /// Convert a duration in milliseconds to samples at `sampling_rate`
    pub fn samples(&self, ms: u32) -> usize {
        self.sampling_rate as usize * ms as usize / 1000
    }
}

/// Per-frame speech probabilities, in frame order
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTrace {
    window_size_samples: usize,
    probs: Vec<f32>,
}

impl ProbabilityTrace {
    pub fn new(window_size_samples: usize, probs: Vec<f32>) -> Self {
        Self {
            window_size_samples,
            probs,
        }
    }

    pub fn window_size_samples(&self) -> usize {
        self.window_size_samples
    }

    pub fn probs(&self) -> &[f32] {
        &self.probs
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
}

/// Feed `audio` to `model` in consecutive frames of `window_size_samples`
///
/// The model is reset once before the first frame. The last frame is
/// zero-padded on the right, so the trace has `ceil(len / window)` entries.
pub fn probe<M: SpeechModel + ?Sized>(
    audio: &ArrayView1<f32>,
    window_size_samples: usize,
    sampling_rate: u32,
    model: &mut M,
) -> Result<ProbabilityTrace> {
    if window_size_samples == 0 {
        return Err(Error::InvalidInput("window_size_samples must be positive".into()));
    }

    model.reset_states();

    let audio_length_samples = audio.len();
    let mut probs = Vec::with_capacity(audio_length_samples.div_ceil(window_size_samples));
    let mut padded = Array1::<f32>::zeros(window_size_samples);

    for start in (0..audio_length_samples).step_by(window_size_samples) {
        let end = (start + window_size_samples).min(audio_length_samples);
        let chunk = audio.slice(s![start..end]);
        let prob = if chunk.len() == window_size_samples {
            model.speech_prob(&chunk, sampling_rate)?
        } else {
            padded.fill(0.0);
            padded.slice_mut(s![..chunk.len()]).assign(&chunk);
            model.speech_prob(&padded.view(), sampling_rate)?
        };
        probs.push(prob);
    }

    debug!("Probed {} frames of {} samples", probs.len(), window_size_samples);
    Ok(ProbabilityTrace::new(window_size_samples, probs))
}

/// Run the detection state machine over a probability trace
///
/// Returns unpadded segments in sample offsets, ordered and non-overlapping.
/// A segment still open when the trace ends is closed at
/// `audio_length_samples`.
pub fn detect(
    trace: &ProbabilityTrace,
    audio_length_samples: usize,
    params: &VadParameters,
) -> Vec<Segment> {
    let window = trace.window_size_samples();
    let probs = trace.probs();
    let threshold = params.threshold;
    let neg_threshold = threshold - NEG_THRESHOLD_OFFSET;

    let min_speech_samples = params.samples(params.min_speech_duration_ms);
    let min_silence_samples = params.samples(params.min_silence_duration_ms);
    let preferred_min_speech_samples = params.samples(params.preferred_min_speech_duration_ms);
    let preferred_speech_samples = params.samples(params.preferred_speech_duration_ms);

    let mut speeches = Vec::new();
    // Some while triggered
    let mut current: Option<OpenSegment> = None;
    // Offset where the pending silence began
    let mut temp_end: Option<usize> = None;

    for (i, &prob) in probs.iter().enumerate() {
        let offset = window * i;

        if prob >= threshold && temp_end.is_some() {
            temp_end = None;
        }

        let Some(open) = current else {
            if prob >= threshold {
                current = Some(OpenSegment { start: offset });
            }
            continue;
        };

        if prob >= threshold {
            if offset.saturating_sub(open.start) >= preferred_speech_samples {
                let split = split_point(probs, i, open.start, window, params.look_back_frames);
                speeches.push(open.close(window * split));
                if split != i {
                    current = Some(OpenSegment {
                        start: window * (split + 1),
                    });
                } else {
                    temp_end = None;
                    current = None;
                }
            }
            continue;
        }

        if prob < neg_threshold {
            let silence_start = *temp_end.get_or_insert(offset);
            let silence = offset - silence_start;

            if silence < min_silence_samples {
                continue;
            }

            if silence < preferred_min_speech_samples {
                // Informational only: a short silence never closes a segment,
                // whether or not speech resumes right after it.
                let resumes = probs[i..]
                    .iter()
                    .take(params.look_forward_frames)
                    .any(|&p| p >= threshold);
                trace!("frame {}: short silence, speech resumes ahead: {}", i, resumes);
                continue;
            }

            let segment = open.close(silence_start);
            if segment.len() > min_speech_samples {
                speeches.push(segment);
            } else {
                debug!(
                    "Dropping {}-sample segment at {}: shorter than {} samples",
                    segment.len(),
                    segment.start,
                    min_speech_samples
                );
            }
            temp_end = None;
            current = None;
        }
    }

    if let Some(open) = current {
        speeches.push(open.close(audio_length_samples));
    }

    speeches
}

/// Index of the quietest frame in the look-back window before `i`
///
/// Only frames starting strictly after `start` are candidates, and a frame
/// must be strictly quieter than frame `i` to win, so the first minimum
/// scanning forward is chosen. Returns `i` when nothing is quieter.
fn split_point(probs: &[f32], i: usize, start: usize, window: usize, look_back: usize) -> usize {
    let mut min_ii = i;
    for ii in i.saturating_sub(look_back)..i {
        if window * ii <= start {
            continue;
        }
        if probs[ii] < probs[min_ii] {
            min_ii = ii;
        }
    }
    min_ii
}

/// Widen every segment by `pad_samples` on both sides
///
/// When two neighbours are closer than twice the padding, the gap between
/// them is split in half instead. Bounds stay within
/// `[0, audio_length_samples]`.
pub fn pad(segments: &mut [Segment], pad_samples: usize, audio_length_samples: usize) {
    let count = segments.len();
    for i in 0..count {
        if i == 0 {
            segments[0].start = segments[0].start.saturating_sub(pad_samples);
        }
        if i + 1 < count {
            let gap = segments[i + 1].start.saturating_sub(segments[i].end);
            if gap < 2 * pad_samples {
                segments[i].end += gap / 2;
                segments[i + 1].start = segments[i + 1].start.saturating_sub(gap / 2);
            } else {
                segments[i].end += pad_samples;
            }
        } else {
            segments[i].end = (segments[i].end + pad_samples).min(audio_length_samples);
        }
    }
}

/// Detect padded speech segments in `audio`
///
/// Validates `params`, casts sampling rates that are multiples of 16kHz down
/// to 16kHz by striding, probes the model, detects and pads. Returned bounds
/// are sample offsets at the original `params.sampling_rate`.
///
/// # Errors
///
/// Returns an error if the duration settings are inconsistent or the model
/// fails on any frame.
pub fn get_speech_timestamps<M: SpeechModel + ?Sized>(
    audio: &ArrayView1<f32>,
    model: &mut M,
    params: &VadParameters,
) -> Result<Vec<Segment>> {
    params.validate()?;

    let mut params = params.clone();
    let step = if params.sampling_rate > 16000 && params.sampling_rate % 16000 == 0 {
        let step = (params.sampling_rate / 16000) as usize;
        params.sampling_rate = 16000;
        warn!("Sampling rate is a multiple of 16000, casting to 16000 manually!");
        step
    } else {
        1
    };
    let audio = audio.slice(s![..;step as isize]);

    if params.sampling_rate == 8000 && params.window_size_samples > 768 {
        warn!(
            "window_size_samples is too big for 8000 sampling_rate! \
             Better set window_size_samples to 256, 512 or 768 for 8000 sample rate!"
        );
    }
    if !SUPPORTED_WINDOW_SIZES.contains(&params.window_size_samples) {
        warn!(
            "Unusual window_size_samples {}! Supported: [512, 1024, 1536] for 16000 \
             sampling_rate, [256, 512, 768] for 8000 sampling_rate",
            params.window_size_samples
        );
    }

    let audio_length_samples = audio.len();
    let trace = probe(&audio, params.window_size_samples, params.sampling_rate, model)?;
    let mut speeches = detect(&trace, audio_length_samples, &params);
    pad(&mut speeches, params.samples(params.speech_pad_ms), audio_length_samples);

    if step > 1 {
        for speech in &mut speeches {
            speech.start *= step;
            speech.end *= step;
        }
    }

    debug!("Detected {} speech segments", speeches.len());
    Ok(speeches)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Replays a fixed probability per frame and records what it was fed
    pub(crate) struct ScriptedModel {
        pub probs: Vec<f32>,
        pub next: usize,
        pub resets: usize,
        pub frames: Vec<Vec<f32>>,
    }

    impl ScriptedModel {
        pub fn new(probs: Vec<f32>) -> Self {
            Self {
                probs,
                next: 0,
                resets: 0,
                frames: Vec::new(),
            }
        }
    }

    impl SpeechModel for ScriptedModel {
        fn reset_states(&mut self) {
            self.next = 0;
            self.resets += 1;
        }

        fn speech_prob(&mut self, frame: &ArrayView1<f32>, _sampling_rate: u32) -> Result<f32> {
            self.frames.push(frame.to_vec());
            let prob = self.probs.get(self.next).copied().unwrap_or(0.0);
            self.next += 1;
            Ok(prob)
        }
    }

    struct FailingModel;

    impl SpeechModel for FailingModel {
        fn reset_states(&mut self) {}

        fn speech_prob(&mut self, _frame: &ArrayView1<f32>, _sampling_rate: u32) -> Result<f32> {
            Err(Error::ModelInference("boom".into()))
        }
    }

    /// `len` frames of `low` with `high` on the frames in `ranges`
    fn trace_with(len: usize, ranges: &[std::ops::Range<usize>], high: f32, low: f32) -> Vec<f32> {
        let mut probs = vec![low; len];
        for range in ranges {
            for p in &mut probs[range.clone()] {
                *p = high;
            }
        }
        probs
    }

    fn small_window_params() -> VadParameters {
        VadParameters {
            window_size_samples: 512,
            ..Default::default()
        }
    }

    #[test]
    fn test_probe_zero_pads_last_frame() {
        let audio = Array1::from_elem(1000, 1.0f32);
        let mut model = ScriptedModel::new(vec![0.2, 0.7]);
        let trace = probe(&audio.view(), 512, 16000, &mut model).unwrap();

        assert_eq!(trace.probs(), &[0.2, 0.7]);
        assert_eq!(model.resets, 1);
        assert_eq!(model.frames.len(), 2);
        assert!(model.frames.iter().all(|f| f.len() == 512));
        assert!(model.frames[1][..488].iter().all(|&x| x == 1.0));
        assert!(model.frames[1][488..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_probe_empty_audio() {
        let audio = Array1::<f32>::zeros(0);
        let mut model = ScriptedModel::new(vec![]);
        let trace = probe(&audio.view(), 512, 16000, &mut model).unwrap();
        assert!(trace.is_empty());
        assert_eq!(model.resets, 1);
    }

    #[test]
    fn test_probe_propagates_model_failure() {
        let audio = Array1::<f32>::zeros(2048);
        let result = probe(&audio.view(), 512, 16000, &mut FailingModel);
        assert!(matches!(result, Err(Error::ModelInference(_))));
    }

    #[test]
    fn test_detect_single_burst() {
        let probs = trace_with(100, &[10..31], 0.9, 0.1);
        let trace = ProbabilityTrace::new(1536, probs);
        let params = VadParameters {
            min_silence_duration_ms: 100,
            ..Default::default()
        };
        let segments = detect(&trace, 100 * 1536, &params);
        assert_eq!(segments, vec![Segment { start: 10 * 1536, end: 31 * 1536 }]);
    }

    #[test]
    fn test_detect_splits_sustained_speech() {
        let params = VadParameters {
            preferred_speech_duration_ms: 1000,
            ..small_window_params()
        };
        let trace = ProbabilityTrace::new(512, vec![0.9; 100]);
        let segments = detect(&trace, 100 * 512, &params);

        assert!(segments.len() >= 2);
        let limit = params.samples(1000) + params.look_back_frames * 512;
        for segment in &segments {
            assert!(segment.len() <= limit, "{:?} longer than {}", segment, limit);
        }
        // No frame is quieter than the cut frame, so the cut lands on it
        assert_eq!(segments[0], Segment { start: 0, end: 32 * 512 });
        assert_eq!(segments[1].start, 33 * 512);
    }

    #[test]
    fn test_detect_splits_at_quietest_recent_frame() {
        let params = VadParameters {
            preferred_speech_duration_ms: 1000,
            ..small_window_params()
        };
        let mut probs = vec![0.9; 40];
        probs[28] = 0.6;
        let trace = ProbabilityTrace::new(512, probs);
        let segments = detect(&trace, 40 * 512, &params);
        assert_eq!(
            segments,
            vec![
                Segment { start: 0, end: 28 * 512 },
                Segment { start: 29 * 512, end: 40 * 512 },
            ]
        );
    }

    #[test]
    fn test_detect_split_tie_prefers_earliest_frame() {
        let params = VadParameters {
            preferred_speech_duration_ms: 1000,
            ..small_window_params()
        };
        let mut probs = vec![0.9; 40];
        probs[25] = 0.6;
        probs[28] = 0.6;
        let trace = ProbabilityTrace::new(512, probs);
        let segments = detect(&trace, 40 * 512, &params);
        assert_eq!(segments[0], Segment { start: 0, end: 25 * 512 });
        assert_eq!(segments[1].start, 26 * 512);
    }

    #[test]
    fn test_detect_drops_short_burst() {
        let probs = trace_with(60, &[10..16], 0.9, 0.0);
        let trace = ProbabilityTrace::new(512, probs);
        let segments = detect(&trace, 60 * 512, &small_window_params());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_detect_short_silence_keeps_segment_open() {
        // 5 silent frames: past min_silence but short of preferred_min_speech.
        // The look-ahead does not change the outcome.
        let probs = trace_with(60, &[10..30, 35..60], 0.9, 0.0);
        let trace = ProbabilityTrace::new(512, probs);
        let segments = detect(&trace, 60 * 512, &small_window_params());
        assert_eq!(segments, vec![Segment { start: 10 * 512, end: 60 * 512 }]);
    }

    #[test]
    fn test_detect_long_silence_closes_segment() {
        let probs = trace_with(60, &[10..30, 40..60], 0.9, 0.0);
        let trace = ProbabilityTrace::new(512, probs);
        let segments = detect(&trace, 60 * 512, &small_window_params());
        assert_eq!(
            segments,
            vec![
                Segment { start: 10 * 512, end: 30 * 512 },
                Segment { start: 40 * 512, end: 60 * 512 },
            ]
        );
    }

    #[test]
    fn test_detect_hysteresis_band_does_not_start_silence() {
        let mut probs = trace_with(60, &[10..30], 0.9, 0.0);
        for p in &mut probs[30..50] {
            *p = 0.4;
        }
        let trace = ProbabilityTrace::new(512, probs);
        let segments = detect(&trace, 60 * 512, &small_window_params());
        assert_eq!(segments, vec![Segment { start: 10 * 512, end: 50 * 512 }]);
    }

    #[test]
    fn test_detect_open_segment_closed_at_audio_end() {
        let probs = trace_with(20, &[15..20], 0.9, 0.0);
        let trace = ProbabilityTrace::new(512, probs);
        let segments = detect(&trace, 20 * 512 - 100, &small_window_params());
        assert_eq!(segments, vec![Segment { start: 15 * 512, end: 20 * 512 - 100 }]);
    }

    #[test]
    fn test_detect_output_is_ordered_for_noisy_traces() {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        for round in 0..50 {
            let probs: Vec<f32> = (0..400)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    (state >> 40) as f32 / (1u64 << 24) as f32
                })
                .collect();
            let params = VadParameters {
                min_silence_duration_ms: [25, 50, 100][round % 3],
                preferred_speech_duration_ms: [3000, 6000, 8000][round % 3],
                ..small_window_params()
            };
            let total = probs.len() * 512;
            let mut segments = detect(&ProbabilityTrace::new(512, probs), total, &params);

            for segment in &segments {
                assert!(segment.end > segment.start);
            }
            for pair in segments.windows(2) {
                assert!(pair[0].start < pair[1].start);
                assert!(pair[0].end <= pair[1].start);
            }

            pad(&mut segments, params.samples(params.speech_pad_ms), total);
            for pair in segments.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlap after padding: {:?}", pair);
            }
            assert!(segments.iter().all(|s| s.end <= total));
        }
    }

    #[test]
    fn test_pad_zero_is_noop() {
        let original = vec![
            Segment { start: 100, end: 500 },
            Segment { start: 600, end: 900 },
        ];
        let mut segments = original.clone();
        pad(&mut segments, 0, 1000);
        pad(&mut segments, 0, 1000);
        assert_eq!(segments, original);
    }

    #[test]
    fn test_pad_splits_narrow_gaps() {
        let mut segments = vec![
            Segment { start: 100, end: 500 },
            Segment { start: 560, end: 900 },
            Segment { start: 2000, end: 2950 },
        ];
        pad(&mut segments, 50, 3000);
        assert_eq!(
            segments,
            vec![
                Segment { start: 50, end: 530 },
                Segment { start: 530, end: 950 },
                Segment { start: 2000, end: 3000 },
            ]
        );
    }

    #[test]
    fn test_pad_clamps_to_buffer() {
        let mut segments = vec![Segment { start: 10, end: 990 }];
        pad(&mut segments, 480, 1000);
        assert_eq!(segments, vec![Segment { start: 0, end: 1000 }]);
    }

    #[test]
    fn test_validate_duration_config() {
        let params = VadParameters {
            preferred_min_speech_duration_ms: 200,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidDurationConfig(_))));

        let params = VadParameters {
            preferred_speech_duration_ms: 250,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(Error::InvalidDurationConfig(_))));

        assert!(VadParameters::default().validate().is_ok());
    }

    #[test]
    fn test_get_speech_timestamps_rejects_bad_config_before_probing() {
        let audio = Array1::<f32>::zeros(4096);
        let mut model = ScriptedModel::new(vec![0.9; 8]);
        let params = VadParameters {
            preferred_speech_duration_ms: 100,
            ..Default::default()
        };
        let result = get_speech_timestamps(&audio.view(), &mut model, &params);
        assert!(matches!(result, Err(Error::InvalidDurationConfig(_))));
        assert!(model.frames.is_empty());
    }

    #[test]
    fn test_get_speech_timestamps_pads_detected_segment() {
        let audio = Array1::<f32>::zeros(100 * 1536);
        let mut model = ScriptedModel::new(trace_with(100, &[10..31], 0.9, 0.1));
        let segments =
            get_speech_timestamps(&audio.view(), &mut model, &VadParameters::default()).unwrap();
        assert_eq!(segments, vec![Segment { start: 10 * 1536 - 480, end: 31 * 1536 + 480 }]);
    }

    #[test]
    fn test_get_speech_timestamps_strides_multiple_of_16k() {
        let audio = Array1::<f32>::zeros(2 * 100 * 512);
        let mut model = ScriptedModel::new(trace_with(100, &[10..41], 0.9, 0.0));
        let params = VadParameters {
            sampling_rate: 32000,
            ..small_window_params()
        };
        let segments = get_speech_timestamps(&audio.view(), &mut model, &params).unwrap();
        assert_eq!(model.frames.len(), 100);
        assert_eq!(segments, vec![Segment { start: 2 * 4640, end: 2 * 21472 }]);
    }

    #[test]
    fn test_segment_to_seconds_and_back() {
        let segment = Segment { start: 16000, end: 40000 };
        let ts = segment.to_seconds(16000);
        assert_eq!(ts, SpeechTimestamps { start: 1.0, end: 2.5 });
        assert_eq!(ts.to_samples(16000, 32000), Segment { start: 16000, end: 32000 });
    }
}
