//! Silero VAD model implementation
//!
//! This module provides the speech probability model used by the detector.
//! The detector only sees the [`SpeechModel`] capability, so tests and other
//! backends can stand in for the ONNX session.

use crate::{Error, Result};
use ndarray::{Array3, ArrayView1};
use std::path::Path;
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::Tensor,
};
use log::{info, debug};

const MODEL_URL: &str = "https://github.com/snakers4/silero-vad/raw/v4.0/files/silero_vad.onnx";

/// Width of the recurrent state carried between frames.
const STATE_SIZE: usize = 64;

/// A stateful frame classifier mapping one audio frame to a speech probability
///
/// Implementations may keep recurrent state between calls; `reset_states`
/// clears it and must be called before each full-buffer detection run.
pub trait SpeechModel {
    /// Clear any internal state carried between frames
    fn reset_states(&mut self);

    /// Return the probability in `[0, 1]` that `frame` contains speech
    fn speech_prob(&mut self, frame: &ArrayView1<f32>, sampling_rate: u32) -> Result<f32>;
}

/// Main Silero VAD model wrapper
///
/// Wraps an ONNX Runtime session for the Silero v4 graph, which accepts
/// frames of 512, 1024 or 1536 samples at 16kHz (256, 512 or 768 at 8kHz).
///
/// # Example
///
/// ```no_run
/// use ram_vad::{SileroVAD, SpeechModel};
/// use ndarray::Array1;
/// use std::path::Path;
///
/// let mut model = SileroVAD::new(Path::new("models/silero_vad.onnx"))?;
/// let frame = Array1::<f32>::zeros(1536);
/// let speech_prob = model.speech_prob(&frame.view(), 16000)?;
/// # Ok::<(), ram_vad::Error>(())
/// ```
pub struct SileroVAD {
    session: Session,
    h: Array3<f32>,
    c: Array3<f32>,
    last_sr: u32,
}

impl SileroVAD {
    /// Create a new Silero VAD model from an ONNX file
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the ONNX model file. If the file doesn't exist,
    ///                  the model is fetched from the Silero release into ONNX
    ///                  Runtime's model cache; `model_path` is only ever read.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file cannot be loaded or downloaded, or
    /// if the graph is invalid.
    pub fn new(model_path: &Path) -> Result<Self> {
        let builder = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?;

        let session = if model_path.exists() {
            info!("Loading model from local file: {:?}", model_path);
            builder.commit_from_file(model_path)?
        } else {
            info!("Model not found locally. Downloading from {}", MODEL_URL);
            builder.commit_from_url(MODEL_URL)?
        };

        if session.inputs.len() != 4 {
            return Err(Error::ModelLoad(format!(
                "expected a Silero v4 graph with 4 inputs, found {}",
                session.inputs.len()
            )));
        }

        info!("Model loaded successfully");

        Ok(Self {
            session,
            h: Array3::zeros((2, 1, STATE_SIZE)),
            c: Array3::zeros((2, 1, STATE_SIZE)),
            last_sr: 0,
        })
    }

    /// Validate input audio chunk
    fn validate_input(&self, x: &ArrayView1<f32>, sr: u32) -> Result<()> {
        if sr != 16000 && sr != 8000 {
            return Err(Error::InvalidInput(format!(
                "Sampling rate must be 8kHz or 16kHz, got {}",
                sr
            )));
        }
        if x.is_empty() || sr as usize / x.len() > 31 {
            return Err(Error::InvalidInput("Input audio chunk is too short".into()));
        }
        Ok(())
    }
}

impl SpeechModel for SileroVAD {
    fn reset_states(&mut self) {
        self.h.fill(0.0);
        self.c.fill(0.0);
        self.last_sr = 0;
    }

    fn speech_prob(&mut self, x: &ArrayView1<f32>, sr: u32) -> Result<f32> {
        self.validate_input(x, sr)?;

        if self.last_sr != 0 && self.last_sr != sr {
            self.reset_states();
        }

        debug!("Processing frame of {} samples", x.len());

        let inputs = vec![
            ("input", Tensor::from_array((vec![1usize, x.len()], x.to_vec()))?.into_dyn()),
            ("sr", Tensor::from_array((Vec::<usize>::new(), vec![sr as i64]))?.into_dyn()),
            ("h", Tensor::from_array((self.h.shape().to_vec(), self.h.iter().copied().collect::<Vec<f32>>()))?.into_dyn()),
            ("c", Tensor::from_array((self.c.shape().to_vec(), self.c.iter().copied().collect::<Vec<f32>>()))?.into_dyn()),
        ];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| Error::ModelInference(e.to_string()))?;

        let prob = outputs["output"]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::ModelInference(e.to_string()))?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| Error::ModelInference("model returned an empty output".into()))?;

        let hn: Vec<f32> = outputs["hn"]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::ModelInference(e.to_string()))?
            .iter()
            .copied()
            .collect();
        let cn: Vec<f32> = outputs["cn"]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::ModelInference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        self.h = Array3::from_shape_vec((2, 1, STATE_SIZE), hn)
            .map_err(|e| Error::ModelInference(e.to_string()))?;
        self.c = Array3::from_shape_vec((2, 1, STATE_SIZE), cn)
            .map_err(|e| Error::ModelInference(e.to_string()))?;
        self.last_sr = sr;

        Ok(prob)
    }
}
