use crate::config::ModelConfig;
use crate::labels::BREED_LABELS;
use async_trait::async_trait;
use image::imageops::FilterType;
use ndarray::{Array, Ix4};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::TensorRef;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use thiserror::Error;

const INPUT_SIZE: u32 = 224;
const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),
    #[error(
        "This model artifact was exported for a GPU execution provider and cannot be \
         loaded on a CPU-only machine. Re-export the model for CPU inference or run \
         the service on a GPU host. Original error: {0}"
    )]
    GpuOnlyArtifact(ort::Error),
    #[error("Failed to load model artifact: {0}")]
    Load(ort::Error),
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Model returned class id {0} outside the label set")]
    UnknownClass(usize),
}

/// Maps an uploaded image to its top-1 class label.
#[async_trait]
pub trait Classifier: Send + Sync + 'static {
    async fn classify(&self, image_data: &[u8]) -> Result<String, ClassifierError>;
}

fn decode_and_normalize(image_data: &[u8]) -> Result<Array<f32, Ix4>, ClassifierError> {
    let image_reader = image::ImageReader::new(std::io::Cursor::new(image_data))
        .with_guessed_format()
        .map_err(|e| ClassifierError::ImageDecode(e.to_string()))?;

    let original_img = image_reader
        .decode()
        .map_err(|e| ClassifierError::ImageDecode(e.to_string()))?;

    let img = original_img.resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::CatmullRom);
    let rgb = img.to_rgb8();

    let size = INPUT_SIZE as usize;
    let mut input = Array::zeros((1, 3, size, size));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let x = x as usize;
        let y = y as usize;
        for (channel, value) in pixel.0.iter().enumerate() {
            let scaled = (*value as f32) / 255.;
            input[[0, channel, y, x]] = (scaled - IMAGENET_MEAN[channel]) / IMAGENET_STD[channel];
        }
    }

    Ok(input)
}

fn top_class(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .reduce(|accum, row| if row.1 > accum.1 { row } else { accum })
        .map(|(index, _)| index)
}

fn is_gpu_only_error(err: &ort::Error) -> bool {
    mentions_gpu_provider(&err.to_string())
}

// Only the execution-provider names count; a load failure that merely
// mentions a GPU is not a GPU-only artifact.
fn mentions_gpu_provider(message: &str) -> bool {
    ["CUDA", "cuDNN", "TensorRT"]
        .iter()
        .any(|provider| message.contains(provider))
}

pub struct OrtClassifier {
    sessions: Vec<Arc<Mutex<Session>>>,
    counter: AtomicUsize,
}

impl OrtClassifier {
    pub fn new(model_config: &ModelConfig) -> Result<Self, ClassifierError> {
        let artifact_path = model_config.get_artifact_path();
        let num_instances = model_config.num_instances;

        let sessions = (0..num_instances)
            .map(|_| {
                let session = Session::builder()?
                    .with_optimization_level(GraphOptimizationLevel::Level3)?
                    .commit_from_file(&artifact_path)?;
                Ok(Arc::new(Mutex::new(session)))
            })
            .collect::<Result<Vec<_>, ort::Error>>()
            .map_err(|e| {
                if is_gpu_only_error(&e) {
                    ClassifierError::GpuOnlyArtifact(e)
                } else {
                    ClassifierError::Load(e)
                }
            })?;

        tracing::info!("Created {} ONNX sessions", num_instances);

        Ok(Self {
            sessions,
            counter: AtomicUsize::new(0),
        })
    }

    fn run_inference(&self, input: &Array<f32, Ix4>) -> Result<Vec<f32>, ClassifierError> {
        let index = self.counter.fetch_add(1, Ordering::SeqCst) % self.sessions.len();
        let session_arc = &self.sessions[index];
        let mut session = session_arc
            .lock()
            .map_err(|e| ClassifierError::Inference(format!("session mutex poisoned: {}", e)))?;

        tracing::debug!("Handling request with session {}", index);

        let tensor_ref = TensorRef::from_array_view(input.view())
            .map_err(|e| ClassifierError::Inference(format!("failed to build tensor: {}", e)))?;

        let input_tensor = ort::inputs![tensor_ref];

        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| ClassifierError::Inference("model has no outputs".to_string()))?;

        let outputs = session
            .run(input_tensor)
            .map_err(|e| ClassifierError::Inference(format!("inference failed: {}", e)))?;

        let (_, data) = outputs[output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("failed to extract tensor: {}", e)))?;

        Ok(data.to_vec())
    }
}

#[async_trait]
impl Classifier for OrtClassifier {
    async fn classify(&self, image_data: &[u8]) -> Result<String, ClassifierError> {
        let input = decode_and_normalize(image_data)?;
        let scores = self.run_inference(&input)?;

        let class_id = top_class(&scores)
            .ok_or_else(|| ClassifierError::Inference("model returned no scores".to_string()))?;

        let label = BREED_LABELS
            .get(class_id)
            .ok_or(ClassifierError::UnknownClass(class_id))?;

        Ok(label.to_string())
    }
}
