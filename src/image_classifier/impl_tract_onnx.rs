use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::image_classifier::interface::{
    Classification, ClassifierHandle, ImageClassifier, ImageClassifierLoader,
};
use crate::image_classifier::labels::load_labels;
use crate::image_classifier::tract::image::{resize_image_to_tensor, Normalization};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

fn model_error(error: impl std::fmt::Display) -> Error {
    Error::Model(error.to_string())
}

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self> {
        let labels = load_labels(&config.labels_path)?;
        let (height, width) = config.input_shape;

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .map_err(model_error)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())
            .map_err(model_error)?
            .into_optimized()
            .map_err(model_error)?
            .into_runnable()
            .map_err(model_error)?;

        Ok(Self {
            model,
            labels,
            config,
        })
    }

    fn label_for(&self, index: usize) -> String {
        self.labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("class_{}", index))
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>> {
        let (height, width) = self.config.input_shape;
        let input = resize_image_to_tensor(
            image,
            width,
            height,
            self.config.resize,
            Normalization {
                mean: self.config.mean,
                std: self.config.std,
            },
        )?;

        let outputs = self
            .model
            .run(tvec!(input.into_tvalue()))
            .map_err(model_error)?;
        let output = outputs
            .first()
            .ok_or(Error::NoPredictions)?
            .to_array_view::<f32>()
            .map_err(model_error)?;

        let scores: Vec<f32> = output.iter().copied().collect();
        top_k(&softmax(&scores), self.config.top_k)
            .into_iter()
            .map(|(index, probability)| Classification::new(self.label_for(index), probability))
            .collect()
    }
}

pub struct ImageClassifierLoaderTractOnnx {
    config: ModelConfig,
    logger: Arc<dyn Logger>,
}

impl ImageClassifierLoaderTractOnnx {
    pub fn new(config: ModelConfig, logger: Arc<dyn Logger>) -> Self {
        Self {
            config,
            logger: logger.with_namespace("image_classifier").with_namespace("tract_onnx"),
        }
    }
}

impl ImageClassifierLoader for ImageClassifierLoaderTractOnnx {
    fn load(&self) -> Result<ClassifierHandle> {
        self.logger.info(&format!(
            "Loading model {}",
            self.config.onnx_model_path.display()
        ))?;
        let classifier = ImageClassifierTractOnnx::new(self.config.clone())?;
        self.logger.info(&format!(
            "Model loaded with {} labels",
            classifier.labels.len()
        ))?;
        Ok(ClassifierHandle::new(Arc::new(classifier)))
    }
}

/// Passes probabilities through untouched when the model already ends in a
/// softmax layer, since those sum to one.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    if scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3 {
        return scores.to_vec();
    }

    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|&s| (s - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return vec![0.0; scores.len()];
    }
    exps.into_iter().map(|e| (e / total).min(1.0)).collect()
}

pub fn top_k(probabilities: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(k.max(1));
    ranked
}
