use crate::error::{Error, Result};
use crate::image_classifier::interface::{
    Classification, ClassifierHandle, ImageClassifier, ImageClassifierLoader,
};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const OBJECTS: &[&str] = &[
    "dog", "cat", "person", "car", "chair", "table", "bird", "tree", "bicycle", "book", "laptop",
    "phone", "cup", "bottle", "keyboard", "mouse", "plant", "clock",
];

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum FakePredictions {
    Scripted(Vec<Classification>),
    Random { top_k: usize },
    Failing(String),
}

pub struct ImageClassifierFake {
    logger: Arc<dyn Logger>,
    predictions: FakePredictions,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger>, predictions: FakePredictions) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            predictions,
            calls: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn random_predictions(top_k: usize) -> Result<Vec<Classification>> {
    let mut rng = rand::rng();
    let mut remaining = 1.0f32;
    let mut predictions = OBJECTS
        .choose_multiple(&mut rng, top_k.max(1))
        .map(|label| {
            let probability = rng.random::<f32>() * remaining;
            remaining -= probability;
            Classification::new(*label, probability)
        })
        .collect::<Result<Vec<_>>>()?;

    predictions.sort_by(|a, b| b.probability().total_cmp(&a.probability()));

    Ok(predictions)
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.logger.info(&format!(
            "Classifying {}x{} image...",
            image.width(),
            image.height()
        ))?;

        match &self.predictions {
            FakePredictions::Scripted(predictions) => Ok(predictions.clone()),
            FakePredictions::Random { top_k } => random_predictions(*top_k),
            FakePredictions::Failing(message) => Err(Error::Model(message.clone())),
        }
    }
}

pub struct ImageClassifierLoaderFake {
    classifier: Arc<ImageClassifierFake>,
    load_error: Option<String>,
}

impl ImageClassifierLoaderFake {
    pub fn new(classifier: Arc<ImageClassifierFake>) -> Self {
        Self {
            classifier,
            load_error: None,
        }
    }

    #[cfg(test)]
    pub fn failing(classifier: Arc<ImageClassifierFake>, message: &str) -> Self {
        Self {
            classifier,
            load_error: Some(message.to_string()),
        }
    }
}

impl ImageClassifierLoader for ImageClassifierLoaderFake {
    fn load(&self) -> Result<ClassifierHandle> {
        match &self.load_error {
            Some(message) => Err(Error::Model(message.clone())),
            None => Ok(ClassifierHandle::new(self.classifier.clone())),
        }
    }
}
