use crate::error::{Error, Result};
use image::DynamicImage;
use std::sync::Arc;

/// A single prediction. The probability is always a finite value in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    label: String,
    probability: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, probability: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(Error::InvalidProbability(probability));
        }
        Ok(Self {
            label: label.into(),
            probability,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }
}

pub trait ImageClassifier: Send + Sync {
    /// Predictions ordered by descending probability.
    fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>>;
}

pub trait ImageClassifierLoader: Send + Sync {
    fn load(&self) -> Result<ClassifierHandle>;
}

/// Shared reference to a loaded classifier.
#[derive(Clone)]
pub struct ClassifierHandle(Arc<dyn ImageClassifier>);

impl ClassifierHandle {
    pub fn new(classifier: Arc<dyn ImageClassifier>) -> Self {
        Self(classifier)
    }

    pub fn classify(&self, image: &DynamicImage) -> Result<Vec<Classification>> {
        self.0.classify(image)
    }
}

impl std::fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClassifierHandle")
    }
}

impl PartialEq for ClassifierHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
