use crate::config::Config;
use crate::error::Error;
use crate::image_classifier::interface::{Classification, ClassifierHandle};
use crate::image_data::ImageData;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum ClassifierState {
    #[default]
    Loading,
    Loaded(ClassifierHandle),
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CameraState {
    #[default]
    Streaming,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    ImageCaptured,
    Classifying,
    Classified,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Model {
    pub classifier: ClassifierState,
    pub camera: CameraState,
    pub phase: Phase,
    pub image: Option<ImageData>,
    pub result: Option<Classification>,
    /// Bumped for every new image; classifications started for an older
    /// image are dropped when they complete.
    pub generation: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    Positive { label: String },
    Negative,
}

impl Decision {
    pub fn evaluate(classification: &Classification, threshold: f32) -> Self {
        if classification.probability() > threshold {
            Decision::Positive {
                label: classification.label().to_string(),
            }
        } else {
            Decision::Negative
        }
    }

    pub fn to_log_line(&self) -> String {
        match self {
            Decision::Positive { label } => format!("Positive decision: {}", label),
            Decision::Negative => "Negative decision".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    ModelLoadDone(Result<ClassifierHandle, Error>),
    CaptureRequested,
    ScreenshotDone(Result<Option<ImageData>, Error>),
    FileSelected(PathBuf),
    FileReadDone(Result<ImageData, Error>),
    ClassifyDone {
        generation: u64,
        result: Result<Vec<Classification>, Error>,
    },
    CameraStopDone(Result<usize, Error>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadModel,
    CaptureScreenshot,
    ReadFile {
        path: PathBuf,
    },
    Classify {
        generation: u64,
        image: ImageData,
        classifier: ClassifierHandle,
    },
    StopCamera,
    LogDecision(Decision),
    LogInfo(String),
    LogError(String),
}

pub fn init() -> (Model, Vec<Effect>) {
    (Model::default(), vec![Effect::LoadModel])
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::ModelLoadDone(Ok(classifier)) => (
            Model {
                classifier: ClassifierState::Loaded(classifier),
                ..model
            },
            vec![],
        ),

        Msg::ModelLoadDone(Err(e)) => (
            Model {
                classifier: ClassifierState::Unavailable,
                ..model
            },
            vec![Effect::LogError(format!("Failed to load model: {}", e))],
        ),

        Msg::CaptureRequested => (model, vec![Effect::CaptureScreenshot]),

        Msg::ScreenshotDone(Ok(Some(image))) => accept_image(model, image),

        Msg::ScreenshotDone(Ok(None)) => (model, vec![]),

        Msg::ScreenshotDone(Err(e)) => (
            model,
            vec![Effect::LogError(format!("Failed to capture frame: {}", e))],
        ),

        Msg::FileSelected(path) => (model, vec![Effect::ReadFile { path }]),

        Msg::FileReadDone(Ok(image)) => {
            let (mut model, mut effects) = accept_image(model, image);
            if model.camera == CameraState::Streaming {
                model.camera = CameraState::Stopped;
                effects.push(Effect::StopCamera);
            }
            (model, effects)
        }

        Msg::FileReadDone(Err(e)) => (
            model,
            vec![Effect::LogError(format!("Failed to read file: {}", e))],
        ),

        Msg::ClassifyDone { generation, .. } if generation != model.generation => (
            model,
            vec![Effect::LogInfo(format!(
                "Discarding stale classification for image {}",
                generation
            ))],
        ),

        Msg::ClassifyDone {
            result: Ok(predictions),
            ..
        } => match predictions.into_iter().next() {
            Some(top) => {
                let decision = Decision::evaluate(&top, config.decision_threshold);
                (
                    Model {
                        phase: Phase::Classified,
                        result: Some(top),
                        ..model
                    },
                    vec![Effect::LogDecision(decision)],
                )
            }
            None => (
                Model {
                    phase: Phase::ImageCaptured,
                    ..model
                },
                vec![Effect::LogError(Error::NoPredictions.to_string())],
            ),
        },

        Msg::ClassifyDone { result: Err(e), .. } => (
            Model {
                phase: Phase::ImageCaptured,
                ..model
            },
            vec![Effect::LogError(format!("Failed to classify image: {}", e))],
        ),

        Msg::CameraStopDone(Ok(_)) => (model, vec![]),

        Msg::CameraStopDone(Err(e)) => (
            model,
            vec![Effect::LogError(format!("Failed to stop camera: {}", e))],
        ),
    }
}

/// The previous result stays until the new classification completes.
fn accept_image(model: Model, image: ImageData) -> (Model, Vec<Effect>) {
    let generation = model.generation + 1;
    let classifier = match &model.classifier {
        ClassifierState::Loaded(classifier) => Some(classifier.clone()),
        ClassifierState::Loading | ClassifierState::Unavailable => None,
    };

    match classifier {
        Some(classifier) => (
            Model {
                phase: Phase::Classifying,
                image: Some(image.clone()),
                generation,
                ..model
            },
            vec![Effect::Classify {
                generation,
                image,
                classifier,
            }],
        ),
        None => (
            Model {
                phase: Phase::ImageCaptured,
                image: Some(image),
                generation,
                ..model
            },
            vec![],
        ),
    }
}
