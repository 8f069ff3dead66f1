use crate::decision_maker::core::{Effect, Msg};
use crate::device_camera::interface::DeviceCamera;
use crate::image_classifier::interface::ImageClassifierLoader;
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    logger: Arc<dyn Logger>,
    device_camera: Arc<dyn DeviceCamera>,
    classifier_loader: Arc<dyn ImageClassifierLoader>,
}

impl RunEffect {
    pub fn new(
        logger: Arc<dyn Logger>,
        device_camera: Arc<dyn DeviceCamera>,
        classifier_loader: Arc<dyn ImageClassifierLoader>,
    ) -> Self {
        Self {
            logger: logger.with_namespace("effect"),
            device_camera,
            classifier_loader,
        }
    }

    /// Runs `effect` to completion and returns the message reporting its
    /// outcome, if it has one.
    pub fn run_effect(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::LoadModel => Some(Msg::ModelLoadDone(self.classifier_loader.load())),
            Effect::CaptureScreenshot => Some(Msg::ScreenshotDone(self.device_camera.screenshot())),
            Effect::ReadFile { path } => Some(Msg::FileReadDone(ImageData::read_file(&path))),
            Effect::Classify {
                generation,
                image,
                classifier,
            } => {
                let result = image
                    .decode()
                    .and_then(|decoded| classifier.classify(&decoded));
                Some(Msg::ClassifyDone { generation, result })
            }
            Effect::StopCamera => Some(Msg::CameraStopDone(self.device_camera.stop_tracks())),
            Effect::LogDecision(decision) => {
                let _ = self.logger.info(&decision.to_log_line());
                None
            }
            Effect::LogInfo(message) => {
                let _ = self.logger.info(&message);
                None
            }
            Effect::LogError(message) => {
                let _ = self.logger.error(&message);
                None
            }
        }
    }
}
