use crate::config::Config;
use crate::decision_maker::core::Msg;
use crate::decision_maker::main::DecisionMaker;
use crate::decision_maker::run_effect::RunEffect;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::device_display::impl_fake::DeviceDisplayFake;
use crate::image_classifier::impl_fake::{
    FakePredictions, ImageClassifierFake, ImageClassifierLoaderFake,
};
use crate::image_classifier::interface::Classification;
use crate::library::logger::impl_fake::LoggerFake;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub enum CameraSetup {
    Streaming,
    NotReady,
    NoStream,
}

pub enum LoaderSetup {
    Loads,
    Fails(&'static str),
}

#[allow(dead_code)]
pub struct Fixture {
    pub config: Config,
    pub logger: LoggerFake,
    pub device_camera: Arc<DeviceCameraFake>,
    pub device_display: Arc<DeviceDisplayFake>,
    pub image_classifier: Arc<ImageClassifierFake>,
    pub decision_maker: DecisionMaker,
    pub dir: TempDir,
}

impl Fixture {
    pub fn new(predictions: FakePredictions) -> Self {
        Self::with(predictions, CameraSetup::Streaming, LoaderSetup::Loads)
    }

    pub fn scripted(label: &str, probability: f32) -> Self {
        Self::new(FakePredictions::Scripted(vec![
            Classification::new(label, probability).unwrap()
        ]))
    }

    pub fn with(predictions: FakePredictions, camera: CameraSetup, loader: LoaderSetup) -> Self {
        let config = Config::default();
        let logger = LoggerFake::new();
        let shared: Arc<LoggerFake> = Arc::new(logger.clone());

        let device_camera = Arc::new(match camera {
            CameraSetup::Streaming => DeviceCameraFake::new(shared.clone()),
            CameraSetup::NotReady => DeviceCameraFake::not_ready(shared.clone()),
            CameraSetup::NoStream => DeviceCameraFake::without_stream(shared.clone()),
        });
        let device_display = Arc::new(DeviceDisplayFake::new());
        let image_classifier = Arc::new(ImageClassifierFake::new(shared.clone(), predictions));
        let classifier_loader = Arc::new(match loader {
            LoaderSetup::Loads => ImageClassifierLoaderFake::new(image_classifier.clone()),
            LoaderSetup::Fails(message) => {
                ImageClassifierLoaderFake::failing(image_classifier.clone(), message)
            }
        });

        let run_effect = RunEffect::new(shared.clone(), device_camera.clone(), classifier_loader);
        let decision_maker = DecisionMaker::new(
            config.clone(),
            shared,
            run_effect,
            device_display.clone(),
        );

        Self {
            config,
            logger,
            device_camera,
            device_display,
            image_classifier,
            decision_maker,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn start(&self) {
        self.decision_maker.run_inline().unwrap();
    }

    pub fn send(&self, msg: Msg) {
        self.decision_maker.dispatch_inline(msg).unwrap();
    }

    /// Writes a small PNG into the fixture's temp dir and returns its path.
    pub fn image_file(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        sample_image().save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    pub fn upload(&self, name: &str) {
        let path = self.image_file(name);
        self.send(Msg::FileSelected(path));
    }
}

pub fn sample_image() -> DynamicImage {
    DynamicImage::ImageRgb8(ImageBuffer::from_fn(16, 12, |x, y| {
        Rgb([(x * 10) as u8, (y * 20) as u8, 40])
    }))
}
