use cli::Args;
use config::{CameraKind, ClassifierKind, Config};
use decision_maker::core::Msg;
use decision_maker::main::DecisionMaker;
use decision_maker::run_effect::RunEffect;
use device_camera::{
    impl_fake::DeviceCameraFake, impl_still_file::DeviceCameraStillFile, interface::DeviceCamera,
};
use device_display::{impl_console::DeviceDisplayConsole, impl_gui::DeviceDisplayGui};
use image_classifier::impl_fake::{FakePredictions, ImageClassifierFake, ImageClassifierLoaderFake};
use image_classifier::impl_tract_onnx::ImageClassifierLoaderTractOnnx;
use image_classifier::interface::ImageClassifierLoader;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::sync::Arc;

mod cli;
mod config;
mod decision_maker;
mod device_camera;
mod device_display;
mod error;
mod image_classifier;
mod image_data;
mod library;

fn build_camera(config: &Config, logger: &Arc<dyn Logger>) -> Arc<dyn DeviceCamera> {
    match config.camera.kind {
        CameraKind::StillFile => Arc::new(DeviceCameraStillFile::new(
            config.camera.snapshot_path.clone(),
            logger.clone(),
        )),
        CameraKind::Fake => Arc::new(DeviceCameraFake::new(logger.clone())),
    }
}

fn build_classifier_loader(
    config: &Config,
    logger: &Arc<dyn Logger>,
) -> Arc<dyn ImageClassifierLoader> {
    match config.classifier.kind {
        ClassifierKind::TractOnnx => Arc::new(ImageClassifierLoaderTractOnnx::new(
            config.classifier.model.clone(),
            logger.clone(),
        )),
        ClassifierKind::Fake => {
            let classifier = Arc::new(ImageClassifierFake::new(
                logger.clone(),
                FakePredictions::Random {
                    top_k: config.classifier.model.top_k,
                },
            ));
            Arc::new(ImageClassifierLoaderFake::new(classifier))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let logger: Arc<dyn Logger> = Arc::new(LoggerConsole::new(config.logger_timezone()));

    let run_effect = RunEffect::new(
        logger.clone(),
        build_camera(&config, &logger),
        build_classifier_loader(&config, &logger),
    );

    if !args.classify.is_empty() {
        let decision_maker = DecisionMaker::new(
            config,
            logger,
            run_effect,
            Arc::new(DeviceDisplayConsole::new()),
        );
        decision_maker.run_inline()?;
        for path in args.classify {
            decision_maker.dispatch_inline(Msg::FileSelected(path))?;
        }
        return Ok(());
    }

    let device_display = Arc::new(DeviceDisplayGui::new(logger.clone()));
    let decision_maker = DecisionMaker::new(
        config.clone(),
        logger.clone(),
        run_effect,
        device_display.clone(),
    );
    let msg_sender = decision_maker.sender();

    std::thread::spawn(move || {
        if let Err(e) = decision_maker.run() {
            let _ = logger.error(&format!("Decision maker stopped: {}", e));
        }
    });

    device_display.run(&config.window, msg_sender)?;

    Ok(())
}
