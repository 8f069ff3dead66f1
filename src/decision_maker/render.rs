use crate::config::Config;
use crate::decision_maker::core::{CameraState, ClassifierState, Model, Phase};
use crate::image_data::ImageData;

#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
    pub class_name: String,
    pub probability: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageView {
    /// Changes whenever the image is replaced, so displays can cache decoded
    /// textures.
    pub generation: u64,
    pub data: ImageData,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct View {
    pub status: String,
    pub result: Option<ResultView>,
    pub image: Option<ImageView>,
    pub capture_enabled: bool,
}

pub fn render(config: &Config, model: &Model) -> View {
    View {
        status: status_line(model),
        result: model.result.as_ref().map(|result| ResultView {
            class_name: result.label().to_string(),
            probability: format!(
                "{:.*}",
                config.probability_decimals,
                result.probability()
            ),
        }),
        image: model.image.as_ref().map(|data| ImageView {
            generation: model.generation,
            data: data.clone(),
        }),
        capture_enabled: model.camera == CameraState::Streaming,
    }
}

fn status_line(model: &Model) -> String {
    match (&model.classifier, model.phase) {
        (ClassifierState::Loading, _) => "Loading model...".to_string(),
        (ClassifierState::Unavailable, _) => "Model unavailable".to_string(),
        (ClassifierState::Loaded(_), Phase::Idle) => "Ready".to_string(),
        (ClassifierState::Loaded(_), Phase::ImageCaptured) => "Image captured".to_string(),
        (ClassifierState::Loaded(_), Phase::Classifying) => "Classifying...".to_string(),
        (ClassifierState::Loaded(_), Phase::Classified) => "Classified".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::interface::Classification;

    #[test]
    fn test_probability_has_four_decimals() {
        let config = Config::default();
        let model = Model {
            result: Some(Classification::new("cat", 0.92).unwrap()),
            ..Model::default()
        };

        let view = render(&config, &model);

        assert_eq!(
            view.result,
            Some(ResultView {
                class_name: "cat".to_string(),
                probability: "0.9200".to_string(),
            })
        );
    }

    #[test]
    fn test_probability_rounds() {
        let config = Config::default();
        let model = Model {
            result: Some(Classification::new("dog", 0.123456).unwrap()),
            ..Model::default()
        };

        let view = render(&config, &model);

        assert_eq!(view.result.unwrap().probability, "0.1235");
    }

    #[test]
    fn test_initial_view() {
        let view = render(&Config::default(), &Model::default());

        assert_eq!(view.status, "Loading model...");
        assert_eq!(view.result, None);
        assert_eq!(view.image, None);
        assert!(view.capture_enabled);
    }

    #[test]
    fn test_capture_disabled_once_camera_stopped() {
        let model = Model {
            classifier: ClassifierState::Unavailable,
            camera: CameraState::Stopped,
            ..Model::default()
        };

        let view = render(&Config::default(), &model);

        assert_eq!(view.status, "Model unavailable");
        assert!(!view.capture_enabled);
    }
}
