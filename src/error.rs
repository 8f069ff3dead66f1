#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid data url: {0}")]
    InvalidDataUrl(String),

    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f32),

    #[error("model error: {0}")]
    Model(String),

    #[error("classifier returned no predictions")]
    NoPredictions,

    #[error("camera error: {0}")]
    Camera(String),

    #[error("display error: {0}")]
    Display(String),

    #[error("runtime stopped: {0}")]
    Stopped(String),

    #[error("usage: {0}")]
    Usage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
