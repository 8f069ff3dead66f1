use crate::error::Result;
use crate::image_data::ImageData;

pub trait DeviceCamera: Send + Sync {
    /// Current frame, or `None` while the stream is not ready or has been
    /// stopped.
    fn screenshot(&self) -> Result<Option<ImageData>>;

    fn is_streaming(&self) -> bool;

    /// Stops every active track and returns how many were stopped.
    fn stop_tracks(&self) -> Result<usize>;
}
