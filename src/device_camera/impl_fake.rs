use crate::device_camera::interface::DeviceCamera;
use crate::error::Result;
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub struct DeviceCameraFake {
    logger: Arc<dyn Logger>,
    ready: AtomicBool,
    streaming: AtomicBool,
    tracks: usize,
    stopped_tracks: AtomicUsize,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            ready: AtomicBool::new(true),
            streaming: AtomicBool::new(true),
            tracks: 1,
            stopped_tracks: AtomicUsize::new(0),
        }
    }

    #[cfg(test)]
    pub fn not_ready(logger: Arc<dyn Logger>) -> Self {
        let camera = Self::new(logger);
        camera.ready.store(false, Ordering::SeqCst);
        camera
    }

    #[cfg(test)]
    pub fn without_stream(logger: Arc<dyn Logger>) -> Self {
        let camera = Self::new(logger);
        camera.streaming.store(false, Ordering::SeqCst);
        camera
    }

    #[cfg(test)]
    pub fn stopped_tracks(&self) -> usize {
        self.stopped_tracks.load(Ordering::SeqCst)
    }

    fn frame() -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(64, 48, |x, y| {
            Rgb([(x * 4) as u8, (y * 5) as u8, 128])
        }))
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn screenshot(&self) -> Result<Option<ImageData>> {
        if !self.ready.load(Ordering::SeqCst) || !self.is_streaming() {
            self.logger.info("Camera not ready")?;
            return Ok(None);
        }
        self.logger.info("Capturing frame...")?;
        let frame = ImageData::from_image(&Self::frame(), ImageFormat::Jpeg)?;
        self.logger.info("Frame captured")?;
        Ok(Some(frame))
    }

    fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::SeqCst)
    }

    fn stop_tracks(&self) -> Result<usize> {
        if !self.streaming.swap(false, Ordering::SeqCst) {
            return Ok(0);
        }
        self.stopped_tracks.fetch_add(self.tracks, Ordering::SeqCst);
        self.logger.info("Camera stopped")?;
        Ok(self.tracks)
    }
}
