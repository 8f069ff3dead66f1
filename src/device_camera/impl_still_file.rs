use crate::device_camera::interface::DeviceCamera;
use crate::error::{Error, Result};
use crate::image_data::ImageData;
use crate::library::logger::interface::Logger;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Camera backed by a snapshot file that an external capture tool keeps
/// overwriting (for example `fswebcam --loop 1 webcam/latest.jpg`).
pub struct DeviceCameraStillFile {
    snapshot_path: PathBuf,
    logger: Arc<dyn Logger>,
    streaming: AtomicBool,
}

impl DeviceCameraStillFile {
    pub fn new(snapshot_path: PathBuf, logger: Arc<dyn Logger>) -> Self {
        Self {
            snapshot_path,
            logger: logger.with_namespace("camera").with_namespace("still_file"),
            streaming: AtomicBool::new(true),
        }
    }
}

impl DeviceCamera for DeviceCameraStillFile {
    fn screenshot(&self) -> Result<Option<ImageData>> {
        if !self.is_streaming() {
            return Ok(None);
        }
        match std::fs::read(&self.snapshot_path) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(ImageData::from_encoded(&bytes))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                self.logger.info(&format!(
                    "No snapshot at {} yet",
                    self.snapshot_path.display()
                ))?;
                Ok(None)
            }
            Err(e) => Err(Error::Camera(format!(
                "failed to read {}: {}",
                self.snapshot_path.display(),
                e
            ))),
        }
    }

    fn is_streaming(&self) -> bool {
        self.streaming.load(Ordering::SeqCst)
    }

    fn stop_tracks(&self) -> Result<usize> {
        if !self.streaming.swap(false, Ordering::SeqCst) {
            return Ok(0);
        }
        self.logger.info("Stopped reading snapshots")?;
        Ok(1)
    }
}
