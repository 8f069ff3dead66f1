use crate::decision_maker::render::View;
use crate::device_display::interface::DeviceDisplay;
use crate::error::Result;
use std::sync::{Mutex, PoisonError};

#[derive(Default)]
pub struct DeviceDisplayFake {
    views: Mutex<Vec<View>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<View> {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn renders(&self) -> usize {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn render(&self, view: &View) -> Result<()> {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
        Ok(())
    }
}
